//! Main entry point for the resort CLI.
//!
//! Commands cover bookings (`book-room`, `book-event`, `confirm`, `cancel`,
//! `bookings`), the content collections (`content`) and the site content
//! record (`site`).

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use resort::BookingStatus;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    resort::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::BookRoom(cmd) => cmd.execute(&global),
        cli::Command::BookEvent(cmd) => cmd.execute(&global),
        cli::Command::Confirm(cmd) => cmd.execute(&global, BookingStatus::Confirmed),
        cli::Command::Cancel(cmd) => cmd.execute(&global, BookingStatus::Cancelled),
        cli::Command::Bookings(cmd) => cmd.execute(&global),
        cli::Command::Content(cmd) => cmd.execute(&global),
        cli::Command::Site(cmd) => cmd.execute(&global),
        cli::Command::ShowDataDir(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
