//! Build script for resort-cli.
//!
//! Generates the `resort.1` man page into `OUT_DIR` with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is restated here in outline.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in step with src/cli.rs.
fn build_cli() -> Command {
    Command::new("resort")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage resort bookings and site content")
        .long_about(
            "Command-line tool for recording room and event bookings and for curating \
             the gallery, explore cards, hero slides and site content of a resort website",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("RESORT_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("RESORT_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("RESORT_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the database and, optionally, a commented configuration file"),
            Command::new("book-room")
                .about("Book rooms and print the new booking code")
                .long_about("Validate a room booking and assign the next R-prefixed code"),
            Command::new("book-event")
                .about("Book an event and print the new booking code")
                .long_about("Validate an event booking and assign the next E-prefixed code"),
            Command::new("confirm")
                .about("Confirm a booking")
                .long_about("Mark a booking confirmed and send the guest confirmation"),
            Command::new("cancel")
                .about("Cancel a booking")
                .long_about("Mark a booking cancelled; bookings are never deleted"),
            Command::new("bookings")
                .about("List bookings of one kind")
                .long_about("List room or event bookings, newest first, in various formats"),
            Command::new("content")
                .about("Manage gallery images, explore cards and hero slides")
                .long_about(
                    "Add, update, list, soft delete, restore and purge items of a content collection",
                ),
            Command::new("site")
                .about("Show or edit the site content")
                .long_about("Show or edit landing page captions, contact details and social links"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory")
                .long_about("Display the path to the resort data directory"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("resort.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
