//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BookEventCommand, BookRoomCommand, BookingsCommand, CompletionsCommand, ContentCommand,
    InitCommand, ShowDataDirCommand, SiteCommand, StatusCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for resort bookings and site content.
#[derive(Parser)]
#[command(name = "resort")]
#[command(version, about = "Manage resort bookings and site content", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "RESORT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "RESORT_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "RESORT_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Book rooms and print the new booking code
    BookRoom(BookRoomCommand),

    /// Book an event and print the new booking code
    BookEvent(BookEventCommand),

    /// Confirm a booking
    Confirm(StatusCommand),

    /// Cancel a booking
    Cancel(StatusCommand),

    /// List bookings of one kind
    Bookings(BookingsCommand),

    /// Manage gallery images, explore cards and hero slides
    Content(ContentCommand),

    /// Show or edit the site content
    Site(SiteCommand),

    /// Show the resolved data directory
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use resort::{BookingKind, BookingRef, ContentKind};

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_confirm_by_code() {
        let cli = Cli::try_parse_from(["resort", "confirm", "room", "R0000000007"]).unwrap();
        match cli.command {
            Command::Confirm(cmd) => {
                assert_eq!(cmd.kind, BookingKind::Room);
                assert!(matches!(cmd.booking, BookingRef::Code(_)));
            }
            _ => panic!("expected confirm"),
        }
    }

    #[test]
    fn test_parse_content_list_scope_flags() {
        let cli =
            Cli::try_parse_from(["resort", "content", "list", "hero", "--deleted"]).unwrap();
        match cli.command {
            Command::Content(cmd) => match cmd.action {
                crate::commands::content::ContentAction::List(args) => {
                    assert_eq!(args.kind, ContentKind::HeroSlide);
                    assert!(args.deleted);
                }
                _ => panic!("expected list"),
            },
            _ => panic!("expected content"),
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["resort", "content", "list", "posters"]).is_err());
        assert!(Cli::try_parse_from(["resort", "bookings", "spa"]).is_err());
    }
}
