//! CLI command implementations.
//!
//! - `init`: create the data directory and database
//! - `book_room`, `book_event`: record a booking and print its code
//! - `confirm`, `cancel`: change a booking's status
//! - `bookings`: list bookings of one kind
//! - `content`: manage gallery images, explore cards and hero slides
//! - `site`: show or edit the site content record
//! - `show_data_dir`: show the resolved data directory
//! - `completions`: generate shell completions

pub mod book;
pub mod bookings;
pub mod completions;
pub mod content;
pub mod init;
pub mod show_data_dir;
pub mod site;
pub mod status;

pub use book::{BookEventCommand, BookRoomCommand};
pub use bookings::BookingsCommand;
pub use completions::CompletionsCommand;
pub use content::ContentCommand;
pub use init::InitCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use site::SiteCommand;
pub use status::StatusCommand;
