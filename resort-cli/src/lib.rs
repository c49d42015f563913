//! Library exports for resort-cli.
//!
//! The build script uses the CLI structure to generate the man page.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
