//! Command to show the resolved data directory path.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;

/// Show the resolved data directory path.
#[derive(Args, Debug)]
pub struct ShowDataDirCommand {}

impl ShowDataDirCommand {
    /// Print the data directory other commands would use.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        println!("{}", resolve_data_dir(global)?.display());
        Ok(())
    }
}
