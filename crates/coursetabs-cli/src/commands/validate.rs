//! `coursetabs validate` command implementation.

use std::path::PathBuf;

use clap::Args;
use coursetabs::TabList;

use super::read_json;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the validate command.
#[derive(Args)]
pub(crate) struct ValidateArgs {
    /// JSON file holding a tab list (an array of tab records).
    tabs: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the tab list is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let tabs = TabList::from_json_value(read_json(&self.tabs)?)?;
        output.success(&format!(
            "OK: {} ({} tabs)",
            self.tabs.display(),
            tabs.len()
        ));
        Ok(())
    }
}
