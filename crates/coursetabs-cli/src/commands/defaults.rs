//! `coursetabs defaults` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use coursetabs::TabRecord;

use super::load_course;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the defaults command.
#[derive(Args)]
pub(crate) struct DefaultsArgs {
    /// Course JSON file.
    course: PathBuf,
}

impl DefaultsArgs {
    /// Execute the defaults command.
    ///
    /// Prints the course's tab list with the default tabs appended, as
    /// persisted records.
    ///
    /// # Errors
    ///
    /// Returns an error if the course cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let records = default_records(&self.course)?;
        output.result(&serde_json::to_string_pretty(&records)?);
        Ok(())
    }
}

/// Records of the course at `path` after default initialization.
fn default_records(path: &Path) -> Result<Vec<TabRecord>, CliError> {
    let (mut course, _) = load_course(path)?;
    Ok(course.initialize_default_tabs().serialize())
}
