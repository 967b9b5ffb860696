//! CLI command implementations.

mod defaults;
mod show;
mod validate;

use std::path::Path;

use coursetabs::{Course, TabList};
use serde_json::Value;

pub(crate) use defaults::DefaultsArgs;
pub(crate) use show::ShowArgs;
pub(crate) use validate::ValidateArgs;

use crate::error::CliError;

/// Read and parse a JSON file.
fn read_json(path: &Path) -> Result<Value, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a course from a JSON file.
///
/// Returns the course and whether the file declared its own feature flags.
/// Tabs are built separately so an invalid tab list surfaces as a tab
/// configuration error rather than a JSON error.
fn load_course(path: &Path) -> Result<(Course, bool), CliError> {
    let mut value = read_json(path)?;
    let has_features = value.get("features").is_some();
    let tabs = value
        .as_object_mut()
        .and_then(|course| course.remove("tabs"))
        .unwrap_or(Value::Null);
    let course: Course = serde_json::from_value(value)?;
    let course = course.with_tabs(TabList::from_json_value(tabs)?);
    if course.id.is_empty() {
        return Err(CliError::Validation(format!(
            "{}: course id is required",
            path.display()
        )));
    }
    tracing::info!(course = %course.id, tabs = course.tabs.len(), "Loaded course");
    Ok((course, has_features))
}
