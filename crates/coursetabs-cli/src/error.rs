//! CLI error types.

use coursetabs::InvalidTabConfiguration;
use coursetabs_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tab configuration: {0}")]
    Tabs(#[from] InvalidTabConfiguration),

    #[error("{0}")]
    Validation(String),
}
