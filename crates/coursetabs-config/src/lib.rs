//! Configuration management for course tabs.
//!
//! Parses `coursetabs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `links.base_url`
//! - every template under `links.routes`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override link base URL.
    pub base_url: Option<String>,
    /// Override student notes feature flag.
    pub student_notes: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "coursetabs.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform feature flags.
    pub features: FeaturesConfig,
    /// Link resolution settings.
    pub links: LinksConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Platform feature flags gating tab kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Course wiki.
    pub wiki: bool,
    /// Built-in discussion service.
    pub discussion_service: bool,
    /// Textbook tabs.
    pub textbooks: bool,
    /// Student notes.
    pub student_notes: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            wiki: true,
            discussion_service: true,
            textbooks: true,
            student_notes: false,
        }
    }
}

/// Link resolution settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Prefix for every resolved link. Empty means relative links.
    pub base_url: String,
    /// Route template overrides, keyed by route name.
    ///
    /// Templates use positional placeholders: `{0}` is the course id,
    /// `{1}` a slug or book index.
    pub routes: BTreeMap<String, String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`links.base_url`").
        field: String,
        /// Error message (e.g., "${`LMS_BASE_URL`} not set").
        message: String,
    },
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `coursetabs.toml` in current directory and parents.
    /// Without a file, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.links.base_url.clone_from(base_url);
        }
        if let Some(student_notes) = settings.student_notes {
            self.features.student_notes = student_notes;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and expansion
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.links.base_url.is_empty() {
            require_http_url(&self.links.base_url, "links.base_url")?;
        }

        for (route, template) in &self.links.routes {
            if template.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "links.routes.{route} cannot be empty"
                )));
            }
            if !template.contains("{0}") {
                return Err(ConfigError::Validation(format!(
                    "links.routes.{route} must contain the course id placeholder {{0}}"
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.links.base_url = expand::expand_env(&self.links.base_url, "links.base_url")?;
        for (route, template) in &mut self.links.routes {
            *template = expand::expand_env(template, &format!("links.routes.{route}"))?;
        }
        Ok(())
    }
}
