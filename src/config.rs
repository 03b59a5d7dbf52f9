//! Configuration
//!
//! Layered settings for the store, the renderer and logging. Sources, lowest
//! precedence first: built-in defaults, the global file, workspace files, then
//! `DENDRITE__*` environment variables.

use crate::diff::ReconcileOptions;
use crate::error::ApiError;
use crate::link::LinkPolicy;
use crate::logging::LoggingConfig;
use crate::types::{DEFAULT_MAX_INTERFACE_LENGTH, DEFAULT_SCHEMA_PRIORITY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DendriteConfig {
    /// Directory holding the stored database.
    #[serde(default)]
    pub db_root: Option<PathBuf>,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub links: LinkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Total budget of an interface view, in bytes.
    #[serde(default = "default_max_interface_length")]
    pub max_interface_length: usize,

    /// Share of the explorer budget given to the schema; in (0, 1).
    #[serde(default = "default_schema_priority")]
    pub schema_priority: f64,

    /// Keep removed lines as deleted spans when replacing note content.
    #[serde(default)]
    pub track_deletions: bool,
}

fn default_max_interface_length() -> usize {
    DEFAULT_MAX_INTERFACE_LENGTH
}

fn default_schema_priority() -> f64 {
    DEFAULT_SCHEMA_PRIORITY
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_interface_length: default_max_interface_length(),
            schema_priority: default_schema_priority(),
            track_deletions: false,
        }
    }
}

impl RenderConfig {
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            track_deletions: self.track_deletions,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_interface_length == 0 {
            return Err("max_interface_length must be greater than zero".to_string());
        }
        if !(self.schema_priority > 0.0 && self.schema_priority < 1.0) {
            return Err(format!(
                "schema_priority must be between 0 and 1 (exclusive), got {}",
                self.schema_priority
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl LinkConfig {
    pub fn policy(&self) -> LinkPolicy {
        if self.enabled {
            LinkPolicy::default()
        } else {
            LinkPolicy::disabled()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Render(String),
    Logging(String),
    Storage(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Render(msg) => write!(f, "Render: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DendriteConfig {
    /// Every problem found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.render.validate() {
            errors.push(ValidationError::Render(e));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "unknown format '{}'",
                self.logging.format
            )));
        }
        if !matches!(self.logging.output.as_str(), "stdout" | "stderr" | "file") {
            errors.push(ValidationError::Logging(format!(
                "unknown output '{}'",
                self.logging.output
            )));
        }
        if let Some(root) = &self.db_root {
            if root.as_os_str().is_empty() {
                errors.push(ValidationError::Storage("db_root cannot be empty".to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load from `workspace_root` and validate.
    pub fn load_validated(workspace_root: &Path) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(workspace_root)?;
        config.validate().map_err(validation_failed)?;
        Ok(config)
    }

    /// `db_root` if set, otherwise `<workspace_root>/db`.
    pub fn resolve_db_root(&self, workspace_root: &Path) -> PathBuf {
        match &self.db_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => workspace_root.join(root),
            None => workspace_root.join("db"),
        }
    }
}

pub(crate) fn validation_failed(errors: Vec<ValidationError>) -> ApiError {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    ApiError::ConfigError(format!(
        "Configuration validation failed:\n{}",
        messages.join("\n")
    ))
}
