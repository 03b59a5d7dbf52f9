//! Error types for the dendrite content store.

use std::path::PathBuf;
use thiserror::Error;

/// Store-level errors raised by the core operations.
///
/// `InvalidPath`, `NotFound` and `PermissionDenied` are caller-facing and leave
/// the store untouched. `InvariantViolation` marks a bug or corrupt input and
/// must abort the enclosing operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("{what} not found in path '{path}'")]
    NotFound { what: String, path: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(what: impl Into<String>, path: impl Into<String>) -> Self {
        StoreError::NotFound {
            what: what.into(),
            path: path.into(),
        }
    }

    /// True for errors that indicate a bug rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::InvariantViolation(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Errors surfaced by the outer layers (configuration, logging, CLI).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No database at {}. Run `dendrite init` or pass --db-root.", .0.display())]
    MissingDatabase(PathBuf),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
