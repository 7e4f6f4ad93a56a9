//! Error types for context-aware configuration resolution.

use thiserror::Error;

/// Tree store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Record codec error: {0}")]
    Codec(String),

    #[error("Unsupported content format: {0}")]
    Format(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced by the configuration builder and its collaborators
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("No configuration name given and none can be derived")]
    MissingName,

    #[error("Invalid configuration name: {0}")]
    InvalidName(String),

    #[error("Invalid context path: {0}")]
    InvalidPath(String),

    #[error("Invalid override '{line}': {reason}")]
    InvalidOverride { line: String, reason: String },

    #[error("Configuration store unavailable for '{name}': all {failures} candidate lookups failed")]
    StoreUnavailable { name: String, failures: usize },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(err: config::ConfigError) -> Self {
        ConfigurationError::Settings(err.to_string())
    }
}
