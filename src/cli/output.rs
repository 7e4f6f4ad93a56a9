//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ConfigurationError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ConfigurationError) -> String {
    match e {
        ConfigurationError::MissingName => {
            "Error: no configuration name given (use --name)".to_string()
        }
        other => format!("Error: {}", other),
    }
}
