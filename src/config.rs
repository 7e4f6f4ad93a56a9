//! Settings
//!
//! Settings of the resolver itself: the configuration bucket name, the global
//! fallback roots, administrator overrides and logging. Loaded from layered
//! sources with environment variable overrides.

use crate::error::ConfigurationError;
use crate::logging::LoggingConfig;
use crate::overrides::StaticOverrideProvider;
use crate::resolver::{validate_config_name, DEFAULT_CONFIG_BUCKET, DEFAULT_FALLBACK_ROOTS};
use crate::tree::ResourcePath;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaconfConfig {
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Override lines, see [`StaticOverrideProvider::parse`]
    #[serde(default)]
    pub overrides: Vec<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Candidate derivation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Name of the configuration subtree below each context ancestor
    #[serde(default = "default_config_bucket")]
    pub config_bucket: String,

    /// Global fallback roots, in lookup order
    #[serde(default = "default_fallback_roots")]
    pub fallback_roots: Vec<String>,
}

fn default_config_bucket() -> String {
    DEFAULT_CONFIG_BUCKET.to_string()
}

fn default_fallback_roots() -> Vec<String> {
    DEFAULT_FALLBACK_ROOTS.iter().map(|r| r.to_string()).collect()
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            config_bucket: default_config_bucket(),
            fallback_roots: default_fallback_roots(),
        }
    }
}

/// Settings validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Resolver(String),
    Override(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Resolver(msg) => write!(f, "Resolver: {}", msg),
            ValidationError::Override(msg) => write!(f, "Override: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ResolverSettings {
    /// Fallback roots parsed as paths, order preserved
    pub fn fallback_paths(&self) -> Result<Vec<ResourcePath>, ConfigurationError> {
        self.fallback_roots
            .iter()
            .map(|root| {
                if !root.trim_start().starts_with('/') {
                    return Err(ConfigurationError::Settings(format!(
                        "fallback root must be absolute: '{}'",
                        root
                    )));
                }
                ResourcePath::parse(root).map_err(|e| ConfigurationError::Settings(e.to_string()))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if validate_config_name(&self.config_bucket).is_err() {
            return Err(format!(
                "Invalid configuration bucket '{}'",
                self.config_bucket
            ));
        }
        self.fallback_paths().map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl CaconfConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.resolver.validate() {
            errors.push(ValidationError::Resolver(e));
        }

        for line in &self.overrides {
            if let Err(e) = StaticOverrideProvider::parse([line]) {
                errors.push(ValidationError::Override(e.to_string()));
            }
        }

        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(ValidationError::Logging(format!(
                "Invalid log format: {}",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Override provider built from the configured override lines
    pub fn override_provider(&self) -> Result<StaticOverrideProvider, ConfigurationError> {
        StaticOverrideProvider::parse(&self.overrides)
    }
}
