//! Settings loading facade

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::CaconfConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Loads [`CaconfConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings for a workspace
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// files, environment.
    pub fn load(workspace_root: &Path) -> Result<CaconfConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: CaconfConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            bucket = %config.resolver.config_bucket,
            fallback_roots = config.resolver.fallback_roots.len(),
            "Loaded settings"
        );
        Ok(config)
    }

    /// Load settings from a single file on top of the defaults
    pub fn load_from_file(path: &Path) -> Result<CaconfConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only
    pub fn defaults() -> Result<CaconfConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .build()?
            .try_deserialize()
    }
}
