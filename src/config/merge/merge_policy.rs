//! Merge rules: defaults, override order, conflict handling.

use crate::resolver::{DEFAULT_CONFIG_BUCKET, DEFAULT_FALLBACK_ROOTS};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("resolver.config_bucket", DEFAULT_CONFIG_BUCKET)?
        .set_default("resolver.fallback_roots", DEFAULT_FALLBACK_ROOTS.to_vec())?
        .set_default("overrides", Vec::<String>::new())
}
