//! Context-Aware Configuration Resolver
//!
//! Resolution runs in four stages: candidate derivation, resource location,
//! value merging and mapping. The resolver holds only immutable state and can
//! be shared across threads; every request builds its own candidate list and
//! merged values.

pub mod builder;
pub mod candidates;
pub mod locator;
pub mod mapping;
pub mod merge;

pub use builder::ConfigurationBuilder;
pub use candidates::{
    Candidate, CandidateDeriver, CandidateList, CandidateOrigin, DEFAULT_CONFIG_BUCKET,
    DEFAULT_FALLBACK_ROOTS,
};
pub use locator::Located;

use crate::config::ResolverSettings;
use crate::error::ConfigurationError;
use crate::overrides::{NoOverrides, OverrideProvider};
use crate::schema::{Configuration, SchemaDescriptor, SchemaRegistry};
use crate::tree::{ResourcePath, ResourceStore};
use std::sync::Arc;

/// Entry point for configuration lookups
#[derive(Clone)]
pub struct ConfigurationResolver {
    store: Arc<dyn ResourceStore>,
    overrides: Arc<dyn OverrideProvider>,
    deriver: CandidateDeriver,
    schemas: SchemaRegistry,
}

impl ConfigurationResolver {
    /// Resolver with the default bucket, default fallback roots and no overrides
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self {
            store,
            overrides: Arc::new(NoOverrides),
            deriver: CandidateDeriver::default(),
            schemas: SchemaRegistry::new(),
        }
    }

    /// Resolver configured from settings
    pub fn from_settings(
        store: Arc<dyn ResourceStore>,
        settings: &ResolverSettings,
    ) -> Result<Self, ConfigurationError> {
        let deriver = CandidateDeriver::new(&settings.config_bucket, settings.fallback_paths()?)?;
        Ok(Self::new(store).with_deriver(deriver))
    }

    pub fn with_overrides(mut self, overrides: Arc<dyn OverrideProvider>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_deriver(mut self, deriver: CandidateDeriver) -> Self {
        self.deriver = deriver;
        self
    }

    /// Make the defaults of `T` available to raw value map lookups by name
    pub fn with_schema<T: Configuration>(mut self) -> Self {
        self.schemas.register::<T>();
        self
    }

    pub fn with_schema_descriptor(mut self, schema: &'static SchemaDescriptor) -> Self {
        self.schemas.register_descriptor(schema);
        self
    }

    /// Builder for lookups at `location`
    pub fn get(&self, location: &ResourcePath) -> ConfigurationBuilder<'_> {
        ConfigurationBuilder::new(self, location.clone())
    }

    /// Builder for lookups at a location given as text
    pub fn get_path(&self, location: &str) -> Result<ConfigurationBuilder<'_>, ConfigurationError> {
        let location = ResourcePath::parse(location)
            .map_err(|e| ConfigurationError::InvalidPath(e.to_string()))?;
        Ok(ConfigurationBuilder::new(self, location))
    }

    pub fn store(&self) -> &dyn ResourceStore {
        self.store.as_ref()
    }

    pub fn overrides(&self) -> &dyn OverrideProvider {
        self.overrides.as_ref()
    }

    pub fn deriver(&self) -> &CandidateDeriver {
        &self.deriver
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }
}

/// Check that a configuration name is a usable relative path
///
/// Empty names are reported as [`ConfigurationError::MissingName`].
pub fn validate_config_name(name: &str) -> Result<(), ConfigurationError> {
    if name.is_empty() {
        return Err(ConfigurationError::MissingName);
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(ConfigurationError::InvalidName(name.to_string()));
    }
    for segment in name.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." || segment.trim() != segment {
            return Err(ConfigurationError::InvalidName(name.to_string()));
        }
    }
    Ok(())
}
