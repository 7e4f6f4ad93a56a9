//! Value merge layer
//!
//! Precedence, lowest to highest: schema defaults, resource properties,
//! overrides. A source only contributes the keys it actually has.

use crate::overrides::OverrideProvider;
use crate::schema::SchemaDescriptor;
use crate::tree::{ResourcePath, ResourceStore};
use crate::types::ValueMap;
use tracing::{debug, warn};

/// Merges the three value sources for one resolved location
#[derive(Clone, Copy)]
pub struct MergeLayer<'a> {
    store: &'a dyn ResourceStore,
    overrides: &'a dyn OverrideProvider,
}

impl<'a> MergeLayer<'a> {
    pub fn new(store: &'a dyn ResourceStore, overrides: &'a dyn OverrideProvider) -> Self {
        Self { store, overrides }
    }

    pub fn store(&self) -> &'a dyn ResourceStore {
        self.store
    }

    /// Merge defaults, stored properties and overrides for `config_name`
    ///
    /// `resource` is the single location chosen by the locator, or `None` when
    /// nothing was found; values from other candidates never take part. A
    /// resource whose properties cannot be read contributes nothing.
    pub fn merge(
        &self,
        resource: Option<&ResourcePath>,
        schema: Option<&SchemaDescriptor>,
        config_name: &str,
    ) -> ValueMap {
        let stored = resource
            .and_then(|path| self.stored_properties(path))
            .unwrap_or_default();
        self.layer(resource, stored, schema, config_name)
    }

    /// Merge for one collection member; `None` when the member's properties
    /// cannot be read, so the caller can skip it.
    pub fn merge_member(
        &self,
        member: &ResourcePath,
        schema: Option<&SchemaDescriptor>,
        config_name: &str,
    ) -> Option<ValueMap> {
        let stored = self.stored_properties(member)?;
        Some(self.layer(Some(member), stored, schema, config_name))
    }

    fn layer(
        &self,
        resource: Option<&ResourcePath>,
        stored: ValueMap,
        schema: Option<&SchemaDescriptor>,
        config_name: &str,
    ) -> ValueMap {
        let mut merged = schema
            .map(SchemaDescriptor::default_values)
            .unwrap_or_default();
        let defaults = merged.len();
        merged.extend_from(&stored);

        let overrides = self.overrides.overrides(config_name);
        merged.extend_from(&overrides);

        debug!(
            config_name,
            resource = resource.map(|p| p.as_str()).unwrap_or("-"),
            defaults,
            stored = stored.len(),
            overrides = overrides.len(),
            "Merged configuration values"
        );
        merged
    }

    fn stored_properties(&self, path: &ResourcePath) -> Option<ValueMap> {
        match self.store.properties(path) {
            Ok(properties) => Some(properties.unwrap_or_default()),
            Err(err) => {
                warn!(path = %path, error = %err, "Reading configuration properties failed");
                None
            }
        }
    }
}
