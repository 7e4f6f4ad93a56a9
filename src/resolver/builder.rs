//! Configuration builder
//!
//! An immutable request value: `name(..)` returns a new builder, so a builder
//! can be shared and specialized without affecting other users.

use crate::error::ConfigurationError;
use crate::resolver::candidates::CandidateList;
use crate::resolver::locator::{locate_all, locate_one, Located};
use crate::resolver::mapping::Mapper;
use crate::resolver::merge::MergeLayer;
use crate::resolver::{validate_config_name, ConfigurationResolver};
use crate::schema::{Configuration, SchemaDescriptor};
use crate::tree::{Adaptable, ResourcePath};
use crate::types::ValueMap;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct ConfigurationBuilder<'r> {
    resolver: &'r ConfigurationResolver,
    location: ResourcePath,
    name: Option<String>,
}

impl<'r> ConfigurationBuilder<'r> {
    pub(crate) fn new(resolver: &'r ConfigurationResolver, location: ResourcePath) -> Self {
        Self {
            resolver,
            location,
            name: None,
        }
    }

    /// Builder for the same location with an explicit configuration name
    pub fn name(&self, config_name: impl Into<String>) -> Self {
        Self {
            resolver: self.resolver,
            location: self.location.clone(),
            name: Some(config_name.into()),
        }
    }

    pub fn location(&self) -> &ResourcePath {
        &self.location
    }

    pub fn config_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Typed configuration; contains only defaults and overrides when no
    /// configuration resource exists.
    #[instrument(skip(self), fields(location = %self.location))]
    pub fn as_config<T: Configuration>(&self) -> Result<T, ConfigurationError> {
        let name = self.schema_name(T::schema())?;
        let candidates = self.candidates(&name)?;
        let located = locate_one(self.resolver.store(), &candidates);
        Ok(self.mapper().to_object::<T>(located.value.as_ref(), &name))
    }

    /// Typed configuration for each member of the configuration collection;
    /// members whose properties cannot be read are skipped
    #[instrument(skip(self), fields(location = %self.location))]
    pub fn as_config_collection<T: Configuration>(&self) -> Result<Vec<T>, ConfigurationError> {
        let name = self.schema_name(T::schema())?;
        let members = self.members(&name)?;
        let mapper = self.mapper();
        Ok(members
            .value
            .iter()
            .filter_map(|member| mapper.to_member_object::<T>(member, &member_name(&name, member)))
            .collect())
    }

    /// Raw property map; empty when nothing is found unless defaults of a
    /// registered schema or overrides contribute keys.
    #[instrument(skip(self), fields(location = %self.location))]
    pub fn as_value_map(&self) -> Result<ValueMap, ConfigurationError> {
        let name = self.required_name()?;
        let candidates = self.candidates(&name)?;
        let located = locate_one(self.resolver.store(), &candidates);
        let schema = self.resolver.schemas().get(&name);
        Ok(self
            .mapper()
            .to_value_map(located.value.as_ref(), schema, &name))
    }

    /// Raw property maps of each readable collection member
    #[instrument(skip(self), fields(location = %self.location))]
    pub fn as_value_map_collection(&self) -> Result<Vec<ValueMap>, ConfigurationError> {
        let name = self.required_name()?;
        let members = self.members(&name)?;
        let schema = self.resolver.schemas().get(&name);
        let mapper = self.mapper();
        Ok(members
            .value
            .iter()
            .filter_map(|member| mapper.to_member_value_map(member, schema, &member_name(&name, member)))
            .collect())
    }

    /// Resolved resource adapted by the store; `None` if nothing was found or
    /// the resource cannot be adapted. Defaults and overrides do not apply.
    ///
    /// Fails with [`ConfigurationError::StoreUnavailable`] only if every
    /// candidate lookup failed.
    #[instrument(skip(self), fields(location = %self.location))]
    pub fn as_adaptable<T: Adaptable>(&self) -> Result<Option<T>, ConfigurationError> {
        let name = self.required_name()?;
        let candidates = self.candidates(&name)?;
        let located = locate_one(self.resolver.store(), &candidates);
        check_store_available(&name, &located)?;
        Ok(located
            .value
            .as_ref()
            .and_then(|path| self.mapper().to_adapted::<T>(path)))
    }

    /// Adapted collection members; members that cannot be adapted are skipped
    #[instrument(skip(self), fields(location = %self.location))]
    pub fn as_adaptable_collection<T: Adaptable>(&self) -> Result<Vec<T>, ConfigurationError> {
        let name = self.required_name()?;
        let members = self.members(&name)?;
        check_store_available(&name, &members)?;
        let mapper = self.mapper();
        Ok(members
            .value
            .iter()
            .filter_map(|member| {
                let adapted = mapper.to_adapted::<T>(member);
                if adapted.is_none() {
                    debug!(member = %member, "Skipping collection member");
                }
                adapted
            })
            .collect())
    }

    /// Whether a configuration resource exists for the schema's name (or the
    /// explicit name). Defaults and overrides are not considered.
    pub fn has<T: Configuration>(&self) -> Result<bool, ConfigurationError> {
        let name = self.schema_name(T::schema())?;
        self.exists(&name)
    }

    /// Whether a configuration resource named `config_name` exists anywhere in
    /// the fallback chain
    pub fn has_name(&self, config_name: &str) -> Result<bool, ConfigurationError> {
        self.exists(config_name)
    }

    /// Candidate list for `config_name` at this builder's location
    pub fn candidates(&self, config_name: &str) -> Result<CandidateList, ConfigurationError> {
        self.resolver.deriver().derive(&self.location, config_name)
    }

    fn exists(&self, config_name: &str) -> Result<bool, ConfigurationError> {
        let candidates = self.candidates(config_name)?;
        let located = locate_one(self.resolver.store(), &candidates);
        Ok(located.value.is_some())
    }

    fn members(&self, name: &str) -> Result<Located<Vec<ResourcePath>>, ConfigurationError> {
        let candidates = self.candidates(name)?;
        Ok(locate_all(self.resolver.store(), &candidates))
    }

    fn mapper(&self) -> Mapper<'r> {
        Mapper::new(MergeLayer::new(
            self.resolver.store(),
            self.resolver.overrides(),
        ))
    }

    /// Explicit name if given, else the name derived from the schema
    fn schema_name(&self, schema: &SchemaDescriptor) -> Result<String, ConfigurationError> {
        let name = self.name.as_deref().unwrap_or(schema.name());
        validate_config_name(name)?;
        Ok(name.to_string())
    }

    fn required_name(&self) -> Result<String, ConfigurationError> {
        let name = self.name.as_deref().ok_or(ConfigurationError::MissingName)?;
        validate_config_name(name)?;
        Ok(name.to_string())
    }
}

/// Configuration name of a collection member: `<collection>/<member>`
fn member_name(collection: &str, member: &ResourcePath) -> String {
    format!("{}/{}", collection, member.name())
}

fn check_store_available<T>(name: &str, located: &Located<T>) -> Result<(), ConfigurationError> {
    if located.all_failed() {
        warn!(config_name = name, failures = located.failures, "Configuration store unavailable");
        return Err(ConfigurationError::StoreUnavailable {
            name: name.to_string(),
            failures: located.failures,
        });
    }
    Ok(())
}
