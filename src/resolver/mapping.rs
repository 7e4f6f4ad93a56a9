//! Mapping engine
//!
//! Turns merged values into typed configurations or plain value maps, and
//! hands resolved resources to the store's adaptation facility.

use crate::resolver::merge::MergeLayer;
use crate::schema::{Configuration, MappedValue, PropertyKind, SchemaDescriptor, SchemaValues};
use crate::tree::{adapt, Adaptable, ResourcePath};
use crate::types::{Value, ValueMap};
use tracing::{debug, warn};

#[derive(Clone, Copy)]
pub struct Mapper<'a> {
    merge: MergeLayer<'a>,
}

impl<'a> Mapper<'a> {
    pub fn new(merge: MergeLayer<'a>) -> Self {
        Self { merge }
    }

    /// Typed configuration for a resolved (or absent) resource
    pub fn to_object<T: Configuration>(&self, resource: Option<&ResourcePath>, config_name: &str) -> T {
        T::from_values(&self.map_schema(T::schema(), resource, config_name))
    }

    /// Typed configuration for a collection member; `None` when the member
    /// cannot be read
    pub fn to_member_object<T: Configuration>(&self, member: &ResourcePath, config_name: &str) -> Option<T> {
        self.map_member(T::schema(), member, config_name)
            .map(|values| T::from_values(&values))
    }

    /// Merge and coerce every declared property of `schema`
    ///
    /// Nested schemas resolve at `<resource>/<property>` under the
    /// configuration name `<config_name>/<property>`; repeated nested schemas
    /// map each child of that resource.
    pub fn map_schema(
        &self,
        schema: &SchemaDescriptor,
        resource: Option<&ResourcePath>,
        config_name: &str,
    ) -> SchemaValues {
        let merged = self.merge.merge(resource, Some(schema), config_name);
        self.map_merged(schema, resource, config_name, &merged)
    }

    /// Like [`Mapper::map_schema`] for a collection member, which is skipped
    /// (`None`) when its properties cannot be read
    pub fn map_member(
        &self,
        schema: &SchemaDescriptor,
        member: &ResourcePath,
        config_name: &str,
    ) -> Option<SchemaValues> {
        let Some(merged) = self.merge.merge_member(member, Some(schema), config_name) else {
            debug!(member = %member, "Skipping unreadable collection member");
            return None;
        };
        Some(self.map_merged(schema, Some(member), config_name, &merged))
    }

    fn map_merged(
        &self,
        schema: &SchemaDescriptor,
        resource: Option<&ResourcePath>,
        config_name: &str,
        merged: &ValueMap,
    ) -> SchemaValues {
        let mut values = SchemaValues::new();

        for property in schema.properties() {
            let slot = match property.kind {
                PropertyKind::Scalar(scalar) => MappedValue::Value(coerce_or_zero(
                    merged,
                    &property.name,
                    config_name,
                    |v| scalar.coerce(v),
                    || scalar.zero(),
                )),
                PropertyKind::Array(scalar) => MappedValue::Value(coerce_or_zero(
                    merged,
                    &property.name,
                    config_name,
                    |v| scalar.coerce_array(v),
                    || Value::Array(Vec::new()),
                )),
                PropertyKind::Nested(nested) => {
                    let sub_resource = child_path(resource, &property.name);
                    let sub_name = format!("{}/{}", config_name, property.name);
                    MappedValue::Nested(self.map_schema(nested, sub_resource.as_ref(), &sub_name))
                }
                PropertyKind::NestedCollection(nested) => {
                    let sub_name = format!("{}/{}", config_name, property.name);
                    let items = child_path(resource, &property.name)
                        .map(|container| self.map_members(nested, &container, &sub_name))
                        .unwrap_or_default();
                    MappedValue::Collection(items)
                }
            };
            values.insert(property.name.clone(), slot);
        }
        values
    }

    fn map_members(
        &self,
        schema: &SchemaDescriptor,
        container: &ResourcePath,
        config_name: &str,
    ) -> Vec<SchemaValues> {
        let children = match self.merge.store().children(container) {
            Ok(children) => children,
            Err(err) => {
                warn!(container = %container, error = %err, "Listing nested configurations failed");
                return Vec::new();
            }
        };
        children
            .iter()
            .filter_map(|child| {
                let item_name = format!("{}/{}", config_name, child.name());
                self.map_member(schema, child, &item_name)
            })
            .collect()
    }

    /// Merged values without coercion
    pub fn to_value_map(
        &self,
        resource: Option<&ResourcePath>,
        schema: Option<&SchemaDescriptor>,
        config_name: &str,
    ) -> ValueMap {
        self.merge.merge(resource, schema, config_name)
    }

    /// Merged values of a collection member; `None` when the member cannot
    /// be read
    pub fn to_member_value_map(
        &self,
        member: &ResourcePath,
        schema: Option<&SchemaDescriptor>,
        config_name: &str,
    ) -> Option<ValueMap> {
        let merged = self.merge.merge_member(member, schema, config_name);
        if merged.is_none() {
            debug!(member = %member, "Skipping unreadable collection member");
        }
        merged
    }

    /// Store adaptation of a resolved resource; defaults and overrides are
    /// not applied.
    pub fn to_adapted<T: Adaptable>(&self, resource: &ResourcePath) -> Option<T> {
        match adapt::<T>(self.merge.store(), resource) {
            Ok(Some(adapted)) => Some(adapted),
            Ok(None) => {
                debug!(path = %resource, adapt_to = std::any::type_name::<T>(), "Resource not adaptable");
                None
            }
            Err(err) => {
                warn!(path = %resource, error = %err, "Adapting configuration resource failed");
                None
            }
        }
    }
}

fn child_path(resource: Option<&ResourcePath>, name: &str) -> Option<ResourcePath> {
    let resource = resource?;
    match resource.join(name) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(path = %resource, property = name, error = %err, "Invalid nested configuration name");
            None
        }
    }
}

fn coerce_or_zero(
    merged: &ValueMap,
    name: &str,
    config_name: &str,
    coerce: impl Fn(&Value) -> Option<Value>,
    zero: impl Fn() -> Value,
) -> Value {
    let Some(raw) = merged.get(name) else {
        return zero();
    };
    match coerce(raw) {
        Some(value) => value,
        None => {
            debug!(
                config_name,
                property = name,
                found = raw.kind(),
                "Value not coercible to declared type, using zero value"
            );
            zero()
        }
    }
}
