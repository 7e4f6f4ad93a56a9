//! Configuration Schemas
//!
//! A schema is an explicit description of a configuration's named, typed
//! properties. Each schema type builds its [`SchemaDescriptor`] once and hands
//! out a `&'static` reference; the resolver never mutates it.

use crate::types::{FromValue, Value, ValueMap};
use std::collections::{BTreeMap, HashMap};

/// Scalar property types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Bool,
    Long,
    Double,
}

impl ScalarType {
    /// Zero value used when a property has no value or cannot be coerced
    pub fn zero(self) -> Value {
        match self {
            ScalarType::String => Value::String(String::new()),
            ScalarType::Bool => Value::Bool(false),
            ScalarType::Long => Value::Long(0),
            ScalarType::Double => Value::Double(0.0),
        }
    }

    /// Coerce a value to this type
    pub fn coerce(self, value: &Value) -> Option<Value> {
        match self {
            ScalarType::String => String::from_value(value).map(Value::String),
            ScalarType::Bool => bool::from_value(value).map(Value::Bool),
            ScalarType::Long => i64::from_value(value).map(Value::Long),
            ScalarType::Double => f64::from_value(value).map(Value::Double),
        }
    }

    /// Coerce a value to an array of this type, wrapping scalars
    pub fn coerce_array(self, value: &Value) -> Option<Value> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.coerce(item))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            Value::Map(_) => None,
            scalar => self.coerce(scalar).map(|item| Value::Array(vec![item])),
        }
    }
}

/// Declared kind of a schema property
#[derive(Debug, Clone, Copy)]
pub enum PropertyKind {
    Scalar(ScalarType),
    Array(ScalarType),
    /// Nested configuration stored in the child resource named after the property
    Nested(&'static SchemaDescriptor),
    /// Repeatable nested configuration: each child of the property's resource
    NestedCollection(&'static SchemaDescriptor),
}

impl PropertyKind {
    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            PropertyKind::Nested(_) | PropertyKind::NestedCollection(_)
        )
    }

    pub fn is_repeated(&self) -> bool {
        matches!(
            self,
            PropertyKind::Array(_) | PropertyKind::NestedCollection(_)
        )
    }
}

/// One declared property
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub name: String,
    pub kind: PropertyKind,
    pub default: Option<Value>,
    pub description: Option<String>,
}

/// Read-only description of a configuration type
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    name: String,
    properties: Vec<PropertyDescriptor>,
}

impl SchemaDescriptor {
    /// Schema with an explicit configuration name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Schema named after the simple name of `T`
    pub fn for_type<T: ?Sized>() -> Self {
        Self::new(simple_type_name::<T>())
    }

    /// Declare a property without a default
    pub fn property(self, name: impl Into<String>, kind: PropertyKind) -> Self {
        self.declare(name.into(), kind, None, None)
    }

    /// Declare a property with a default value
    pub fn property_with_default(
        self,
        name: impl Into<String>,
        kind: PropertyKind,
        default: impl Into<Value>,
    ) -> Self {
        self.declare(name.into(), kind, Some(default.into()), None)
    }

    pub fn string(self, name: &str, default: &str) -> Self {
        self.property_with_default(name, PropertyKind::Scalar(ScalarType::String), default)
    }

    pub fn boolean(self, name: &str, default: bool) -> Self {
        self.property_with_default(name, PropertyKind::Scalar(ScalarType::Bool), default)
    }

    pub fn long(self, name: &str, default: i64) -> Self {
        self.property_with_default(name, PropertyKind::Scalar(ScalarType::Long), default)
    }

    pub fn double(self, name: &str, default: f64) -> Self {
        self.property_with_default(name, PropertyKind::Scalar(ScalarType::Double), default)
    }

    pub fn nested(self, name: &str, schema: &'static SchemaDescriptor) -> Self {
        self.property(name, PropertyKind::Nested(schema))
    }

    pub fn nested_collection(self, name: &str, schema: &'static SchemaDescriptor) -> Self {
        self.property(name, PropertyKind::NestedCollection(schema))
    }

    /// Attach a description to the most recently declared property
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        if let Some(last) = self.properties.last_mut() {
            last.description = Some(description.into());
        }
        self
    }

    fn declare(
        mut self,
        name: String,
        kind: PropertyKind,
        default: Option<Value>,
        description: Option<String>,
    ) -> Self {
        self.properties.retain(|p| p.name != name);
        self.properties.push(PropertyDescriptor {
            name,
            kind,
            default,
            description,
        });
        self
    }

    /// Configuration name derived from the schema
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn property_named(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Declared defaults of all non-nested properties that have one
    pub fn default_values(&self) -> ValueMap {
        let mut defaults = ValueMap::new();
        for property in &self.properties {
            if property.kind.is_nested() {
                continue;
            }
            if let Some(default) = &property.default {
                defaults.insert(property.name.clone(), default.clone());
            }
        }
        defaults
    }
}

/// Last path segment of a type name, generics stripped
fn simple_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// A typed configuration
///
/// Implementors describe their properties once and build themselves from the
/// coerced values the resolver hands back.
pub trait Configuration: Sized {
    fn schema() -> &'static SchemaDescriptor;

    fn from_values(values: &SchemaValues) -> Self;
}

/// A mapped property slot
#[derive(Debug, Clone, PartialEq)]
pub enum MappedValue {
    Value(Value),
    Nested(SchemaValues),
    Collection(Vec<SchemaValues>),
}

/// Property values after merging and coercion to their declared types
///
/// Every declared property has a slot; accessors fall back to zero values for
/// undeclared names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaValues {
    entries: BTreeMap<String, MappedValue>,
}

impl SchemaValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: MappedValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&MappedValue> {
        self.entries.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.entries.get(name) {
            Some(MappedValue::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_as<T: FromValue>(&self, name: &str) -> Option<T> {
        self.value(name).and_then(T::from_value)
    }

    pub fn string(&self, name: &str) -> String {
        self.get_as(name).unwrap_or_default()
    }

    pub fn boolean(&self, name: &str) -> bool {
        self.get_as(name).unwrap_or_default()
    }

    pub fn long(&self, name: &str) -> i64 {
        self.get_as(name).unwrap_or_default()
    }

    pub fn double(&self, name: &str) -> f64 {
        self.get_as(name).unwrap_or_default()
    }

    pub fn strings(&self, name: &str) -> Vec<String> {
        self.get_as(name).unwrap_or_default()
    }

    pub fn longs(&self, name: &str) -> Vec<i64> {
        self.get_as(name).unwrap_or_default()
    }

    pub fn doubles(&self, name: &str) -> Vec<f64> {
        self.get_as(name).unwrap_or_default()
    }

    pub fn booleans(&self, name: &str) -> Vec<bool> {
        self.get_as(name).unwrap_or_default()
    }

    /// Nested configuration; zero-valued if the slot is missing
    pub fn nested<T: Configuration>(&self, name: &str) -> T {
        match self.entries.get(name) {
            Some(MappedValue::Nested(values)) => T::from_values(values),
            _ => T::from_values(&SchemaValues::default()),
        }
    }

    /// Repeated nested configuration, in stored order
    pub fn collection<T: Configuration>(&self, name: &str) -> Vec<T> {
        match self.entries.get(name) {
            Some(MappedValue::Collection(items)) => items.iter().map(T::from_values).collect(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Schemas known by configuration name
///
/// Gives raw value map lookups access to declared defaults.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    by_name: HashMap<String, &'static SchemaDescriptor>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Configuration>(&mut self) {
        self.register_descriptor(T::schema());
    }

    pub fn register_descriptor(&mut self, schema: &'static SchemaDescriptor) {
        self.by_name.insert(schema.name().to_string(), schema);
    }

    pub fn get(&self, name: &str) -> Option<&'static SchemaDescriptor> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
