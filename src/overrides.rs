//! Administrator overrides
//!
//! Overrides take precedence over stored values and schema defaults. They are
//! keyed by configuration name and property name.

use crate::error::ConfigurationError;
use crate::types::{Value, ValueMap};
use std::collections::HashMap;
use tracing::debug;

/// Source of override values
pub trait OverrideProvider: Send + Sync {
    /// All override values declared for `config_name`
    fn overrides(&self, config_name: &str) -> ValueMap;

    fn get_override(&self, config_name: &str, property: &str) -> Option<Value> {
        self.overrides(config_name).get(property).cloned()
    }
}

/// Provider that never overrides anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideProvider for NoOverrides {
    fn overrides(&self, _config_name: &str) -> ValueMap {
        ValueMap::new()
    }

    fn get_override(&self, _config_name: &str, _property: &str) -> Option<Value> {
        None
    }
}

/// Fixed set of overrides
///
/// Can be parsed from administrator lines of the form
///
/// ```text
/// mail/host="smtp.example.com"
/// mail/port=2525
/// feature/flags={"beta": true, "limit": 10}
/// ```
///
/// The text after `=` is JSON; a bare word that is not valid JSON is taken as
/// a string. A JSON object assigned to a configuration name (`name={...}`)
/// overrides each of its keys. Otherwise the last `/` separates the
/// configuration name from the property name.
#[derive(Debug, Clone, Default)]
pub struct StaticOverrideProvider {
    by_config: HashMap<String, ValueMap>,
}

impl StaticOverrideProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one override, replacing any earlier value for the same property
    pub fn set(&mut self, config_name: &str, property: &str, value: impl Into<Value>) {
        self.by_config
            .entry(config_name.to_string())
            .or_default()
            .insert(property, value);
    }

    /// Parse override lines; blank lines and `#` comments are skipped
    pub fn parse<I, S>(lines: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut provider = Self::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            provider.parse_line(line)?;
        }
        debug!(configs = provider.by_config.len(), "Loaded configuration overrides");
        Ok(provider)
    }

    fn parse_line(&mut self, line: &str) -> Result<(), ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidOverride {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let (key, raw_value) = line.split_once('=').ok_or_else(|| invalid("missing '='"))?;
        let key = key.trim().trim_matches('/');
        if key.is_empty() {
            return Err(invalid("missing configuration name"));
        }

        let raw_value = raw_value.trim();
        let json: serde_json::Value = serde_json::from_str(raw_value)
            .unwrap_or_else(|_| serde_json::Value::String(raw_value.to_string()));

        if let serde_json::Value::Object(_) = json {
            let Some(Value::Map(entries)) = Value::from_json(&json) else {
                return Err(invalid("object value could not be converted"));
            };
            for (property, value) in &entries {
                self.set(key, property, value.clone());
            }
            return Ok(());
        }

        let (config_name, property) = key
            .rsplit_once('/')
            .ok_or_else(|| invalid("expected <config>/<property>=<value>"))?;
        if config_name.is_empty() || property.is_empty() {
            return Err(invalid("empty configuration or property name"));
        }
        let value = Value::from_json(&json).ok_or_else(|| invalid("null is not a value"))?;
        self.set(config_name, property, value);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.by_config.is_empty()
    }
}

impl OverrideProvider for StaticOverrideProvider {
    fn overrides(&self, config_name: &str) -> ValueMap {
        self.by_config.get(config_name).cloned().unwrap_or_default()
    }

    fn get_override(&self, config_name: &str, property: &str) -> Option<Value> {
        self.by_config
            .get(config_name)
            .and_then(|values| values.get(property))
            .cloned()
    }
}
