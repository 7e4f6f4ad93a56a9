//! Content tree import from JSON or TOML documents
//!
//! Document shape:
//!
//! ```json
//! { "name": "", "properties": {}, "children": [ { "name": "conf", ... } ] }
//! ```
//!
//! The top-level node describes the resource the document is imported at
//! (usually `/`). Children are a list so that their order survives.

use crate::error::StoreError;
use crate::tree::{MemoryResourceStore, ResourcePath, ResourceStoreMut};
use crate::types::{Value, ValueMap};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// One node of an import document
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub children: Vec<ResourceNode>,
}

#[derive(Debug, Clone, Deserialize)]
struct TomlResourceNode {
    #[serde(default)]
    name: String,
    #[serde(default)]
    properties: toml::Table,
    #[serde(default)]
    children: Vec<TomlResourceNode>,
}

/// Parse a JSON import document
pub fn parse_json(text: &str) -> Result<ResourceNode, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Format(format!("invalid JSON tree: {}", e)))
}

/// Import a JSON tree below `at`. Returns the number of resources written.
pub fn import_json(
    store: &dyn ResourceStoreMut,
    at: &ResourcePath,
    text: &str,
) -> Result<usize, StoreError> {
    let root = parse_json(text)?;
    write_json_node(store, at, &root)
}

/// Import a TOML tree below `at`. Returns the number of resources written.
pub fn import_toml(
    store: &dyn ResourceStoreMut,
    at: &ResourcePath,
    text: &str,
) -> Result<usize, StoreError> {
    let root: TomlResourceNode = toml::from_str(text)
        .map_err(|e| StoreError::Format(format!("invalid TOML tree: {}", e)))?;
    write_toml_node(store, at, &root)
}

/// Import a file, choosing the format by extension (`.json` or `.toml`)
pub fn import_file(store: &dyn ResourceStoreMut, file: &Path) -> Result<usize, StoreError> {
    let text = std::fs::read_to_string(file)?;
    let root = ResourcePath::root();
    let written = match file.extension().and_then(|ext| ext.to_str()) {
        Some("json") => import_json(store, &root, &text)?,
        Some("toml") => import_toml(store, &root, &text)?,
        other => {
            return Err(StoreError::Format(format!(
                "unsupported content file extension {:?} for {}",
                other,
                file.display()
            )))
        }
    };
    debug!(file = %file.display(), resources = written, "Imported content tree");
    Ok(written)
}

/// Load a content file into a fresh in-memory store
pub fn load_file(file: &Path) -> Result<MemoryResourceStore, StoreError> {
    let store = MemoryResourceStore::new();
    import_file(&store, file)?;
    Ok(store)
}

fn write_json_node(
    store: &dyn ResourceStoreMut,
    path: &ResourcePath,
    node: &ResourceNode,
) -> Result<usize, StoreError> {
    let mut properties = ValueMap::new();
    for (key, value) in &node.properties {
        if let Some(value) = Value::from_json(value) {
            properties.insert(key.clone(), value);
        }
    }
    store.put(path, properties)?;

    let mut written = 1;
    for child in &node.children {
        let child_path = child_path(path, &child.name)?;
        written += write_json_node(store, &child_path, child)?;
    }
    Ok(written)
}

fn write_toml_node(
    store: &dyn ResourceStoreMut,
    path: &ResourcePath,
    node: &TomlResourceNode,
) -> Result<usize, StoreError> {
    let properties: ValueMap = node
        .properties
        .iter()
        .map(|(key, value)| (key.clone(), Value::from_toml(value)))
        .collect();
    store.put(path, properties)?;

    let mut written = 1;
    for child in &node.children {
        let child_path = child_path(path, &child.name)?;
        written += write_toml_node(store, &child_path, child)?;
    }
    Ok(written)
}

fn child_path(parent: &ResourcePath, name: &str) -> Result<ResourcePath, StoreError> {
    if name.is_empty() || name.contains('/') {
        return Err(StoreError::InvalidPath(format!(
            "invalid child name '{}' below {}",
            name, parent
        )));
    }
    parent.join(name)
}
