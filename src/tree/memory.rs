//! In-memory content tree

use crate::error::StoreError;
use crate::tree::{ResourcePath, ResourceStore, ResourceStoreMut};
use crate::types::ValueMap;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct MemoryNode {
    properties: ValueMap,
    children: Vec<String>,
}

/// Content tree held in memory
///
/// Children keep insertion order. The root `/` always exists.
#[derive(Debug)]
pub struct MemoryResourceStore {
    nodes: RwLock<HashMap<ResourcePath, MemoryNode>>,
}

impl Default for MemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ResourcePath::root(), MemoryNode::default());
        Self {
            nodes: RwLock::new(nodes),
        }
    }

    /// Number of resources, including the root
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Convenience for tests and fixtures: parse `path` and put `properties`
    pub fn insert<I, K, V>(&self, path: &str, properties: I) -> Result<ResourcePath, StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<crate::types::Value>,
    {
        let path = ResourcePath::parse(path)?;
        self.put(&path, properties.into_iter().collect())?;
        Ok(path)
    }
}

impl ResourceStore for MemoryResourceStore {
    fn exists(&self, path: &ResourcePath) -> Result<bool, StoreError> {
        Ok(self.nodes.read().contains_key(path))
    }

    fn properties(&self, path: &ResourcePath) -> Result<Option<ValueMap>, StoreError> {
        Ok(self
            .nodes
            .read()
            .get(path)
            .map(|node| node.properties.clone()))
    }

    fn children(&self, path: &ResourcePath) -> Result<Vec<ResourcePath>, StoreError> {
        let nodes = self.nodes.read();
        let Some(node) = nodes.get(path) else {
            return Ok(Vec::new());
        };
        node.children
            .iter()
            .map(|name| path.join(name))
            .collect()
    }
}

impl ResourceStoreMut for MemoryResourceStore {
    fn put(&self, path: &ResourcePath, properties: ValueMap) -> Result<(), StoreError> {
        let mut nodes = self.nodes.write();

        // Create missing ancestors top-down so child lists stay in creation order
        let mut missing = Vec::new();
        let mut current = path.parent();
        while let Some(ancestor) = current {
            if nodes.contains_key(&ancestor) {
                break;
            }
            current = ancestor.parent();
            missing.push(ancestor);
        }
        for ancestor in missing.into_iter().rev() {
            attach(&mut nodes, &ancestor, MemoryNode::default());
        }

        match nodes.get_mut(path) {
            Some(node) => node.properties = properties,
            None => attach(
                &mut nodes,
                path,
                MemoryNode {
                    properties,
                    children: Vec::new(),
                },
            ),
        }
        Ok(())
    }

    fn remove(&self, path: &ResourcePath) -> Result<bool, StoreError> {
        if path.is_root() {
            return Err(StoreError::InvalidPath(
                "the root resource cannot be removed".to_string(),
            ));
        }

        let mut nodes = self.nodes.write();
        if !nodes.contains_key(path) {
            return Ok(false);
        }

        let mut pending = vec![path.clone()];
        while let Some(next) = pending.pop() {
            if let Some(node) = nodes.remove(&next) {
                for child in &node.children {
                    pending.push(next.join(child)?);
                }
            }
        }

        if let Some(parent) = path.parent() {
            if let Some(parent_node) = nodes.get_mut(&parent) {
                parent_node.children.retain(|name| name != path.name());
            }
        }
        Ok(true)
    }
}

fn attach(nodes: &mut HashMap<ResourcePath, MemoryNode>, path: &ResourcePath, node: MemoryNode) {
    if let Some(parent) = path.parent() {
        if let Some(parent_node) = nodes.get_mut(&parent) {
            parent_node.children.push(path.name().to_string());
        }
    }
    nodes.insert(path.clone(), node);
}
