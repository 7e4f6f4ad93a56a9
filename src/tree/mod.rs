//! Content Tree
//!
//! The hierarchical resource store that configurations are attached to. Each
//! resource has an absolute path, a property map and an ordered list of
//! children.

pub mod adapt;
pub mod import;
pub mod memory;
pub mod path;

pub use adapt::{adapt, Adaptable};
pub use memory::MemoryResourceStore;
pub use path::ResourcePath;

use crate::error::StoreError;
use crate::types::ValueMap;

/// A resource read from the tree store
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub path: ResourcePath,
    pub properties: ValueMap,
    /// Child names in store order
    pub children: Vec<String>,
}

impl Resource {
    pub fn name(&self) -> &str {
        self.path.name()
    }
}

/// Read access to a content tree
///
/// Every call is independently failable; callers decide whether a failure is
/// fatal or just means "absent".
pub trait ResourceStore: Send + Sync {
    fn exists(&self, path: &ResourcePath) -> Result<bool, StoreError>;

    /// Properties of the resource, `None` if the resource does not exist
    fn properties(&self, path: &ResourcePath) -> Result<Option<ValueMap>, StoreError>;

    /// Direct children in the store's native order; empty if the resource
    /// does not exist.
    fn children(&self, path: &ResourcePath) -> Result<Vec<ResourcePath>, StoreError>;

    /// Full resource view
    fn resource(&self, path: &ResourcePath) -> Result<Option<Resource>, StoreError> {
        let Some(properties) = self.properties(path)? else {
            return Ok(None);
        };
        let children = self
            .children(path)?
            .iter()
            .map(|child| child.name().to_string())
            .collect();
        Ok(Some(Resource {
            path: path.clone(),
            properties,
            children,
        }))
    }
}

/// Write access to a content tree
pub trait ResourceStoreMut: ResourceStore {
    /// Create or replace the properties of a resource. Missing ancestors are
    /// created empty; a new resource is appended to its parent's children.
    fn put(&self, path: &ResourcePath, properties: ValueMap) -> Result<(), StoreError>;

    /// Remove a resource and its subtree. Returns whether it existed.
    fn remove(&self, path: &ResourcePath) -> Result<bool, StoreError>;
}
