//! Adaptation of resources into caller types
//!
//! Adaptation works on the raw stored resource. It never sees schema defaults
//! or overrides.

use crate::error::StoreError;
use crate::tree::{Resource, ResourcePath, ResourceStore};
use crate::types::ValueMap;

/// A type that can be produced from a stored resource
///
/// Returning `None` means the resource cannot be adapted to this type.
pub trait Adaptable: Sized {
    fn adapt_from(resource: &Resource) -> Option<Self>;
}

impl Adaptable for Resource {
    fn adapt_from(resource: &Resource) -> Option<Self> {
        Some(resource.clone())
    }
}

impl Adaptable for ValueMap {
    fn adapt_from(resource: &Resource) -> Option<Self> {
        Some(resource.properties.clone())
    }
}

impl Adaptable for ResourcePath {
    fn adapt_from(resource: &Resource) -> Option<Self> {
        Some(resource.path.clone())
    }
}

/// Adapt the resource at `path`; `Ok(None)` if it does not exist or cannot be
/// adapted.
pub fn adapt<T: Adaptable>(
    store: &dyn ResourceStore,
    path: &ResourcePath,
) -> Result<Option<T>, StoreError> {
    Ok(store
        .resource(path)?
        .and_then(|resource| T::adapt_from(&resource)))
}
