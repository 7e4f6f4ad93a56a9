//! Persistent Resource Store
//!
//! Durable content tree storage. Each resource is one record keyed by its
//! path, holding its properties and the ordered names of its children.

pub mod persistence;

pub use persistence::SledResourceStore;

use crate::types::ValueMap;
use serde::{Deserialize, Serialize};

/// Stored form of a single resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub properties: ValueMap,
    pub children: Vec<String>,
}
