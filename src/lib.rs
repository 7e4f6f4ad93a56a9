//! caconf: Context-Aware Configuration
//!
//! Resolves named configurations for a location in a hierarchical content
//! tree. Lookups walk from the location up through its ancestors and then
//! through global fallback roots; the first resource found wins, merged with
//! schema defaults and administrator overrides.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod overrides;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod tree;
pub mod types;

pub use error::{ConfigurationError, StoreError};
pub use overrides::{NoOverrides, OverrideProvider, StaticOverrideProvider};
pub use resolver::{ConfigurationBuilder, ConfigurationResolver};
pub use schema::{Configuration, SchemaDescriptor, SchemaValues};
pub use tree::{MemoryResourceStore, ResourcePath, ResourceStore, ResourceStoreMut};
pub use types::{FromValue, Value, ValueMap};
