//! Persistence layer for the content tree

use crate::error::StoreError;
use crate::store::NodeRecord;
use crate::tree::{ResourcePath, ResourceStore, ResourceStoreMut};
use crate::types::ValueMap;
use parking_lot::Mutex;
use std::path::Path;
use tracing::debug;

/// Sled-based implementation of the content tree
///
/// Reads go straight to sled. Mutations touch a resource and its parent, so
/// they are serialized through a write lock to keep child lists consistent.
pub struct SledResourceStore {
    db: sled::Db,
    write_lock: Mutex<()>,
}

impl SledResourceStore {
    /// Open (or create) a store at the given directory
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)
            .map_err(|e| StoreError::Backend(format!("Failed to open sled database: {}", e)))?;
        let store = Self {
            db,
            write_lock: Mutex::new(()),
        };
        if store.get_record(&ResourcePath::root())?.is_none() {
            store.put_record(&ResourcePath::root(), &NodeRecord::default())?;
        }
        Ok(store)
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::Backend(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }

    fn get_record(&self, path: &ResourcePath) -> Result<Option<NodeRecord>, StoreError> {
        match self
            .db
            .get(path.as_str().as_bytes())
            .map_err(|e| StoreError::Backend(format!("Failed to get resource {}: {}", path, e)))?
        {
            Some(value) => {
                let record: NodeRecord = bincode::deserialize(&value).map_err(|e| {
                    StoreError::Codec(format!("Failed to deserialize resource {}: {}", path, e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn put_record(&self, path: &ResourcePath, record: &NodeRecord) -> Result<(), StoreError> {
        let value = bincode::serialize(record).map_err(|e| {
            StoreError::Codec(format!("Failed to serialize resource {}: {}", path, e))
        })?;
        self.db
            .insert(path.as_str().as_bytes(), value)
            .map_err(|e| StoreError::Backend(format!("Failed to put resource {}: {}", path, e)))?;
        Ok(())
    }

    fn delete_record(&self, path: &ResourcePath) -> Result<Option<NodeRecord>, StoreError> {
        let record = self.get_record(path)?;
        self.db.remove(path.as_str().as_bytes()).map_err(|e| {
            StoreError::Backend(format!("Failed to remove resource {}: {}", path, e))
        })?;
        Ok(record)
    }

    fn attach_child(&self, path: &ResourcePath) -> Result<(), StoreError> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        let mut parent_record = self.get_record(&parent)?.unwrap_or_default();
        parent_record.children.push(path.name().to_string());
        self.put_record(&parent, &parent_record)
    }
}

impl ResourceStore for SledResourceStore {
    fn exists(&self, path: &ResourcePath) -> Result<bool, StoreError> {
        self.db.contains_key(path.as_str().as_bytes()).map_err(|e| {
            StoreError::Backend(format!("Failed to check resource {}: {}", path, e))
        })
    }

    fn properties(&self, path: &ResourcePath) -> Result<Option<ValueMap>, StoreError> {
        Ok(self.get_record(path)?.map(|record| record.properties))
    }

    fn children(&self, path: &ResourcePath) -> Result<Vec<ResourcePath>, StoreError> {
        match self.get_record(path)? {
            Some(record) => record
                .children
                .iter()
                .map(|name| path.join(name))
                .collect(),
            None => Ok(Vec::new()),
        }
    }
}

impl ResourceStoreMut for SledResourceStore {
    fn put(&self, path: &ResourcePath, properties: ValueMap) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();

        let mut missing = Vec::new();
        let mut current = path.parent();
        while let Some(ancestor) = current {
            if self.get_record(&ancestor)?.is_some() {
                break;
            }
            current = ancestor.parent();
            missing.push(ancestor);
        }
        for ancestor in missing.into_iter().rev() {
            self.attach_child(&ancestor)?;
            self.put_record(&ancestor, &NodeRecord::default())?;
        }

        match self.get_record(path)? {
            Some(mut record) => {
                record.properties = properties;
                self.put_record(path, &record)?;
            }
            None => {
                self.attach_child(path)?;
                self.put_record(
                    path,
                    &NodeRecord {
                        properties,
                        children: Vec::new(),
                    },
                )?;
            }
        }
        debug!(path = %path, "Stored resource");
        Ok(())
    }

    fn remove(&self, path: &ResourcePath) -> Result<bool, StoreError> {
        let Some(parent) = path.parent() else {
            return Err(StoreError::InvalidPath(
                "the root resource cannot be removed".to_string(),
            ));
        };
        let _guard = self.write_lock.lock();

        if self.get_record(path)?.is_none() {
            return Ok(false);
        }

        let mut pending = vec![path.clone()];
        while let Some(next) = pending.pop() {
            if let Some(record) = self.delete_record(&next)? {
                for child in &record.children {
                    pending.push(next.join(child)?);
                }
            }
        }

        if let Some(mut parent_record) = self.get_record(&parent)? {
            parent_record.children.retain(|name| name != path.name());
            self.put_record(&parent, &parent_record)?;
        }
        debug!(path = %path, "Removed resource subtree");
        Ok(true)
    }
}
