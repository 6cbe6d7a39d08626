//! In-memory record store for development and testing

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::core::entity::Entity;
use crate::core::service::RecordSource;
use crate::storage::StorageError;

/// Thread-safe in-memory store keyed by record id
///
/// Uses RwLock for concurrent access; clones share the same backing
/// map. Snapshots come back in creation order (creation timestamp,
/// then id as a tie-break) so list queries see a stable table order.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    records: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Entity> InMemoryStore<T> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, keyed by its own id
    pub fn insert(&self, record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        records.insert(record.id(), record.clone());

        Ok(record)
    }

    /// Get a record by id
    pub fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        Ok(records.get(id).cloned())
    }

    /// Replace an existing record
    pub fn update(&self, id: &Uuid, record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        if !records.contains_key(id) {
            return Err(StorageError::NotFound {
                resource: T::resource_name_singular(),
                id: *id,
            }
            .into());
        }

        records.insert(*id, record.clone());

        Ok(record)
    }

    /// Remove a record by id
    pub fn remove(&self, id: &Uuid) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        records.remove(id);

        Ok(())
    }

    /// Every record, in creation order
    pub fn snapshot(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        let mut all: Vec<T> = records.values().cloned().collect();
        all.sort_by_key(|record| (record.created_at(), record.id()));

        Ok(all)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> RecordSource<T> for InMemoryStore<T> {
    async fn fetch_all(&self) -> Result<Vec<T>> {
        self.snapshot()
    }
}
