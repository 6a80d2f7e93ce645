//! In-process session store backed by a `HashMap`.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{SessionStore, StoreError};

/// A [`SessionStore`] that keeps records in memory.
///
/// Reads take a shared lock, so concurrent lookups never block each
/// other. Nothing expires on its own; records stay until [`remove`]d.
///
/// [`remove`]: MemoryStore::remove
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous record.
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        tracing::trace!(%key, "memory store insert");
        self.records.write().await.insert(key, value.into());
    }

    /// Removes the record under `key`, returning it if it existed.
    pub async fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.records.write().await.remove(key)
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }
}
