//! In-memory key-value store.
//!
//! Backs `--ephemeral` runs: same semantics as the SQLite store, nothing
//! outlives the process.

use std::collections::BTreeMap;

use roteiro_core::storage::kv_store::KvStore;
use roteiro_types::error::RepositoryError;
use tokio::sync::RwLock;

/// Process-local implementation of `KvStore`.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
