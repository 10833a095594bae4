//! Key/value storage media backing the credential store.

use super::errors::StorageResult;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Durable string key/value storage.
///
/// `set_many` and `remove_many` must apply all entries or none; the
/// credential store relies on this to keep the token pair consistent.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a single key
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write several keys as one operation
    async fn set_many(&self, entries: &[(&str, &str)]) -> StorageResult<()>;

    /// Remove several keys as one operation; missing keys are ignored
    async fn remove_many(&self, keys: &[&str]) -> StorageResult<()>;
}

/// In-process storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> StorageResult<()> {
        let mut map = self.entries.write().await;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> StorageResult<()> {
        let mut map = self.entries.write().await;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}
