//! File-backed storage medium.
//!
//! All keys live in one JSON object. Every mutation rewrites the whole
//! document through a temporary file followed by a rename, so a multi-key
//! write is observed either completely or not at all.

use super::{errors::StorageResult, medium::KeyValueStore};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};

/// JSON document on disk holding string keys and values
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, document: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        for (key, value) in entries {
            document.insert((*key).to_string(), (*value).to_string());
        }
        self.persist(&document).await
    }

    async fn remove_many(&self, keys: &[&str]) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let before = document.len();
        for key in keys {
            document.remove(*key);
        }
        if document.len() == before {
            return Ok(());
        }
        self.persist(&document).await
    }
}
