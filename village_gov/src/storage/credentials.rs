//! Credential store: the access/refresh token pair on top of a storage medium.

use super::{
    errors::{StorageError, StorageResult},
    medium::{KeyValueStore, MemoryStore},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default key for the access token
pub const ACCESS_TOKEN_KEY: &str = "@village_access_token";

/// Default key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "@village_refresh_token";

/// Access/refresh token tuple identifying an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Keys under which the pair is persisted.
///
/// Changing them (e.g. bumping a version suffix) orphans old sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub access: String,
    pub refresh: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            access: ACCESS_TOKEN_KEY.to_string(),
            refresh: REFRESH_TOKEN_KEY.to_string(),
        }
    }
}

/// Persistent holder of the session's credential pair.
///
/// Cloning is cheap and every clone shares the same medium.
#[derive(Clone)]
pub struct CredentialStore {
    medium: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl CredentialStore {
    /// Create a store over `medium` using the default keys
    pub fn new(medium: Arc<dyn KeyValueStore>) -> Self {
        Self::with_keys(medium, StorageKeys::default())
    }

    /// Create a store over `medium` with custom keys
    pub fn with_keys(medium: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { medium, keys }
    }

    /// Store backed by process memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Persist both tokens in a single medium write
    ///
    /// # Errors
    ///
    /// * `StorageError::IncompletePair` - either token is empty
    /// * Any medium error, unchanged
    pub async fn save(&self, access: &str, refresh: &str) -> StorageResult<()> {
        if access.is_empty() || refresh.is_empty() {
            return Err(StorageError::IncompletePair);
        }

        self.medium
            .set_many(&[
                (self.keys.access.as_str(), access),
                (self.keys.refresh.as_str(), refresh),
            ])
            .await
            .inspect_err(|e| log::error!("Failed to save credentials: {}", e))
    }

    /// Persist a whole pair
    pub async fn save_pair(&self, pair: &CredentialPair) -> StorageResult<()> {
        self.save(&pair.access_token, &pair.refresh_token).await
    }

    /// Stored access token, or `None` when absent or unreadable
    pub async fn access_token(&self) -> Option<String> {
        self.read(&self.keys.access).await
    }

    /// Stored refresh token, or `None` when absent or unreadable
    pub async fn refresh_token(&self) -> Option<String> {
        self.read(&self.keys.refresh).await
    }

    /// Both tokens, or `None` unless both are present
    pub async fn credentials(&self) -> Option<CredentialPair> {
        match (self.access_token().await, self.refresh_token().await) {
            (Some(access_token), Some(refresh_token)) => Some(CredentialPair {
                access_token,
                refresh_token,
            }),
            (None, None) => None,
            _ => {
                log::warn!("Found a partial credential pair in storage, treating as signed out");
                None
            }
        }
    }

    /// Remove both tokens. Clearing an empty store succeeds.
    pub async fn clear(&self) -> StorageResult<()> {
        self.medium
            .remove_many(&[self.keys.access.as_str(), self.keys.refresh.as_str()])
            .await
            .inspect_err(|e| log::error!("Failed to clear credentials: {}", e))
    }

    /// Whether an access token is stored
    pub async fn is_authenticated(&self) -> bool {
        self.access_token().await.is_some()
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.medium.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                log::warn!("Failed to read {} from storage: {}", key, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_read_pair() {
        let store = CredentialStore::in_memory();
        store.save("AT1", "RT1").await.unwrap();

        assert_eq!(store.access_token().await.as_deref(), Some("AT1"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("RT1"));
        assert!(store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_save_rejects_half_pair() {
        let store = CredentialStore::in_memory();

        let err = store.save("AT1", "").await.unwrap_err();
        assert!(matches!(err, StorageError::IncompletePair));
        let err = store.save("", "RT1").await.unwrap_err();
        assert!(matches!(err, StorageError::IncompletePair));

        assert!(store.credentials().await.is_none());
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_save_replaces_pair_wholesale() {
        let store = CredentialStore::in_memory();
        store.save("AT1", "RT1").await.unwrap();
        store.save("AT2", "RT2").await.unwrap();

        let pair = store.credentials().await.unwrap();
        assert_eq!(pair.access_token, "AT2");
        assert_eq!(pair.refresh_token, "RT2");
    }

    #[tokio::test]
    async fn test_partial_pair_in_medium_reads_as_absent() {
        let medium = Arc::new(MemoryStore::new());
        medium.set_many(&[(ACCESS_TOKEN_KEY, "AT1")]).await.unwrap();
        let store = CredentialStore::new(medium);

        assert!(store.credentials().await.is_none());
    }

    #[tokio::test]
    async fn test_custom_keys_are_isolated() {
        let medium: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let v1 = CredentialStore::new(medium.clone());
        let v2 = CredentialStore::with_keys(
            medium,
            StorageKeys {
                access: "@village_access_token_v2".to_string(),
                refresh: "@village_refresh_token_v2".to_string(),
            },
        );

        v1.save("AT1", "RT1").await.unwrap();
        assert!(v1.is_authenticated().await);
        assert!(!v2.is_authenticated().await);
    }
}
