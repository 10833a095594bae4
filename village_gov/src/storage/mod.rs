//! Durable storage for the session's credential pair.
//!
//! [`CredentialStore`] is the only stateful piece of the session core. It
//! sits on a [`KeyValueStore`] medium: [`MemoryStore`] for tests and
//! short-lived processes, [`FileStore`] for anything that must survive a
//! restart.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use village_gov::storage::{CredentialStore, FileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CredentialStore::new(Arc::new(FileStore::new("credentials.json")));
//!     store.save("access", "refresh").await?;
//!     assert!(store.is_authenticated().await);
//!     store.clear().await?;
//!     Ok(())
//! }
//! ```

pub mod credentials;
pub mod errors;
pub mod file;
pub mod medium;

pub use credentials::{
    ACCESS_TOKEN_KEY, CredentialPair, CredentialStore, REFRESH_TOKEN_KEY, StorageKeys,
};
pub use errors::{StorageError, StorageResult};
pub use file::FileStore;
pub use medium::{KeyValueStore, MemoryStore};
