//! Storage error types.

use thiserror::Error;

/// Errors raised by a storage medium or the credential store on top of it
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Refused to persist a credential pair with a missing half
    #[error("Credential pair is incomplete: both access and refresh tokens are required")]
    IncompletePair,

    /// Backend-specific failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
