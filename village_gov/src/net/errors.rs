//! Error taxonomy shared by the gateway, the auth controller and the services.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by API operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected locally before any network traffic
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No response was received
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Well-formed rejection from the server
    #[error("Request rejected: {message}")]
    Rejected {
        /// HTTP status, if the rejection came with a non-success status
        status: Option<u16>,
        /// Server-provided message, verbatim
        message: String,
    },

    /// The server refused the stored credentials; they have been cleared
    #[error("Session expired, please log in again")]
    AuthExpired,

    /// Local persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Response body was not the expected envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// Message suitable for showing to an end user
    ///
    /// Transport and storage details are summarized rather than exposed.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Validation(reason) => reason.clone(),
            ApiError::Transport(_) => "Unable to reach the server, check your connection".to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Storage(_) => "Could not access local storage".to_string(),
            ApiError::MalformedResponse(_) => "Unexpected response from server".to_string(),
            ApiError::AuthExpired => self.to_string(),
        }
    }

    /// Whether this error came from the server turning the session away
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_is_verbatim() {
        let err = ApiError::Rejected {
            status: Some(400),
            message: "Invalid mobile number or password".to_string(),
        };
        assert_eq!(err.client_message(), "Invalid mobile number or password");
        assert!(err.to_string().contains("Invalid mobile number or password"));
    }

    #[test]
    fn test_storage_message_is_sanitized() {
        let err = ApiError::from(StorageError::Backend("disk /dev/sda1 full".to_string()));
        assert!(!err.client_message().contains("sda1"));
    }

    #[test]
    fn test_auth_expired_predicate() {
        assert!(ApiError::AuthExpired.is_auth_expired());
        assert!(!ApiError::Validation("x".to_string()).is_auth_expired());
    }
}
