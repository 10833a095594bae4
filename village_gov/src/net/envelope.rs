//! The `{success, message, data}` envelope every endpoint responds with.

use super::errors::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload of a successful envelope.
    ///
    /// `success: false` becomes [`ApiError::Rejected`] with the server's
    /// message; a successful envelope without data is malformed.
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::Rejected {
                status: None,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| ApiError::MalformedResponse("missing data in successful response".to_string()))
    }

    /// Like [`into_data`](Self::into_data) but tolerates a missing payload
    pub fn into_result(self) -> ApiResult<Option<T>> {
        if !self.success {
            return Err(ApiError::Rejected {
                status: None,
                message: self.message,
            });
        }
        Ok(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_yields_data() {
        let envelope: ApiResponse<String> =
            serde_json::from_value(json!({"success": true, "message": "ok", "data": "done"})).unwrap();
        assert_eq!(envelope.into_data().unwrap(), "done");
    }

    #[test]
    fn test_failure_envelope_is_rejected_with_message() {
        let envelope: ApiResponse<String> =
            serde_json::from_value(json!({"success": false, "message": "Village not found"})).unwrap();
        match envelope.into_data() {
            Err(ApiError::Rejected { status, message }) => {
                assert_eq!(status, None);
                assert_eq!(message, "Village not found");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    /// Payload type with no `Default` impl
    #[derive(Debug, Deserialize)]
    struct Ticket {
        id: i64,
    }

    #[test]
    fn test_missing_data_key_decodes_for_any_payload() {
        let envelope: ApiResponse<Ticket> =
            serde_json::from_slice(br#"{"success": true, "message": "Deleted"}"#).unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.into_result().unwrap().is_none());

        let envelope: ApiResponse<Ticket> =
            serde_json::from_slice(br#"{"success": true, "data": {"id": 5}}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap().id, 5);
    }

    #[test]
    fn test_success_without_data_is_malformed() {
        let envelope: ApiResponse<String> =
            serde_json::from_value(json!({"success": true, "message": "ok", "data": null})).unwrap();
        assert!(matches!(envelope.into_data(), Err(ApiError::MalformedResponse(_))));
    }
}
