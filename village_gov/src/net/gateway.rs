//! Session gateway: the HTTP transport every API call goes through.
//!
//! Two behaviours wrap each call, in order:
//!
//! 1. Before sending, the stored access token (if any) is attached as a
//!    bearer credential.
//! 2. A `401 Unauthorized` response clears the credential store before the
//!    failure reaches the caller. This is the only place stale credentials
//!    are detected and purged.
//!
//! Every other failure is logged and returned unchanged. Nothing is retried.

use super::{
    envelope::ApiResponse,
    errors::{ApiError, ApiResult},
};
use crate::storage::CredentialStore;
use reqwest::{Method, RequestBuilder, StatusCode, header};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Auth-aware HTTP client for the village governance API
#[derive(Clone, Debug)]
pub struct SessionGateway {
    http: reqwest::Client,
    base_url: String,
    store: CredentialStore,
}

impl SessionGateway {
    /// Create a gateway with the default timeout
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `https://host/empowering/api`
    /// * `store` - Credential store read on every request
    pub fn new(base_url: impl Into<String>, store: CredentialStore) -> ApiResult<Self> {
        Self::with_timeout(base_url, store, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a gateway with a custom per-request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        store: CredentialStore,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        })
    }

    /// Credential store this gateway reads from and purges
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// API root without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `path` (relative to the base URL)
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// `GET path`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.send(self.request(Method::GET, path)).await
    }

    /// `POST path` with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// `PUT path` with a JSON body
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// `DELETE path`
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Send a prepared request through both gateway phases
    ///
    /// # Errors
    ///
    /// * `ApiError::Transport` - no response was received
    /// * `ApiError::AuthExpired` - server answered 401; credentials are cleared
    /// * `ApiError::Rejected` - any other non-success status
    /// * `ApiError::MalformedResponse` - body is not a valid envelope
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<ApiResponse<T>> {
        let request = match self.store.access_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            log::error!("API request failed: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let url = response.url().path().to_string();

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{} returned 401, clearing stored credentials", url);
            if let Err(e) = self.store.clear().await {
                log::error!("Failed to clear credentials after 401: {}", e);
            }
            return Err(ApiError::AuthExpired);
        }

        let body = response.bytes().await.map_err(|e| {
            log::error!("Failed to read response body from {}: {}", url, e);
            ApiError::Transport(e)
        })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .map(|envelope| envelope.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            log::warn!("API error from {} ({}): {}", url, status, message);
            return Err(ApiError::Rejected {
                status: Some(status.as_u16()),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            log::error!("Malformed response from {}: {}", url, e);
            ApiError::MalformedResponse(e.to_string())
        })
    }
}
