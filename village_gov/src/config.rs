//! Client configuration management.
//!
//! Consolidates environment variable reads and provides validated configuration.

use crate::{net::DEFAULT_REQUEST_TIMEOUT, session::DEFAULT_POLL_INTERVAL};
use std::{path::PathBuf, time::Duration};

/// Default API root
pub const DEFAULT_API_URL: &str = "http://app.undefineddevelopers.online/empowering/api";

/// Default location of the persisted credential pair
pub const DEFAULT_CREDENTIALS_PATH: &str = ".village/credentials.json";

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root URL
    pub api_url: String,
    /// File holding the credential pair
    pub credentials_path: PathBuf,
    /// Session observer sampling interval
    pub poll_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `api_url_override` - API URL from CLI args, wins over `VILLAGE_API_URL`
    /// * `credentials_path_override` - Path from CLI args, wins over `VILLAGE_CREDENTIALS_PATH`
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable is set but cannot be parsed
    pub fn from_env(
        api_url_override: Option<String>,
        credentials_path_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let api_url = api_url_override
            .or_else(|| std::env::var("VILLAGE_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let credentials_path = credentials_path_override
            .or_else(|| std::env::var("VILLAGE_CREDENTIALS_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH));

        let poll_interval = Duration::from_millis(parse_env_or(
            "VILLAGE_POLL_INTERVAL_MS",
            DEFAULT_POLL_INTERVAL.as_millis() as u64,
        )?);

        let request_timeout = Duration::from_secs(parse_env_or(
            "VILLAGE_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        )?);

        Ok(ClientConfig {
            api_url,
            credentials_path,
            poll_interval,
            request_timeout,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "VILLAGE_API_URL".to_string(),
                reason: format!("'{}' must start with http:// or https://", self.api_url),
            });
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "VILLAGE_POLL_INTERVAL_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "VILLAGE_REQUEST_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{}' is not a valid number", value),
        }),
        Err(_) => Ok(default),
    }
}
