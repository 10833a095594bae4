//! Auth controller: login, logout and the other account calls.

use super::models::{
    LoginData, LoginRequest, PasswordResetConfirm, PasswordResetRequest, RefreshRequest,
    SignupRequest,
};
use crate::{
    net::{ApiError, ApiResult, SessionGateway},
    session::ProfileCache,
    storage::CredentialPair,
};
use std::{collections::HashMap, sync::Arc};

/// Number of digits in a mobile number identifier
pub const MOBILE_NUMBER_LEN: usize = 10;

/// Orchestrates account operations and the token lifecycle
#[derive(Clone)]
pub struct AuthController {
    gateway: SessionGateway,
    profile: Option<Arc<ProfileCache>>,
}

impl AuthController {
    /// Create a controller persisting through the gateway's credential store
    pub fn new(gateway: SessionGateway) -> Self {
        Self {
            gateway,
            profile: None,
        }
    }

    /// Clear `profile` on logout
    pub fn with_profile(mut self, profile: Arc<ProfileCache>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Log in and persist the returned credential pair
    ///
    /// # Arguments
    ///
    /// * `mobile_number` - 10-digit mobile number
    /// * `password` - Account password
    ///
    /// # Returns
    ///
    /// * `ApiResult<CredentialPair>` - Pair now held by the credential store
    ///
    /// # Errors
    ///
    /// * `ApiError::Validation` - Malformed input, nothing was sent
    /// * `ApiError::Rejected` - Server refused the credentials; storage untouched
    /// * `ApiError::Transport` - No response
    /// * `ApiError::Storage` - The pair could not be persisted
    pub async fn login(&self, mobile_number: &str, password: &str) -> ApiResult<CredentialPair> {
        validate_mobile_number(mobile_number)?;
        validate_present("Password", password)?;

        let request = LoginRequest {
            mobile_number: mobile_number.to_string(),
            password: password.to_string(),
        };

        let response = match self.gateway.post::<_, LoginData>("/auth/login", &request).await {
            Err(ApiError::AuthExpired) => {
                return Err(ApiError::Rejected {
                    status: Some(401),
                    message: "Invalid mobile number or password".to_string(),
                });
            }
            other => other?,
        };

        let data = response.into_data()?;
        let pair = CredentialPair {
            access_token: data.access_token,
            refresh_token: data.refresh_token,
        };
        if pair.access_token.is_empty() || pair.refresh_token.is_empty() {
            return Err(ApiError::MalformedResponse(
                "login response is missing a token".to_string(),
            ));
        }

        self.gateway.store().save_pair(&pair).await?;
        log::info!("Logged in as {}", mask_mobile_number(mobile_number));
        Ok(pair)
    }

    /// Clear the local session. No server call is made.
    ///
    /// The profile cache is cleared even if the credential store fails.
    pub async fn logout(&self) -> ApiResult<()> {
        if let Some(profile) = &self.profile {
            profile.clear();
        }
        self.gateway.store().clear().await?;
        log::info!("Logged out");
        Ok(())
    }

    /// Register a new account. No local state changes.
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<String> {
        validate_present("Name", &request.name)?;
        validate_mobile_number(&request.mobile_number)?;
        validate_present("Password", &request.password)?;
        if let Some(email) = &request.email {
            validate_email(email)?;
        }

        self.gateway
            .post::<_, String>("/auth/signup", request)
            .await?
            .into_data()
    }

    /// Ask the server to send a password reset code to `email`
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<String> {
        validate_email(email)?;

        let request = PasswordResetRequest {
            email: email.trim().to_string(),
        };
        self.gateway
            .post::<_, String>("/auth/request-password-reset", &request)
            .await?
            .into_data()
    }

    /// Set a new password using a reset code
    pub async fn reset_password(&self, request: &PasswordResetConfirm) -> ApiResult<String> {
        validate_present("Reset code", &request.token)?;
        validate_present("New password", &request.new_password)?;

        self.gateway
            .post::<_, String>("/auth/reset-password", request)
            .await?
            .into_data()
    }

    /// Exchange the stored refresh token for a new pair.
    ///
    /// The pair is replaced wholesale; if the server omits a new refresh
    /// token the current one is kept in the replacement pair.
    pub async fn refresh(&self) -> ApiResult<CredentialPair> {
        let current = self
            .gateway
            .store()
            .refresh_token()
            .await
            .ok_or_else(|| ApiError::Validation("No session to refresh".to_string()))?;

        let data = self
            .gateway
            .post::<_, HashMap<String, String>>(
                "/auth/refresh",
                &RefreshRequest {
                    token: current.clone(),
                },
            )
            .await?
            .into_data()?;

        let access_token = data
            .get("accessToken")
            .filter(|t| !t.is_empty())
            .cloned()
            .ok_or_else(|| {
                ApiError::MalformedResponse("refresh response is missing accessToken".to_string())
            })?;
        let refresh_token = data
            .get("refreshToken")
            .filter(|t| !t.is_empty())
            .cloned()
            .unwrap_or(current);

        let pair = CredentialPair {
            access_token,
            refresh_token,
        };
        self.gateway.store().save_pair(&pair).await?;
        log::debug!("Refreshed session tokens");
        Ok(pair)
    }

    /// Whether a session is currently stored
    pub async fn is_authenticated(&self) -> bool {
        self.gateway.store().is_authenticated().await
    }
}

/// Check that `mobile_number` is exactly [`MOBILE_NUMBER_LEN`] ASCII digits
pub fn validate_mobile_number(mobile_number: &str) -> ApiResult<()> {
    if mobile_number.is_empty() {
        return Err(ApiError::Validation(
            "Mobile number is required".to_string(),
        ));
    }

    if mobile_number.len() != MOBILE_NUMBER_LEN
        || !mobile_number.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ApiError::Validation(format!(
            "Mobile number must be exactly {} digits",
            MOBILE_NUMBER_LEN
        )));
    }

    Ok(())
}

fn validate_email(email: &str) -> ApiResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ApiError::Validation("Email address is invalid".to_string())),
    }
}

fn validate_present(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

// Keep phone numbers out of logs.
fn mask_mobile_number(mobile_number: &str) -> String {
    let visible = mobile_number.len().saturating_sub(4);
    format!("{}{}", "*".repeat(visible), &mobile_number[visible..])
}
