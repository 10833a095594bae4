//! Authentication: login, logout, signup, password reset and token refresh.
//!
//! Validation failures are reported before any network traffic. A
//! successful login awaits persistence of the credential pair before it
//! returns, so anything issued afterwards carries the new token.
//!
//! ## Example
//!
//! ```no_run
//! use village_gov::{auth::AuthController, net::SessionGateway, storage::CredentialStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = SessionGateway::new("http://localhost:8080/api", CredentialStore::in_memory())?;
//!     let auth = AuthController::new(gateway);
//!
//!     auth.login("9876543210", "secret").await?;
//!     assert!(auth.is_authenticated().await);
//!     auth.logout().await?;
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod models;

pub use controller::{AuthController, MOBILE_NUMBER_LEN, validate_mobile_number};
pub use models::{
    LoginData, LoginRequest, PasswordResetConfirm, PasswordResetRequest, RefreshRequest,
    SignupRequest,
};
