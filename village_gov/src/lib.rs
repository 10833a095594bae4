//! # Village Gov
//!
//! Client library for the village governance API: villages, facilities,
//! issues, schemes, announcements and the dashboard, behind an
//! authenticated session.
//!
//! ## Architecture
//!
//! The session core is five cooperating pieces:
//!
//! - **Credential store** ([`storage`]): durable access/refresh token pair
//! - **Session gateway** ([`net`]): attaches the bearer token to every
//!   request and purges the store on `401 Unauthorized`
//! - **Auth controller** ([`auth`]): login, logout, signup, password reset
//!   and refresh
//! - **Session observer** ([`session`]): samples the store and publishes
//!   which UI root should be mounted
//! - **Profile cache** ([`session`]): the signed-in user, refreshed on each
//!   sign-in edge
//!
//! [`services`] holds typed clients for the remaining resources and
//! [`VillageClient`] wires everything together.
//!
//! ## Example
//!
//! ```no_run
//! use village_gov::{ClientConfig, VillageClient, storage::CredentialStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VillageClient::with_store(ClientConfig::default(), CredentialStore::in_memory())?;
//!     client.auth().login("9876543210", "secret").await?;
//!
//!     for village in client.villages().list().await? {
//!         println!("{} ({})", village.name, village.district);
//!     }
//!     Ok(())
//! }
//! ```

/// Login, logout and account operations.
pub mod auth;

/// Single handle wiring the session core together.
pub mod client;
pub use client::VillageClient;

/// Environment-driven configuration.
pub mod config;
pub use config::{ClientConfig, ConfigError};

/// Session gateway, response envelope and errors.
pub mod net;
pub use net::{ApiError, ApiResponse, ApiResult, SessionGateway};

/// Typed resource clients.
pub mod services;

/// Session observer and profile cache.
pub mod session;

/// Credential persistence.
pub mod storage;
