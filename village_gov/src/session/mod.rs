//! Session lifecycle above the transport: who is signed in, and which UI
//! root should be showing.
//!
//! - [`SessionObserver`] samples the credential store and publishes a
//!   [`NavigationRoot`] on every change.
//! - [`ProfileCache`] holds the current [`UserProfile`] and is refreshed on
//!   each sign-in edge.

pub mod observer;
pub mod profile;

pub use observer::{
    AppState, DEFAULT_POLL_INTERVAL, NavigationRoot, ObserverHandle, SessionEdge, SessionObserver,
};
pub use profile::{
    ELEVATED_ROLE_MARKERS, FetchOutcome, ProfileCache, ProfileSource, UserProfile,
    roles_are_elevated,
};
