//! Profile cache: the signed-in user's identity and roles.

use crate::net::{ApiResult, SessionGateway};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicBool, Ordering},
};

/// Role markers that grant elevated (super-admin) privileges.
///
/// Matching is a case-insensitive substring test, so `ADMIN` also matches
/// roles such as `VILLAGE_ADMIN`.
pub const ELEVATED_ROLE_MARKERS: [&str; 2] = ["SUPERADMIN", "ADMIN"];

/// Current user as returned by `GET /user/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub mobile_number: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Delimited role list, e.g. `"ROLE_USER,ROLE_ADMIN"`
    #[serde(default)]
    pub roles: String,
}

impl UserProfile {
    /// Whether any role carries an elevated marker
    pub fn is_elevated(&self) -> bool {
        roles_are_elevated(&self.roles)
    }
}

/// Case-insensitive substring match of `roles` against [`ELEVATED_ROLE_MARKERS`]
pub fn roles_are_elevated(roles: &str) -> bool {
    let upper = roles.to_uppercase();
    ELEVATED_ROLE_MARKERS
        .iter()
        .any(|marker| upper.contains(marker))
}

/// Where the cache gets the current user from
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile of the user owning the current session
    async fn current_user(&self) -> ApiResult<UserProfile>;
}

#[async_trait]
impl ProfileSource for SessionGateway {
    async fn current_user(&self) -> ApiResult<UserProfile> {
        self.get::<UserProfile>("/user/me").await?.into_data()
    }
}

/// Result of a [`ProfileCache::fetch`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Cached profile replaced with a fresh one
    Updated,
    /// Fetch failed; the previous value (if any) is kept
    Failed,
    /// Another fetch was already in flight
    Skipped,
}

/// In-memory read-through cache of the current [`UserProfile`]
pub struct ProfileCache {
    source: Arc<dyn ProfileSource>,
    profile: RwLock<Option<UserProfile>>,
    in_flight: AtomicBool,
    loaded: AtomicBool,
}

impl ProfileCache {
    /// Create an empty cache reading from `source`.
    ///
    /// Nothing is fetched until [`fetch`](Self::fetch) is called. When the
    /// cache is attached to a session observer, the observer's first
    /// sign-in edge does that. Use [`load`](Self::load) for a cache that
    /// should fill itself on creation.
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        Self {
            source,
            profile: RwLock::new(None),
            in_flight: AtomicBool::new(false),
            loaded: AtomicBool::new(false),
        }
    }

    /// Create a cache and fetch the current user once before returning.
    ///
    /// A failed first fetch is logged and leaves the cache empty.
    pub async fn load(source: Arc<dyn ProfileSource>) -> Arc<Self> {
        let cache = Arc::new(Self::new(source));
        cache.fetch().await;
        cache
    }

    /// Fetch the current user and replace the cached profile.
    ///
    /// A failure leaves the previous value in place. Calls made while a
    /// fetch is in flight return [`FetchOutcome::Skipped`] without touching
    /// the network.
    pub async fn fetch(&self) -> FetchOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Profile fetch already in flight, skipping");
            return FetchOutcome::Skipped;
        }
        let _guard = InFlightGuard(&self.in_flight);

        match self.source.current_user().await {
            Ok(profile) => {
                log::info!("Loaded profile for user {}", profile.id);
                *self.profile.write().unwrap_or_else(PoisonError::into_inner) = Some(profile);
                self.loaded.store(true, Ordering::Release);
                FetchOutcome::Updated
            }
            Err(e) => {
                log::error!("Error fetching user profile: {}", e);
                FetchOutcome::Failed
            }
        }
    }

    /// Drop the cached profile
    pub fn clear(&self) {
        *self.profile.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.loaded.store(false, Ordering::Release);
    }

    /// Cached profile, if any
    pub fn profile(&self) -> Option<UserProfile> {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the cached user holds an elevated role.
    ///
    /// Derived from the cached roles on every call.
    pub fn is_elevated(&self) -> bool {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(UserProfile::is_elevated)
    }

    /// Whether a fetch is currently running
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether a profile has been loaded since creation or the last clear
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for ProfileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCache")
            .field("profile", &self.profile())
            .field("in_flight", &self.is_loading())
            .finish_non_exhaustive()
    }
}

/// Resets the in-flight flag even if the fetch future is dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::ApiError;
    use std::sync::{Mutex, atomic::AtomicUsize};
    use tokio::sync::Notify;

    /// Source returning queued results, counting calls
    struct ScriptedSource {
        results: Mutex<Vec<ApiResult<UserProfile>>>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedSource {
        fn new(mut results: Vec<ApiResult<UserProfile>>) -> Self {
            results.reverse();
            Self {
                results: Mutex::new(results),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }
    }

    #[async_trait]
    impl ProfileSource for ScriptedSource {
        async fn current_user(&self) -> ApiResult<UserProfile> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(ApiError::AuthExpired))
        }
    }

    fn profile(roles: &str) -> UserProfile {
        UserProfile {
            id: 7,
            name: "Asha".to_string(),
            mobile_number: "9876543210".to_string(),
            email: Some("asha@example.org".to_string()),
            roles: roles.to_string(),
        }
    }

    #[test]
    fn test_elevated_markers_are_case_insensitive() {
        assert!(roles_are_elevated("ROLE_SUPERADMIN"));
        assert!(roles_are_elevated("role_admin"));
        assert!(roles_are_elevated("USER,Admin"));
        assert!(!roles_are_elevated("ROLE_USER"));
        assert!(!roles_are_elevated(""));
    }

    #[test]
    fn test_elevated_marker_matches_substrings() {
        // Substring match, not token match.
        assert!(roles_are_elevated("ADMINISTRATIVE_ASSISTANT"));
    }

    #[tokio::test]
    async fn test_fetch_replaces_profile() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(profile("ROLE_USER")),
            Ok(profile("ROLE_ADMIN")),
        ]));
        let cache = ProfileCache::new(source.clone());

        assert_eq!(cache.fetch().await, FetchOutcome::Updated);
        assert!(!cache.is_elevated());
        assert_eq!(cache.fetch().await, FetchOutcome::Updated);
        assert!(cache.is_elevated());
        assert!(cache.is_loaded());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_load_fetches_once_on_creation() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(profile("ROLE_SUPERADMIN"))]));
        let cache = ProfileCache::load(source.clone()).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
        assert!(cache.is_elevated());
    }

    #[tokio::test]
    async fn test_load_with_failing_source_stays_empty() {
        let cache = ProfileCache::load(Arc::new(ScriptedSource::new(vec![]))).await;

        assert!(cache.profile().is_none());
        assert!(!cache.is_loaded());
        assert!(!cache.is_loading());
    }

    #[test]
    fn test_new_does_not_fetch() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(profile("ROLE_USER"))]));
        let cache = ProfileCache::new(source.clone());

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(!cache.is_loaded());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_stale_profile() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(profile("ROLE_USER")),
            Err(ApiError::Rejected {
                status: Some(500),
                message: "boom".to_string(),
            }),
        ]));
        let cache = ProfileCache::new(source);

        cache.fetch().await;
        assert_eq!(cache.fetch().await, FetchOutcome::Failed);
        assert_eq!(cache.profile(), Some(profile("ROLE_USER")));
    }

    #[tokio::test]
    async fn test_clear_drops_profile() {
        let cache = ProfileCache::new(Arc::new(ScriptedSource::new(vec![Ok(profile("ADMIN"))])));
        cache.fetch().await;
        cache.clear();

        assert!(cache.profile().is_none());
        assert!(!cache.is_elevated());
        assert!(!cache.is_loaded());
    }

    #[tokio::test]
    async fn test_concurrent_fetch_is_skipped_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let mut source = ScriptedSource::new(vec![Ok(profile("ROLE_USER"))]);
        source.gate = Some(gate.clone());
        let source = Arc::new(source);
        let cache = Arc::new(ProfileCache::new(source.clone()));

        let first = tokio::spawn({
            let cache = cache.clone();
            async move { cache.fetch().await }
        });
        while !cache.is_loading() {
            tokio::task::yield_now().await;
        }

        assert_eq!(cache.fetch().await, FetchOutcome::Skipped);
        gate.notify_one();
        assert_eq!(first.await.unwrap(), FetchOutcome::Updated);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(!cache.is_loading());
    }
}
