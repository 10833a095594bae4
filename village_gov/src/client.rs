//! Wiring of the session core into one handle.

use crate::{
    auth::AuthController,
    config::ClientConfig,
    net::{ApiResult, SessionGateway},
    services::{
        AnnouncementService, DashboardService, FacilityService, IssueService, SchemeService,
        UserService, VillageService,
    },
    session::{AppState, ObserverHandle, ProfileCache, SessionObserver},
    storage::{CredentialStore, FileStore},
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Credential store, gateway, profile cache and auth controller sharing
/// one session
#[derive(Clone)]
pub struct VillageClient {
    config: ClientConfig,
    gateway: SessionGateway,
    profile: Arc<ProfileCache>,
    auth: AuthController,
}

impl VillageClient {
    /// Build a client persisting credentials to `config.credentials_path`
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let store = CredentialStore::new(Arc::new(FileStore::new(config.credentials_path.clone())));
        Self::with_store(config, store)
    }

    /// Build a client over an existing credential store
    pub fn with_store(config: ClientConfig, store: CredentialStore) -> ApiResult<Self> {
        let gateway = SessionGateway::with_timeout(&config.api_url, store, config.request_timeout)?;
        let profile = Arc::new(ProfileCache::new(Arc::new(gateway.clone())));
        let auth = AuthController::new(gateway.clone()).with_profile(profile.clone());

        Ok(Self {
            config,
            gateway,
            profile,
            auth,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &CredentialStore {
        self.gateway.store()
    }

    pub fn gateway(&self) -> &SessionGateway {
        &self.gateway
    }

    pub fn auth(&self) -> &AuthController {
        &self.auth
    }

    pub fn profile(&self) -> &Arc<ProfileCache> {
        &self.profile
    }

    /// Observer bound to this client's store and profile cache
    pub fn observer(&self) -> SessionObserver {
        SessionObserver::new(self.store().clone()).with_profile(self.profile.clone())
    }

    /// Start observing the session at the configured interval
    pub fn spawn_observer(&self, lifecycle: mpsc::Receiver<AppState>) -> ObserverHandle {
        self.observer().spawn(self.config.poll_interval, lifecycle)
    }

    pub fn villages(&self) -> VillageService {
        VillageService::new(self.gateway.clone())
    }

    pub fn facilities(&self) -> FacilityService {
        FacilityService::new(self.gateway.clone())
    }

    pub fn issues(&self) -> IssueService {
        IssueService::new(self.gateway.clone())
    }

    pub fn schemes(&self) -> SchemeService {
        SchemeService::new(self.gateway.clone())
    }

    pub fn announcements(&self) -> AnnouncementService {
        AnnouncementService::new(self.gateway.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.gateway.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.gateway.clone())
    }
}
