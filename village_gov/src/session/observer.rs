//! Session observer: turns the pull-only credential store into a
//! "session changed" signal for the front end.
//!
//! The store is sampled on a fixed interval and whenever the host returns
//! to the foreground. A change in the sampled value swaps the published
//! [`NavigationRoot`]; a false→true edge also starts a profile cache
//! refresh in the background.
//! A failed storage read counts as signed out.

use super::profile::ProfileCache;
use crate::storage::CredentialStore;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};

/// Default sampling interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Which top-level UI tree should be mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRoot {
    /// Login / signup flow
    Unauthenticated,
    /// Main application
    Authenticated,
}

impl NavigationRoot {
    pub fn from_authenticated(authenticated: bool) -> Self {
        if authenticated {
            NavigationRoot::Authenticated
        } else {
            NavigationRoot::Unauthenticated
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == NavigationRoot::Authenticated
    }
}

/// Transition observed between two samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEdge {
    SignedIn,
    SignedOut,
}

/// Host process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Active,
    Inactive,
    Background,
}

/// Edge-triggered watcher of the credential store
pub struct SessionObserver {
    store: CredentialStore,
    profile: Option<Arc<ProfileCache>>,
    root: watch::Sender<NavigationRoot>,
    authenticated: bool,
}

impl SessionObserver {
    /// Create an observer whose last-known state is signed out
    pub fn new(store: CredentialStore) -> Self {
        let (root, _) = watch::channel(NavigationRoot::Unauthenticated);
        Self {
            store,
            profile: None,
            root,
            authenticated: false,
        }
    }

    /// Refresh `profile` on every sign-in edge
    pub fn with_profile(mut self, profile: Arc<ProfileCache>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Receiver of root changes
    pub fn subscribe(&self) -> watch::Receiver<NavigationRoot> {
        self.root.subscribe()
    }

    /// Currently published root
    pub fn root(&self) -> NavigationRoot {
        *self.root.borrow()
    }

    /// Sample the store once and react to a change.
    ///
    /// Returns the edge crossed, or `None` if the state is unchanged. A
    /// sign-in edge starts the profile fetch on its own task and returns
    /// without waiting for it.
    pub async fn sample(&mut self) -> Option<SessionEdge> {
        let authenticated = self.store.is_authenticated().await;
        if authenticated == self.authenticated {
            return None;
        }

        self.authenticated = authenticated;
        self.root
            .send_replace(NavigationRoot::from_authenticated(authenticated));

        if !authenticated {
            log::info!("Session ended, switching to sign-in flow");
            return Some(SessionEdge::SignedOut);
        }

        log::info!("Session started, switching to main app");
        if let Some(profile) = &self.profile {
            // Sampling must not wait on the network.
            let profile = profile.clone();
            tokio::spawn(async move {
                profile.fetch().await;
            });
        }
        Some(SessionEdge::SignedIn)
    }

    /// Run the observer on a background task.
    ///
    /// The interval timer and the lifecycle listener live in the same task
    /// and are released together when the returned handle is stopped or
    /// dropped. A closed lifecycle channel only disables foreground checks.
    pub fn spawn(self, interval: Duration, lifecycle: mpsc::Receiver<AppState>) -> ObserverHandle {
        let root = self.subscribe();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(interval, lifecycle, shutdown_rx));

        ObserverHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
            root,
        }
    }

    async fn run(
        mut self,
        interval: Duration,
        mut lifecycle: mpsc::Receiver<AppState>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut app_state = AppState::Active;
        let mut lifecycle_open = true;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.sample().await;
                }
                event = lifecycle.recv(), if lifecycle_open => match event {
                    Some(next) => {
                        let resumed = next == AppState::Active && app_state != AppState::Active;
                        app_state = next;
                        if resumed {
                            log::debug!("App returned to foreground, sampling session");
                            self.sample().await;
                        }
                    }
                    None => lifecycle_open = false,
                },
            }
        }

        log::debug!("Session observer stopped");
    }
}

/// Owner of a running observer task
pub struct ObserverHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    root: watch::Receiver<NavigationRoot>,
}

impl ObserverHandle {
    /// Receiver of root changes
    pub fn subscribe(&self) -> watch::Receiver<NavigationRoot> {
        self.root.clone()
    }

    /// Currently published root
    pub fn root(&self) -> NavigationRoot {
        *self.root.borrow()
    }

    /// Stop polling and wait for the task to finish
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::error!("Session observer task failed: {}", e);
            }
        }
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
