use crate::{ProfileCache, SessionStore};

use std::collections::HashMap;
use std::sync::Arc;

use acct_core::{AuthUser, Identity, ProfileRecord, ProfileStore};

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// The single writer of a [`SessionStore`].
///
/// Consumes backend auth-state notifications and profile-cache events on one
/// task, so store updates are applied serially and in arrival order. The task
/// stops when this handle is dropped or the backend channel closes.
pub struct SessionSync {
    profile_cache: ProfileCache,
    handle: JoinHandle<()>,
}

impl SessionSync {
    /// Start syncing `store` from `updates`. Must be called inside a tokio runtime.
    pub fn spawn(
        store: Arc<SessionStore>,
        updates: watch::Receiver<Option<AuthUser>>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let worker = SyncWorker {
            store,
            profiles,
            last_user: None,
            cache: HashMap::new(),
        };
        let handle = tokio::spawn(worker.run(updates, receiver));

        Self {
            profile_cache: ProfileCache::new(sender),
            handle,
        }
    }

    pub fn profile_cache(&self) -> ProfileCache {
        self.profile_cache.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the sync task. The store keeps its last identity.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for SessionSync {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct SyncWorker {
    store: Arc<SessionStore>,
    profiles: Arc<dyn ProfileStore>,
    last_user: Option<AuthUser>,
    cache: HashMap<String, ProfileRecord>,
}

impl SyncWorker {
    async fn run(
        mut self,
        mut updates: watch::Receiver<Option<AuthUser>>,
        mut cached_profiles: mpsc::UnboundedReceiver<(String, ProfileRecord)>,
    ) {
        let initial = updates.borrow_and_update().clone();
        self.on_user(initial).await;

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        debug!("Auth state channel closed, stopping session sync");
                        break;
                    }
                    let user = updates.borrow_and_update().clone();
                    self.on_user(user).await;
                }
                Some((uid, record)) = cached_profiles.recv() => {
                    self.on_profile(uid, record);
                }
            }
        }
    }

    async fn on_user(&mut self, user: Option<AuthUser>) {
        let Some(user) = user else {
            self.last_user = None;
            if self.store.apply(None) {
                info!("Session cleared");
            }
            return;
        };

        let profile = self.profile_for(&user.uid).await;
        let identity = Identity::resolve(&user, profile.as_ref());
        self.last_user = Some(user);

        if self.store.apply(Some(identity)) {
            info!("Session updated: state={}", self.store.state().as_str());
        }
    }

    fn on_profile(&mut self, uid: String, record: ProfileRecord) {
        let identity = self
            .last_user
            .as_ref()
            .filter(|user| user.uid == uid)
            .map(|user| Identity::resolve(user, Some(&record)));
        self.cache.insert(uid, record);

        if let Some(identity) = identity {
            self.store.apply(Some(identity));
        }
    }

    /// Cached profile, else fetched from the store. Lookup failures only cost the display name.
    async fn profile_for(&mut self, uid: &str) -> Option<ProfileRecord> {
        if let Some(record) = self.cache.get(uid) {
            return Some(record.clone());
        }

        match self.profiles.fetch_profile(uid).await {
            Ok(Some(record)) => {
                self.cache.insert(uid.to_string(), record.clone());
                Some(record)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Profile lookup for {uid} failed, using backend display name: {e}");
                None
            }
        }
    }
}
