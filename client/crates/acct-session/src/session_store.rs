use crate::Subscription;

use acct_core::{Identity, SessionState};

use tokio::sync::watch;

/// Owner of the current identity.
///
/// Construct one per application and pass it around in an `Arc`. Writes go
/// through [`SessionStore::apply`], which only the crate's sync task calls.
pub struct SessionStore {
    sender: watch::Sender<Option<Identity>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Last known identity, or None when anonymous.
    pub fn current(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        SessionState::of(self.sender.borrow().as_ref())
    }

    pub fn is_email_verified(&self) -> bool {
        self.sender
            .borrow()
            .as_ref()
            .is_some_and(|identity| identity.email_verified)
    }

    /// Raw change feed. Intermediate values may be coalesced; the latest is never lost.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }

    /// Invoke `callback` with the current identity, then again on every change.
    ///
    /// The listener runs on the tokio runtime until the returned
    /// [`Subscription`] is cancelled or dropped, or the store itself is dropped.
    pub fn on_identity_changed<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(Option<Identity>) + Send + 'static,
    {
        let mut receiver = self.sender.subscribe();
        receiver.mark_changed();

        let handle = tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let snapshot = receiver.borrow_and_update().clone();
                callback(snapshot);
            }
        });

        Subscription::new(handle)
    }

    /// Wait for the first identity snapshot (current one included) matching `predicate`.
    pub async fn wait_until<P>(&self, mut predicate: P) -> Option<Identity>
    where
        P: FnMut(Option<&Identity>) -> bool,
    {
        let mut receiver = self.sender.subscribe();
        match receiver
            .wait_for(|identity| predicate(identity.as_ref()))
            .await
        {
            Ok(identity) => identity.clone(),
            // The store holds the sender, so the channel cannot close while borrowed.
            Err(_) => self.current(),
        }
    }

    /// Replace the identity wholesale. Subscribers are only woken on an actual change.
    pub(crate) fn apply(&self, identity: Option<Identity>) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == identity {
                return false;
            }
            *current = identity;
            true
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
