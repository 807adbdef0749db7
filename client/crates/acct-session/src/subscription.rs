use tokio::task::JoinHandle;

/// Handle to an identity-change listener.
///
/// Cancelling (explicitly or by dropping the handle) stops further callbacks.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Stop receiving updates.
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    /// Whether the listener task is still running.
    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
