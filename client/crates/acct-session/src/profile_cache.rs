use acct_core::ProfileRecord;

use tokio::sync::mpsc;

/// Write side of the sync task's profile cache.
///
/// The gateway publishes the record it just stored so the session can show
/// the user's name without another round trip to the document store.
#[derive(Clone)]
pub struct ProfileCache {
    sender: mpsc::UnboundedSender<(String, ProfileRecord)>,
}

impl ProfileCache {
    pub(crate) fn new(sender: mpsc::UnboundedSender<(String, ProfileRecord)>) -> Self {
        Self { sender }
    }

    /// Returns false once the sync task has stopped.
    pub fn publish(&self, uid: &str, record: ProfileRecord) -> bool {
        self.sender.send((uid.to_string(), record)).is_ok()
    }
}
