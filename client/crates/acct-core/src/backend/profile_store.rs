use crate::{ProfileRecord, Result as AuthResult};

use async_trait::async_trait;

/// Per-user profile documents, keyed by account id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create_profile(&self, uid: &str, record: &ProfileRecord) -> AuthResult<()>;

    /// Latest profile document of the account, if one was ever written.
    async fn fetch_profile(&self, uid: &str) -> AuthResult<Option<ProfileRecord>>;
}
