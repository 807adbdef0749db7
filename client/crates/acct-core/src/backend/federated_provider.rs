use crate::{FederatedCredential, Result as AuthResult};

use async_trait::async_trait;

/// Interactive federated flow (e.g. Google account chooser).
#[async_trait]
pub trait FederatedProvider: Send + Sync {
    /// Run the flow. Returns `UserCancelled` when the user backs out.
    async fn obtain_credential(&self) -> AuthResult<FederatedCredential>;
}
