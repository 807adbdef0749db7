use crate::{AuthUser, FederatedCredential, Result as AuthResult};

use async_trait::async_trait;
use tokio::sync::watch;

/// External identity service: accounts, credentials, tokens and email delivery.
///
/// Every state-changing call must publish the resulting account (or `None`)
/// on the channel returned by [`IdentityBackend::subscribe`]. That channel is
/// the only way sessions learn about sign-in, sign-out and verification.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Create an account and sign it in.
    async fn create_account(&self, email: &str, password: &str) -> AuthResult<AuthUser>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<AuthUser>;

    async fn sign_in_with_credential(
        &self,
        credential: &FederatedCredential,
    ) -> AuthResult<AuthUser>;

    /// Drop the local session. Signing out while signed out is not an error.
    async fn sign_out(&self) -> AuthResult<()>;

    /// Send a verification link to the signed-in account's email.
    async fn send_email_verification(&self) -> AuthResult<()>;

    async fn send_password_reset(&self, email: &str) -> AuthResult<()>;

    /// Re-fetch the signed-in account so server-side changes become visible.
    async fn reload(&self) -> AuthResult<AuthUser>;

    fn current_user(&self) -> Option<AuthUser>;

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}
