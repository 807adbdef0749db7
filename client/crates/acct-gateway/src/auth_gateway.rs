use crate::{GatewayOptions, VerificationLimiter};

use std::sync::Arc;
use std::time::Duration;

use acct_core::{
    AuthError, AuthUser, FederatedProvider, Identity, IdentityBackend, InputValidator,
    ProfileAttributes, ProfileRecord, ProfileStore, Result as AuthResult,
};
use acct_session::{ProfileCache, SessionStore, SessionSync};

use chrono::Local;
use log::{debug, info, warn};
use tokio::time::timeout;

/// Upper bound on waiting for a freshly written profile to reach the store.
const PROFILE_SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Intent-level facade over the identity backend and the profile store.
///
/// Operations never touch the session store directly: the backend announces
/// every state change on its notification channel and the gateway's
/// [`SessionSync`] applies it. Nothing is retried; failures go to the caller.
pub struct AuthGateway {
    backend: Arc<dyn IdentityBackend>,
    profiles: Arc<dyn ProfileStore>,
    provider: Arc<dyn FederatedProvider>,
    store: Arc<SessionStore>,
    profile_cache: ProfileCache,
    limiter: VerificationLimiter,
    options: GatewayOptions,
    _sync: SessionSync,
}

impl AuthGateway {
    /// Wire the gateway and start syncing `store`. Must be called inside a tokio runtime.
    pub fn new(
        backend: Arc<dyn IdentityBackend>,
        profiles: Arc<dyn ProfileStore>,
        provider: Arc<dyn FederatedProvider>,
        store: Arc<SessionStore>,
        options: GatewayOptions,
    ) -> Self {
        let sync = SessionSync::spawn(
            Arc::clone(&store),
            backend.subscribe(),
            Arc::clone(&profiles),
        );

        Self {
            backend,
            profiles,
            provider,
            store,
            profile_cache: sync.profile_cache(),
            limiter: VerificationLimiter::new(options.verification_rate_limit.clone()),
            options,
            _sync: sync,
        }
    }

    pub fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    /// Create an account, then send the verification email and write the profile.
    ///
    /// Succeeds only once both follow-up calls have resolved. The account
    /// stays signed in even when one of them fails; a failed verification
    /// email is reported ahead of a failed profile write. After a successful
    /// write it waits, up to two seconds, for the store to show the profile name.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        profile: &ProfileAttributes,
    ) -> AuthResult<AuthUser> {
        InputValidator::validate_registration(email, password, profile, Local::now().date_naive())?;

        let email = email.trim();
        let user = self.backend.create_account(email, password).await?;
        info!("Account created: {}", user.uid);

        let record = ProfileRecord::new(profile, email);
        let (verification, profile_write) = tokio::join!(
            self.backend.send_email_verification(),
            self.profiles.create_profile(&user.uid, &record),
        );

        match &profile_write {
            Ok(()) => {
                let expected = Identity::resolve(&user, Some(&record));
                if self.profile_cache.publish(&user.uid, record) {
                    self.await_profile_applied(&expected).await;
                }
            }
            Err(e) => warn!("Profile write for {} failed: {e}", user.uid),
        }
        if let Err(e) = &verification {
            warn!("Verification email for {} failed: {e}", user.uid);
        }

        verification?;
        profile_write?;
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        InputValidator::validate_sign_in(email, password)?;

        let user = self
            .backend
            .sign_in_with_password(email.trim(), password)
            .await?;
        info!("Signed in: {}", user.uid);
        Ok(user)
    }

    /// Run the federated flow and exchange its credential for a session.
    pub async fn sign_in_with_provider(&self) -> AuthResult<AuthUser> {
        let credential = self.provider.obtain_credential().await?;
        debug!("Federated credential obtained from {}", credential.provider_id);

        let user = self.backend.sign_in_with_credential(&credential).await?;
        info!("Signed in with {}: {}", credential.provider_id, user.uid);
        Ok(user)
    }

    /// Idempotent: signing out while anonymous succeeds.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.backend.sign_out().await?;
        info!("Signed out");
        Ok(())
    }

    pub async fn resend_verification(&self) -> AuthResult<()> {
        let Some(user) = self.backend.current_user() else {
            return Err(AuthError::no_current_user());
        };
        self.limiter.check()?;

        match self.backend.send_email_verification().await {
            Ok(()) => {
                info!("Verification email re-sent to {}", user.uid);
                Ok(())
            }
            Err(e @ AuthError::BackendUnavailable { .. }) => {
                self.limiter.refund();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Ask the backend to email a reset link.
    ///
    /// Unknown addresses are reported as success unless
    /// `reveal_unknown_accounts` is set, so the call cannot be used to probe
    /// which emails are registered.
    pub async fn request_password_reset(&self, email: &str) -> AuthResult<()> {
        InputValidator::validate_email(email)?;

        match self.backend.send_password_reset(email.trim()).await {
            Ok(()) => {
                info!("Password reset email requested");
                Ok(())
            }
            Err(AuthError::UnknownAccount { .. }) if !self.options.reveal_unknown_accounts => {
                debug!("Password reset requested for an unknown account");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Re-fetch the account so a completed email verification becomes visible.
    pub async fn reload(&self) -> AuthResult<AuthUser> {
        if self.backend.current_user().is_none() {
            return Err(AuthError::no_current_user());
        }
        self.backend.reload().await
    }

    /// Stored profile of the signed-in user, None if it was never written.
    pub async fn profile(&self) -> AuthResult<Option<ProfileRecord>> {
        let uid = match self.store.current() {
            Some(identity) => identity.uid,
            None => match self.backend.current_user() {
                Some(user) => user.uid,
                None => return Err(AuthError::no_current_user()),
            },
        };
        self.profiles.fetch_profile(&uid).await
    }

    /// The store's identity once it reflects the backend's current user.
    ///
    /// Backend notifications are applied asynchronously; front-ends that act
    /// right after an operation use this instead of [`SessionStore::current`].
    pub async fn settled_identity(&self) -> Option<Identity> {
        match self.backend.current_user() {
            Some(user) => {
                self.store
                    .wait_until(|identity| {
                        identity.is_some_and(|identity| {
                            identity.uid == user.uid
                                && identity.email_verified == user.email_verified
                        })
                    })
                    .await
            }
            None => self.store.wait_until(|identity| identity.is_none()).await,
        }
    }

    /// Wait, bounded, for the sync task to apply a just-published profile.
    async fn await_profile_applied(&self, expected: &Identity) {
        let applied = self.store.wait_until(|identity| {
            identity.is_some_and(|identity| {
                identity.uid == expected.uid && identity.display_name == expected.display_name
            })
        });
        if timeout(PROFILE_SETTLE_TIMEOUT, applied).await.is_err() {
            debug!("Profile of {} not yet in the session store", expected.uid);
        }
    }
}
