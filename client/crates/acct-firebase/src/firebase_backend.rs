use crate::api_types::SignInResponse;
use crate::error::Result as FirebaseResult;
use crate::firestore_document::FirestoreDocument;
use crate::rest_client::RestClient;
use crate::signed_in_session::SignedInSession;
use crate::{PersistedSession, SessionFile};

use std::path::PathBuf;

use acct_config::FirebaseConfig;
use acct_core::{
    AuthError, AuthUser, FederatedCredential, IdentityBackend, ProfileRecord, ProfileStore,
    Result as AuthResult,
};

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::{Mutex, watch};

/// [`IdentityBackend`] and [`ProfileStore`] backed by the Firebase REST APIs.
///
/// Tokens live in memory and are refreshed shortly before they expire. When a
/// session file is configured, the refresh token is written there after every
/// sign-in and refresh so [`FirebaseBackend::restore`] can resume the session
/// in the next process.
pub struct FirebaseBackend {
    client: RestClient,
    session: Mutex<Option<SignedInSession>>,
    sender: watch::Sender<Option<AuthUser>>,
    session_file: Option<SessionFile>,
}

impl FirebaseBackend {
    pub fn new(config: &FirebaseConfig, session_path: Option<PathBuf>) -> FirebaseResult<Self> {
        let client = RestClient::new(config)?;
        let (sender, _) = watch::channel(None);

        Ok(Self {
            client,
            session: Mutex::new(None),
            sender,
            session_file: session_path.map(SessionFile::new),
        })
    }

    pub fn session_file(&self) -> Option<&SessionFile> {
        self.session_file.as_ref()
    }

    /// Resume the session saved by a previous run, if any.
    ///
    /// A corrupted file is backed up and treated as signed out. A session the
    /// backend no longer honours is deleted. Network failures leave the file
    /// in place and are returned.
    pub async fn restore(&self) -> AuthResult<Option<AuthUser>> {
        let Some(file) = &self.session_file else {
            return Ok(None);
        };

        let loaded = match file.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Session not restored: {e}");
                return Ok(None);
            }
        };

        if let Some(reason) = loaded.corruption_error {
            warn!("Discarding corrupted session file: {reason}");
            if let Err(e) = file.backup_corrupted() {
                warn!("{e} ({})", e.recovery_hint());
            }
            return Ok(None);
        }

        let Some(persisted) = loaded.session else {
            return Ok(None);
        };

        let now = Utc::now();
        let token = match self.client.refresh(&persisted.refresh_token).await {
            Ok(token) => token,
            Err(AuthError::NoCurrentUser { .. }) => {
                info!("Saved session for {} is no longer valid", persisted.uid);
                self.forget_saved_session();
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if let Some(user_id) = token.user_id.as_deref()
            && user_id != persisted.uid
        {
            warn!(
                "Refreshed token belongs to {user_id}, saved session was for {}",
                persisted.uid
            );
        }

        let user: AuthUser = match self.client.lookup(&token.id_token).await {
            Ok(user) => user.into(),
            Err(AuthError::NoCurrentUser { .. }) => {
                info!("Account of saved session {} no longer exists", persisted.uid);
                self.forget_saved_session();
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let session = SignedInSession::new(
            user.clone(),
            token.id_token,
            token.refresh_token,
            token.expires_in.as_deref(),
            now,
        );
        self.install(session).await;
        info!("Session restored for {}", user.uid);

        Ok(Some(user))
    }

    /// Turn a sign-in response into the current session and announce it.
    async fn establish(&self, response: SignInResponse) -> AuthResult<AuthUser> {
        let now = Utc::now();

        let user = match response.email_verified {
            Some(email_verified) => AuthUser {
                uid: response.local_id,
                email: response.email,
                email_verified,
                display_name: response.display_name,
            },
            // Password flows omit the flag; ask for the full account.
            None => self.client.lookup(&response.id_token).await?.into(),
        };

        let session = SignedInSession::new(
            user.clone(),
            response.id_token,
            response.refresh_token,
            response.expires_in.as_deref(),
            now,
        );
        self.install(session).await;

        Ok(user)
    }

    async fn install(&self, session: SignedInSession) {
        let user = session.user.clone();
        let mut guard = self.session.lock().await;
        // Saved under the lock so a concurrent refresh cannot write an older token last.
        self.save_session(&session);
        *guard = Some(session);
        drop(guard);
        self.sender.send_replace(Some(user));
    }

    async fn clear(&self) {
        *self.session.lock().await = None;
        self.forget_saved_session();
        self.sender.send_replace(None);
    }

    /// ID token of the signed-in user, refreshed if it is about to expire.
    async fn fresh_id_token(&self) -> AuthResult<String> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return Err(AuthError::no_current_user());
        };

        let now = Utc::now();
        if !session.needs_refresh(now) {
            return Ok(session.id_token.clone());
        }

        debug!("Refreshing ID token for {}", session.user.uid);
        match self.client.refresh(&session.refresh_token).await {
            Ok(token) => {
                session.apply_refresh(
                    token.id_token,
                    token.refresh_token,
                    token.expires_in.as_deref(),
                    now,
                );
                self.save_session(session);
                Ok(session.id_token.clone())
            }
            Err(e @ AuthError::NoCurrentUser { .. }) => {
                warn!("Session for {} was revoked", session.user.uid);
                *guard = None;
                drop(guard);
                self.forget_saved_session();
                self.sender.send_replace(None);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    fn save_session(&self, session: &SignedInSession) {
        let Some(file) = &self.session_file else {
            return;
        };

        let persisted = PersistedSession::new(
            session.user.uid.clone(),
            session.user.email.clone(),
            session.refresh_token.clone(),
        );
        if let Err(e) = file.save(&persisted) {
            warn!("{e} ({})", e.recovery_hint());
        }
    }

    fn forget_saved_session(&self) {
        if let Some(file) = &self.session_file
            && let Err(e) = file.remove()
        {
            warn!("{e} ({})", e.recovery_hint());
        }
    }
}

#[async_trait]
impl IdentityBackend for FirebaseBackend {
    async fn create_account(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let response = self.client.sign_up(email, password).await?;
        self.establish(response).await
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let response = self.client.sign_in_with_password(email, password).await?;
        self.establish(response).await
    }

    async fn sign_in_with_credential(
        &self,
        credential: &FederatedCredential,
    ) -> AuthResult<AuthUser> {
        let response = self.client.sign_in_with_idp(credential).await?;
        self.establish(response).await
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.clear().await;
        Ok(())
    }

    async fn send_email_verification(&self) -> AuthResult<()> {
        let id_token = self.fresh_id_token().await?;
        self.client.send_verification(&id_token).await
    }

    async fn send_password_reset(&self, email: &str) -> AuthResult<()> {
        self.client.send_password_reset(email).await
    }

    async fn reload(&self) -> AuthResult<AuthUser> {
        let id_token = self.fresh_id_token().await?;

        let user: AuthUser = match self.client.lookup(&id_token).await {
            Ok(user) => user.into(),
            Err(e @ AuthError::NoCurrentUser { .. }) => {
                self.clear().await;
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        if let Some(session) = self.session.lock().await.as_mut() {
            session.user = user.clone();
        }
        self.sender.send_replace(Some(user.clone()));

        Ok(user)
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl ProfileStore for FirebaseBackend {
    async fn create_profile(&self, uid: &str, record: &ProfileRecord) -> AuthResult<()> {
        let document = FirestoreDocument::from_record(record).map_err(|e| {
            AuthError::backend_unavailable(format!("profile could not be encoded: {e}"))
        })?;

        let id_token = self.fresh_id_token().await?;
        self.client.create_document(uid, &id_token, &document).await?;
        debug!("Profile document written for {uid}");
        Ok(())
    }

    async fn fetch_profile(&self, uid: &str) -> AuthResult<Option<ProfileRecord>> {
        let id_token = self.fresh_id_token().await?;
        let listing = self.client.list_documents(uid, &id_token).await?;

        listing
            .latest()
            .map(FirestoreDocument::to_record)
            .transpose()
            .map_err(|e| {
                AuthError::backend_unavailable(format!("profile document is malformed: {e}"))
            })
    }
}
