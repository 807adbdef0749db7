//! In-process identity backend and profile store.
//!
//! Behaves like the hosted backend from the gateway's point of view: it
//! publishes every sign-in, sign-out and reload on its notification channel,
//! keeps verification state server-side until `reload`, and returns the same
//! error taxonomy. Used by tests and local demos.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use acct_core::{
    AuthError, AuthUser, FederatedCredential, IdentityBackend, ProfileRecord, ProfileStore,
    Result as AuthResult,
};

use async_trait::async_trait;
use log::debug;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    email: String,
    password: Option<String>,
    email_verified: bool,
    display_name: Option<String>,
}

impl Account {
    fn to_user(&self) -> AuthUser {
        AuthUser {
            uid: self.uid.clone(),
            email: Some(self.email.clone()),
            email_verified: self.email_verified,
            display_name: self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct FederatedIdentity {
    email: String,
    display_name: String,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    federated: HashMap<String, FederatedIdentity>,
    profiles: HashMap<String, Vec<ProfileRecord>>,
    current: Option<String>,
    verification_emails: Vec<String>,
    password_reset_emails: Vec<String>,
    unavailable: bool,
    verification_failing: bool,
    profile_writes_failing: bool,
}

impl State {
    fn current_account(&self) -> Option<&Account> {
        let uid = self.current.as_ref()?;
        self.accounts.values().find(|account| &account.uid == uid)
    }

    fn ensure_available(&self) -> AuthResult<()> {
        if self.unavailable {
            return Err(AuthError::backend_unavailable("in-memory backend offline"));
        }
        Ok(())
    }
}

pub struct InMemoryBackend {
    state: Mutex<State>,
    sender: watch::Sender<Option<AuthUser>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            state: Mutex::new(State::default()),
            sender,
        }
    }

    /// Make a Google ID token acceptable for federated sign-in.
    pub fn register_federated(&self, id_token: &str, email: &str, display_name: &str) {
        self.state().federated.insert(
            id_token.to_string(),
            FederatedIdentity {
                email: email.to_string(),
                display_name: display_name.to_string(),
            },
        );
    }

    /// Simulate the user following the verification link. Like the real
    /// backend, the change is not announced until the client reloads.
    pub fn confirm_email(&self, email: &str) -> bool {
        match self.state().accounts.get_mut(email) {
            Some(account) => {
                account.email_verified = true;
                true
            }
            None => false,
        }
    }

    /// While set, every call fails with `BackendUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    /// While set, only `send_email_verification` fails with `BackendUnavailable`.
    pub fn set_verification_failing(&self, failing: bool) {
        self.state().verification_failing = failing;
    }

    /// While set, only `create_profile` fails with `BackendUnavailable`.
    pub fn set_profile_writes_failing(&self, failing: bool) {
        self.state().profile_writes_failing = failing;
    }

    /// Account ids that verification emails were sent for, in order.
    pub fn verification_emails(&self) -> Vec<String> {
        self.state().verification_emails.clone()
    }

    /// Addresses that password reset emails were sent to, in order.
    pub fn password_reset_emails(&self) -> Vec<String> {
        self.state().password_reset_emails.clone()
    }

    /// Every profile document written for `uid`, oldest first.
    pub fn profile_documents(&self, uid: &str) -> Vec<ProfileRecord> {
        self.state()
            .profiles
            .get(uid)
            .cloned()
            .unwrap_or_default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sign_in_as(&self, state: &mut State, account: &Account) -> AuthUser {
        state.current = Some(account.uid.clone());
        let user = account.to_user();
        self.sender.send_replace(Some(user.clone()));
        user
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityBackend for InMemoryBackend {
    async fn create_account(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let mut state = self.state();
        state.ensure_available()?;

        if state.accounts.contains_key(email) {
            return Err(AuthError::duplicate_account());
        }

        let account = Account {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: Some(password.to_string()),
            email_verified: false,
            display_name: None,
        };
        state.accounts.insert(email.to_string(), account.clone());
        debug!("In-memory account created: {}", account.uid);

        Ok(self.sign_in_as(&mut state, &account))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let mut state = self.state();
        state.ensure_available()?;

        let account = match state.accounts.get(email) {
            Some(account) if account.password.as_deref() == Some(password) => account.clone(),
            _ => return Err(AuthError::invalid_credentials()),
        };

        Ok(self.sign_in_as(&mut state, &account))
    }

    async fn sign_in_with_credential(
        &self,
        credential: &FederatedCredential,
    ) -> AuthResult<AuthUser> {
        let mut state = self.state();
        state.ensure_available()?;

        let Some(federated) = state.federated.get(&credential.id_token).cloned() else {
            return Err(AuthError::backend_unavailable("INVALID_IDP_RESPONSE"));
        };

        let account = state
            .accounts
            .entry(federated.email.clone())
            .or_insert_with(|| Account {
                uid: Uuid::new_v4().to_string(),
                email: federated.email.clone(),
                password: None,
                email_verified: true,
                display_name: Some(federated.display_name.clone()),
            })
            .clone();

        Ok(self.sign_in_as(&mut state, &account))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let mut state = self.state();
        state.current = None;
        self.sender.send_replace(None);
        Ok(())
    }

    async fn send_email_verification(&self) -> AuthResult<()> {
        let mut state = self.state();
        state.ensure_available()?;

        let Some(uid) = state.current_account().map(|account| account.uid.clone()) else {
            return Err(AuthError::no_current_user());
        };
        if state.verification_failing {
            return Err(AuthError::backend_unavailable("verification email not sent"));
        }
        state.verification_emails.push(uid);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> AuthResult<()> {
        let mut state = self.state();
        state.ensure_available()?;

        if !state.accounts.contains_key(email) {
            return Err(AuthError::unknown_account());
        }
        state.password_reset_emails.push(email.to_string());
        Ok(())
    }

    async fn reload(&self) -> AuthResult<AuthUser> {
        let state = self.state();
        state.ensure_available()?;

        let Some(user) = state.current_account().map(Account::to_user) else {
            return Err(AuthError::no_current_user());
        };
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
impl ProfileStore for InMemoryBackend {
    async fn create_profile(&self, uid: &str, record: &ProfileRecord) -> AuthResult<()> {
        let mut state = self.state();
        state.ensure_available()?;
        if state.profile_writes_failing {
            return Err(AuthError::backend_unavailable("profile write rejected"));
        }

        state
            .profiles
            .entry(uid.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn fetch_profile(&self, uid: &str) -> AuthResult<Option<ProfileRecord>> {
        let state = self.state();
        state.ensure_available()?;

        Ok(state
            .profiles
            .get(uid)
            .and_then(|documents| documents.last().cloned()))
    }
}
