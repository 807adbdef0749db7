
use std::collections::HashMap;
use std::sync::Mutex;

use acct_core::{AuthError, AuthUser, Identity, ProfileRecord, ProfileStore, Result as AuthResult};

use async_trait::async_trait;

pub(crate) fn user(uid: &str, email_verified: bool) -> AuthUser {
    AuthUser {
        uid: uid.to_string(),
        email: Some(format!("{uid}@x.com")),
        email_verified,
        display_name: Some(String::from("Backend Name")),
    }
}

pub(crate) fn identity(uid: &str, email_verified: bool) -> Identity {
    Identity::resolve(&user(uid, email_verified), None)
}

pub(crate) fn record(name: &str) -> ProfileRecord {
    ProfileRecord {
        name_primary: name.to_string(),
        ..ProfileRecord::default()
    }
}

/// Profile store double: fixed documents, optionally failing every lookup.
#[derive(Default)]
pub(crate) struct FakeProfiles {
    records: Mutex<HashMap<String, ProfileRecord>>,
    failing: bool,
}

impl FakeProfiles {
    pub(crate) fn with(uid: &str, record: ProfileRecord) -> Self {
        let profiles = Self::default();
        profiles
            .records
            .lock()
            .unwrap()
            .insert(uid.to_string(), record);
        profiles
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ProfileStore for FakeProfiles {
    async fn create_profile(&self, uid: &str, record: &ProfileRecord) -> AuthResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(uid.to_string(), record.clone());
        Ok(())
    }

    async fn fetch_profile(&self, uid: &str) -> AuthResult<Option<ProfileRecord>> {
        if self.failing {
            return Err(AuthError::backend_unavailable("document store offline"));
        }
        Ok(self.records.lock().unwrap().get(uid).cloned())
    }
}
