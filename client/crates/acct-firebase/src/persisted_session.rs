use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// What survives between runs: enough to mint a new ID token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub uid: String,
    pub email: Option<String>,
    pub refresh_token: String,
    pub saved_at: DateTime<Utc>,
    pub schema_version: u32,
}

impl PersistedSession {
    pub fn new(uid: String, email: Option<String>, refresh_token: String) -> Self {
        Self {
            uid,
            email,
            refresh_token,
            saved_at: Utc::now(),
            schema_version: SESSION_SCHEMA_VERSION,
        }
    }
}
