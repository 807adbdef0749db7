use crate::{DEFAULT_TOKEN_LIFETIME_SECS, MAX_TOKEN_LIFETIME_SECS, TOKEN_REFRESH_MARGIN_SECS};

use acct_core::AuthUser;

use chrono::{DateTime, Duration, Utc};

/// Tokens and account of the signed-in user. Never logged.
#[derive(Clone)]
pub(crate) struct SignedInSession {
    pub user: AuthUser,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl SignedInSession {
    pub fn new(
        user: AuthUser,
        id_token: String,
        refresh_token: String,
        expires_in: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user,
            id_token,
            refresh_token,
            expires_at: Self::expiry(expires_in, now),
        }
    }

    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) <= now
    }

    pub fn apply_refresh(
        &mut self,
        id_token: String,
        refresh_token: String,
        expires_in: Option<&str>,
        now: DateTime<Utc>,
    ) {
        self.id_token = id_token;
        self.refresh_token = refresh_token;
        self.expires_at = Self::expiry(expires_in, now);
    }

    fn expiry(expires_in: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
        let seconds = expires_in
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|seconds| (1..=MAX_TOKEN_LIFETIME_SECS).contains(seconds))
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        now + Duration::seconds(seconds)
    }
}
