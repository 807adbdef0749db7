use crate::Identity;

use serde::{Deserialize, Serialize};

/// Coarse session state derived from the current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    AuthenticatedUnverified,
    AuthenticatedVerified,
}

impl SessionState {
    pub fn of(identity: Option<&Identity>) -> Self {
        match identity {
            None => Self::Anonymous,
            Some(identity) if identity.email_verified => Self::AuthenticatedVerified,
            Some(_) => Self::AuthenticatedUnverified,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Anonymous => "anonymous",
            Self::AuthenticatedUnverified => "authenticated_unverified",
            Self::AuthenticatedVerified => "authenticated_verified",
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}
