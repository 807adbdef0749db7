//! Identity - the session record the rest of the application reads.

use crate::{AuthUser, ProfileRecord};

use serde::{Deserialize, Serialize};

/// Minimal record of the authenticated user.
///
/// Replaced wholesale on every backend notification; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
}

impl Identity {
    /// Derive an identity from the backend user and, when known, the stored profile.
    ///
    /// The profile's primary-script name wins over the backend display name,
    /// which is only populated for federated accounts.
    pub fn resolve(user: &AuthUser, profile: Option<&ProfileRecord>) -> Self {
        let display_name = profile
            .map(|record| record.name_primary.trim())
            .filter(|name| !name.is_empty())
            .map(String::from)
            .or_else(|| user.display_name.clone());

        Self {
            uid: user.uid.clone(),
            email: user.email.clone(),
            email_verified: user.email_verified,
            display_name,
        }
    }
}
