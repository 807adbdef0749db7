use crate::DEFAULT_REVEAL_UNKNOWN_ACCOUNTS;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Surface `UnknownAccount` from password reset instead of reporting success.
    /// Off by default so reset requests cannot be used to probe for accounts.
    pub reveal_unknown_accounts: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            reveal_unknown_accounts: DEFAULT_REVEAL_UNKNOWN_ACCOUNTS,
        }
    }
}
