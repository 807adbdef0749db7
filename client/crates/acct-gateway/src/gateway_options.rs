use acct_config::{Config, RateLimitConfig};

/// Behavior switches of [`crate::AuthGateway`].
#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    /// Report `UnknownAccount` from password reset instead of succeeding silently.
    pub reveal_unknown_accounts: bool,
    pub verification_rate_limit: RateLimitConfig,
}

impl GatewayOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            reveal_unknown_accounts: config.auth.reveal_unknown_accounts,
            verification_rate_limit: config.rate_limit.clone(),
        }
    }
}
