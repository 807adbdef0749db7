use acct_config::RateLimitConfig;
use acct_core::{AuthError, Result as AuthResult};

use std::num::NonZeroU32;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};

/// Throttle for verification email resends.
///
/// Allows `max_requests` back-to-back, then one more every
/// `window_secs / max_requests`. A slot whose send never reached the backend
/// can be handed back with [`VerificationLimiter::refund`].
pub struct VerificationLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    refunds: Mutex<u32>,
    burst: NonZeroU32,
    config: RateLimitConfig,
}

impl VerificationLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let window = Duration::from_secs(config.window_secs.max(1));
        let quota = Quota::with_period(window / burst.get())
            .unwrap_or_else(|| Quota::per_minute(NonZeroU32::MIN))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::direct(quota),
            refunds: Mutex::new(0),
            burst,
            config,
        }
    }

    /// Take one resend slot, or fail with `RateLimited`. Refunded slots are used first.
    #[track_caller]
    pub fn check(&self) -> AuthResult<()> {
        {
            let mut refunds = self.refunds.lock().unwrap_or_else(PoisonError::into_inner);
            if *refunds > 0 {
                *refunds -= 1;
                return Ok(());
            }
        }

        self.limiter.check().map_err(|_| {
            AuthError::rate_limited(format!(
                "at most {} verification email(s) per {}s",
                self.config.max_requests, self.config.window_secs
            ))
        })
    }

    /// Give back a slot taken by a send that failed before reaching the user.
    /// Never holds more than one burst.
    pub fn refund(&self) {
        let mut refunds = self.refunds.lock().unwrap_or_else(PoisonError::into_inner);
        *refunds = (*refunds + 1).min(self.burst.get());
    }
}
