//! Session state for the signed-in user.
//!
//! [`SessionStore`] is the single owner of the current [`acct_core::Identity`].
//! Only [`SessionSync`] writes to it, driven by backend notifications; everything
//! else reads snapshots or subscribes.

mod profile_cache;
mod session_store;
mod session_sync;
mod subscription;

pub use profile_cache::ProfileCache;
pub use session_store::SessionStore;
pub use session_sync::SessionSync;
pub use subscription::Subscription;

#[cfg(test)]
mod tests;
