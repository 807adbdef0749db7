//! Firebase REST adapter.
//!
//! Implements [`acct_core::IdentityBackend`] on the Identity Toolkit and
//! Secure Token APIs and [`acct_core::ProfileStore`] on Firestore, with the
//! signed-in session optionally persisted to disk between runs.

mod api_types;
mod error;
mod firebase_backend;
mod firestore_document;
mod operation;
mod persisted_session;
mod rest_client;
mod session_file;
mod signed_in_session;

pub use error::{FirebaseError, Result as FirebaseResult};
pub use firebase_backend::FirebaseBackend;
pub use operation::Operation;
pub use persisted_session::{PersistedSession, SESSION_SCHEMA_VERSION};
pub use session_file::{SessionFile, SessionLoadResult};

#[cfg(test)]
mod tests;

/// Refresh the ID token when it expires within this many seconds.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;
/// Lifetime assumed when the backend omits or garbles `expiresIn`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;
/// Longest `expiresIn` taken at face value; anything above falls back to the default.
const MAX_TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 3600;
/// Continue URI sent with federated sign-in; only echoed back by the backend.
const IDP_REQUEST_URI: &str = "http://localhost";
