//! Account domain: identity model, error taxonomy, backend seams and input validation.

pub mod backend;
pub mod error;
pub mod models;
pub mod validation;

pub use backend::federated_provider::FederatedProvider;
pub use backend::identity_backend::IdentityBackend;
pub use backend::profile_store::ProfileStore;
pub use error::{AuthError, Result};
pub use models::auth_user::AuthUser;
pub use models::federated_credential::{FederatedCredential, GOOGLE_PROVIDER_ID};
pub use models::identity::Identity;
pub use models::profile_attributes::ProfileAttributes;
pub use models::profile_record::ProfileRecord;
pub use models::session_state::SessionState;
pub use validation::input_validator::InputValidator;

#[cfg(test)]
mod tests;
