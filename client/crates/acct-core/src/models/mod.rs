pub mod auth_user;
pub mod federated_credential;
pub mod identity;
pub mod profile_attributes;
pub mod profile_record;
pub mod session_state;
