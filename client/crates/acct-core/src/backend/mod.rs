pub mod federated_provider;
pub mod identity_backend;
pub mod profile_store;
