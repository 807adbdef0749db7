/// Provider id of Google sign-in on the identity backend.
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

/// Proof of a completed federated sign-in, exchanged with the backend for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedCredential {
    pub provider_id: String,
    pub id_token: String,
}

impl FederatedCredential {
    pub fn google(id_token: String) -> Self {
        Self {
            provider_id: String::from(GOOGLE_PROVIDER_ID),
            id_token,
        }
    }
}
