//! Request and response bodies of the Firebase REST APIs.

use acct_core::AuthUser;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IdpRequest<'a> {
    pub post_body: String,
    pub request_uri: &'a str,
    pub return_secure_token: bool,
    pub return_idp_credential: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OobCodeRequest<'a> {
    pub request_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupRequest<'a> {
    pub id_token: &'a str,
}

/// Body of signUp, signInWithPassword and signInWithIdp responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignInResponse {
    pub local_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Only present on federated sign-in.
    pub email_verified: Option<bool>,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    #[serde(default)]
    pub users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupUser {
    pub local_id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub display_name: Option<String>,
}

impl From<LookupUser> for AuthUser {
    fn from(user: LookupUser) -> Self {
        Self {
            uid: user.local_id,
            email: user.email,
            email_verified: user.email_verified,
            display_name: user.display_name,
        }
    }
}

/// Secure Token API response (snake_case on the wire).
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
}

impl ErrorBody {
    /// Identity Toolkit sends `CODE` or `CODE : detail` in `message`;
    /// Firestore sends prose in `message` and the code in `status`.
    pub fn code(&self, prefer_status: bool) -> &str {
        if prefer_status && let Some(status) = self.status.as_deref() {
            return status;
        }
        self.message
            .split(|c: char| c == ':' || c.is_whitespace())
            .find(|part| !part.is_empty())
            .unwrap_or("UNKNOWN")
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshForm<'a> {
    pub grant_type: &'a str,
    pub refresh_token: &'a str,
}
