use crate::api_types::{
    ErrorEnvelope, IdpRequest, LookupRequest, LookupResponse, LookupUser, OobCodeRequest,
    PasswordRequest, RefreshForm, SignInResponse, TokenResponse,
};
use crate::error::{FirebaseError, Result as FirebaseResult};
use crate::firestore_document::{FirestoreDocument, ListDocumentsResponse};
use crate::{IDP_REQUEST_URI, Operation};

use acct_config::FirebaseConfig;
use acct_core::{AuthError, FederatedCredential, Result as AuthResult};

use log::debug;
use reqwest::Client as ReqwestClient;
use serde::de::{DeserializeOwned, IgnoredAny};

/// Thin HTTP layer over the Identity Toolkit, Secure Token and Firestore
/// REST APIs. Every failure comes back already mapped to [`AuthError`].
pub(crate) struct RestClient {
    http: ReqwestClient,
    api_key: String,
    auth_base_url: String,
    token_base_url: String,
    documents_url: String,
}

impl RestClient {
    pub fn new(config: &FirebaseConfig) -> FirebaseResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FirebaseError::missing_setting("firebase.api_key"))?;
        let project_id = config
            .project_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| FirebaseError::missing_setting("firebase.project_id"))?;

        let http = ReqwestClient::builder()
            .build()
            .map_err(FirebaseError::http_client)?;

        Ok(Self {
            http,
            api_key,
            auth_base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            token_base_url: config.token_base_url.trim_end_matches('/').to_string(),
            documents_url: format!(
                "{}/v1/projects/{project_id}/databases/(default)/documents",
                config.firestore_base_url.trim_end_matches('/')
            ),
        })
    }

    // =========================================================================
    // Identity Toolkit
    // =========================================================================

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignInResponse> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.accounts_call(Operation::SignUp, "signUp", &body).await
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<SignInResponse> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.accounts_call(Operation::SignInWithPassword, "signInWithPassword", &body)
            .await
    }

    pub async fn sign_in_with_idp(
        &self,
        credential: &FederatedCredential,
    ) -> AuthResult<SignInResponse> {
        let body = IdpRequest {
            post_body: format!(
                "id_token={}&providerId={}",
                credential.id_token, credential.provider_id
            ),
            request_uri: IDP_REQUEST_URI,
            return_secure_token: true,
            return_idp_credential: true,
        };
        self.accounts_call(Operation::SignInWithIdp, "signInWithIdp", &body)
            .await
    }

    pub async fn send_verification(&self, id_token: &str) -> AuthResult<()> {
        let body = OobCodeRequest {
            request_type: "VERIFY_EMAIL",
            id_token: Some(id_token),
            email: None,
        };
        let _: IgnoredAny = self
            .accounts_call(Operation::SendVerification, "sendOobCode", &body)
            .await?;
        Ok(())
    }

    pub async fn send_password_reset(&self, email: &str) -> AuthResult<()> {
        let body = OobCodeRequest {
            request_type: "PASSWORD_RESET",
            id_token: None,
            email: Some(email),
        };
        let _: IgnoredAny = self
            .accounts_call(Operation::SendPasswordReset, "sendOobCode", &body)
            .await?;
        Ok(())
    }

    /// Account behind `id_token`. An empty user list means it no longer exists.
    pub async fn lookup(&self, id_token: &str) -> AuthResult<LookupUser> {
        let body = LookupRequest { id_token };
        let response: LookupResponse = self
            .accounts_call(Operation::Lookup, "lookup", &body)
            .await?;

        response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| Operation::Lookup.map_error_code("USER_NOT_FOUND"))
    }

    // =========================================================================
    // Secure Token
    // =========================================================================

    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenResponse> {
        let form = RefreshForm {
            grant_type: "refresh_token",
            refresh_token,
        };
        let request = self
            .http
            .post(format!("{}/v1/token", self.token_base_url))
            .query(&[("key", self.api_key.as_str())])
            .form(&form);

        self.execute(Operation::RefreshToken, request).await
    }

    // =========================================================================
    // Firestore
    // =========================================================================

    pub async fn create_document(
        &self,
        uid: &str,
        id_token: &str,
        document: &FirestoreDocument,
    ) -> AuthResult<()> {
        let request = self
            .http
            .post(self.profile_collection(uid))
            .bearer_auth(id_token)
            .json(document);

        let _: IgnoredAny = self.execute(Operation::CreateProfile, request).await?;
        Ok(())
    }

    pub async fn list_documents(
        &self,
        uid: &str,
        id_token: &str,
    ) -> AuthResult<ListDocumentsResponse> {
        let request = self
            .http
            .get(self.profile_collection(uid))
            .bearer_auth(id_token);

        self.execute(Operation::FetchProfile, request).await
    }

    fn profile_collection(&self, uid: &str) -> String {
        format!("{}/users/{uid}/data", self.documents_url)
    }

    async fn accounts_call<B, T>(
        &self,
        operation: Operation,
        method: &str,
        body: &B,
    ) -> AuthResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .post(format!("{}/v1/accounts:{method}", self.auth_base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(body);

        self.execute(operation, request).await
    }

    /// Send the request and decode the body, mapping error envelopes via `operation`.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> AuthResult<T> {
        let response = request.send().await.map_err(|e| {
            AuthError::backend_unavailable(format!("{operation} request failed: {e}"))
        })?;
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                AuthError::backend_unavailable(format!(
                    "{operation} returned an unreadable response: {e}"
                ))
            });
        }

        let body = response.text().await.unwrap_or_default();
        let error = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => {
                let code = envelope.error.code(operation.is_document_call());
                debug!("{operation} rejected with HTTP {status}: {code}");
                operation.map_error_code(code)
            }
            Err(_) => AuthError::backend_unavailable(format!(
                "{operation} failed with HTTP {status}"
            )),
        };

        Err(error)
    }
}
