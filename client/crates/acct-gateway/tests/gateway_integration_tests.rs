//! Gateway behavior against the in-memory backend.

use acct_config::RateLimitConfig;
use acct_core::{
    AuthError, FederatedCredential, FederatedProvider, Identity, IdentityBackend, ProfileAttributes,
    Result as AuthResult, SessionState,
};
use acct_gateway::{AuthGateway, GatewayOptions, InMemoryBackend};
use acct_session::SessionStore;

use std::sync::Arc;

use async_trait::async_trait;
use googletest::assert_that;
use googletest::prelude::{eq, len, none, some};
use tokio::time::{Duration, timeout};

const EMAIL: &str = "a@x.com";
const PASSWORD: &str = "Abc12345!";

/// Provider double: returns a fixed Google token, or cancels when none is set.
struct FixedProvider {
    id_token: Option<&'static str>,
}

#[async_trait]
impl FederatedProvider for FixedProvider {
    async fn obtain_credential(&self) -> AuthResult<FederatedCredential> {
        match self.id_token {
            Some(token) => Ok(FederatedCredential::google(token.to_string())),
            None => Err(AuthError::user_cancelled()),
        }
    }
}

struct Harness {
    backend: Arc<InMemoryBackend>,
    store: Arc<SessionStore>,
    gateway: AuthGateway,
}

fn harness_with(options: GatewayOptions, id_token: Option<&'static str>) -> Harness {
    let backend = Arc::new(InMemoryBackend::new());
    let store = Arc::new(SessionStore::new());
    let gateway = AuthGateway::new(
        backend.clone(),
        backend.clone(),
        Arc::new(FixedProvider { id_token }),
        Arc::clone(&store),
        options,
    );
    Harness {
        backend,
        store,
        gateway,
    }
}

fn harness() -> Harness {
    harness_with(GatewayOptions::default(), None)
}

fn profile() -> ProfileAttributes {
    ProfileAttributes {
        name_primary: String::from("Amira Haddad"),
        name_secondary: String::from("أميرة حداد"),
        birth_date: String::from("1990-04-12"),
        phone_number: String::from("0501234567"),
    }
}

async fn settled(harness: &Harness) -> Option<Identity> {
    timeout(Duration::from_secs(1), harness.gateway.settled_identity())
        .await
        .expect("session store did not settle")
}

async fn registered() -> Harness {
    let harness = harness();
    harness
        .gateway
        .register(EMAIL, PASSWORD, &profile())
        .await
        .unwrap();
    settled(&harness).await;
    harness
}

// =========================================================================
// Registration
// =========================================================================

#[tokio::test]
async fn given_valid_form_when_register_then_authenticated_unverified_with_email() {
    // Given
    let harness = harness();

    // When
    let user = harness
        .gateway
        .register(EMAIL, PASSWORD, &profile())
        .await
        .unwrap();

    // Then
    let identity = settled(&harness).await.unwrap();
    assert_that!(identity.uid, eq(&user.uid));
    assert_that!(identity.email, some(eq(EMAIL)));
    assert_that!(
        harness.store.state(),
        eq(SessionState::AuthenticatedUnverified)
    );
}

#[tokio::test]
async fn given_registration_when_complete_then_profile_retrievable_by_uid() {
    // Given
    let harness = harness();

    // When
    let user = harness
        .gateway
        .register(EMAIL, PASSWORD, &profile())
        .await
        .unwrap();

    // Then
    let documents = harness.backend.profile_documents(&user.uid);
    assert_that!(documents, len(eq(1)));
    assert_that!(documents[0].name_primary, eq("Amira Haddad"));
    assert_that!(documents[0].name_secondary, eq("أميرة حداد"));
    assert_that!(documents[0].birth_date, eq("1990-04-12"));
    assert_that!(documents[0].phone_number, eq("0501234567"));
    assert_that!(documents[0].email, eq(EMAIL));

    settled(&harness).await;
    let viewed = harness.gateway.profile().await.unwrap();
    assert_that!(viewed, some(eq(&documents[0])));
}

#[tokio::test]
async fn given_registration_when_complete_then_verification_email_sent() {
    let harness = harness();

    let user = harness
        .gateway
        .register(EMAIL, PASSWORD, &profile())
        .await
        .unwrap();

    assert_that!(harness.backend.verification_emails(), eq(&vec![user.uid]));
}

#[tokio::test]
async fn given_registration_when_settled_then_display_name_is_english_name() {
    let harness = registered().await;

    let identity = timeout(
        Duration::from_secs(1),
        harness
            .store
            .wait_until(|identity| identity.is_some_and(|i| i.display_name.is_some())),
    )
    .await
    .unwrap()
    .unwrap();

    assert_that!(identity.display_name, some(eq("Amira Haddad")));
}

#[tokio::test]
async fn given_taken_email_when_register_then_duplicate_account() {
    // Given
    let harness = registered().await;
    harness.gateway.sign_out().await.unwrap();

    // When
    let result = harness.gateway.register(EMAIL, PASSWORD, &profile()).await;

    // Then
    assert!(matches!(result, Err(AuthError::DuplicateAccount { .. })));
    assert_that!(settled(&harness).await, none());
}

#[tokio::test]
async fn given_invalid_form_when_register_then_invalid_input_and_backend_untouched() {
    // Given
    let harness = harness();
    let mut attributes = profile();
    attributes.birth_date = String::from("2020-01-01");

    // When
    let result = harness.gateway.register(EMAIL, PASSWORD, &attributes).await;

    // Then
    assert!(matches!(
        result,
        Err(AuthError::InvalidInput {
            field: "birth_date",
            ..
        })
    ));
    assert_that!(harness.backend.current_user(), none());
    assert_that!(harness.backend.verification_emails(), len(eq(0)));
}

#[tokio::test]
async fn given_backend_down_when_register_then_backend_unavailable_without_retry() {
    let harness = harness();
    harness.backend.set_unavailable(true);

    let result = harness.gateway.register(EMAIL, PASSWORD, &profile()).await;

    assert!(matches!(result, Err(AuthError::BackendUnavailable { .. })));
    assert_that!(harness.store.current(), none());
}

#[tokio::test]
async fn given_verification_email_fails_when_register_then_error_and_account_stays_unverified() {
    // Given
    let harness = harness();
    harness.backend.set_verification_failing(true);

    // When
    let result = harness.gateway.register(EMAIL, PASSWORD, &profile()).await;

    // Then
    let Err(AuthError::BackendUnavailable { message, .. }) = &result else {
        panic!("expected BackendUnavailable, got {result:?}");
    };
    assert!(message.contains("verification email"));
    let identity = settled(&harness).await.unwrap();
    assert_that!(identity.display_name, some(eq("Amira Haddad")));
    assert_that!(
        harness.store.state(),
        eq(SessionState::AuthenticatedUnverified)
    );
    assert_that!(harness.backend.profile_documents(&identity.uid), len(eq(1)));
}

#[tokio::test]
async fn given_profile_write_fails_when_register_then_error_and_no_profile_in_session() {
    // Given
    let harness = harness();
    harness.backend.set_profile_writes_failing(true);

    // When
    let result = harness.gateway.register(EMAIL, PASSWORD, &profile()).await;

    // Then
    let Err(AuthError::BackendUnavailable { message, .. }) = &result else {
        panic!("expected BackendUnavailable, got {result:?}");
    };
    assert!(message.contains("profile write"));
    let identity = settled(&harness).await.unwrap();
    assert_that!(identity.display_name, none());
    assert_that!(
        harness.store.state(),
        eq(SessionState::AuthenticatedUnverified)
    );
    assert_that!(
        harness.backend.verification_emails(),
        eq(&vec![identity.uid.clone()])
    );
    assert_that!(harness.gateway.profile().await.unwrap(), none());
}

#[tokio::test]
async fn given_both_follow_ups_fail_when_register_then_verification_error_reported() {
    // Given
    let harness = harness();
    harness.backend.set_verification_failing(true);
    harness.backend.set_profile_writes_failing(true);

    // When
    let result = harness.gateway.register(EMAIL, PASSWORD, &profile()).await;

    // Then
    let Err(AuthError::BackendUnavailable { message, .. }) = &result else {
        panic!("expected BackendUnavailable, got {result:?}");
    };
    assert!(message.contains("verification email"));
    assert_that!(
        settled(&harness).await.map(|identity| identity.email_verified),
        some(eq(false))
    );
}

#[tokio::test]
async fn given_registration_when_returned_then_display_name_already_in_store() {
    // Given
    let harness = harness();

    // When
    harness
        .gateway
        .register(EMAIL, PASSWORD, &profile())
        .await
        .unwrap();

    // Then
    let identity = harness.gateway.settled_identity().await.unwrap();
    assert_that!(identity.display_name, some(eq("Amira Haddad")));
}

// =========================================================================
// Sign-in / Sign-out
// =========================================================================

#[tokio::test]
async fn given_wrong_password_when_sign_in_then_invalid_credentials_and_store_unchanged() {
    // Given
    let harness = registered().await;
    let before = harness.store.current();

    // When
    let result = harness.gateway.sign_in(EMAIL, "Wrong123!").await;

    // Then
    assert!(matches!(result, Err(AuthError::InvalidCredentials { .. })));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_that!(harness.store.current(), eq(&before));
}

#[tokio::test]
async fn given_anonymous_and_wrong_password_when_sign_in_then_still_anonymous() {
    let harness = registered().await;
    harness.gateway.sign_out().await.unwrap();
    settled(&harness).await;

    let result = harness.gateway.sign_in(EMAIL, "nope").await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials { .. })));
    assert_that!(harness.store.state(), eq(SessionState::Anonymous));
}

#[tokio::test]
async fn given_correct_password_when_sign_in_then_authenticated() {
    // Given
    let harness = registered().await;
    harness.gateway.sign_out().await.unwrap();

    // When
    let user = harness.gateway.sign_in(EMAIL, PASSWORD).await.unwrap();

    // Then
    let identity = settled(&harness).await.unwrap();
    assert_that!(identity.uid, eq(&user.uid));
    assert_that!(identity.display_name, some(eq("Amira Haddad")));
}

#[tokio::test]
async fn given_empty_password_when_sign_in_then_invalid_input() {
    let harness = harness();

    let result = harness.gateway.sign_in(EMAIL, "").await;

    assert!(matches!(result, Err(AuthError::InvalidInput { .. })));
}

#[tokio::test]
async fn given_any_state_when_sign_out_then_anonymous() {
    // Given
    let signed_in = registered().await;
    let anonymous = harness();

    // When
    signed_in.gateway.sign_out().await.unwrap();
    anonymous.gateway.sign_out().await.unwrap();
    anonymous.gateway.sign_out().await.unwrap();

    // Then
    assert_that!(settled(&signed_in).await, none());
    assert_that!(signed_in.store.state(), eq(SessionState::Anonymous));
    assert_that!(settled(&anonymous).await, none());
}

// =========================================================================
// Federated sign-in
// =========================================================================

#[tokio::test]
async fn given_google_token_when_sign_in_with_provider_then_verified_with_provider_name() {
    // Given
    let harness = harness_with(GatewayOptions::default(), Some("google-token"));
    harness
        .backend
        .register_federated("google-token", "g@x.com", "Google User");

    // When
    harness.gateway.sign_in_with_provider().await.unwrap();

    // Then
    let identity = settled(&harness).await.unwrap();
    assert_that!(identity.display_name, some(eq("Google User")));
    assert_that!(
        harness.store.state(),
        eq(SessionState::AuthenticatedVerified)
    );
}

#[tokio::test]
async fn given_user_backs_out_when_sign_in_with_provider_then_user_cancelled() {
    let harness = harness();

    let result = harness.gateway.sign_in_with_provider().await;

    assert!(matches!(result, Err(AuthError::UserCancelled { .. })));
    assert_that!(harness.store.current(), none());
}

// =========================================================================
// Verification
// =========================================================================

#[tokio::test]
async fn given_no_user_when_resend_verification_then_no_current_user() {
    let harness = harness();

    let result = harness.gateway.resend_verification().await;

    assert!(matches!(result, Err(AuthError::NoCurrentUser { .. })));
}

#[tokio::test]
async fn given_recent_resend_when_resend_again_then_rate_limited() {
    // Given
    let harness = registered().await;
    harness.gateway.resend_verification().await.unwrap();

    // When
    let result = harness.gateway.resend_verification().await;

    // Then
    assert!(matches!(result, Err(AuthError::RateLimited { .. })));
    assert_that!(harness.backend.verification_emails(), len(eq(2)));
}

#[tokio::test]
async fn given_resend_failed_in_transit_when_resend_again_then_not_rate_limited() {
    // Given
    let harness = registered().await;
    harness.backend.set_unavailable(true);
    let failed = harness.gateway.resend_verification().await;
    harness.backend.set_unavailable(false);

    // When
    let retried = harness.gateway.resend_verification().await;

    // Then
    assert!(matches!(failed, Err(AuthError::BackendUnavailable { .. })));
    assert!(retried.is_ok());
    assert_that!(harness.backend.verification_emails(), len(eq(2)));
    assert!(matches!(
        harness.gateway.resend_verification().await,
        Err(AuthError::RateLimited { .. })
    ));
}

#[tokio::test]
async fn given_larger_quota_when_resending_then_allowed_up_to_quota() {
    let options = GatewayOptions {
        verification_rate_limit: RateLimitConfig {
            max_requests: 2,
            window_secs: 60,
        },
        ..GatewayOptions::default()
    };
    let harness = harness_with(options, None);
    harness
        .gateway
        .register(EMAIL, PASSWORD, &profile())
        .await
        .unwrap();

    assert!(harness.gateway.resend_verification().await.is_ok());
    assert!(harness.gateway.resend_verification().await.is_ok());
    assert!(harness.gateway.resend_verification().await.is_err());
}

#[tokio::test]
async fn given_confirmed_email_when_reload_then_authenticated_verified() {
    // Given
    let harness = registered().await;
    harness.backend.confirm_email(EMAIL);
    assert!(!harness.store.is_email_verified());

    // When
    let user = harness.gateway.reload().await.unwrap();

    // Then
    assert!(user.email_verified);
    settled(&harness).await;
    assert_that!(
        harness.store.state(),
        eq(SessionState::AuthenticatedVerified)
    );
}

#[tokio::test]
async fn given_no_user_when_reload_then_no_current_user() {
    let harness = harness();

    let result = harness.gateway.reload().await;

    assert!(matches!(result, Err(AuthError::NoCurrentUser { .. })));
}

// =========================================================================
// Password reset
// =========================================================================

#[tokio::test]
async fn given_unknown_email_when_password_reset_then_ok_and_store_unchanged() {
    // Given
    let harness = harness();

    // When
    let result = harness
        .gateway
        .request_password_reset("unknown@x.com")
        .await;

    // Then
    assert!(result.is_ok());
    assert_that!(harness.store.current(), none());
    assert_that!(harness.backend.password_reset_emails(), len(eq(0)));
}

#[tokio::test]
async fn given_reveal_enabled_when_password_reset_for_unknown_then_unknown_account() {
    let options = GatewayOptions {
        reveal_unknown_accounts: true,
        ..GatewayOptions::default()
    };
    let harness = harness_with(options, None);

    let result = harness
        .gateway
        .request_password_reset("unknown@x.com")
        .await;

    assert!(matches!(result, Err(AuthError::UnknownAccount { .. })));
}

#[tokio::test]
async fn given_known_email_when_password_reset_then_email_sent() {
    let harness = registered().await;

    harness.gateway.request_password_reset(EMAIL).await.unwrap();

    assert_that!(
        harness.backend.password_reset_emails(),
        eq(&vec![EMAIL.to_string()])
    );
}

#[tokio::test]
async fn given_malformed_email_when_password_reset_then_invalid_input() {
    let harness = harness();

    let result = harness.gateway.request_password_reset("not-an-email").await;

    assert!(matches!(result, Err(AuthError::InvalidInput { .. })));
}

// =========================================================================
// Profile view
// =========================================================================

#[tokio::test]
async fn given_anonymous_when_profile_then_no_current_user() {
    let harness = harness();

    let result = harness.gateway.profile().await;

    assert!(matches!(result, Err(AuthError::NoCurrentUser { .. })));
}

#[tokio::test]
async fn given_federated_user_without_profile_when_profile_then_none() {
    let harness = harness_with(GatewayOptions::default(), Some("google-token"));
    harness
        .backend
        .register_federated("google-token", "g@x.com", "Google User");
    harness.gateway.sign_in_with_provider().await.unwrap();
    settled(&harness).await;

    let profile = harness.gateway.profile().await.unwrap();

    assert_that!(profile, none());
}
