use crate::Operation;

use acct_core::AuthError;

use googletest::assert_that;
use googletest::prelude::{eq, some};

#[test]
fn given_email_exists_when_mapped_then_duplicate_account() {
    // When
    let error = Operation::SignUp.map_error_code("EMAIL_EXISTS");

    // Then
    assert_that!(error.error_code(), eq("DUPLICATE_ACCOUNT"));
}

#[test]
fn given_unknown_email_during_sign_in_when_mapped_then_invalid_credentials() {
    for code in ["EMAIL_NOT_FOUND", "INVALID_PASSWORD", "INVALID_LOGIN_CREDENTIALS"] {
        let error = Operation::SignInWithPassword.map_error_code(code);
        assert!(
            matches!(error, AuthError::InvalidCredentials { .. }),
            "{code} mapped to {error:?}"
        );
    }
}

#[test]
fn given_unknown_email_during_reset_when_mapped_then_unknown_account() {
    // When
    let error = Operation::SendPasswordReset.map_error_code("EMAIL_NOT_FOUND");

    // Then
    assert!(matches!(error, AuthError::UnknownAccount { .. }));
}

#[test]
fn given_throttling_codes_when_mapped_then_rate_limited() {
    for code in [
        "TOO_MANY_ATTEMPTS_TRY_LATER",
        "RESET_PASSWORD_EXCEED_LIMIT",
        "QUOTA_EXCEEDED",
    ] {
        let error = Operation::SendVerification.map_error_code(code);
        assert!(error.is_transient(), "{code} should be transient");
        assert_that!(error.error_code(), eq("RATE_LIMITED"));
    }
}

#[test]
fn given_weak_password_when_mapped_then_invalid_password_input() {
    // When
    let error = Operation::SignUp.map_error_code("WEAK_PASSWORD");

    // Then
    assert_that!(error.field(), some(eq("password")));
}

#[test]
fn given_expired_token_during_lookup_when_mapped_then_no_current_user() {
    // When
    let error = Operation::Lookup.map_error_code("TOKEN_EXPIRED");

    // Then
    assert!(matches!(error, AuthError::NoCurrentUser { .. }));
}

#[test]
fn given_unauthenticated_document_call_when_mapped_then_no_current_user() {
    // When
    let error = Operation::FetchProfile.map_error_code("UNAUTHENTICATED");

    // Then
    assert!(matches!(error, AuthError::NoCurrentUser { .. }));
}

#[test]
fn given_unlisted_code_when_mapped_then_backend_unavailable_naming_operation() {
    // When
    let error = Operation::SignInWithIdp.map_error_code("INVALID_IDP_RESPONSE");

    // Then
    let AuthError::BackendUnavailable { message, .. } = &error else {
        panic!("expected BackendUnavailable, got {error:?}");
    };
    assert_eq!(message, "sign_in_with_idp failed: INVALID_IDP_RESPONSE");
}

#[test]
fn given_operations_when_checked_then_only_profile_calls_are_document_calls() {
    assert!(Operation::CreateProfile.is_document_call());
    assert!(Operation::FetchProfile.is_document_call());
    assert!(!Operation::SignUp.is_document_call());
    assert!(!Operation::RefreshToken.is_document_call());
}
