use crate::InMemoryBackend;

use acct_core::{
    AuthError, FederatedCredential, IdentityBackend, ProfileRecord, ProfileStore,
};

use googletest::assert_that;
use googletest::prelude::{eq, len, none, some};
use tokio_test::block_on;

#[test]
fn given_new_account_when_created_then_signed_in_and_announced() {
    // Given
    let backend = InMemoryBackend::new();
    let updates = backend.subscribe();

    // When
    let user = block_on(backend.create_account("a@x.com", "Abc12345!")).unwrap();

    // Then
    assert!(!user.email_verified);
    assert_that!(backend.current_user().map(|u| u.uid), some(eq(&user.uid)));
    assert_that!(
        updates.borrow().as_ref().map(|u| u.uid.clone()),
        some(eq(&user.uid))
    );
}

#[test]
fn given_existing_email_when_created_again_then_duplicate() {
    let backend = InMemoryBackend::new();
    block_on(backend.create_account("a@x.com", "Abc12345!")).unwrap();

    let result = block_on(backend.create_account("a@x.com", "Other123!"));

    assert!(matches!(result, Err(AuthError::DuplicateAccount { .. })));
}

#[test]
fn given_wrong_password_when_sign_in_then_invalid_credentials() {
    let backend = InMemoryBackend::new();
    block_on(backend.create_account("a@x.com", "Abc12345!")).unwrap();
    block_on(backend.sign_out()).unwrap();

    let result = block_on(backend.sign_in_with_password("a@x.com", "wrong"));

    assert!(matches!(result, Err(AuthError::InvalidCredentials { .. })));
    assert_that!(backend.current_user(), none());
}

#[test]
fn given_confirmed_email_when_reloaded_then_verified() {
    // Given
    let backend = InMemoryBackend::new();
    block_on(backend.create_account("a@x.com", "Abc12345!")).unwrap();

    // When
    assert!(backend.confirm_email("a@x.com"));
    let before = backend.current_user().unwrap();
    let after = block_on(backend.reload()).unwrap();

    // Then
    assert!(!before.email_verified);
    assert!(after.email_verified);
    assert!(backend.current_user().unwrap().email_verified);
}

#[test]
fn given_registered_token_when_federated_sign_in_then_verified_account_with_name() {
    let backend = InMemoryBackend::new();
    backend.register_federated("google-token", "g@x.com", "Google User");

    let user =
        block_on(backend.sign_in_with_credential(&FederatedCredential::google(String::from(
            "google-token",
        ))))
        .unwrap();

    assert!(user.email_verified);
    assert_that!(user.display_name, some(eq("Google User")));
    assert_that!(user.email, some(eq("g@x.com")));
}

#[test]
fn given_profiles_written_twice_when_fetched_then_last_wins() {
    // Given
    let backend = InMemoryBackend::new();
    let first = ProfileRecord {
        name_primary: String::from("First"),
        ..ProfileRecord::default()
    };
    let second = ProfileRecord {
        name_primary: String::from("Second"),
        ..ProfileRecord::default()
    };

    // When
    block_on(backend.create_profile("uid-1", &first)).unwrap();
    block_on(backend.create_profile("uid-1", &second)).unwrap();

    // Then
    let fetched = block_on(backend.fetch_profile("uid-1")).unwrap();
    assert_that!(fetched.map(|r| r.name_primary), some(eq("Second")));
    assert_that!(backend.profile_documents("uid-1"), len(eq(2)));
    assert_that!(block_on(backend.fetch_profile("uid-2")).unwrap(), none());
}

#[test]
fn given_unavailable_when_called_then_backend_unavailable() {
    let backend = InMemoryBackend::new();
    backend.set_unavailable(true);

    let result = block_on(backend.create_account("a@x.com", "Abc12345!"));

    assert!(matches!(result, Err(AuthError::BackendUnavailable { .. })));
    assert!(block_on(backend.sign_out()).is_ok());
}

#[test]
fn given_unknown_email_when_password_reset_then_unknown_account() {
    let backend = InMemoryBackend::new();

    let result = block_on(backend.send_password_reset("unknown@x.com"));

    assert!(matches!(result, Err(AuthError::UnknownAccount { .. })));
    assert_that!(backend.password_reset_emails(), len(eq(0)));
}

#[test]
fn given_verification_failing_when_sent_then_only_that_call_fails() {
    // Given
    let backend = InMemoryBackend::new();
    let user = block_on(backend.create_account("a@x.com", "Abc12345!")).unwrap();
    backend.set_verification_failing(true);

    // When
    let sent = block_on(backend.send_email_verification());
    let written = block_on(backend.create_profile(&user.uid, &ProfileRecord::default()));

    // Then
    assert!(matches!(sent, Err(AuthError::BackendUnavailable { .. })));
    assert!(written.is_ok());
    assert_that!(backend.verification_emails(), len(eq(0)));
}

#[test]
fn given_profile_writes_failing_when_written_then_nothing_stored() {
    // Given
    let backend = InMemoryBackend::new();
    let user = block_on(backend.create_account("a@x.com", "Abc12345!")).unwrap();
    backend.set_profile_writes_failing(true);

    // When
    let written = block_on(backend.create_profile(&user.uid, &ProfileRecord::default()));

    // Then
    assert!(matches!(written, Err(AuthError::BackendUnavailable { .. })));
    assert!(block_on(backend.send_email_verification()).is_ok());
    assert_that!(backend.profile_documents(&user.uid), len(eq(0)));
}
