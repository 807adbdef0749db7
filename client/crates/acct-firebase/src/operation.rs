use acct_core::AuthError;
use acct_core::validation::{FIELD_EMAIL, FIELD_PASSWORD};

use std::fmt;

/// Backend call being made. Error codes mean different things per call, so
/// every request is tagged with one of these before its failure is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SignUp,
    SignInWithPassword,
    SignInWithIdp,
    SendVerification,
    SendPasswordReset,
    Lookup,
    RefreshToken,
    CreateProfile,
    FetchProfile,
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SignUp => "sign_up",
            Self::SignInWithPassword => "sign_in_with_password",
            Self::SignInWithIdp => "sign_in_with_idp",
            Self::SendVerification => "send_verification",
            Self::SendPasswordReset => "send_password_reset",
            Self::Lookup => "lookup",
            Self::RefreshToken => "refresh_token",
            Self::CreateProfile => "create_profile",
            Self::FetchProfile => "fetch_profile",
        }
    }

    /// Whether the call goes to Firestore, whose errors carry a status name
    /// instead of an error code in the message.
    pub fn is_document_call(&self) -> bool {
        matches!(self, Self::CreateProfile | Self::FetchProfile)
    }

    /// Map a backend error code onto the account error taxonomy.
    ///
    /// Codes not listed here become `BackendUnavailable`.
    #[track_caller]
    pub fn map_error_code(&self, code: &str) -> AuthError {
        match (self, code) {
            (_, "EMAIL_EXISTS") => AuthError::duplicate_account(),
            (
                _,
                "TOO_MANY_ATTEMPTS_TRY_LATER" | "RESET_PASSWORD_EXCEED_LIMIT" | "QUOTA_EXCEEDED",
            ) => AuthError::rate_limited(format!("{self} throttled by backend ({code})")),
            (
                Self::SignInWithPassword,
                "EMAIL_NOT_FOUND"
                | "INVALID_PASSWORD"
                | "INVALID_LOGIN_CREDENTIALS"
                | "USER_DISABLED",
            ) => AuthError::invalid_credentials(),
            (Self::SendPasswordReset, "EMAIL_NOT_FOUND") => AuthError::unknown_account(),
            (_, "INVALID_EMAIL" | "MISSING_EMAIL") => {
                AuthError::invalid_input(FIELD_EMAIL, "Invalid email format")
            }
            (_, "WEAK_PASSWORD" | "MISSING_PASSWORD") => {
                AuthError::invalid_input(FIELD_PASSWORD, "Password is too weak")
            }
            (
                Self::SendVerification | Self::Lookup | Self::RefreshToken,
                "INVALID_ID_TOKEN"
                | "USER_NOT_FOUND"
                | "TOKEN_EXPIRED"
                | "INVALID_REFRESH_TOKEN"
                | "USER_DISABLED"
                | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN",
            ) => AuthError::no_current_user(),
            (Self::CreateProfile | Self::FetchProfile, "UNAUTHENTICATED") => {
                AuthError::no_current_user()
            }
            _ => AuthError::backend_unavailable(format!("{self} failed: {code}")),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
