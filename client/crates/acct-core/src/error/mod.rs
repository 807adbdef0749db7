use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Normalized outcome of every account operation.
///
/// Backend adapters map their own error codes onto these variants; anything
/// they cannot classify becomes `BackendUnavailable`.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid {field}: {message} {location}")]
    InvalidInput {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("An account with this email already exists {location}")]
    DuplicateAccount { location: ErrorLocation },

    #[error("Email or password is incorrect {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Federated sign-in was cancelled {location}")]
    UserCancelled { location: ErrorLocation },

    #[error("Rate limited: {message} {location}")]
    RateLimited {
        message: String,
        location: ErrorLocation,
    },

    #[error("No user is signed in {location}")]
    NoCurrentUser { location: ErrorLocation },

    #[error("No account is registered for this email {location}")]
    UnknownAccount { location: ErrorLocation },

    #[error("Backend unavailable: {message} {location}")]
    BackendUnavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn invalid_input<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn duplicate_account() -> Self {
        Self::DuplicateAccount {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn user_cancelled() -> Self {
        Self::UserCancelled {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rate_limited<S: Into<String>>(message: S) -> Self {
        Self::RateLimited {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_current_user() -> Self {
        Self::NoCurrentUser {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unknown_account() -> Self {
        Self::UnknownAccount {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::DuplicateAccount { .. } => "DUPLICATE_ACCOUNT",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::UserCancelled { .. } => "USER_CANCELLED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::NoCurrentUser { .. } => "NO_CURRENT_USER",
            Self::UnknownAccount { .. } => "UNKNOWN_ACCOUNT",
            Self::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
        }
    }

    /// Form field the error refers to, for input errors only.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Whether repeating the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::BackendUnavailable { .. }
        )
    }

    /// Text shown to the user. Never includes backend internals.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message, .. } => message.clone(),
            Self::DuplicateAccount { .. } => String::from("Email is already registered"),
            Self::InvalidCredentials { .. } => String::from("Failed to sign in"),
            Self::UserCancelled { .. } => String::from("Failed to sign in with Google"),
            Self::RateLimited { .. } => {
                String::from("Too many attempts. Please wait a moment and try again")
            }
            Self::NoCurrentUser { .. } => String::from("You need to sign in first"),
            Self::UnknownAccount { .. } => String::from("Failed to send password reset link"),
            Self::BackendUnavailable { .. } => String::from("Sorry, something went wrong"),
        }
    }
}

pub type Result<T> = StdResult<T, AuthError>;
