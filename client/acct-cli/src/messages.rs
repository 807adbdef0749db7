//! Notification texts shown after each command.

use crate::commands::Commands;

use acct_core::AuthError;

pub const VERIFICATION_SENT: &str = "Verification link sent to your email";
pub const PASSWORD_RESET_SENT: &str = "Password reset link sent to your email.";
pub const SIGNED_OUT: &str = "Signed out";

pub const VERIFICATION_FAILED: &str = "Failed to send verification link";
pub const SIGN_IN_FAILED: &str = "Failed to sign in";
pub const GOOGLE_SIGN_IN_FAILED: &str = "Failed to sign in with Google";
pub const PASSWORD_RESET_FAILED: &str = "Failed to send password reset link";
pub const GENERIC_FAILURE: &str = "Sorry, something went wrong";

/// Text to show when `command` fails with `error`.
///
/// Validation problems are reported as-is so the user knows which field to
/// fix; everything else gets the command's generic failure text.
pub fn failure_message(command: &Commands, error: &AuthError) -> String {
    match (command, error) {
        (_, AuthError::InvalidInput { message, .. }) => message.clone(),
        (_, AuthError::NoCurrentUser { .. } | AuthError::RateLimited { .. }) => {
            error.user_message()
        }
        (Commands::Register { .. }, AuthError::DuplicateAccount { .. }) => error.user_message(),
        (Commands::SignIn { .. }, _) => String::from(SIGN_IN_FAILED),
        (Commands::SignInGoogle { .. }, _) => String::from(GOOGLE_SIGN_IN_FAILED),
        (Commands::ResendVerification, _) => String::from(VERIFICATION_FAILED),
        (Commands::ResetPassword { .. }, _) => String::from(PASSWORD_RESET_FAILED),
        _ => String::from(GENERIC_FAILURE),
    }
}
