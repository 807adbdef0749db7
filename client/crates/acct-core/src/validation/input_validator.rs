use crate::validation::{
    BIRTH_DATE_FORMAT, FIELD_BIRTH_DATE, FIELD_CONFIRM_PASSWORD, FIELD_EMAIL, FIELD_NAME_PRIMARY,
    FIELD_NAME_SECONDARY, FIELD_PASSWORD, FIELD_PHONE_NUMBER, MAX_NAME_LENGTH,
    MAX_PHONE_NUMBER_LENGTH, MIN_PASSWORD_LENGTH, MINIMUM_AGE_YEARS,
};
use crate::{AuthError, ProfileAttributes, Result as AuthResult};

use chrono::{Months, NaiveDate};
use regex::Regex;

const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";
const PHONE_NUMBER_PATTERN: &str = r"^\+?[0-9]+$";
const LATIN_PATTERN: &str = r"[\x{0000}-\x{00FF}]";
const ARABIC_PATTERN: &str = r"[\x{0600}-\x{06FF}]";
const LETTER_PATTERN: &str = r"[a-zA-Z]";
const DIGIT_PATTERN: &str = r"[0-9]";
const SYMBOL_PATTERN: &str = r"[^a-zA-Z0-9]";

/// Client-side checks run before any backend call.
///
/// Every failure is an `InvalidInput` carrying the offending field and the
/// message shown next to it in the form.
pub struct InputValidator;

impl InputValidator {
    /// Validate a sign-up submission in form order; the first failure wins.
    #[track_caller]
    pub fn validate_registration(
        email: &str,
        password: &str,
        profile: &ProfileAttributes,
        today: NaiveDate,
    ) -> AuthResult<()> {
        Self::validate_name_primary(&profile.name_primary)?;
        Self::validate_name_secondary(&profile.name_secondary)?;
        Self::validate_email(email)?;
        Self::validate_phone_number(&profile.phone_number)?;
        Self::validate_birth_date(&profile.birth_date, today)?;
        Self::validate_password(password)?;
        Ok(())
    }

    /// Validate the sign-up form including its confirm-password field, which
    /// comes last in form order.
    #[track_caller]
    pub fn validate_registration_form(
        email: &str,
        password: &str,
        confirmation: &str,
        profile: &ProfileAttributes,
        today: NaiveDate,
    ) -> AuthResult<()> {
        Self::validate_registration(email, password, profile, today)?;
        Self::validate_password_confirmation(password, confirmation)
    }

    #[track_caller]
    pub fn validate_sign_in(email: &str, password: &str) -> AuthResult<()> {
        if email.trim().is_empty() {
            return Err(AuthError::invalid_input(FIELD_EMAIL, "Email is required"));
        }
        if password.trim().is_empty() {
            return Err(AuthError::invalid_input(
                FIELD_PASSWORD,
                "Password is required",
            ));
        }
        Ok(())
    }

    #[track_caller]
    pub fn validate_name_primary(value: &str) -> AuthResult<()> {
        Self::validate_name(
            value,
            FIELD_NAME_PRIMARY,
            LATIN_PATTERN,
            "Full name in English is required",
            "Full name should be in English",
        )
    }

    #[track_caller]
    pub fn validate_name_secondary(value: &str) -> AuthResult<()> {
        Self::validate_name(
            value,
            FIELD_NAME_SECONDARY,
            ARABIC_PATTERN,
            "Full name in Arabic is required",
            "Full name should be in Arabic",
        )
    }

    #[track_caller]
    pub fn validate_email(value: &str) -> AuthResult<()> {
        if value.trim().is_empty() {
            return Err(AuthError::invalid_input(FIELD_EMAIL, "Email is required"));
        }
        if !Self::matches(EMAIL_PATTERN, value) {
            return Err(AuthError::invalid_input(FIELD_EMAIL, "Invalid email format"));
        }
        Ok(())
    }

    #[track_caller]
    pub fn validate_phone_number(value: &str) -> AuthResult<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AuthError::invalid_input(
                FIELD_PHONE_NUMBER,
                "Mobile number is required",
            ));
        }
        if !Self::matches(PHONE_NUMBER_PATTERN, trimmed) {
            return Err(AuthError::invalid_input(
                FIELD_PHONE_NUMBER,
                "Mobile number should contain only numbers",
            ));
        }
        if value.chars().count() > MAX_PHONE_NUMBER_LENGTH {
            return Err(AuthError::invalid_input(
                FIELD_PHONE_NUMBER,
                format!(
                    "Mobile number should be at most {MAX_PHONE_NUMBER_LENGTH} characters long"
                ),
            ));
        }
        Ok(())
    }

    /// The birth date must fall strictly before `today` minus the minimum age.
    #[track_caller]
    pub fn validate_birth_date(value: &str, today: NaiveDate) -> AuthResult<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AuthError::invalid_input(
                FIELD_BIRTH_DATE,
                "Birth date is required",
            ));
        }

        let birth_date = NaiveDate::parse_from_str(trimmed, BIRTH_DATE_FORMAT).map_err(|_| {
            AuthError::invalid_input(FIELD_BIRTH_DATE, "Birth date must be YYYY-MM-DD")
        })?;

        let latest_allowed = today
            .checked_sub_months(Months::new(MINIMUM_AGE_YEARS * 12))
            .unwrap_or(NaiveDate::MIN);
        if birth_date >= latest_allowed {
            return Err(AuthError::invalid_input(
                FIELD_BIRTH_DATE,
                format!("You must be at least {MINIMUM_AGE_YEARS} years old"),
            ));
        }
        Ok(())
    }

    #[track_caller]
    pub fn validate_password(value: &str) -> AuthResult<()> {
        if value.trim().is_empty() {
            return Err(AuthError::invalid_input(
                FIELD_PASSWORD,
                "Password is required",
            ));
        }
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::invalid_input(
                FIELD_PASSWORD,
                format!("Password should be at least {MIN_PASSWORD_LENGTH} characters long"),
            ));
        }
        if !Self::matches(LETTER_PATTERN, value)
            || !Self::matches(DIGIT_PATTERN, value)
            || !Self::matches(SYMBOL_PATTERN, value)
        {
            return Err(AuthError::invalid_input(
                FIELD_PASSWORD,
                "Password should contain at least one letter, one number, and one symbol",
            ));
        }
        Ok(())
    }

    #[track_caller]
    pub fn validate_password_confirmation(password: &str, confirmation: &str) -> AuthResult<()> {
        if confirmation.trim().is_empty() {
            return Err(AuthError::invalid_input(
                FIELD_CONFIRM_PASSWORD,
                "Confirm Password is required",
            ));
        }
        if password != confirmation {
            return Err(AuthError::invalid_input(
                FIELD_CONFIRM_PASSWORD,
                "Passwords do not match",
            ));
        }
        Ok(())
    }

    #[track_caller]
    fn validate_name(
        value: &str,
        field: &'static str,
        script_pattern: &str,
        required_message: &str,
        script_message: &str,
    ) -> AuthResult<()> {
        if value.trim().is_empty() {
            return Err(AuthError::invalid_input(field, required_message));
        }
        if !Self::matches(script_pattern, value) {
            return Err(AuthError::invalid_input(field, script_message));
        }
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(AuthError::invalid_input(
                field,
                format!("Full name should be at most {MAX_NAME_LENGTH} characters long"),
            ));
        }
        Ok(())
    }

    fn matches(pattern: &str, value: &str) -> bool {
        Regex::new(pattern).is_ok_and(|regex| regex.is_match(value))
    }
}
