use serde::{Deserialize, Serialize};

/// Attributes collected by the sign-up form, stored alongside the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAttributes {
    /// Full name in English
    pub name_primary: String,
    /// Full name in Arabic
    pub name_secondary: String,
    /// ISO `YYYY-MM-DD`
    pub birth_date: String,
    pub phone_number: String,
}
