//! Profile record - the per-user document written once at registration.

use crate::ProfileAttributes;

use serde::{Deserialize, Serialize};

/// Stored profile document.
///
/// Field names follow the document layout in the store. Any field missing
/// from a stored document reads back as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    #[serde(rename = "fullNameEnglish")]
    pub name_primary: String,
    #[serde(rename = "fullNameArabic")]
    pub name_secondary: String,
    #[serde(rename = "birthDate")]
    pub birth_date: String,
    #[serde(rename = "mobileNumber")]
    pub phone_number: String,
    pub email: String,
}

impl ProfileRecord {
    pub fn new(attributes: &ProfileAttributes, email: &str) -> Self {
        Self {
            name_primary: attributes.name_primary.trim().to_string(),
            name_secondary: attributes.name_secondary.trim().to_string(),
            birth_date: attributes.birth_date.trim().to_string(),
            phone_number: attributes.phone_number.trim().to_string(),
            email: email.trim().to_string(),
        }
    }
}
