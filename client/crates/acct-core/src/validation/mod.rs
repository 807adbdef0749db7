pub mod input_validator;

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_PHONE_NUMBER_LENGTH: usize = 12;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MINIMUM_AGE_YEARS: u32 = 18;
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

pub const FIELD_NAME_PRIMARY: &str = "name_primary";
pub const FIELD_NAME_SECONDARY: &str = "name_secondary";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE_NUMBER: &str = "phone_number";
pub const FIELD_BIRTH_DATE: &str = "birth_date";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_CONFIRM_PASSWORD: &str = "confirm_password";
