
use crate::ProfileAttributes;

pub(crate) fn valid_profile() -> ProfileAttributes {
    ProfileAttributes {
        name_primary: String::from("Amira Haddad"),
        name_secondary: String::from("أميرة حداد"),
        birth_date: String::from("1990-04-12"),
        phone_number: String::from("0501234567"),
    }
}
