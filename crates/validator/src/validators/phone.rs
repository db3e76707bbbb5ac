//! Phone number and username formats.
//!
//! Local numbers are ten digits with a leading trunk `0` (`0244123456`);
//! numbers with a country code are `+` followed by twelve digits
//! (`+233244123456`).

use std::sync::LazyLock;

use regex::Regex;

use super::content::is_email;

static LOCAL_PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^0[0-9]{9}$").unwrap());
static PHONE_WITH_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+[0-9]{12}$").unwrap());

/// Local phone number: trunk `0` plus nine digits.
pub fn is_phone(input: &str) -> bool {
    LOCAL_PHONE.is_match(input)
}

/// International phone number: `+` plus twelve digits.
pub fn is_phone_with_code(input: &str) -> bool {
    PHONE_WITH_CODE.is_match(input)
}

/// A login identifier: an email address, a number with country code, or a
/// local number.
///
/// Anything containing `@` is judged as an email, anything starting with
/// `+` as an international number, everything else as a local number.
///
/// # Examples
///
/// ```
/// use validata::validators::is_username;
///
/// assert!(is_username("kofi@mail.gh"));
/// assert!(is_username("+233244123456"));
/// assert!(is_username("0244123456"));
/// assert!(!is_username("kofi"));
/// ```
pub fn is_username(input: &str) -> bool {
    if input.contains('@') {
        is_email(input)
    } else if input.starts_with('+') {
        is_phone_with_code(input)
    } else {
        is_phone(input)
    }
}
