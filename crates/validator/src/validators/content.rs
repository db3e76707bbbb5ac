//! Identity formats: email addresses and Ghanaian identifiers

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

static GH_CARD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^GHA-[0-9]{9}-[0-9]$").unwrap());
static GH_GPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}-[0-9]{1,4}-[0-9]{4}$").unwrap());

/// Domains that only ever appear in placeholder addresses.
const PLACEHOLDER_DOMAINS: &[&str] = &["localhost", "localhost.com", "example.com"];

const EMAIL_MIN_LEN: usize = 6;
const EMAIL_MAX_LEN: usize = 254;
const EMAIL_MAX_LOCAL_LEN: usize = 64;
const EMAIL_MIN_DOMAIN_LEN: usize = 3;

// ============================================================================
// EMAIL
// ============================================================================

/// Checks an email address.
///
/// Lengths are in bytes. The address must:
/// - be 6 to 254 bytes long,
/// - contain an `@` (the last one splits local part and domain) with a
///   non-empty local part of at most 64 bytes and a domain of at least 3,
/// - not use a placeholder domain (`example.com`, `localhost`, ...),
/// - be a well-formed `local@domain` address.
///
/// # Examples
///
/// ```
/// use validata::validators::is_email;
///
/// assert!(is_email("kofi@mail.gh"));
/// assert!(!is_email("a@example.com"));
/// assert!(!is_email("no-at-sign.com"));
/// ```
pub fn is_email(input: &str) -> bool {
    if !(EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&input.len()) {
        return false;
    }
    let Some(at) = input.rfind('@') else {
        return false;
    };
    let (local, domain) = (&input[..at], &input[at + 1..]);
    if local.is_empty() || domain.len() < EMAIL_MIN_DOMAIN_LEN {
        return false;
    }
    if PLACEHOLDER_DOMAINS.contains(&domain) || local.len() > EMAIL_MAX_LOCAL_LEN {
        return false;
    }
    EMAIL_REGEX.is_match(input)
}

// ============================================================================
// GHANAIAN IDENTIFIERS
// ============================================================================

/// Ghana Card number: `GHA-` + 9 digits + `-` + check digit.
pub fn is_gh_card(input: &str) -> bool {
    GH_CARD.is_match(input)
}

/// GhanaPost GPS digital address, e.g. `GA-183-8164`.
pub fn is_gh_gps(input: &str) -> bool {
    GH_GPS.is_match(input)
}

// ============================================================================
// TESTS
// ============================================================================
