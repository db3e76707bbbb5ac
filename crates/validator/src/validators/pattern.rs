//! Character-class predicates for text
//!
//! Each predicate answers "does the text conform?"; the dispatcher treats
//! `false` as a violation.

use std::sync::LazyLock;

use regex::Regex;

static ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());
static ALPHA_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static SAFE_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z+ .-]+$").unwrap());
static PRINTABLE_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x20-\x7E]+$").unwrap());

// ============================================================================
// PREDICATES
// ============================================================================

/// Letters only (`a-z`, `A-Z`).
pub fn is_alpha(input: &str) -> bool {
    ALPHA.is_match(input)
}

/// Letters and digits only.
pub fn is_alpha_numeric(input: &str) -> bool {
    ALPHA_NUMERIC.is_match(input)
}

/// Digits only. Signs and decimal points are rejected.
pub fn is_numeric(input: &str) -> bool {
    NUMERIC.is_match(input)
}

/// The "safe string" charset: letters, digits, space, `+`, `-` and `.`.
pub fn is_safe_string(input: &str) -> bool {
    SAFE_STRING.is_match(input)
}

/// Printable ASCII (`0x20..=0x7E`) only.
pub fn is_printable_ascii(input: &str) -> bool {
    PRINTABLE_ASCII.is_match(input)
}

// ============================================================================
// TESTS
// ============================================================================
