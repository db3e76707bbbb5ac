//! External capabilities the engine calls out to
//!
//! Both are stored as `Arc<dyn _>` in the validator and shared by every
//! field task.

use async_trait::async_trait;

use crate::foundation::LookupError;

// ============================================================================
// UNIQUENESS
// ============================================================================

/// Answers whether a value is already stored, for the `unique` rule.
///
/// A missing row is `Ok(false)`. Every `Err` aborts the evaluation.
#[async_trait]
pub trait UniquenessLookup: Send + Sync {
    /// Returns true if `table.column` already holds `value`.
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError>;
}

// ============================================================================
// CONTENT SNIFFING
// ============================================================================

/// Detects an attachment's type from its leading bytes.
pub trait ContentSniffer: Send + Sync {
    /// Canonical extension (`png`, `pdf`, ...) or `None` if unrecognised.
    fn detect(&self, bytes: &[u8]) -> Option<String>;
}

/// Magic-number sniffer backed by the `infer` crate.
#[cfg(feature = "sniff")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicSniffer;

#[cfg(feature = "sniff")]
impl ContentSniffer for MagicSniffer {
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        infer::get(bytes).map(|kind| kind.extension().to_owned())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Converts an identifier to `snake_case` (`EmailAddress` → `email_address`).
pub fn snake_case(input: &str) -> String {
    let chars: Vec<char> = input.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' || c == '_' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 && !out.ends_with('_') {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// True for a plain SQL identifier: `^[A-Za-z_][A-Za-z0-9_]*$`.
pub fn is_sql_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("email", "email")]
    #[case("EmailAddress", "email_address")]
    #[case("userID", "user_id")]
    #[case("HTTPServer", "http_server")]
    #[case("phone-number", "phone_number")]
    #[case("already_snake", "already_snake")]
    #[case("line2Address", "line2_address")]
    fn snake_casing(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(snake_case(input), expected);
    }

    #[rstest]
    #[case("users", true)]
    #[case("_tmp1", true)]
    #[case("1users", false)]
    #[case("users; drop table x", false)]
    #[case("", false)]
    fn sql_identifiers(#[case] ident: &str, #[case] expected: bool) {
        assert_eq!(is_sql_identifier(ident), expected);
    }

    #[cfg(feature = "sniff")]
    #[test]
    fn magic_sniffer_detects_png() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(MagicSniffer.detect(&png).as_deref(), Some("png"));
        assert_eq!(MagicSniffer.detect(b"plain words"), None);
    }
}
