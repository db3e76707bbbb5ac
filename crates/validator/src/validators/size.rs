//! Attachment predicates: type allow-lists and size thresholds

use std::sync::LazyLock;

use regex::Regex;

static SIZE_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-9][0-9]*)(kb|KB|mb|MB|gb|GB)$").unwrap());

/// Extensions accepted by a bare `image` directive.
pub const DEFAULT_IMAGE_TYPES: &[&str] = &["jpg", "jpeg", "png", "webp"];

const KILOBYTE: u64 = 1024;

// ============================================================================
// TYPE ALLOW-LIST
// ============================================================================

fn normalize(ext: &str) -> &str {
    ext.trim().trim_start_matches('.')
}

/// True if the sniffed extension is in the allow-list (case-insensitive,
/// leading dots ignored). Unrecognised content never matches.
pub fn is_allowed_type<S: AsRef<str>>(detected: Option<&str>, allowed: &[S]) -> bool {
    let Some(detected) = detected.map(normalize) else {
        return false;
    };
    allowed
        .iter()
        .any(|ext| normalize(ext.as_ref()).eq_ignore_ascii_case(detected))
}

// ============================================================================
// SIZE LIMIT
// ============================================================================

/// Unit of a `size:<n><unit>` attachment directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    /// 1024 bytes.
    Kilobytes,
    /// 1024² bytes.
    Megabytes,
    /// 1024³ bytes.
    Gigabytes,
}

impl SizeUnit {
    /// Bytes per unit.
    pub fn bytes(self) -> u64 {
        match self {
            Self::Kilobytes => KILOBYTE,
            Self::Megabytes => KILOBYTE * KILOBYTE,
            Self::Gigabytes => KILOBYTE * KILOBYTE * KILOBYTE,
        }
    }

    /// Locale key of the size message for this unit.
    pub fn locale_key(self) -> &'static str {
        match self {
            Self::Kilobytes => "size.file_kb",
            Self::Megabytes => "size.file_mb",
            Self::Gigabytes => "size.file_gb",
        }
    }
}

/// Upper bound on an attachment's size, e.g. `2MB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizeLimit {
    /// Number of units.
    pub amount: u64,
    /// Unit.
    pub unit: SizeUnit,
}

impl SizeLimit {
    /// Parses `<n><unit>` with `n >= 1` and unit `KB`, `MB` or `GB`
    /// (upper or lower case).
    ///
    /// # Examples
    ///
    /// ```
    /// use validata::validators::{SizeLimit, SizeUnit};
    ///
    /// let limit = SizeLimit::parse("2MB").unwrap();
    /// assert_eq!(limit.unit, SizeUnit::Megabytes);
    /// assert!(limit.allows(2 * 1024 * 1024));
    /// assert!(!limit.allows(2 * 1024 * 1024 + 1));
    /// assert!(SizeLimit::parse("0kb").is_none());
    /// ```
    pub fn parse(spec: &str) -> Option<Self> {
        let caps = SIZE_SPEC.captures(spec.trim())?;
        let amount = caps.get(1)?.as_str().parse().ok()?;
        let unit = match caps.get(2)?.as_str().to_ascii_lowercase().as_str() {
            "kb" => SizeUnit::Kilobytes,
            "mb" => SizeUnit::Megabytes,
            "gb" => SizeUnit::Gigabytes,
            _ => return None,
        };
        Some(Self { amount, unit })
    }

    /// True if `size` bytes does not exceed the limit.
    pub fn allows(self, size: u64) -> bool {
        size <= self.amount.saturating_mul(self.unit.bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_ignores_case_and_dots() {
        assert!(is_allowed_type(Some("png"), &[".PNG", "jpg"]));
        assert!(is_allowed_type(Some(".jpg"), DEFAULT_IMAGE_TYPES));
        assert!(!is_allowed_type(Some("gif"), DEFAULT_IMAGE_TYPES));
        assert!(!is_allowed_type(None, DEFAULT_IMAGE_TYPES));
    }

    #[test]
    fn size_units() {
        assert_eq!(SizeLimit::parse("512kb").map(|l| l.unit), Some(SizeUnit::Kilobytes));
        assert_eq!(SizeLimit::parse("1GB").map(|l| l.unit), Some(SizeUnit::Gigabytes));
        assert_eq!(SizeLimit::parse("1TB"), None);
        assert_eq!(SizeLimit::parse("1.5MB"), None);
        assert_eq!(SizeLimit::parse("MB"), None);
    }

    #[test]
    fn limit_is_inclusive() {
        let limit = SizeLimit::parse("1KB").unwrap();
        assert!(limit.allows(1024));
        assert!(!limit.allows(1025));
        assert_eq!(limit.unit.locale_key(), "size.file_kb");
    }

    #[test]
    fn huge_limits_saturate() {
        let limit = SizeLimit {
            amount: u64::MAX,
            unit: SizeUnit::Gigabytes,
        };
        assert!(limit.allows(u64::MAX));
    }
}
