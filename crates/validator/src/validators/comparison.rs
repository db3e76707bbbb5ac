//! Cross-field comparison behind `same` and `match`

use crate::foundation::Value;

/// True if both values have a canonical form and the trimmed forms are equal.
///
/// # Examples
///
/// ```
/// use validata::foundation::Value;
/// use validata::validators::is_same;
///
/// assert!(is_same(&Value::from(" s3cret "), &Value::from("s3cret")));
/// assert!(is_same(&Value::from(42_i32), &Value::from("42")));
/// assert!(!is_same(&Value::from("a"), &Value::from("b")));
/// ```
pub fn is_same(left: &Value, right: &Value) -> bool {
    match (left.canonical(), right.canonical()) {
        (Some(l), Some(r)) => l.trim() == r.trim(),
        _ => false,
    }
}
