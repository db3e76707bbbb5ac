//! Numeric shape classification
//!
//! `int`, `uint` and `float` do not look at the Rust type of the value.
//! They render it to its canonical decimal form and match that string, so
//! `2.0` passes `int` (it renders as `2`) while `2.5` does not.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::Value;

static INT_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-?(?:0|[1-9][0-9]*))$").unwrap());
static UINT_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:0|[1-9][0-9]*)$").unwrap());
static FLOAT_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?$").unwrap());

/// Decimal rendering used by `int` / `uint`.
fn integer_form(value: &Value) -> Option<String> {
    match value {
        Value::Int(n) => Some(n.to_string()),
        Value::Uint(n) => Some(n.to_string()),
        Value::Float(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fixed two-decimal rendering used by `float`.
fn float_form(value: &Value) -> Option<String> {
    match value {
        Value::Int(n) => Some(format!("{:.2}", *n as f64)),
        Value::Uint(n) => Some(format!("{:.2}", *n as f64)),
        Value::Float(n) => Some(format!("{n:.2}")),
        _ => None,
    }
}

/// Renders as a (possibly negative) integer with no leading zeros.
pub fn is_int_shaped(value: &Value) -> bool {
    integer_form(value).is_some_and(|s| INT_SHAPE.is_match(&s))
}

/// Renders as a non-negative integer.
pub fn is_uint_shaped(value: &Value) -> bool {
    integer_form(value).is_some_and(|s| UINT_SHAPE.is_match(&s))
}

/// Renders as a finite decimal number.
pub fn is_float_shaped(value: &Value) -> bool {
    float_form(value).is_some_and(|s| FLOAT_SHAPE.is_match(&s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Int(-42), true)]
    #[case(Value::Uint(7), true)]
    #[case(Value::Float(2.0), true)]
    #[case(Value::Float(2.5), false)]
    #[case(Value::from("12"), false)]
    fn int_shape(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_int_shaped(&value), expected);
    }

    #[rstest]
    #[case(Value::Int(-1), false)]
    #[case(Value::Int(5), true)]
    #[case(Value::Uint(120), true)]
    #[case(Value::Float(-3.0), false)]
    fn uint_shape(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_uint_shaped(&value), expected);
    }

    #[rstest]
    #[case(Value::Float(12.345_67), true)]
    #[case(Value::Int(3), true)]
    #[case(Value::Float(f64::NAN), false)]
    #[case(Value::Float(f64::INFINITY), false)]
    fn float_shape(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_float_shaped(&value), expected);
    }
}
