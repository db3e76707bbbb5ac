//! Magnitude comparisons: `min`, `max`, `equal`, `size`, `between`, `from`
//!
//! The measured quantity depends on the type class: character count for
//! text, element count for sequences and maps, the number itself for
//! numerics. Bounds arrive as strings and are parsed on every call into
//! the same numeric domain as the measured quantity.

use std::fmt;
use std::str::FromStr;

use crate::foundation::Value;

// ============================================================================
// MAGNITUDE
// ============================================================================

/// The quantity a bound is compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    /// Characters of text.
    Chars(usize),
    /// Elements of a sequence or entries of a map.
    Elements(usize),
    /// Signed integer.
    Signed(i64),
    /// Unsigned integer.
    Unsigned(u64),
    /// Floating point.
    Float(f64),
}

impl Magnitude {
    /// Measures a value; `None` for kinds without a magnitude.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(Self::Chars(s.chars().count())),
            Value::List(items) => Some(Self::Elements(items.len())),
            Value::Map(entries) => Some(Self::Elements(entries.len())),
            Value::Int(n) => Some(Self::Signed(*n)),
            Value::Uint(n) => Some(Self::Unsigned(*n)),
            Value::Float(n) => Some(Self::Float(*n)),
            Value::Null | Value::Bool(_) | Value::Record(_) | Value::File(_) => None,
        }
    }

    /// Message variant for this magnitude (`min.string`, `min.numeric`, ...).
    pub fn variant(self) -> &'static str {
        match self {
            Self::Chars(_) => "string",
            Self::Elements(_) => "slice",
            Self::Signed(_) | Self::Unsigned(_) | Self::Float(_) => "numeric",
        }
    }
}

// ============================================================================
// BOUND
// ============================================================================

/// Which comparison a directive asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// `>= n`
    Min,
    /// `<= n`
    Max,
    /// `== n`
    Equal,
    /// `== n` (exact size)
    Size,
    /// `a < x < b`
    Between,
    /// `a <= x <= b`
    From,
}

impl Bound {
    /// Directive name, also the first half of the locale key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Equal => "equal",
            Self::Size => "size",
            Self::Between => "between",
            Self::From => "from",
        }
    }

    /// Number of parameters the comparison reads.
    pub fn arity(self) -> usize {
        match self {
            Self::Between | Self::From => 2,
            Self::Min | Self::Max | Self::Equal | Self::Size => 1,
        }
    }

    /// Parses a directive name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            "equal" => Some(Self::Equal),
            "size" => Some(Self::Size),
            "between" => Some(Self::Between),
            "from" => Some(Self::From),
            _ => None,
        }
    }
}

// ============================================================================
// PARAMETER PARSING
// ============================================================================

/// A bound parameter that does not parse in the required domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadParam {
    /// Parameter as written (empty when missing).
    pub raw: String,
    /// Domain it had to parse into.
    pub expected: &'static str,
}

impl fmt::Display for BadParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.is_empty() {
            write!(f, "missing {} parameter", self.expected)
        } else {
            write!(f, "`{}` is not a valid {}", self.raw, self.expected)
        }
    }
}

/// Parses the `index`-th parameter.
///
/// Lax mode coerces anything unparsable (or missing) to zero.
fn param<T>(params: &[String], index: usize, strict: bool, expected: &'static str) -> Result<T, BadParam>
where
    T: FromStr + Default,
{
    let raw = params.get(index).map_or("", String::as_str);
    match raw.parse::<T>() {
        Ok(v) => Ok(v),
        Err(_) if !strict => Ok(T::default()),
        Err(_) => Err(BadParam {
            raw: raw.to_owned(),
            expected,
        }),
    }
}

fn compare<T>(actual: T, bound: Bound, params: &[String], strict: bool, expected: &'static str) -> Result<bool, BadParam>
where
    T: PartialOrd + FromStr + Default,
{
    let first: T = param(params, 0, strict, expected)?;
    Ok(match bound {
        Bound::Min => actual >= first,
        Bound::Max => actual <= first,
        Bound::Equal | Bound::Size => actual == first,
        Bound::Between => {
            let second: T = param(params, 1, strict, expected)?;
            actual > first && actual < second
        }
        Bound::From => {
            let second: T = param(params, 1, strict, expected)?;
            actual >= first && actual <= second
        }
    })
}

// ============================================================================
// PREDICATE
// ============================================================================

/// Checks `magnitude` against `bound` with string parameters.
///
/// Returns `Ok(true)` when the bound holds. In lax mode malformed
/// parameters count as zero and this never fails.
///
/// # Examples
///
/// ```
/// use validata::validators::{satisfies, Bound, Magnitude};
///
/// let age = Magnitude::Signed(15);
/// assert_eq!(satisfies(age, Bound::Min, &["18".into()], false), Ok(false));
/// assert_eq!(satisfies(age, Bound::From, &["10".into(), "15".into()], false), Ok(true));
/// assert_eq!(satisfies(age, Bound::Between, &["10".into(), "15".into()], false), Ok(false));
/// ```
pub fn satisfies(magnitude: Magnitude, bound: Bound, params: &[String], strict: bool) -> Result<bool, BadParam> {
    match magnitude {
        Magnitude::Chars(n) | Magnitude::Elements(n) => {
            compare(n as i64, bound, params, strict, "integer")
        }
        Magnitude::Signed(n) => compare(n, bound, params, strict, "integer"),
        Magnitude::Unsigned(n) => compare(n, bound, params, strict, "unsigned integer"),
        Magnitude::Float(n) => compare(n, bound, params, strict, "number"),
    }
}

/// Parses the parameters of `bound` in the domain of `sample` without
/// comparing anything. Strict evaluation calls this before any value is
/// looked at.
///
/// ```
/// use validata::validators::{check_params, Bound, Magnitude};
///
/// assert!(check_params(Bound::Min, &["3".into()], Magnitude::Float(0.0)).is_ok());
/// assert!(check_params(Bound::Min, &["abc".into()], Magnitude::Float(0.0)).is_err());
/// ```
pub fn check_params(bound: Bound, params: &[String], sample: Magnitude) -> Result<(), BadParam> {
    satisfies(sample, bound, params, true).map(drop)
}

// ============================================================================
// TESTS
// ============================================================================
