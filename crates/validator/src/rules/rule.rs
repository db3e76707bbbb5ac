//! Typed rules resolved from directives
//!
//! The catalogue is closed: every directive name the engine understands
//! maps to exactly one [`Rule`] variant here.

use std::borrow::Cow;

use crate::foundation::Value;
use crate::rules::Directive;
use crate::validators::{self, Bound};

// ============================================================================
// TEXT FORMATS
// ============================================================================

/// Format rules that only look at text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextFormat {
    /// `string`: letters, digits, space, `+`, `-`, `.`.
    Safe,
    /// `ascii`: printable ASCII only.
    Ascii,
    /// `alpha`
    Alpha,
    /// `numeric`
    Numeric,
    /// `alpha_numeric`
    AlphaNumeric,
    /// `email`
    Email,
    /// `phone`
    Phone,
    /// `phone_with_code`
    PhoneWithCode,
    /// `username`: email, international or local phone.
    Username,
    /// `gh_card`
    GhCard,
    /// `gh_gps`
    GhGps,
}

impl TextFormat {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::Safe,
            "ascii" => Self::Ascii,
            "alpha" => Self::Alpha,
            "numeric" => Self::Numeric,
            "alpha_numeric" => Self::AlphaNumeric,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "phone_with_code" => Self::PhoneWithCode,
            "username" => Self::Username,
            "gh_card" => Self::GhCard,
            "gh_gps" => Self::GhGps,
            _ => return None,
        })
    }

    /// Locale key; identical to the directive name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Safe => "string",
            Self::Ascii => "ascii",
            Self::Alpha => "alpha",
            Self::Numeric => "numeric",
            Self::AlphaNumeric => "alpha_numeric",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PhoneWithCode => "phone_with_code",
            Self::Username => "username",
            Self::GhCard => "gh_card",
            Self::GhGps => "gh_gps",
        }
    }

    /// True if `input` conforms.
    pub fn check(self, input: &str) -> bool {
        match self {
            Self::Safe => validators::is_safe_string(input),
            Self::Ascii => validators::is_printable_ascii(input),
            Self::Alpha => validators::is_alpha(input),
            Self::Numeric => validators::is_numeric(input),
            Self::AlphaNumeric => validators::is_alpha_numeric(input),
            Self::Email => validators::is_email(input),
            Self::Phone => validators::is_phone(input),
            Self::PhoneWithCode => validators::is_phone_with_code(input),
            Self::Username => validators::is_username(input),
            Self::GhCard => validators::is_gh_card(input),
            Self::GhGps => validators::is_gh_gps(input),
        }
    }
}

// ============================================================================
// NUMERIC SHAPES
// ============================================================================

/// `int`, `uint` and `float`: judged on the value's rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericShape {
    /// `int`
    Int,
    /// `uint`
    Uint,
    /// `float`
    Float,
}

impl NumericShape {
    /// Locale key; identical to the directive name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
        }
    }

    /// True if the rendered value has this shape.
    pub fn check(self, value: &Value) -> bool {
        match self {
            Self::Int => validators::is_int_shaped(value),
            Self::Uint => validators::is_uint_shaped(value),
            Self::Float => validators::is_float_shaped(value),
        }
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A directive the engine knows how to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Presence check.
    Required,
    /// Text format.
    Format(TextFormat),
    /// Numeric shape.
    Shape(NumericShape),
    /// Magnitude bound on the value itself. `size` on an attachment is a
    /// byte threshold instead.
    Bound {
        /// Comparison.
        bound: Bound,
        /// Raw parameters.
        params: Vec<String>,
    },
    /// Element-count bound on a whole sequence (`slice:min:2`).
    Slice {
        /// Comparison.
        bound: Bound,
        /// Raw parameters after the bound name.
        params: Vec<String>,
    },
    /// `same:other`: equal to another field, message names it.
    Same(String),
    /// `match:other`: equal to another field.
    Match(String),
    /// `unique:table.column`
    Unique {
        /// Table to query.
        table: String,
        /// Column to query, already snake-cased.
        column: String,
    },
    /// Attachment is present and readable.
    File,
    /// Attachment is an image; `None` means the default image types.
    Image(Option<Vec<String>>),
    /// `file:ext,...`
    FileType(Vec<String>),
    /// `mimes:ext,...`
    Mimes(Vec<String>),
}

/// Why a directive could not be turned into a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The name is not in the catalogue.
    Unknown,
    /// A required parameter is absent.
    MissingParam(&'static str),
    /// A parameter is present but unusable.
    Malformed(Cow<'static, str>),
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown rule"),
            Self::MissingParam(what) => write!(f, "missing {what} parameter"),
            Self::Malformed(reason) => f.write_str(reason),
        }
    }
}

fn first_param(directive: &Directive, what: &'static str) -> Result<String, RuleError> {
    directive
        .params()
        .first()
        .filter(|p| !p.is_empty())
        .cloned()
        .ok_or(RuleError::MissingParam(what))
}

fn extensions(directive: &Directive) -> Vec<String> {
    directive
        .params()
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect()
}

impl Rule {
    /// Resolves a parsed directive.
    ///
    /// # Examples
    ///
    /// ```
    /// use validata::rules::{Directive, Rule, RuleError};
    /// use validata::validators::Bound;
    ///
    /// let d = Directive::parse("slice:min:2").unwrap();
    /// assert_eq!(
    ///     Rule::from_directive(&d),
    ///     Ok(Rule::Slice { bound: Bound::Min, params: vec!["2".into()] })
    /// );
    ///
    /// let d = Directive::parse("emial").unwrap();
    /// assert_eq!(Rule::from_directive(&d), Err(RuleError::Unknown));
    /// ```
    pub fn from_directive(directive: &Directive) -> Result<Self, RuleError> {
        let name = directive.name();
        if let Some(format) = TextFormat::from_name(name) {
            return Ok(Self::Format(format));
        }
        if let Some(bound) = Bound::from_name(name) {
            return Ok(Self::Bound {
                bound,
                params: directive.params().to_vec(),
            });
        }

        match name {
            "required" => Ok(Self::Required),
            "int" => Ok(Self::Shape(NumericShape::Int)),
            "uint" => Ok(Self::Shape(NumericShape::Uint)),
            "float" => Ok(Self::Shape(NumericShape::Float)),
            "same" => first_param(directive, "field").map(Self::Same),
            "match" => first_param(directive, "field").map(Self::Match),
            "slice" => {
                let (sub, params) = directive
                    .params()
                    .split_first()
                    .ok_or(RuleError::MissingParam("bound"))?;
                let bound = Bound::from_name(sub).ok_or_else(|| {
                    RuleError::Malformed(format!("`{sub}` is not a sequence bound").into())
                })?;
                Ok(Self::Slice {
                    bound,
                    params: params.to_vec(),
                })
            }
            "unique" => {
                let target = first_param(directive, "table.column")?;
                let (table, column) = target
                    .split_once('.')
                    .filter(|(t, c)| !t.is_empty() && !c.is_empty())
                    .ok_or_else(|| {
                        RuleError::Malformed(format!("`{target}` is not `table.column`").into())
                    })?;
                Ok(Self::Unique {
                    table: table.to_owned(),
                    column: crate::capability::snake_case(column),
                })
            }
            "file" => match extensions(directive) {
                exts if exts.is_empty() => Ok(Self::File),
                exts => Ok(Self::FileType(exts)),
            },
            "image" => match extensions(directive) {
                exts if exts.is_empty() => Ok(Self::Image(None)),
                exts => Ok(Self::Image(Some(exts))),
            },
            "mimes" => match extensions(directive) {
                exts if exts.is_empty() => Err(RuleError::MissingParam("extension")),
                exts => Ok(Self::Mimes(exts)),
            },
            _ => Err(RuleError::Unknown),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
