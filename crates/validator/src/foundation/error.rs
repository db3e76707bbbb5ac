//! Fatal faults raised by the engine
//!
//! A [`ValidataError`] is never a validation failure. Failed rules are
//! returned as data in a [`ValidationResult`](crate::foundation::ValidationResult);
//! everything in this module aborts the whole evaluation instead.

use std::borrow::Cow;

use thiserror::Error;

// ============================================================================
// ANNOTATION KIND
// ============================================================================

/// Which part of a field declaration is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// The external key used in payloads and the error map.
    WireName,
    /// The pipe-delimited rule chain.
    Rules,
}

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WireName => f.write_str("wire name"),
            Self::Rules => f.write_str("rule chain"),
        }
    }
}

// ============================================================================
// LOOKUP ERROR
// ============================================================================

/// Failure reported by a [`UniquenessLookup`](crate::capability::UniquenessLookup).
///
/// "Row not found" is not an error: lookups answer `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Table or column name is not a plain SQL identifier.
    #[error("invalid identifier `{0}` in uniqueness lookup")]
    InvalidIdentifier(String),

    /// Backend failure (connection, query, decoding).
    #[error("uniqueness backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LookupError {
    /// Wraps any backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

// ============================================================================
// VALIDATA ERROR
// ============================================================================

/// Configuration or infrastructure fault that aborts an evaluation.
#[derive(Debug, Error)]
pub enum ValidataError {
    /// A declared field lacks its wire name or rule chain.
    #[error("field `{field}` has no {annotation}")]
    MissingAnnotation {
        /// Declared (Rust-side) field name.
        field: String,
        /// The missing part.
        annotation: Annotation,
    },

    /// The value handed to `validate` is not a record.
    #[error("validate expects a record, got {found}")]
    NotARecord {
        /// Type class of the offending value.
        found: Cow<'static, str>,
    },

    /// A directive could not be interpreted (strict mode, or attachment sizes).
    #[error("field `{field}`: invalid rule `{directive}`: {reason}")]
    InvalidRule {
        /// Wire name of the field carrying the directive.
        field: String,
        /// The directive as written.
        directive: String,
        /// What is wrong with it.
        reason: Cow<'static, str>,
    },

    /// A cross-field directive names a field the record does not declare.
    #[error("field `{field}` references unknown field `{target}`")]
    UnknownField {
        /// Wire name of the field carrying the directive.
        field: String,
        /// The referenced wire name.
        target: String,
    },

    /// `unique` was used but no lookup capability is configured.
    #[error("field `{field}` uses `unique` but no uniqueness lookup is configured")]
    NoUniquenessLookup {
        /// Wire name of the field.
        field: String,
    },

    /// The uniqueness lookup failed for a reason other than "not found".
    #[error("uniqueness lookup for field `{field}` failed")]
    Lookup {
        /// Wire name of the field.
        field: String,
        /// Backend error.
        #[source]
        source: LookupError,
    },

    /// No template for a rule key in the requested or the default locale.
    #[error("no message template `{key}` for locale `{locale}`")]
    MissingTemplate {
        /// Locale tag that was requested.
        locale: String,
        /// Rule key, possibly dotted.
        key: String,
    },

    /// A locale table could not be parsed.
    #[error("invalid locale table `{tag}`: {reason}")]
    InvalidLocale {
        /// Locale tag.
        tag: String,
        /// Parser message.
        reason: String,
    },

    /// A field task panicked or was cancelled by the runtime.
    #[error("validation task for field `{field}` did not complete: {reason}")]
    TaskPanicked {
        /// Wire name of the field.
        field: String,
        /// Join error description.
        reason: String,
    },

    /// Reading configuration, schema or locale files failed.
    #[error("failed to read `{path}`")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A schema or configuration document is malformed.
    #[error("invalid {what}: {reason}")]
    Parse {
        /// Document kind (`schema`, `config`).
        what: &'static str,
        /// Parser message.
        reason: String,
    },
}

impl ValidataError {
    /// Builds an [`InvalidRule`](Self::InvalidRule) fault.
    pub fn invalid_rule(
        field: impl Into<String>,
        directive: impl Into<String>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidRule {
            field: field.into(),
            directive: directive.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ValidataError> = std::result::Result<T, E>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_annotation_names_the_part() {
        let err = ValidataError::MissingAnnotation {
            field: "email".into(),
            annotation: Annotation::Rules,
        };
        assert_eq!(err.to_string(), "field `email` has no rule chain");
    }

    #[test]
    fn lookup_error_keeps_source() {
        let io = std::io::Error::other("connection reset");
        let err = ValidataError::Lookup {
            field: "email".into(),
            source: LookupError::backend(io),
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("uniqueness backend failed: connection reset")
        );
    }

    #[test]
    fn invalid_rule_constructor() {
        let err = ValidataError::invalid_rule("avatar", "size:12XB", "unknown unit");
        assert!(matches!(err, ValidataError::InvalidRule { .. }));
        assert!(err.to_string().contains("size:12XB"));
    }
}
