//! The validation engine
//!
//! [`Validator`] owns the immutable state every evaluation reads: the
//! locale registry, optional capabilities and the strictness flag. It is
//! cheap to clone and safe to share between requests.
//!
//! # Examples
//!
//! ```
//! use validata::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> validata::foundation::Result<()> {
//! let validator = Validator::new()?;
//! let record = Record::new()
//!     .field("email", "required|email", "a@example.com")
//!     .field("age", "required|min:18", 21_u32);
//!
//! let errors = validator.validate(&record, None).await?.unwrap();
//! assert_eq!(errors.message("email"), Some("The email field must be a valid email address."));
//! assert!(errors.passed("age"));
//! # Ok(())
//! # }
//! ```

mod context;
mod dispatch;
mod evaluate;

use std::sync::Arc;

use context::{Engine, Scope};
use evaluate::evaluate;

use crate::capability::{ContentSniffer, UniquenessLookup};
use crate::config::ValidatorConfig;
use crate::foundation::{Record, Result, Validatable, ValidataError, ValidationResult, Value};
use crate::locale::Locales;
use crate::schema::RecordSchema;

// ============================================================================
// VALIDATOR
// ============================================================================

/// Evaluates records against their rule chains.
#[derive(Debug, Clone)]
pub struct Validator {
    engine: Arc<Engine>,
}

impl Validator {
    /// Validator with built-in locales, the default sniffer and no
    /// uniqueness lookup.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Starts a builder.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Validates anything that can describe itself as a record.
    ///
    /// Returns `Ok(None)` when every field passed. `locale` defaults to the
    /// configured default locale.
    pub async fn validate<T: Validatable>(&self, input: &T, locale: Option<&str>) -> Result<Option<ValidationResult>> {
        self.validate_record(input.to_record(), locale).await
    }

    /// Validates an owned record.
    pub async fn validate_record(&self, record: Record, locale: Option<&str>) -> Result<Option<ValidationResult>> {
        let scope = Scope::new(Arc::clone(&self.engine), locale);
        let result = evaluate(scope, Arc::new(record)).await?;
        Ok(result.into_failures())
    }

    /// Validates a dynamic value, which must be a record.
    pub async fn validate_value(&self, value: Value, locale: Option<&str>) -> Result<Option<ValidationResult>> {
        match value {
            Value::Record(record) => self.validate_record(record, locale).await,
            other => Err(ValidataError::NotARecord {
                found: other.kind().as_str().into(),
            }),
        }
    }

    /// Binds a JSON payload to `schema` and validates it.
    pub async fn validate_json(
        &self,
        schema: &RecordSchema,
        payload: &serde_json::Value,
        locale: Option<&str>,
    ) -> Result<Option<ValidationResult>> {
        let record = schema.bind(payload)?;
        self.validate_record(record, locale).await
    }

    /// The locale registry messages are rendered from.
    pub fn locales(&self) -> &Locales {
        &self.engine.locales
    }

    /// True if unknown directives and malformed parameters are faults.
    pub fn is_strict(&self) -> bool {
        self.engine.strict
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    config: ValidatorConfig,
    locales: Option<Locales>,
    lookup: Option<Arc<dyn UniquenessLookup>>,
    sniffer: Option<Arc<dyn ContentSniffer>>,
    no_sniffer: bool,
}

impl std::fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("config", &self.config)
            .field("lookup", &self.lookup.is_some())
            .field("sniffer", &self.sniffer.is_some())
            .finish_non_exhaustive()
    }
}

impl ValidatorBuilder {
    /// Replaces the whole configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Turns strict rule interpretation on or off.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict_rules = strict;
        self
    }

    /// Locale used when a call does not name one.
    #[must_use = "builder methods must be chained or built"]
    pub fn default_locale(mut self, tag: impl Into<String>) -> Self {
        self.config.default_locale = tag.into();
        self
    }

    /// Uses a prepared registry instead of loading one from the config.
    #[must_use = "builder methods must be chained or built"]
    pub fn locales(mut self, locales: Locales) -> Self {
        self.locales = Some(locales);
        self
    }

    /// Backend for the `unique` rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn uniqueness(mut self, lookup: impl UniquenessLookup + 'static) -> Self {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    /// Backend for the `unique` rule, already shared.
    #[must_use = "builder methods must be chained or built"]
    pub fn uniqueness_shared(mut self, lookup: Arc<dyn UniquenessLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Content sniffer for attachment type rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn sniffer(mut self, sniffer: impl ContentSniffer + 'static) -> Self {
        self.sniffer = Some(Arc::new(sniffer));
        self.no_sniffer = false;
        self
    }

    /// Disables content sniffing; type rules then reject every attachment.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_sniffer(mut self) -> Self {
        self.sniffer = None;
        self.no_sniffer = true;
        self
    }

    /// Loads locale files and freezes the configuration.
    pub fn build(self) -> Result<Validator> {
        let locales = match self.locales {
            Some(locales) => locales,
            None => self.config.locales()?,
        };
        let sniffer = if self.no_sniffer {
            None
        } else {
            self.sniffer.or_else(default_sniffer)
        };

        let engine = Engine {
            locales: Arc::new(locales),
            lookup: self.lookup,
            sniffer,
            strict: self.config.strict_rules,
            default_locale: self.config.default_locale,
        };
        tracing::debug!(?engine, "validator built");
        Ok(Validator {
            engine: Arc::new(engine),
        })
    }
}

#[cfg(feature = "sniff")]
fn default_sniffer() -> Option<Arc<dyn ContentSniffer>> {
    Some(Arc::new(crate::capability::MagicSniffer))
}

#[cfg(not(feature = "sniff"))]
fn default_sniffer() -> Option<Arc<dyn ContentSniffer>> {
    None
}

// ============================================================================
// TESTS
// ============================================================================
