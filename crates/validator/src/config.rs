//! Engine configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::foundation::{Result, ValidataError};
use crate::locale::{DEFAULT_LOCALE, Locales};

/// Settings that shape how rule chains are interpreted and rendered.
///
/// Deserializes from TOML or any serde source; every key is optional.
///
/// ```toml
/// default_locale = "fr"
/// strict_rules = true
/// locale_files = ["locales/de.json"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Locale used when a call does not name one.
    pub default_locale: String,

    /// Reject unknown directives, malformed parameters and dangling
    /// cross-field references instead of ignoring them.
    pub strict_rules: bool,

    /// Extra JSON locale tables; the file stem is the tag.
    pub locale_files: Vec<PathBuf>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_owned(),
            strict_rules: false,
            locale_files: Vec::new(),
        }
    }
}

impl ValidatorConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| ValidataError::Parse {
            what: "config",
            reason: e.to_string(),
        })
    }

    /// Builds the locale registry: built-in tables plus `locale_files`.
    pub fn locales(&self) -> Result<Locales> {
        self.locale_files
            .iter()
            .try_fold(Locales::builtin()?, |locales, path| locales.load_file(path))
    }
}
