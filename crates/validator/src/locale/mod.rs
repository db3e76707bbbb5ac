//! Localized message rendering
//!
//! [`Locales`] is an immutable registry of [`LocaleTable`]s built once at
//! startup and shared by every evaluation. Built-in tables for `en` and
//! `fr` are embedded in the binary.
//!
//! # Lookup
//!
//! 1. The requested tag is matched case-insensitively; an unknown tag
//!    selects the default table.
//! 2. A key missing from the selected table is looked up in the default
//!    table.
//! 3. A key missing from both is a [`ValidataError::MissingTemplate`].

mod table;

use std::collections::BTreeMap;
use std::path::Path;

pub use table::{LocaleTable, fill};

use crate::foundation::{Result, ValidataError};

const EN: &str = include_str!("tables/en.json");
const FR: &str = include_str!("tables/fr.json");

/// Tag of the fallback table.
pub const DEFAULT_LOCALE: &str = "en";

/// Tags of the embedded tables.
pub const BUILTIN_LOCALES: &[&str] = &["en", "fr"];

// ============================================================================
// REGISTRY
// ============================================================================

/// Locale tag → table, with a default.
#[derive(Debug, Clone)]
pub struct Locales {
    tables: BTreeMap<String, LocaleTable>,
    default: String,
}

impl Locales {
    /// Registry with the embedded `en` and `fr` tables, defaulting to `en`.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            tables: BTreeMap::new(),
            default: DEFAULT_LOCALE.to_owned(),
        }
        .with_table("en", LocaleTable::from_json("en", EN)?)
        .with_table("fr", LocaleTable::from_json("fr", FR)?))
    }

    /// Adds or replaces a table.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_table(mut self, tag: &str, table: LocaleTable) -> Self {
        self.tables.insert(tag.to_ascii_lowercase(), table);
        self
    }

    /// Changes the fallback tag. Ignored unless a table is registered for it.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default(mut self, tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        if self.tables.contains_key(&tag) {
            self.default = tag;
        } else {
            tracing::warn!(locale = %tag, "default locale has no table, keeping `{}`", self.default);
        }
        self
    }

    /// Loads a JSON table from disk; the tag is the file stem (`de.json` → `de`).
    pub fn load_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tag = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidataError::InvalidLocale {
                tag: path.display().to_string(),
                reason: "file name is not a locale tag".into(),
            })?
            .to_owned();
        let json = std::fs::read_to_string(path).map_err(|source| ValidataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = LocaleTable::from_json(&tag, &json)?;
        tracing::debug!(locale = %tag, keys = table.len(), "loaded locale table");
        Ok(self.with_table(&tag, table))
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// The fallback tag.
    pub fn default_tag(&self) -> &str {
        &self.default
    }

    /// True if a table is registered for `tag` (case-insensitive).
    pub fn contains(&self, tag: &str) -> bool {
        self.tables.contains_key(&tag.to_ascii_lowercase())
    }

    fn template(&self, tag: &str, key: &str) -> Option<&str> {
        let selected = self.tables.get(&tag.to_ascii_lowercase());
        selected
            .and_then(|t| t.template(key))
            .or_else(|| self.tables.get(&self.default)?.template(key))
    }

    /// Renders `key` for `tag`: `args[0]` is the display field name, the
    /// rest are rule parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use validata::locale::Locales;
    ///
    /// let locales = Locales::builtin().unwrap();
    /// assert_eq!(
    ///     locales.render("FR", "min.numeric", &["age", "18"]).unwrap(),
    ///     "Le champ age doit être d'au moins 18"
    /// );
    /// assert_eq!(
    ///     locales.render("xx", "required", &["name"]).unwrap(),
    ///     "The name field is required."
    /// );
    /// ```
    pub fn render(&self, tag: &str, key: &str, args: &[&str]) -> Result<String> {
        self.template(tag, key)
            .map(|template| fill(template, args))
            .ok_or_else(|| ValidataError::MissingTemplate {
                locale: tag.to_owned(),
                key: key.to_owned(),
            })
    }
}

/// Human-facing field name: the wire name with `_` and `-` as spaces.
pub fn display_name(wire_name: &str) -> String {
    wire_name.replace(['_', '-'], " ")
}

// ============================================================================
// TESTS
// ============================================================================
