//! Shared, read-only state handed to every field task

use std::sync::Arc;

use crate::capability::{ContentSniffer, UniquenessLookup};
use crate::foundation::{Result, ValidataError};
use crate::locale::Locales;
use crate::rules::Directive;

/// Immutable engine state, built once per [`Validator`](super::Validator).
pub(crate) struct Engine {
    pub(crate) locales: Arc<Locales>,
    pub(crate) lookup: Option<Arc<dyn UniquenessLookup>>,
    pub(crate) sniffer: Option<Arc<dyn ContentSniffer>>,
    pub(crate) strict: bool,
    pub(crate) default_locale: String,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("locales", &self.locales.tags().collect::<Vec<_>>())
            .field("lookup", &self.lookup.is_some())
            .field("sniffer", &self.sniffer.is_some())
            .field("strict", &self.strict)
            .field("default_locale", &self.default_locale)
            .finish()
    }
}

/// One evaluation: the engine plus the locale it renders in.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    engine: Arc<Engine>,
    locale: Arc<str>,
}

impl Scope {
    pub(crate) fn new(engine: Arc<Engine>, locale: Option<&str>) -> Self {
        let locale = Arc::from(locale.unwrap_or(&engine.default_locale));
        Self { engine, locale }
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }

    pub(crate) fn strict(&self) -> bool {
        self.engine.strict
    }

    pub(crate) fn locale(&self) -> &str {
        &self.locale
    }

    /// The directive's custom message if it has one, the rendered
    /// template otherwise.
    pub(crate) fn message(&self, directive: &Directive, key: &str, args: &[&str]) -> Result<String> {
        match directive.message() {
            Some(custom) => Ok(custom.to_owned()),
            None => self.engine.locales.render(&self.locale, key, args),
        }
    }

    pub(crate) fn lookup(&self, field: &str) -> Result<&dyn UniquenessLookup> {
        self.engine
            .lookup
            .as_deref()
            .ok_or_else(|| ValidataError::NoUniquenessLookup {
                field: field.to_owned(),
            })
    }

    pub(crate) fn detect(&self, bytes: &[u8]) -> Option<String> {
        self.engine.sniffer.as_ref()?.detect(bytes)
    }
}
