//! A single locale's message templates

use std::collections::HashMap;

use serde::Deserialize;

use crate::foundation::{Result, ValidataError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum Entry {
    Template(String),
    Variants(HashMap<String, String>),
}

/// Rule key → template, with one level of type-class variants.
///
/// Deserializes from a JSON object whose values are either a template or
/// an object of variant templates:
///
/// ```json
/// { "required": "The {0} field is required.",
///   "min": { "numeric": "The {0} field must be at least {1}." } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct LocaleTable {
    entries: HashMap<String, Entry>,
}

impl LocaleTable {
    /// Parses a JSON table. `tag` only appears in the error.
    pub fn from_json(tag: &str, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ValidataError::InvalidLocale {
            tag: tag.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Looks up a flat (`required`) or dotted (`min.string`) key.
    pub fn template(&self, key: &str) -> Option<&str> {
        match key.split_once('.') {
            Some((category, variant)) => match self.entries.get(category)? {
                Entry::Variants(variants) => variants.get(variant).map(String::as_str),
                Entry::Template(_) => None,
            },
            None => match self.entries.get(key)? {
                Entry::Template(template) => Some(template),
                Entry::Variants(_) => None,
            },
        }
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Substitutes `{0}`, `{1}`, ... with `args`.
///
/// Placeholders without a matching argument are left as written.
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let arg = tail
            .find('}')
            .and_then(|close| Some((close, tail[1..close].parse::<usize>().ok()?)))
            .and_then(|(close, index)| Some((close, *args.get(index)?)));

        match arg {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
