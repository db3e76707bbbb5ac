//! In-memory uniqueness table.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use validata::capability::UniquenessLookup;
use validata::foundation::LookupError;

use crate::check_identifiers;

type Column = (String, String);

/// Taken values keyed by `(table, column)`.
///
/// Values are compared as the canonical text the engine passes in, so `42`
/// stored as an integer elsewhere is inserted here as `"42"`.
#[derive(Debug, Default)]
pub struct MemoryUniqueness {
    taken: RwLock<HashMap<Column, HashSet<String>>>,
}

impl MemoryUniqueness {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert) for a batch of values.
    #[must_use = "builder methods must be chained or built"]
    pub fn with<I, S>(self, table: &str, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut taken = self.taken.write();
            let set = taken
                .entry((table.to_owned(), column.to_owned()))
                .or_default();
            set.extend(values.into_iter().map(Into::into));
        }
        self
    }

    /// Marks `value` as taken. Returns false if it already was.
    pub fn insert(&self, table: &str, column: &str, value: impl Into<String>) -> bool {
        self.taken
            .write()
            .entry((table.to_owned(), column.to_owned()))
            .or_default()
            .insert(value.into())
    }

    /// Releases `value`. Returns false if it was not taken.
    pub fn remove(&self, table: &str, column: &str, value: &str) -> bool {
        let mut taken = self.taken.write();
        let key = (table.to_owned(), column.to_owned());
        let Some(set) = taken.get_mut(&key) else {
            return false;
        };
        let removed = set.remove(value);
        if set.is_empty() {
            taken.remove(&key);
        }
        removed
    }

    /// Number of taken values across all columns.
    pub fn len(&self) -> usize {
        self.taken.read().values().map(HashSet::len).sum()
    }

    /// True when nothing is taken.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UniquenessLookup for MemoryUniqueness {
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError> {
        check_identifiers(table, column)?;
        let taken = self.taken.read();
        let found = taken
            .get(&(table.to_owned(), column.to_owned()))
            .is_some_and(|set| set.contains(value));
        tracing::trace!(table, column, found, "memory uniqueness lookup");
        Ok(found)
    }
}
