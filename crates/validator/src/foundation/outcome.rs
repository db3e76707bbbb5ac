//! Per-field outcomes and the assembled error map

use indexmap::IndexMap;
use serde::Serialize;

// ============================================================================
// FIELD ERROR
// ============================================================================

/// Why a field failed.
///
/// Serializes untagged, so the error map reads as plain JSON:
/// a string, an array of `string | null`, or a nested object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldError {
    /// Scalar field: the first violated directive's message.
    Message(String),
    /// Scalar sequence: one slot per element, `None` for passing elements.
    Elements(Vec<Option<String>>),
    /// Nested record.
    Nested(ValidationResult),
    /// Sequence of records, keyed by element index. Only failing elements appear.
    Indexed(IndexMap<String, ValidationResult>),
}

impl FieldError {
    /// The scalar message, if this is one.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Number of leaf messages under this error.
    pub fn message_count(&self) -> usize {
        match self {
            Self::Message(_) => 1,
            Self::Elements(slots) => slots.iter().flatten().count(),
            Self::Nested(result) => result.error_count(),
            Self::Indexed(results) => results.values().map(ValidationResult::error_count).sum(),
        }
    }
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// Wire name → outcome, in field declaration order.
///
/// Every declared field has an entry; `None` means the field passed.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    fields: IndexMap<String, Option<FieldError>>,
}

impl ValidationResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an outcome for a field.
    pub fn insert(&mut self, wire_name: impl Into<String>, outcome: Option<FieldError>) {
        self.fields.insert(wire_name.into(), outcome);
    }

    /// Outcome of a field; `None` if the field is unknown or passed.
    pub fn get(&self, wire_name: &str) -> Option<&FieldError> {
        self.fields.get(wire_name).and_then(Option::as_ref)
    }

    /// Scalar message of a field, if it failed with one.
    pub fn message(&self, wire_name: &str) -> Option<&str> {
        self.get(wire_name).and_then(FieldError::as_message)
    }

    /// True if the field is declared and passed.
    pub fn passed(&self, wire_name: &str) -> bool {
        matches!(self.fields.get(wire_name), Some(None))
    }

    /// True if no field failed.
    pub fn is_passing(&self) -> bool {
        self.fields.values().all(Option::is_none)
    }

    /// Number of leaf messages across all fields.
    pub fn error_count(&self) -> usize {
        self.fields.values().flatten().map(FieldError::message_count).sum()
    }

    /// Failing fields only.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.fields
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|e| (k.as_str(), e)))
    }

    /// All entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldError>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `None` when every field passed, the map otherwise.
    pub fn into_failures(self) -> Option<Self> {
        if self.is_passing() { None } else { Some(self) }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_to_plain_json() {
        let mut nested = ValidationResult::new();
        nested.insert("city", Some(FieldError::Message("City is required.".into())));
        nested.insert("zip", None);

        let mut result = ValidationResult::new();
        result.insert("email", Some(FieldError::Message("bad email".into())));
        result.insert("name", None);
        result.insert(
            "tags",
            Some(FieldError::Elements(vec![None, Some("bad tag".into())])),
        );
        result.insert("address", Some(FieldError::Nested(nested)));

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "email": "bad email",
                "name": null,
                "tags": [null, "bad tag"],
                "address": {"city": "City is required.", "zip": null},
            })
        );
    }

    #[test]
    fn passing_result_collapses_to_none() {
        let mut result = ValidationResult::new();
        result.insert("name", None);
        assert!(result.is_passing());
        assert!(result.passed("name"));
        assert_eq!(result.into_failures(), None);
    }

    #[test]
    fn counts_leaf_messages() {
        let mut result = ValidationResult::new();
        result.insert("a", Some(FieldError::Message("x".into())));
        result.insert(
            "b",
            Some(FieldError::Elements(vec![Some("y".into()), None, Some("z".into())])),
        );
        assert_eq!(result.error_count(), 3);
        assert_eq!(result.failures().count(), 2);
    }
}
