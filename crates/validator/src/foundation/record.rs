//! Records: ordered, annotated fields

use crate::foundation::{Annotation, Result, ValidataError, Value};

// ============================================================================
// FIELD
// ============================================================================

/// One declared field of a record.
///
/// A field needs two annotations to be validated: a wire name (the key
/// in payloads and in the error map) and a rule chain. [`Field::new`]
/// sets both; the builder form can leave either out, which is reported
/// as [`ValidataError::MissingAnnotation`] when the record is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    wire_name: Option<String>,
    rules: Option<String>,
    value: Value,
}

impl Field {
    /// Creates a fully annotated field whose declared name is its wire name.
    pub fn new(wire_name: impl Into<String>, rules: impl Into<String>, value: impl Into<Value>) -> Self {
        let wire_name = wire_name.into();
        Self {
            name: wire_name.clone(),
            wire_name: Some(wire_name),
            rules: Some(rules.into()),
            value: value.into(),
        }
    }

    /// Starts a field with no annotations yet.
    pub fn declared(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            wire_name: None,
            rules: None,
            value: value.into(),
        }
    }

    /// Sets the wire name.
    #[must_use = "builder methods must be chained or built"]
    pub fn wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    /// Sets the rule chain.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// Declared name, used only in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire name, if annotated.
    pub fn wire(&self) -> Option<&str> {
        self.wire_name.as_deref()
    }

    /// Rule chain, if annotated.
    pub fn rule_chain(&self) -> Option<&str> {
        self.rules.as_deref()
    }

    /// Field value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns `(wire_name, rules)` or the missing annotation.
    pub(crate) fn annotations(&self) -> Result<(&str, &str)> {
        let wire = self
            .wire_name
            .as_deref()
            .ok_or_else(|| self.missing(Annotation::WireName))?;
        let rules = self
            .rules
            .as_deref()
            .ok_or_else(|| self.missing(Annotation::Rules))?;
        Ok((wire, rules))
    }

    fn missing(&self, annotation: Annotation) -> ValidataError {
        ValidataError::MissingAnnotation {
            field: self.name.clone(),
            annotation,
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// Ordered set of fields. Declaration order is the order of the error map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a fully annotated field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(
        self,
        wire_name: impl Into<String>,
        rules: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.with_field(Field::new(wire_name, rules, value))
    }

    /// Appends a field in place.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks a field up by wire name.
    pub fn get(&self, wire_name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.wire() == Some(wire_name))
    }

    /// Checks that every field carries both annotations.
    pub fn check_annotations(&self) -> Result<()> {
        self.fields.iter().try_for_each(|f| f.annotations().map(drop))
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// VALIDATABLE
// ============================================================================

/// Types that can describe themselves as a [`Record`].
///
/// # Examples
///
/// ```
/// use validata::foundation::{Record, Validatable};
///
/// struct SignUp {
///     email: String,
///     age: u32,
/// }
///
/// impl Validatable for SignUp {
///     fn to_record(&self) -> Record {
///         Record::new()
///             .field("email", "required|email", &self.email)
///             .field("age", "required|min:18", self.age)
///     }
/// }
/// ```
pub trait Validatable {
    /// Builds the record to validate.
    fn to_record(&self) -> Record;
}

impl Validatable for Record {
    fn to_record(&self) -> Record {
        self.clone()
    }
}

impl<T: Validatable> Validatable for &T {
    fn to_record(&self) -> Record {
        (*self).to_record()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_wire_name() {
        let record = Record::new()
            .field("password", "required", "s3cret")
            .field("password_confirm", "same:password", "s3cret");
        assert_eq!(record.len(), 2);
        assert_eq!(
            record.get("password").map(Field::value),
            Some(&Value::from("s3cret"))
        );
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn missing_rules_is_reported() {
        let record = Record::new().with_field(Field::declared("nickname", "bob").wire_name("nick"));
        let err = record.check_annotations().unwrap_err();
        assert!(matches!(
            err,
            ValidataError::MissingAnnotation {
                annotation: Annotation::Rules,
                ..
            }
        ));
    }

    #[test]
    fn missing_wire_name_is_reported() {
        let record = Record::new().with_field(Field::declared("nickname", "bob").rules("alpha"));
        let err = record.check_annotations().unwrap_err();
        assert!(err.to_string().contains("wire name"));
    }

    #[test]
    fn declared_field_with_both_annotations_passes() {
        let field = Field::declared("nickname", "bob").wire_name("nick").rules("alpha");
        assert_eq!(field.annotations().unwrap(), ("nick", "alpha"));
    }
}
