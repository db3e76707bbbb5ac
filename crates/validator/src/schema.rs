//! Record schemas for dynamic payloads
//!
//! A [`RecordSchema`] declares, for a JSON object, which keys are fields,
//! what kind of value each holds and which rule chain applies. Binding a
//! payload produces a [`Record`] the engine can evaluate.
//!
//! ```toml
//! [[fields]]
//! name = "email"
//! rules = "required|email"
//! kind = "text"
//!
//! [[fields]]
//! name = "tags"
//! rules = "slice:max:5|alpha"
//! kind = "list"
//! items = "text"
//! ```
//!
//! Binding is lenient: missing keys and values that do not fit the
//! declared kind bind as [`Value::Null`] (`false` for `bool`), so
//! `required` reports them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::foundation::{Field, Record, Result, ValidataError, Value};

// ============================================================================
// SCHEMA TYPES
// ============================================================================

/// Kind of value a schema field binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// JSON string.
    Text,
    /// JSON integer fitting `i64`.
    Int,
    /// JSON integer fitting `u64`.
    Uint,
    /// Any JSON number.
    Float,
    /// JSON boolean.
    Bool,
    /// JSON array; element kind from `items`, inferred when absent.
    List,
    /// JSON object taken as a plain map.
    Map,
    /// JSON object bound with the nested `schema`.
    Record,
    /// JSON array of objects, each bound with the nested `schema`.
    Records,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Declared name, used in diagnostics.
    pub name: String,
    /// Payload key and error-map key; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_name: Option<String>,
    /// Rule chain. A field without one is a fatal fault at validation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    /// Value kind.
    pub kind: FieldKind,
    /// Element kind for `list`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<FieldKind>,
    /// Nested schema for `record` and `records`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<RecordSchema>,
}

impl FieldSchema {
    /// Key looked up in the payload.
    pub fn wire(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered field declarations for one object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

// ============================================================================
// LOADING
// ============================================================================

fn parse_error(reason: impl ToString) -> ValidataError {
    ValidataError::Parse {
        what: "schema",
        reason: reason.to_string(),
    }
}

impl RecordSchema {
    /// Parses a JSON schema document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(parse_error)
    }

    /// Parses a TOML schema document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(parse_error)
    }

    /// Loads a schema file; `.toml` is TOML, anything else JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ValidataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&source),
            _ => Self::from_json_str(&source),
        }
    }

    // ========================================================================
    // BINDING
    // ========================================================================

    /// Binds a JSON object to a [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use validata::foundation::Value;
    /// use validata::schema::RecordSchema;
    ///
    /// let schema = RecordSchema::from_json_str(r#"{ "fields": [
    ///     { "name": "age", "rules": "required|min:18", "kind": "uint" }
    /// ] }"#).unwrap();
    ///
    /// let record = schema.bind(&json!({ "age": 21 })).unwrap();
    /// assert_eq!(record.get("age").map(|f| f.value()), Some(&Value::Uint(21)));
    ///
    /// let record = schema.bind(&json!({ "age": "old" })).unwrap();
    /// assert_eq!(record.get("age").map(|f| f.value()), Some(&Value::Null));
    /// ```
    pub fn bind(&self, payload: &Json) -> Result<Record> {
        let Json::Object(object) = payload else {
            return Err(ValidataError::NotARecord {
                found: json_kind(payload).into(),
            });
        };

        let mut record = Record::new();
        for field in &self.fields {
            let value = bind_value(field, object.get(field.wire()))?;
            let mut bound = Field::declared(&field.name, value).wire_name(field.wire());
            if let Some(rules) = &field.rules {
                bound = bound.rules(rules);
            }
            record.push(bound);
        }
        Ok(record)
    }
}

fn nested_schema(field: &FieldSchema) -> Result<&RecordSchema> {
    field.schema.as_ref().ok_or_else(|| {
        parse_error(format!("field `{}` of kind {:?} needs a nested schema", field.name, field.kind))
    })
}

fn bind_value(field: &FieldSchema, json: Option<&Json>) -> Result<Value> {
    let Some(json) = json.filter(|j| !j.is_null()) else {
        return Ok(zero(field.kind));
    };

    Ok(match field.kind {
        FieldKind::Record => match json {
            Json::Object(_) => Value::Record(nested_schema(field)?.bind(json)?),
            _ => Value::Null,
        },
        FieldKind::Records => match json {
            Json::Array(items) => {
                let schema = nested_schema(field)?;
                let empty = Json::Object(serde_json::Map::new());
                let mut records = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    // Keeps element positions; a non-object binds as `{}`.
                    let item = if item.is_object() {
                        item
                    } else {
                        tracing::debug!(field = %field.name, index, "non-object element of a record list bound as empty");
                        &empty
                    };
                    records.push(Value::Record(schema.bind(item)?));
                }
                Value::List(records)
            }
            _ => Value::Null,
        },
        FieldKind::List => match json {
            Json::Array(items) => Value::List(
                items
                    .iter()
                    .map(|item| match field.items {
                        Some(kind) => scalar(kind, item),
                        None => dynamic(item),
                    })
                    .collect(),
            ),
            _ => Value::Null,
        },
        kind => scalar(kind, json),
    })
}

/// Binds a JSON value to a non-record kind.
fn scalar(kind: FieldKind, json: &Json) -> Value {
    let bound = match kind {
        FieldKind::Text => json.as_str().map(Value::from),
        FieldKind::Int => json.as_i64().map(Value::Int),
        FieldKind::Uint => json.as_u64().map(Value::Uint),
        FieldKind::Float => json.as_f64().map(Value::Float),
        FieldKind::Bool => json.as_bool().map(Value::Bool),
        FieldKind::Map => json.as_object().map(|object| {
            Value::Map(object.iter().map(|(k, v)| (k.clone(), dynamic(v))).collect())
        }),
        FieldKind::List => json.as_array().map(|items| Value::List(items.iter().map(dynamic).collect())),
        FieldKind::Record | FieldKind::Records => Some(dynamic(json)),
    };
    bound.unwrap_or_else(|| zero(kind))
}

/// Value a missing or mismatched key binds to: `false` for booleans,
/// `Null` for everything else.
fn zero(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Bool => Value::Bool(false),
        _ => Value::Null,
    }
}

/// Converts JSON without a declared kind.
fn dynamic(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_u64().map(Value::Uint))
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or(Value::Null),
        Json::String(s) => Value::Text(s.clone()),
        Json::Array(items) => Value::List(items.iter().map(dynamic).collect()),
        Json::Object(object) => Value::Map(
            object
                .iter()
                .map(|(k, v)| (k.clone(), dynamic(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "text",
        Json::Array(_) => "list",
        Json::Object(_) => "record",
    }
}

// ============================================================================
// TESTS
// ============================================================================
