//! The closed set of value kinds a field can hold
//!
//! Dispatch is a `match` over [`Value`]; there is no runtime type
//! inspection anywhere in the engine.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::PathBuf;

use bytes::Bytes;

use crate::foundation::Record;

// ============================================================================
// VALUE KIND
// ============================================================================

/// Type class of a [`Value`], used to pick predicates and message variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Absent optional.
    Null,
    /// `true` / `false`.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating point.
    Float,
    /// Text.
    Text,
    /// Sequence of values.
    List,
    /// String-keyed mapping.
    Map,
    /// Nested record.
    Record,
    /// Binary attachment.
    File,
}

impl ValueKind {
    /// Lowercase name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
            Self::Map => "map",
            Self::Record => "record",
            Self::File => "file",
        }
    }

    /// Returns true for `Int`, `Uint` and `Float`.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ATTACHMENT
// ============================================================================

/// Where an attachment's bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Already buffered (multipart upload, tests).
    Memory(Bytes),
    /// Spooled to disk; read lazily when a rule needs the content.
    Path(PathBuf),
}

/// An uploaded file: name, declared size and a handle to its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    filename: String,
    size: u64,
    source: AttachmentSource,
}

impl Attachment {
    /// Creates an in-memory attachment; its size is the buffer length.
    pub fn from_bytes(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            filename: filename.into(),
            size: content.len() as u64,
            source: AttachmentSource::Memory(content),
        }
    }

    /// Creates an attachment backed by a file on disk.
    ///
    /// `size` is the size declared by the transport; it is what the
    /// `size:<n><unit>` rule compares against.
    pub fn from_path(filename: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            filename: filename.into(),
            size,
            source: AttachmentSource::Path(path.into()),
        }
    }

    /// Client-supplied file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Declared size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content handle.
    pub fn source(&self) -> &AttachmentSource {
        &self.source
    }

    /// Reads the attachment content.
    pub async fn read(&self) -> std::io::Result<Bytes> {
        match &self.source {
            AttachmentSource::Memory(bytes) => Ok(bytes.clone()),
            AttachmentSource::Path(path) => tokio::fs::read(path).await.map(Bytes::from),
        }
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// Runtime value of a field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent optional (`None`, JSON `null`, missing key).
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point.
    Float(f64),
    /// Text.
    Text(String),
    /// Sequence; a list of records is a nested-record sequence.
    List(Vec<Value>),
    /// String-keyed mapping. Only presence and size rules look at it.
    Map(BTreeMap<String, Value>),
    /// Nested record.
    Record(Record),
    /// Binary attachment.
    File(Attachment),
}

impl Value {
    /// Type class of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Record(_) => ValueKind::Record,
            Self::File(_) => ValueKind::File,
        }
    }

    /// Zero-value test behind `required` and the optional-field short-circuit.
    ///
    /// Records and attachments are never empty; absence is `Null`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !*b,
            Self::Int(n) => *n == 0,
            Self::Uint(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Record(_) | Self::File(_) => false,
        }
    }

    /// Canonical string form used by cross-field comparison.
    ///
    /// Containers, records and attachments have none.
    pub fn canonical(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => Some(Cow::Borrowed("")),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Int(n) => Some(Cow::Owned(n.to_string())),
            Self::Uint(n) => Some(Cow::Owned(n.to_string())),
            Self::Float(n) => Some(Cow::Owned(n.to_string())),
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::List(_) | Self::Map(_) | Self::Record(_) | Self::File(_) => None,
        }
    }

    /// Returns the text, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true when this is a non-empty list made only of records.
    pub fn is_record_list(&self) -> bool {
        match self {
            Self::List(items) => {
                !items.is_empty() && items.iter().all(|v| matches!(v, Self::Record(_)))
            }
            _ => false,
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::Int(i64::from(n))
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::Uint(u64::from(n))
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        Self::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Uint(n as u64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl From<Attachment> for Value {
    fn from(a: Attachment) -> Self {
        Self::File(a)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness_per_kind() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::from(false).is_empty());
        assert!(Value::from(0_i32).is_empty());
        assert!(Value::from(0_u8).is_empty());
        assert!(Value::from(0.0_f64).is_empty());
        assert!(Value::from(Vec::<String>::new()).is_empty());
        assert!(Value::from(None::<String>).is_empty());

        assert!(!Value::from("x").is_empty());
        assert!(!Value::from(true).is_empty());
        assert!(!Value::from(-1_i64).is_empty());
        assert!(!Value::from(Record::new()).is_empty());
        assert!(!Value::from(Attachment::from_bytes("a.txt", Vec::<u8>::new())).is_empty());
    }

    #[test]
    fn kinds_follow_rust_types() {
        assert_eq!(Value::from(3_i16).kind(), ValueKind::Int);
        assert_eq!(Value::from(3_u16).kind(), ValueKind::Uint);
        assert_eq!(Value::from(3.5_f32).kind(), ValueKind::Float);
        assert_eq!(Value::from(vec!["a"]).kind(), ValueKind::List);
        assert_eq!(Value::from(Some(1_i32)).kind(), ValueKind::Int);
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(Value::from(42_i32).canonical().as_deref(), Some("42"));
        assert_eq!(Value::from(1.5_f64).canonical().as_deref(), Some("1.5"));
        assert_eq!(Value::from(true).canonical().as_deref(), Some("true"));
        assert_eq!(Value::from(vec![1_i32]).canonical(), None);
    }

    #[test]
    fn record_lists_are_detected() {
        let list = Value::from(vec![Record::new(), Record::new()]);
        assert!(list.is_record_list());
        assert!(!Value::from(vec!["a"]).is_record_list());
        assert!(!Value::List(Vec::new()).is_record_list());
    }

    #[tokio::test]
    async fn in_memory_attachment_reads_back() {
        let file = Attachment::from_bytes("a.bin", vec![1_u8, 2, 3]);
        assert_eq!(file.size(), 3);
        assert_eq!(file.read().await.unwrap().as_ref(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_path_is_unreadable() {
        let file = Attachment::from_path("gone.png", "/definitely/not/here.png", 10);
        assert!(file.read().await.is_err());
    }
}
