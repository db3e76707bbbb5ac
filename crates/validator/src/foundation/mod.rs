//! Core data model
//!
//! - **Values**: [`Value`], [`ValueKind`], [`Attachment`]
//! - **Records**: [`Record`], [`Field`], [`Validatable`]
//! - **Outcomes**: [`FieldError`], [`ValidationResult`]
//! - **Faults**: [`ValidataError`], [`LookupError`]
//!
//! Validation failures are data ([`ValidationResult`]); configuration and
//! infrastructure faults are errors ([`ValidataError`]). The two never mix.

pub mod error;
pub mod outcome;
pub mod record;
pub mod value;

pub use error::{Annotation, LookupError, Result, ValidataError};
pub use outcome::{FieldError, ValidationResult};
pub use record::{Field, Record, Validatable};
pub use value::{Attachment, AttachmentSource, Value, ValueKind};
