//! Prelude module for convenient imports.
//!
//! Provides a single `use validata::prelude::*;` import that brings in the
//! engine, the data model and the capability traits.
//!
//! # Examples
//!
//! ```
//! use validata::prelude::*;
//!
//! let record = record! { "name": "required|alpha" => "Ama" };
//! let value = Value::from(record);
//! assert_eq!(value.kind(), ValueKind::Record);
//! ```

// ============================================================================
// FOUNDATION: Values, records, outcomes, faults
// ============================================================================

pub use crate::foundation::{
    Attachment, Field, FieldError, Record, Validatable, ValidataError, ValidationResult, Value,
    ValueKind,
};

// ============================================================================
// ENGINE: Validator, configuration, schemas
// ============================================================================

pub use crate::config::ValidatorConfig;
pub use crate::engine::{Validator, ValidatorBuilder};
pub use crate::locale::Locales;
pub use crate::schema::{FieldKind, RecordSchema};

// ============================================================================
// CAPABILITIES
// ============================================================================

pub use crate::capability::{ContentSniffer, UniquenessLookup};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{record, validatable};
