//! Predicate library
//!
//! One pure function per rule kind, grouped by the type class it accepts.
//! Every predicate answers "does the value conform?"; the dispatcher
//! reports a violation when it returns `false`.
//!
//! # Groups
//!
//! - **Format** (text): [`is_alpha`], [`is_numeric`], [`is_alpha_numeric`],
//!   [`is_printable_ascii`], [`is_safe_string`]
//! - **Identity** (text): [`is_email`], [`is_phone`], [`is_phone_with_code`],
//!   [`is_username`], [`is_gh_card`], [`is_gh_gps`]
//! - **Numeric shape**: [`is_int_shaped`], [`is_uint_shaped`], [`is_float_shaped`]
//! - **Magnitude**: [`satisfies`] over [`Magnitude`] and [`Bound`]
//! - **Cross-field**: [`is_same`]
//! - **Attachment**: [`is_allowed_type`], [`SizeLimit`]

pub mod comparison;
pub mod content;
pub mod numeric;
pub mod pattern;
pub mod phone;
pub mod range;
pub mod size;

pub use comparison::is_same;
pub use content::{is_email, is_gh_card, is_gh_gps};
pub use numeric::{is_float_shaped, is_int_shaped, is_uint_shaped};
pub use pattern::{is_alpha, is_alpha_numeric, is_numeric, is_printable_ascii, is_safe_string};
pub use phone::{is_phone, is_phone_with_code, is_username};
pub use range::{BadParam, Bound, Magnitude, check_params, satisfies};
pub use size::{DEFAULT_IMAGE_TYPES, SizeLimit, SizeUnit, is_allowed_type};
