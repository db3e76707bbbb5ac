//! # validata
//!
//! Declarative, rule-chain validation for structured records with
//! localized error maps.
//!
//! ## Quick Start
//!
//! ```
//! use validata::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> validata::foundation::Result<()> {
//! let validator = Validator::new()?;
//! let signup = record! {
//!     "email": "required|email" => "kofi@mail.gh",
//!     "age": "required|min:18" => 15_u8,
//! };
//!
//! let errors = validator.validate(&signup, Some("fr")).await?.unwrap();
//! assert_eq!(errors.message("age"), Some("Le champ age doit être d'au moins 18"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Rule Chains
//!
//! A field's rules are a pipe-delimited chain such as
//! `"required|between:1,10=>Pick a number from 2 to 9"`. `required` is always
//! checked first, an empty optional field skips the rest, and the first
//! violated directive decides the message. See [`rules`] for the grammar and
//! [`validators`] for the predicates behind each directive.
//!
//! ## Outcomes
//!
//! - Validation failures come back as a [`ValidationResult`](foundation::ValidationResult)
//!   keyed by wire name; `Ok(None)` means everything passed.
//! - Misconfiguration and backend failures are
//!   [`ValidataError`](foundation::ValidataError)s and abort the call.
//!
//! ## Capabilities
//!
//! - [`UniquenessLookup`](capability::UniquenessLookup) backs `unique:table.column`
//! - [`ContentSniffer`](capability::ContentSniffer) backs `image`, `mimes` and `file:ext`

// ValidataError carries owned strings for every fault; boxing it buys nothing
// on a path that aborts the evaluation anyway.
#![allow(clippy::result_large_err)]

pub mod capability;
pub mod config;
pub mod engine;
pub mod foundation;
pub mod locale;
mod macros;
pub mod prelude;
pub mod rules;
pub mod schema;
pub mod validators;
