//! Rule chains: parsing and the closed rule catalogue
//!
//! [`RuleChain::parse`] turns an annotation such as
//! `"required|between:1,10=>Pick 2 to 9"` into [`Directive`]s, and
//! [`Rule::from_directive`] maps each directive onto the catalogue.
//! Parsing never fails; resolution errors are handled by the dispatcher
//! according to the configured strictness.

mod parser;
mod rule;

pub use parser::{DIRECTIVE_SEPARATOR, Directive, MESSAGE_DELIMITER, RuleChain};
pub use rule::{NumericShape, Rule, RuleError, TextFormat};
