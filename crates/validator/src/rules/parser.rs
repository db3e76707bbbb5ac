//! Rule-chain grammar
//!
//! ```text
//! chain     = directive *( "|" directive )
//! directive = name [ ":" params ] [ "=>" message ]
//! params    = param *( ( ":" / "," ) param )
//! ```
//!
//! The parser never fails. Empty segments are skipped, parameters are
//! trimmed, and `required` directives are moved to the front of the chain
//! (keeping their relative order) so presence is always checked first.

/// Separates directives in a chain.
pub const DIRECTIVE_SEPARATOR: char = '|';
/// Introduces a custom message at the end of a directive.
pub const MESSAGE_DELIMITER: &str = "=>";

// ============================================================================
// DIRECTIVE
// ============================================================================

/// One parsed segment of a rule chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    name: String,
    params: Vec<String>,
    message: Option<String>,
    source: String,
}

impl Directive {
    /// Parses one segment; `None` if it has no rule name.
    pub fn parse(segment: &str) -> Option<Self> {
        let segment = segment.trim();
        let (spec, message) = match segment.split_once(MESSAGE_DELIMITER) {
            Some((spec, message)) => (spec.trim(), Some(message.trim().to_owned())),
            None => (segment, None),
        };

        let (name, params) = match spec.split_once(':') {
            Some((name, rest)) => (
                name.trim(),
                rest.split([':', ','])
                    .map(|p| p.trim().to_owned())
                    .collect(),
            ),
            None => (spec, Vec::new()),
        };

        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_owned(),
            params,
            message: message.filter(|m| !m.is_empty()),
            source: spec.to_owned(),
        })
    }

    /// Rule name, e.g. `between`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in order, e.g. `["1", "10"]`.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Caller-supplied message that replaces the rendered one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The directive as written, without its custom message.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True for the `required` directive.
    pub fn is_required(&self) -> bool {
        self.name == "required"
    }
}

// ============================================================================
// RULE CHAIN
// ============================================================================

/// Ordered directives of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleChain {
    directives: Vec<Directive>,
}

impl RuleChain {
    /// Parses a pipe-delimited chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use validata::rules::RuleChain;
    ///
    /// let chain = RuleChain::parse("min:3|required=>Tell us your name|between:1,10");
    /// let names: Vec<_> = chain.iter().map(|d| d.name()).collect();
    /// assert_eq!(names, ["required", "min", "between"]);
    /// assert_eq!(chain.required().and_then(|d| d.message()), Some("Tell us your name"));
    /// ```
    pub fn parse(chain: &str) -> Self {
        let (mut directives, rest): (Vec<_>, Vec<_>) = chain
            .split(DIRECTIVE_SEPARATOR)
            .filter_map(Directive::parse)
            .partition(Directive::is_required);
        directives.extend(rest);
        Self { directives }
    }

    /// The first `required` directive, if any.
    pub fn required(&self) -> Option<&Directive> {
        self.directives.first().filter(|d| d.is_required())
    }

    /// All directives except `required`, in chain order.
    pub fn checks(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter().filter(|d| !d.is_required())
    }

    /// All directives, `required` first.
    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// True for an empty chain.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(d: &Directive) -> Vec<&str> {
        d.params().iter().map(String::as_str).collect()
    }

    #[test]
    fn bare_directive() {
        let d = Directive::parse("email").unwrap();
        assert_eq!(d.name(), "email");
        assert!(d.params().is_empty());
        assert_eq!(d.message(), None);
    }

    #[test]
    fn colon_and_comma_parameters() {
        let d = Directive::parse("between:1,10").unwrap();
        assert_eq!(params(&d), ["1", "10"]);

        let d = Directive::parse("slice:min:2").unwrap();
        assert_eq!(d.name(), "slice");
        assert_eq!(params(&d), ["min", "2"]);

        let d = Directive::parse("unique:users.email").unwrap();
        assert_eq!(params(&d), ["users.email"]);

        let d = Directive::parse("image: jpg , png").unwrap();
        assert_eq!(params(&d), ["jpg", "png"]);
    }

    #[test]
    fn custom_message_is_kept_verbatim() {
        let d = Directive::parse("min:18=>You must be 18: sorry, kid").unwrap();
        assert_eq!(d.name(), "min");
        assert_eq!(params(&d), ["18"]);
        assert_eq!(d.message(), Some("You must be 18: sorry, kid"));
        assert_eq!(d.source(), "min:18");
    }

    #[test]
    fn empty_segments_are_skipped() {
        let chain = RuleChain::parse("|email||=>orphan message|");
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.iter().next().map(Directive::name), Some("email"));
    }

    #[test]
    fn required_moves_to_front() {
        let chain = RuleChain::parse("email|max:40|required");
        let names: Vec<_> = chain.iter().map(Directive::name).collect();
        assert_eq!(names, ["required", "email", "max"]);
        assert!(chain.required().is_some());
        assert_eq!(chain.checks().count(), 2);
    }

    #[test]
    fn chain_without_required() {
        let chain = RuleChain::parse("email");
        assert!(chain.required().is_none());
        assert!(RuleChain::parse("").is_empty());
    }

    #[test]
    fn unknown_names_are_kept() {
        let chain = RuleChain::parse("requird|emial");
        assert_eq!(chain.len(), 2);
        assert!(chain.required().is_none());
    }
}
