//! Per-field state machine
//!
//! ```text
//! Unchecked ─▶ RequiredCheck ─┬─▶ Failed            (required, value empty)
//!                             ├─▶ Passed            (optional, value empty)
//!                             └─▶ RuleLoop ─┬─▶ Failed (first violation)
//!                                           └─▶ Passed
//! ```
//!
//! Scalars stop at the first violated directive. Scalar sequences run the
//! chain on every element and keep one slot per element. Records and
//! record sequences recurse into the evaluator.

use std::sync::Arc;

use futures::future::try_join_all;
use indexmap::IndexMap;

use super::context::Scope;
use super::evaluate::evaluate;
use crate::foundation::{Attachment, FieldError, Record, Result, ValidataError, Value};
use crate::locale::display_name;
use crate::rules::{Directive, Rule, RuleChain};
use crate::validators::{
    BadParam, Bound, DEFAULT_IMAGE_TYPES, Magnitude, SizeLimit, check_params, is_allowed_type, is_same,
    satisfies,
};

// ============================================================================
// FIELD TASK
// ============================================================================

/// One field of one record, run on its own task.
pub(crate) struct FieldTask {
    pub(crate) scope: Scope,
    pub(crate) record: Arc<Record>,
    pub(crate) index: usize,
}

impl FieldTask {
    pub(crate) async fn run(self) -> (usize, Result<Option<FieldError>>) {
        let outcome = self.dispatch().await;
        (self.index, outcome)
    }

    async fn dispatch(&self) -> Result<Option<FieldError>> {
        let field = &self.record.fields()[self.index];
        let (wire, rules) = field.annotations()?;
        let chain = RuleChain::parse(rules);

        let check = FieldCheck {
            scope: &self.scope,
            record: &self.record,
            wire,
            display: display_name(wire),
            rules: resolve(&self.scope, wire, &chain)?,
            required: chain.required(),
        };
        check.run(field.value()).await
    }
}

/// Maps directives onto the catalogue. Lax mode drops what does not
/// resolve; strict mode refuses it, along with bound parameters that do
/// not parse.
fn resolve<'c>(scope: &Scope, wire: &str, chain: &'c RuleChain) -> Result<Vec<(&'c Directive, Rule)>> {
    let mut rules = Vec::with_capacity(chain.len());
    for directive in chain.checks() {
        match Rule::from_directive(directive) {
            Ok(rule) if scope.strict() => {
                bound_params(&rule)
                    .map_err(|bad| ValidataError::invalid_rule(wire, directive.source(), bad.to_string()))?;
                rules.push((directive, rule));
            }
            Ok(rule) => rules.push((directive, rule)),
            Err(err) if scope.strict() => {
                return Err(ValidataError::invalid_rule(wire, directive.source(), err.to_string()));
            }
            Err(err) => {
                tracing::debug!(field = wire, directive = directive.source(), %err, "ignoring directive");
            }
        }
    }
    Ok(rules)
}

/// Bound parameters must be numbers; `size` may also be a byte threshold.
fn bound_params(rule: &Rule) -> Result<(), BadParam> {
    match rule {
        Rule::Bound { bound: Bound::Size, params }
            if params.first().is_some_and(|raw| SizeLimit::parse(raw).is_some()) =>
        {
            Ok(())
        }
        Rule::Bound { bound, params } => check_params(*bound, params, Magnitude::Float(0.0)),
        Rule::Slice { bound, params } => check_params(*bound, params, Magnitude::Elements(0)),
        _ => Ok(()),
    }
}

// ============================================================================
// FIELD CHECK
// ============================================================================

struct FieldCheck<'a> {
    scope: &'a Scope,
    record: &'a Record,
    wire: &'a str,
    display: String,
    rules: Vec<(&'a Directive, Rule)>,
    required: Option<&'a Directive>,
}

impl FieldCheck<'_> {
    async fn run(&self, value: &Value) -> Result<Option<FieldError>> {
        if value.is_empty() {
            return match self.required {
                Some(required) => {
                    let key = if matches!(value, Value::Bool(_)) { "bool" } else { "required" };
                    let message = self.scope.message(required, key, &[&self.display])?;
                    Ok(Some(FieldError::Message(message)))
                }
                None => Ok(None),
            };
        }

        match value {
            Value::Record(nested) => {
                let result = evaluate(self.scope.clone(), Arc::new(nested.clone())).await?;
                Ok(result.into_failures().map(FieldError::Nested))
            }
            Value::List(items) => {
                if let Some(message) = self.slice_failure(items.len())? {
                    return Ok(Some(FieldError::Message(message)));
                }
                if value.is_record_list() {
                    self.records(items).await
                } else {
                    self.elements(items).await
                }
            }
            scalar => Ok(self
                .first_failure(scalar, &self.display)
                .await?
                .map(FieldError::Message)),
        }
    }

    /// Runs the chain on every element; `None` when all pass.
    async fn elements(&self, items: &[Value]) -> Result<Option<FieldError>> {
        let mut slots = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let display = format!("{} ({})", self.display, i + 1);
            slots.push(self.first_failure(item, &display).await?);
        }

        Ok(slots
            .iter()
            .any(Option::is_some)
            .then_some(FieldError::Elements(slots)))
    }

    /// Evaluates every record of a sequence; failures keyed by index.
    async fn records(&self, items: &[Value]) -> Result<Option<FieldError>> {
        let nested = items.iter().enumerate().filter_map(|(i, item)| match item {
            Value::Record(record) => {
                let scope = self.scope.clone();
                let record = Arc::new(record.clone());
                Some(async move { evaluate(scope, record).await.map(|result| (i, result)) })
            }
            _ => None,
        });

        let failures: IndexMap<String, _> = try_join_all(nested)
            .await?
            .into_iter()
            .filter_map(|(i, result)| Some((i.to_string(), result.into_failures()?)))
            .collect();

        Ok((!failures.is_empty()).then_some(FieldError::Indexed(failures)))
    }

    /// `slice:*` directives against the element count.
    fn slice_failure(&self, len: usize) -> Result<Option<String>> {
        for (directive, rule) in &self.rules {
            let Rule::Slice { bound, params } = rule else {
                continue;
            };
            if let Some(message) =
                self.bound_failure(directive, *bound, params, Magnitude::Elements(len), &self.display)?
            {
                return Ok(Some(message));
            }
        }
        Ok(None)
    }

    /// First violated directive for a scalar value.
    async fn first_failure(&self, value: &Value, display: &str) -> Result<Option<String>> {
        for (directive, rule) in &self.rules {
            if let Some(message) = self.violation(directive, rule, value, display).await? {
                return Ok(Some(message));
            }
        }
        Ok(None)
    }

    async fn violation(
        &self,
        directive: &Directive,
        rule: &Rule,
        value: &Value,
        display: &str,
    ) -> Result<Option<String>> {
        match (rule, value) {
            (Rule::Format(format), Value::Text(text)) => {
                self.fail_if(!format.check(text), directive, format.key(), &[display])
            }
            (Rule::Shape(shape), v) if v.kind().is_numeric() => {
                self.fail_if(!shape.check(v), directive, shape.key(), &[display])
            }
            (Rule::Bound { bound, params }, Value::File(attachment)) => {
                self.size_failure(directive, *bound, params, attachment, display)
            }
            (Rule::Bound { bound, params }, v) => match Magnitude::of(v) {
                Some(magnitude) => self.bound_failure(directive, *bound, params, magnitude, display),
                None => Ok(None),
            },
            (Rule::Same(other) | Rule::Match(other), v) if v.canonical().is_some() => {
                self.cross_field(directive, rule, other, v, display)
            }
            (Rule::Unique { table, column }, v) => {
                let candidate = match v {
                    Value::Text(s) => s.clone(),
                    Value::Int(n) => n.to_string(),
                    Value::Uint(n) => n.to_string(),
                    _ => return Ok(None),
                };
                let taken = self
                    .scope
                    .lookup(self.wire)?
                    .exists(table, column, &candidate)
                    .await
                    .map_err(|source| ValidataError::Lookup {
                        field: self.wire.to_owned(),
                        source,
                    })?;
                self.fail_if(taken, directive, "unique", &[display])
            }
            (Rule::File, Value::File(attachment)) => {
                let unreadable = attachment.read().await.is_err();
                self.fail_if(unreadable, directive, "file", &[display])
            }
            (Rule::Image(None), Value::File(attachment)) => {
                let allowed = self.type_allowed(attachment, DEFAULT_IMAGE_TYPES).await;
                self.fail_if(!allowed, directive, "image", &[display])
            }
            (Rule::Image(Some(exts)), Value::File(attachment)) => {
                self.type_failure(directive, "image_type", exts, attachment, display).await
            }
            (Rule::FileType(exts), Value::File(attachment)) => {
                self.type_failure(directive, "file_type", exts, attachment, display).await
            }
            (Rule::Mimes(exts), Value::File(attachment)) => {
                self.type_failure(directive, "mimes", exts, attachment, display).await
            }
            _ => Ok(None),
        }
    }

    fn fail_if(&self, violated: bool, directive: &Directive, key: &str, args: &[&str]) -> Result<Option<String>> {
        if violated {
            self.scope.message(directive, key, args).map(Some)
        } else {
            Ok(None)
        }
    }

    fn bound_failure(
        &self,
        directive: &Directive,
        bound: Bound,
        params: &[String],
        magnitude: Magnitude,
        display: &str,
    ) -> Result<Option<String>> {
        let holds = satisfies(magnitude, bound, params, self.scope.strict())
            .map_err(|bad| ValidataError::invalid_rule(self.wire, directive.source(), bad.to_string()))?;

        let key = format!("{}.{}", bound.name(), magnitude.variant());
        let mut args = vec![display];
        args.extend(params.iter().take(bound.arity()).map(String::as_str));
        self.fail_if(!holds, directive, &key, &args)
    }

    fn size_failure(
        &self,
        directive: &Directive,
        bound: Bound,
        params: &[String],
        attachment: &Attachment,
        display: &str,
    ) -> Result<Option<String>> {
        if bound != Bound::Size {
            return Ok(None);
        }
        let raw = params.first().map_or("", String::as_str);
        let limit = SizeLimit::parse(raw).ok_or_else(|| {
            ValidataError::invalid_rule(self.wire, directive.source(), "expected a size such as `512KB`, `2MB` or `1GB`")
        })?;

        let amount = limit.amount.to_string();
        self.fail_if(!limit.allows(attachment.size()), directive, limit.unit.locale_key(), &[display, &amount])
    }

    fn cross_field(
        &self,
        directive: &Directive,
        rule: &Rule,
        other: &str,
        value: &Value,
        display: &str,
    ) -> Result<Option<String>> {
        let equal = match self.record.get(other) {
            Some(target) => is_same(value, target.value()),
            None if self.scope.strict() => {
                return Err(ValidataError::UnknownField {
                    field: self.wire.to_owned(),
                    target: other.to_owned(),
                });
            }
            None => false,
        };

        match rule {
            Rule::Same(_) => self.fail_if(!equal, directive, "same", &[display, other]),
            _ => self.fail_if(!equal, directive, "match", &[display]),
        }
    }

    /// Sniffs the attachment and checks it against `allowed`. Unreadable or
    /// unrecognised content never matches.
    async fn type_allowed<S: AsRef<str> + Sync>(&self, attachment: &Attachment, allowed: &[S]) -> bool {
        let detected = match attachment.read().await {
            Ok(bytes) => self.scope.detect(&bytes),
            Err(err) => {
                tracing::debug!(field = self.wire, file = attachment.filename(), %err, "attachment unreadable");
                None
            }
        };
        is_allowed_type(detected.as_deref(), allowed)
    }

    async fn type_failure(
        &self,
        directive: &Directive,
        key: &str,
        exts: &[String],
        attachment: &Attachment,
        display: &str,
    ) -> Result<Option<String>> {
        let allowed = self.type_allowed(attachment, exts).await;
        let listed = exts.join(",");
        self.fail_if(!allowed, directive, key, &[display, &listed])
    }
}
