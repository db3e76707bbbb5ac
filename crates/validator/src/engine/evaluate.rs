//! Record evaluation: fan out one task per field, fold in declaration order

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::task::JoinSet;

use super::context::Scope;
use super::dispatch::FieldTask;
use crate::foundation::{FieldError, Record, Result, ValidataError, ValidationResult};

/// Evaluates every field of `record` concurrently.
///
/// Boxed so nested records can recurse through the dispatcher.
pub(crate) fn evaluate(scope: Scope, record: Arc<Record>) -> BoxFuture<'static, Result<ValidationResult>> {
    Box::pin(evaluate_record(scope, record))
}

#[tracing::instrument(level = "debug", skip_all, fields(fields = record.len(), locale = scope.locale()))]
async fn evaluate_record(scope: Scope, record: Arc<Record>) -> Result<ValidationResult> {
    record.check_annotations()?;

    let mut join_set = JoinSet::new();
    let mut task_fields = HashMap::with_capacity(record.len());
    for index in 0..record.len() {
        let task = FieldTask {
            scope: scope.clone(),
            record: Arc::clone(&record),
            index,
        };
        let handle = join_set.spawn(task.run());
        task_fields.insert(handle.id(), index);
    }

    let mut outcomes: Vec<Option<FieldError>> = vec![None; record.len()];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, Ok(outcome))) => outcomes[index] = outcome,
            Ok((index, Err(err))) => {
                join_set.abort_all();
                tracing::warn!(field = wire_name(&record, index), error = %err, "aborting record evaluation");
                return Err(err);
            }
            Err(join_err) => {
                join_set.abort_all();
                let field = task_fields
                    .get(&join_err.id())
                    .map_or("<unknown>", |&index| wire_name(&record, index))
                    .to_owned();
                tracing::error!(%field, ?join_err, "field task did not complete");
                return Err(ValidataError::TaskPanicked {
                    field,
                    reason: join_err.to_string(),
                });
            }
        }
    }

    let mut result = ValidationResult::new();
    for (field, outcome) in record.fields().iter().zip(outcomes) {
        result.insert(field.wire().unwrap_or(field.name()), outcome);
    }
    Ok(result)
}

fn wire_name(record: &Record, index: usize) -> &str {
    record
        .fields()
        .get(index)
        .map_or("<unknown>", |f| f.wire().unwrap_or(f.name()))
}
