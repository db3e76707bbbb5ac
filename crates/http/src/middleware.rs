//! Schema-driven body validation as a `from_fn_with_state` middleware.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use validata::engine::Validator;
use validata::schema::RecordSchema;

use crate::error::HttpError;
use crate::locale::request_locale;

/// Largest body the middleware buffers, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Validator and schema for [`validate_body`].
#[derive(Debug, Clone)]
pub struct SchemaGuard {
    validator: Validator,
    schema: Arc<RecordSchema>,
    body_limit: usize,
}

impl SchemaGuard {
    /// Guard with [`DEFAULT_BODY_LIMIT`].
    pub fn new(validator: Validator, schema: RecordSchema) -> Self {
        Self {
            validator,
            schema: Arc::new(schema),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Changes the buffering limit.
    #[must_use = "builder methods must be chained or built"]
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }
}

/// Buffers the body, binds it through the guard's schema and validates it.
///
/// A passing body is handed to the next service byte-for-byte.
pub async fn validate_body(
    State(guard): State<SchemaGuard>,
    request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let locale = request_locale(request.headers());
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, guard.body_limit).await.map_err(|e| HttpError::Rejected {
        status: http::StatusCode::PAYLOAD_TOO_LARGE,
        message: e.to_string(),
    })?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| HttpError::bad_request(format!("malformed JSON body: {e}")))?;

    if let Some(errors) = guard
        .validator
        .validate_json(&guard.schema, &payload, locale.as_deref())
        .await?
    {
        tracing::debug!(
            path = %parts.uri.path(),
            failures = errors.error_count(),
            "request body failed validation"
        );
        return Err(HttpError::Invalid(errors));
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
