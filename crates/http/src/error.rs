//! Rejections and their responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use validata::foundation::{ValidataError, ValidationResult};

/// Why a request did not reach the handler.
#[derive(Debug, Error)]
pub enum HttpError {
    /// At least one field failed (422).
    #[error("{} field(s) failed validation", .0.error_count())]
    Invalid(ValidationResult),

    /// The body could not be read or parsed (status chosen by the cause).
    #[error("rejected request body: {message}")]
    Rejected {
        /// Response status.
        status: StatusCode,
        /// Client-facing reason.
        message: String,
    },

    /// Misconfigured rules or a failed capability (500).
    #[error(transparent)]
    Fault(#[from] ValidataError),
}

impl HttpError {
    /// Body-level rejection with `400 Bad Request`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Status this error answers with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::Fault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Invalid(errors) => ErrorBody {
                status: false,
                errors: Some(errors),
                message: None,
            },
            Self::Rejected { message, .. } => ErrorBody {
                status: false,
                errors: None,
                message: Some(message.clone()),
            },
            // Fault details stay in the log.
            Self::Fault(err) => {
                tracing::error!(error = %err, "validation fault");
                ErrorBody {
                    status: false,
                    errors: None,
                    message: Some("validation could not be completed".into()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
