//! # validata-http
//!
//! Request validation for `axum`. Two entry points:
//!
//! - [`Valid<T>`]: an extractor for types that are both `Deserialize` and
//!   [`Validatable`](validata::foundation::Validatable). The validator comes
//!   from router state via `FromRef`.
//! - [`validate_body`]: a `from_fn_with_state` middleware that binds the JSON
//!   body through a [`RecordSchema`](validata::schema::RecordSchema) held in a
//!   [`SchemaGuard`] and forwards the untouched body when it passes.
//!
//! Both answer a failing payload with `422 Unprocessable Entity` and
//! `{"status": false, "errors": {...}}`. The message locale is taken from
//! the first `Accept-Language` tag.
//!
//! ```no_run
//! use axum::{Router, middleware, routing::post};
//! use validata::prelude::*;
//! use validata_http::{SchemaGuard, validate_body};
//!
//! # fn app(schema: RecordSchema) -> validata::foundation::Result<Router> {
//! let guard = SchemaGuard::new(Validator::new()?, schema);
//! let app = Router::new()
//!     .route("/orders", post(|| async { "accepted" }))
//!     .layer(middleware::from_fn_with_state(guard, validate_body));
//! # Ok(app)
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod extract;
mod locale;
mod middleware;

pub use error::HttpError;
pub use extract::Valid;
pub use locale::request_locale;
pub use middleware::{DEFAULT_BODY_LIMIT, SchemaGuard, validate_body};
