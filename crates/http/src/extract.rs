//! `Valid<T>` extractor.

use axum::Json;
use axum::extract::{FromRef, FromRequest, Request};
use serde::de::DeserializeOwned;
use validata::engine::Validator;
use validata::foundation::Validatable;

use crate::error::HttpError;
use crate::locale::request_locale;

/// A JSON body that deserialized and passed its rule chains.
///
/// Rejects with [`HttpError`]: the `Json` rejection for unreadable bodies,
/// `Invalid` (422) for failing fields and `Fault` (500) when validation
/// itself could not run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Valid<T>(pub T);

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + Validatable + Send + Sync,
    S: Send + Sync,
    Validator: FromRef<S>,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let locale = request_locale(req.headers());
        let Json(value) = Json::<T>::from_request(req, state).await?;

        let validator = Validator::from_ref(state);
        match validator.validate(&value, locale.as_deref()).await? {
            Some(errors) => {
                tracing::debug!(failures = errors.error_count(), "request body failed validation");
                Err(HttpError::Invalid(errors))
            }
            None => Ok(Self(value)),
        }
    }
}
