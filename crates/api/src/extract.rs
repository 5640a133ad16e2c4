//! Input extractors whose rejections are failure envelopes.
//!
//! Axum's stock `Json`, `Query` and `Path` extractors reject with plain-text
//! 4xx responses. These wrappers convert every parse or validation failure
//! into [`CoreError::Validation`], which renders as an HTTP 200 envelope with
//! `code = -1`, so only authentication failures leave the 200 range.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use coursehub_core::error::CoreError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// JSON body deserialized into `T` and checked with [`Validate`].
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| validation(rejection.body_text()))?;
        value.validate().map_err(|e| validation(validation_message(&e)))?;
        Ok(ValidatedJson(value))
    }
}

/// Query string deserialized into `T` and checked with [`Validate`].
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| validation(rejection.body_text()))?;
        value.validate().map_err(|e| validation(validation_message(&e)))?;
        Ok(ValidatedQuery(value))
    }
}

/// Path parameters; a non-numeric id becomes a failure envelope.
#[derive(Debug)]
pub struct EnvelopePath<T>(pub T);

impl<T, S> FromRequestParts<S> for EnvelopePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| validation(rejection.body_text()))?;
        Ok(EnvelopePath(value))
    }
}

/// Optional JSON body: an empty body yields `None`.
///
/// Unlike [`ValidatedJson`] no `Content-Type` header is required, since
/// callers of endpoints with an optional body often send none.
#[derive(Debug)]
pub struct OptionalJson<T>(pub Option<T>);

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| validation(rejection.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(None));
        }
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| validation(format!("Invalid JSON body: {e}")))?;
        Ok(OptionalJson(Some(value)))
    }
}

fn validation(message: String) -> AppError {
    AppError::Core(CoreError::Validation(message))
}

/// Flatten validator output into one message, fields in alphabetical order.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
