//! Not-found fallback, panic handling and the request extractors

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts, Uri},
    response::{IntoResponse, Response},
    Form,
};
use std::any::Any;

use crate::error::ApiError;
use crate::forms::RawForm;

/// Integer record id taken from the `:id` path segment
///
/// A segment that is not an integer means no such page, so it is rejected
/// as 404 rather than 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let not_found = || ApiError::NotFound(format!("No page at {}", path));

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;

        raw.parse::<i64>().map(EntityId).map_err(|_| not_found())
    }
}

/// Urlencoded form fields from the request body
///
/// A body sent without a `Content-Type` must be empty and reads as a form
/// with no fields. Any other unreadable body is a 400 with the JSON error
/// payload.
#[derive(Debug, Clone, Default)]
pub struct FormFields(pub RawForm);

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !req.headers().contains_key(header::CONTENT_TYPE) {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            if body.is_empty() {
                return Ok(Self::default());
            }
            return Err(ApiError::BadRequest(
                "Form requests must have Content-Type: application/x-www-form-urlencoded"
                    .to_string(),
            ));
        }

        let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(RawForm::from_pairs(fields)))
    }
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No page at {}", uri.path()))
}

/// Response for a handler that panicked
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    ApiError::Internal(format!("Handler panicked: {}", detail)).into_response()
}
