//! Error types for fyyur-web
//!
//! Handler failures become JSON error payloads:
//! `{"error": {"code": "...", "message": "..."}}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error escaping a handler
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// fyyur-common error
    #[error("Common error: {0}")]
    Common(#[from] fyyur_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::Common(fyyur_common::Error::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::BadRequest(_) | ApiError::Common(fyyur_common::Error::InvalidInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, message) = match &self {
            ApiError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg.clone()),
            ApiError::Common(fyyur_common::Error::NotFound(msg)) => ("NOT_FOUND", msg.clone()),
            ApiError::Common(fyyur_common::Error::InvalidInput(msg)) => ("BAD_REQUEST", msg.clone()),
            _ => {
                // Details stay in the server log; the client gets a generic message
                error!("Request failed: {}", self);
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
