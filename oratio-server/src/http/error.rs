//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use oratio_core::{StoreError, ValidationError};

pub type ApiResult<T> = Result<T, ApiError>;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// A record already exists for the date (400)
    Duplicate { date: String },

    /// No record for the date (404)
    NotFound { date: String },

    /// Store not connected yet (503)
    Unavailable,

    /// Store error (500, logged)
    Store(StoreError),
}

impl ApiError {
    pub fn not_found(date: impl Into<String>) -> Self {
        Self::NotFound { date: date.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::Duplicate { date } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "duplicate_date",
                    "message": format!("a prayer subject already exists for {}", date)
                }),
            ),
            Self::NotFound { date } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("no prayer subject found for '{}'", date)
                }),
            ),
            Self::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "store_unavailable",
                    "message": "store connection not ready"
                }),
            ),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate { date } => Self::Duplicate {
                date: date.to_string(),
            },
            StoreError::NotFound { date } => Self::NotFound {
                date: date.to_string(),
            },
            StoreError::Unavailable => Self::Unavailable,
            _ => Self::Store(e),
        }
    }
}
