//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::booking::BookingError;
use crate::db::DatabaseError;
use crate::ticket::RenderError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
///
/// All variants are recoverable at the request boundary; none crash the
/// process. 5xx messages are generic — details go to the server log only.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid field: {0}")]
    InvalidField(&'static str),
    #[error("Slot already booked")]
    SlotConflict,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage unavailable: {0}")]
    Storage(String),
    #[error("Rendering failed: {0}")]
    Rendering(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::InvalidRequest(detail) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", detail.clone())
            }
            ApiError::InvalidField(field) => (
                StatusCode::BAD_REQUEST,
                "INVALID_FIELD",
                format!("Invalid {field}."),
            ),
            ApiError::SlotConflict => (
                StatusCode::BAD_REQUEST,
                "SLOT_CONFLICT",
                "This slot is already booked. Please choose another one.".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::Storage(detail) => {
                tracing::error!(detail, "ledger access failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE",
                    "Storage is unavailable. Please try again.".to_string(),
                )
            }
            ApiError::Rendering(detail) => {
                tracing::error!(detail, "ticket rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDERING",
                    "Failed to generate the ticket artifact.".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidRequest(msg) => ApiError::InvalidRequest(msg.to_string()),
            BookingError::InvalidField(field) => ApiError::InvalidField(field),
            BookingError::SlotConflict => ApiError::SlotConflict,
            BookingError::Storage(e) => ApiError::Storage(e.to_string()),
            BookingError::Rendering(e) => ApiError::Rendering(e.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::Rendering(err.to_string())
    }
}
