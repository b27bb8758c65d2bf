//! Unified Error Handling
//!
//! Application-wide error type and its HTTP mapping:
//!
//! | Variant | HTTP status |
//! |---------|-------------|
//! | `Validation` | 400 Bad Request |
//! | `Forbidden` | 403 Forbidden |
//! | `NotFound` | 404 Not Found |
//! | `InsufficientPoints` | 409 Conflict |
//! | `Storage` | 500 Internal Server Error |
//! | `Internal` | 500 Internal Server Error |
//!
//! Validation and not-found errors carry their human-readable message to the
//! client; storage and internal errors are logged and surfaced as a generic
//! failure without internal details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::store::StoreError;
use shared::ApiResponse;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business Logic Errors ==========
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Insufficient points: {0}")]
    InsufficientPoints(String),

    // ========== System Errors ==========
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // Forbidden (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            // Insufficient points (409)
            AppError::InsufficientPoints(msg) => (StatusCode::CONFLICT, msg.clone()),

            // Storage errors (500) - log internally, return generic message
            AppError::Storage(msg) => {
                error!(target: "storage", error = %msg, "Storage error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(message));
        (status, body).into_response()
    }
}
