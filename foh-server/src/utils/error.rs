//! Unified error handling
//!
//! Application-level error type and the JSON error envelope shared by all
//! handlers:
//!
//! ```json
//! { "code": "E0002", "message": "..." }
//! { "code": "E0002", "message": "Validation failed", "errors": ["...", "..."] }
//! ```
//!
//! Validation failures keep their per-check messages in check order, so a
//! rejected request reports every violated rule in a single round trip.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// JSON error envelope returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error code (E0002 validation, E0003 not found, ...)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Per-rule messages when a validation failure aggregates several checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Referenced entity does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// State conflict, e.g. seating an already occupied table (409)
    #[error("Resource conflict: {0}")]
    Conflict(String),

    /// One or more validation-rule violations, in check order (400)
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Lifecycle or other business rule violated (400)
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Structurally invalid request, e.g. missing data object (400)
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// Database failure; details are logged, not exposed (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else unexpected (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Single-rule validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(vec![msg.into()])
    }

    /// Aggregated validation failure; messages keep their check order.
    pub fn validation_list(messages: Vec<String>) -> Self {
        Self::Validation(messages)
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg, None),

            AppError::Validation(mut messages) => match messages.len() {
                1 => (StatusCode::BAD_REQUEST, "E0002", messages.remove(0), None),
                _ => (
                    StatusCode::BAD_REQUEST,
                    "E0002",
                    "Validation failed".to_string(),
                    Some(messages),
                ),
            },

            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, "E0005", msg, None),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg, None),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                    None,
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type AppResult<T> = Result<T, AppError>;
