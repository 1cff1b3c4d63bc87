//! # Estimator Error Types
//!
//! `AppError` is what `main` reports; `ApiError` is what an HTTP client sees.
//!
//! ## HTTP Error Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler                                                                │
//! │  Result<Json<T>, ApiError>                                              │
//! │         │                                                               │
//! │         ├── DbError::InvalidInput ───────► 400 VALIDATION_ERROR         │
//! │         ├── DbError (anything else) ─────► 500 DATABASE_ERROR           │
//! │         └── CoreError ───────────────────► 400 / 500                    │
//! │                                                                         │
//! │  Body: { "code": "VALIDATION_ERROR", "message": "driver is required" }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cabfare_core::CoreError;
use cabfare_db::DbError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

// =============================================================================
// App Error
// =============================================================================

/// Top-level failures of the estimator binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("{0}")]
    Usage(String),
}

// =============================================================================
// API Error
// =============================================================================

/// Error body returned by the HTTP API.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "distance must not be negative"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
///
/// Storage details are logged, not sent to the client.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::InvalidInput(e) => ApiError::validation(e.to_string()),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::CorruptRecord { id, reason } => {
                tracing::error!(id, "Corrupt trip record: {}", reason);
                ApiError::new(ErrorCode::DatabaseError, "Stored trip data is corrupt")
            }
            other => {
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::InvalidRateSchedule { reason } => {
                tracing::error!("Rate schedule rejected: {}", reason);
                ApiError::internal("Fare rules are misconfigured")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use cabfare_core::ValidationError;

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err: ApiError = DbError::InvalidInput(ValidationError::MustBeNonNegative {
            field: "distance".to_string(),
        })
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "distance must not be negative");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let err: ApiError = DbError::QueryFailed("no such table: trips".to_string()).into();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("trips"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let json = serde_json::to_value(ApiError::validation("driver is required")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "VALIDATION_ERROR", "message": "driver is required"})
        );
    }
}
