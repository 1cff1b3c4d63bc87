//! # Error Types
//!
//! Domain-specific error types for cabfare-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cabfare-core errors (this file)                                       │
//! │  ├── CoreError        - Rate schedule and domain errors                │
//! │  └── ValidationError  - Trip input validation failures                 │
//! │                                                                         │
//! │  cabfare-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  estimator app errors                                                  │
//! │  └── ApiError         - What the browser sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → ApiError → HTTP response            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown traffic levels, days and promo codes are NOT errors: the fare
//! calculator treats them as neutral. Only malformed numbers and missing
//! fields end up here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The rate schedule contains a value the calculator cannot use.
    ///
    /// ## When This Occurs
    /// - A multiplier of zero in `estimator.toml`
    /// - A peak hour above 23
    /// - A percentage discount above 100%
    #[error("Invalid rate schedule: {reason}")]
    InvalidRateSchedule { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidRateSchedule error.
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        CoreError::InvalidRateSchedule {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when trip input doesn't meet requirements.
/// They are raised before any fare is computed or any row is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_schedule("peak hour 24 is out of range");
        assert_eq!(
            err.to_string(),
            "Invalid rate schedule: peak hour 24 is out of range"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "driver".to_string(),
        };
        assert_eq!(err.to_string(), "driver is required");

        let err = ValidationError::OutOfRange {
            field: "start hour".to_string(),
            min: 0,
            max: 23,
        };
        assert_eq!(err.to_string(), "start hour must be between 0 and 23");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBeNonNegative {
            field: "distance".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
