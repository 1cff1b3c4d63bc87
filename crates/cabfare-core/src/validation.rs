//! # Validation Module
//!
//! Input validation for trips, run before any fare is computed or any row
//! is written.
//!
//! ## What Is (and Isn't) Validated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  REJECTED (ValidationError)          ACCEPTED (priced as neutral)       │
//! │  ───────────────────────────         ─────────────────────────────      │
//! │  • empty driver name                 • unknown traffic label            │
//! │  • NaN / infinite distance, time     • unknown day name                 │
//! │  • negative distance, time           • unknown promo code               │
//! │  • start hour outside 0-23                                              │
//! │  • over-long driver / promo text                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cabfare_core::validation::{validate_distance_km, validate_start_hour};
//!
//! assert!(validate_distance_km(12.5).is_ok());
//! assert!(validate_distance_km(-1.0).is_err());
//! assert_eq!(validate_start_hour(19), Ok(19));
//! assert!(validate_start_hour(24).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{FareRequest, NewTrip};
use crate::{
    MAX_DISTANCE_KM, MAX_DRIVER_NAME_LEN, MAX_DURATION_MIN, MAX_PROMO_CODE_LEN, MAX_START_HOUR,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a driver name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most MAX_DRIVER_NAME_LEN characters
pub fn validate_driver_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "driver".to_string(),
        });
    }

    if name.chars().count() > MAX_DRIVER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "driver".to_string(),
            max: MAX_DRIVER_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an optional promo code. Blank means "no promo" and passes.
pub fn validate_promo_code(code: Option<&str>) -> ValidationResult<()> {
    match code.map(str::trim) {
        Some(code) if code.chars().count() > MAX_PROMO_CODE_LEN => Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: MAX_PROMO_CODE_LEN,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn validate_bounded(field: &str, value: f64, max: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    if value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: max as i64,
        });
    }

    Ok(())
}

/// Validates a trip distance in kilometers (finite, 0 to MAX_DISTANCE_KM).
pub fn validate_distance_km(distance: f64) -> ValidationResult<()> {
    validate_bounded("distance", distance, MAX_DISTANCE_KM)
}

/// Validates a trip duration in minutes (finite, 0 to MAX_DURATION_MIN).
pub fn validate_duration_min(duration: f64) -> ValidationResult<()> {
    validate_bounded("duration", duration, MAX_DURATION_MIN)
}

/// Validates a start hour and narrows it to `u8`.
///
/// Takes an `i64` so callers parsing free text can pass whatever they got.
pub fn validate_start_hour(hour: i64) -> ValidationResult<u8> {
    match u8::try_from(hour) {
        Ok(hour) if hour <= MAX_START_HOUR => Ok(hour),
        _ => Err(ValidationError::OutOfRange {
            field: "start hour".to_string(),
            min: 0,
            max: MAX_START_HOUR as i64,
        }),
    }
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the ride parameters of a fare quote.
pub fn validate_fare_request(request: &FareRequest) -> ValidationResult<()> {
    validate_distance_km(request.distance_km)?;
    validate_duration_min(request.duration_min)?;
    validate_start_hour(request.start_hour as i64)?;
    validate_promo_code(request.promo_code.as_deref())?;
    Ok(())
}

/// Validates everything about a trip before it is priced and stored.
pub fn validate_new_trip(trip: &NewTrip) -> ValidationResult<()> {
    validate_driver_name(&trip.driver)?;
    validate_fare_request(&trip.fare)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_driver_name() {
        assert!(validate_driver_name("Asha").is_ok());
        assert_eq!(
            validate_driver_name("   "),
            Err(ValidationError::Required {
                field: "driver".to_string()
            })
        );
        assert!(validate_driver_name(&"x".repeat(MAX_DRIVER_NAME_LEN)).is_ok());
        assert!(validate_driver_name(&"x".repeat(MAX_DRIVER_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_distance_and_duration() {
        assert!(validate_distance_km(0.0).is_ok());
        assert!(validate_distance_km(12.5).is_ok());
        assert!(matches!(
            validate_distance_km(-0.1),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            validate_duration_min(f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(validate_duration_min(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_distance_and_duration_upper_bounds() {
        assert!(validate_distance_km(MAX_DISTANCE_KM).is_ok());
        assert!(validate_duration_min(MAX_DURATION_MIN).is_ok());

        assert_eq!(
            validate_distance_km(1e17),
            Err(ValidationError::OutOfRange {
                field: "distance".to_string(),
                min: 0,
                max: 10_000,
            })
        );
        assert!(matches!(
            validate_duration_min(MAX_DURATION_MIN + 0.5),
            Err(ValidationError::OutOfRange { .. })
        ));

        let huge = FareRequest::new(1e17, 1e17, "heavy", "Sunday", 19);
        assert!(validate_fare_request(&huge).is_err());
    }

    #[test]
    fn test_validate_start_hour() {
        assert_eq!(validate_start_hour(0), Ok(0));
        assert_eq!(validate_start_hour(23), Ok(23));
        assert!(validate_start_hour(24).is_err());
        assert!(validate_start_hour(-1).is_err());
        assert!(validate_start_hour(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_promo_code() {
        assert!(validate_promo_code(None).is_ok());
        assert!(validate_promo_code(Some("")).is_ok());
        assert!(validate_promo_code(Some("DISC10")).is_ok());
        assert!(validate_promo_code(Some(&"P".repeat(MAX_PROMO_CODE_LEN + 1))).is_err());
    }

    #[test]
    fn test_validate_new_trip() {
        let ok = NewTrip::new("Asha", FareRequest::new(10.0, 15.0, "heavy", "Sunday", 19));
        assert!(validate_new_trip(&ok).is_ok());

        let no_driver = NewTrip::new("", FareRequest::new(10.0, 15.0, "heavy", "Sunday", 19));
        assert!(validate_new_trip(&no_driver).is_err());

        let late = NewTrip::new("Asha", FareRequest::new(10.0, 15.0, "heavy", "Sunday", 24));
        assert!(validate_new_trip(&late).is_err());

        // Unknown categories are fine
        let odd = NewTrip::new("Asha", FareRequest::new(1.0, 1.0, "gridlock", "Caturday", 3));
        assert!(validate_new_trip(&odd).is_ok());
    }
}
