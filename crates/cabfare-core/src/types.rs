//! # Domain Types
//!
//! Core domain types used throughout the estimator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  FareRequest    │   │    NewTrip      │   │      Trip       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  distance_km    │──►│  driver         │──►│  id (rowid)     │       │
//! │  │  duration_min   │   │  fare request   │   │  fare_cents     │       │
//! │  │  traffic, day   │   │  created_at?    │   │  created_at     │       │
//! │  │  start_hour     │   └─────────────────┘   └─────────────────┘       │
//! │  │  promo_code?    │                                                    │
//! │  └─────────────────┘   NewTrip is what a caller books; Trip is what    │
//! │                        the store hands back after it is persisted.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Normalization
//! Traffic levels are stored lower case ("heavy"), days capitalized
//! ("Sunday") and promo codes upper case ("DISC10"). Values outside the
//! known sets are kept as typed (normalized) and priced as neutral.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Traffic Level
// =============================================================================

/// The traffic conditions a trip was driven in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLevel {
    Light,
    Medium,
    Heavy,
}

impl TrafficLevel {
    /// Every level, in report order.
    pub const ALL: [TrafficLevel; 3] = [TrafficLevel::Light, TrafficLevel::Medium, TrafficLevel::Heavy];

    /// The canonical (lower case) label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TrafficLevel::Light => "light",
            TrafficLevel::Medium => "medium",
            TrafficLevel::Heavy => "heavy",
        }
    }

    /// Matches a label case-insensitively. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize_traffic(label);
        TrafficLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Normalization Helpers
// =============================================================================

/// Lower-cases and trims a traffic label: `" HEAVY "` → `"heavy"`.
pub fn normalize_traffic(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Capitalizes a day name: `"sUNDAY"` → `"Sunday"`.
pub fn normalize_day(day: &str) -> String {
    let mut chars = day.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Returns true when `day` is the full name "Saturday" or "Sunday" in any
/// case. Abbreviations are ordinary (non-weekend) days.
///
/// ```rust
/// use cabfare_core::types::is_weekend;
///
/// assert!(is_weekend("SATURDAY"));
/// assert!(is_weekend("sunday"));
/// assert!(!is_weekend("Sun"));
/// assert!(!is_weekend("Friday"));
/// assert!(!is_weekend("someday"));
/// ```
pub fn is_weekend(day: &str) -> bool {
    matches!(normalize_day(day).as_str(), "Saturday" | "Sunday")
}

/// Trims and upper-cases a promo code; blank input means "no promo".
pub fn normalize_promo_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
}

// =============================================================================
// Fare Request
// =============================================================================

/// Everything the fare calculator needs to price a ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FareRequest {
    /// Distance in kilometers.
    pub distance_km: f64,

    /// Duration in minutes.
    pub duration_min: f64,

    /// Traffic label ("light", "medium", "heavy"; anything else is neutral).
    pub traffic: String,

    /// Day of the week the trip started.
    pub day: String,

    /// Hour the trip started (0-23).
    pub start_hour: u8,

    /// Optional promo code.
    #[serde(default)]
    pub promo_code: Option<String>,
}

impl FareRequest {
    /// Creates a request without a promo code.
    pub fn new(
        distance_km: f64,
        duration_min: f64,
        traffic: impl Into<String>,
        day: impl Into<String>,
        start_hour: u8,
    ) -> Self {
        FareRequest {
            distance_km,
            duration_min,
            traffic: traffic.into(),
            day: day.into(),
            start_hour,
            promo_code: None,
        }
    }

    /// Sets the promo code.
    pub fn with_promo(mut self, code: impl Into<String>) -> Self {
        self.promo_code = Some(code.into());
        self
    }
}

// =============================================================================
// New Trip
// =============================================================================

/// A trip as booked by a caller, before it has a fare or a row id.
///
/// On the wire the fare request fields sit next to `driver`:
/// ```json
/// { "driver": "Asha", "distance_km": 10, "duration_min": 15,
///   "traffic": "heavy", "day": "Sunday", "start_hour": 19 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    /// Driver identifier.
    pub driver: String,

    /// Ride parameters used for pricing.
    #[serde(flatten)]
    pub fare: FareRequest,

    /// Creation time; the store uses the current time when absent.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTrip {
    /// Creates a new trip for `driver`.
    pub fn new(driver: impl Into<String>, fare: FareRequest) -> Self {
        NewTrip {
            driver: driver.into(),
            fare,
            created_at: None,
        }
    }

    /// Pins the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

// =============================================================================
// Trip
// =============================================================================

/// A completed, persisted ride. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Trip {
    /// Storage row id (insertion order).
    pub id: i64,

    pub driver: String,

    /// Distance in kilometers.
    pub distance_km: f64,

    /// Duration in minutes.
    pub duration_min: f64,

    /// Normalized (lower case) traffic label.
    pub traffic: String,

    /// Normalized (capitalized) day name.
    pub day: String,

    pub start_hour: u8,

    /// Final fare in minor units.
    pub fare_cents: i64,

    /// Normalized (upper case) promo code, if one was entered.
    pub promo_code: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Returns the fare as Money.
    #[inline]
    pub fn fare(&self) -> Money {
        Money::from_cents(self.fare_cents)
    }

    /// Returns the traffic level when the stored label is a known one.
    pub fn traffic_level(&self) -> Option<TrafficLevel> {
        TrafficLevel::from_label(&self.traffic)
    }

    /// Rebuilds the fare request this trip was priced from.
    pub fn fare_request(&self) -> FareRequest {
        FareRequest {
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            traffic: self.traffic.clone(),
            day: self.day.clone(),
            start_hour: self.start_hour,
            promo_code: self.promo_code.clone(),
        }
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trip #{}: Driver={}, Distance={} km, Time={} min, Traffic={}, Day={}, Hour={}, Promo={}, Fare={}, Recorded={}",
            self.id,
            self.driver,
            self.distance_km,
            self.duration_min,
            self.traffic,
            self.day,
            self.start_hour,
            self.promo_code.as_deref().unwrap_or("None"),
            self.fare(),
            self.created_at.to_rfc3339(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_traffic_level_from_label() {
        assert_eq!(TrafficLevel::from_label("light"), Some(TrafficLevel::Light));
        assert_eq!(TrafficLevel::from_label(" HEAVY "), Some(TrafficLevel::Heavy));
        assert_eq!(TrafficLevel::from_label("Medium"), Some(TrafficLevel::Medium));
        assert_eq!(TrafficLevel::from_label("gridlock"), None);
    }

    #[test]
    fn test_normalize_day() {
        assert_eq!(normalize_day("sUNDAY"), "Sunday");
        assert_eq!(normalize_day("  monday "), "Monday");
        assert_eq!(normalize_day(""), "");
    }

    #[test]
    fn test_weekend_detection_ignores_case() {
        assert!(is_weekend("Saturday"));
        assert!(is_weekend("SATURDAY"));
        assert!(is_weekend(" sunday "));
        assert!(!is_weekend("Sun"));
        assert!(!is_weekend("sat"));
        assert!(!is_weekend("Monday"));
        assert!(!is_weekend("Funday"));
    }

    #[test]
    fn test_normalize_promo_code() {
        assert_eq!(normalize_promo_code(Some(" disc10 ")), Some("DISC10".to_string()));
        assert_eq!(normalize_promo_code(Some("   ")), None);
        assert_eq!(normalize_promo_code(None), None);
    }

    #[test]
    fn test_new_trip_deserializes_flat_json() {
        let json = r#"{
            "driver": "Asha",
            "distance_km": 10,
            "duration_min": 15.5,
            "traffic": "heavy",
            "day": "Sunday",
            "start_hour": 19
        }"#;

        let trip: NewTrip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.driver, "Asha");
        assert_eq!(trip.fare.distance_km, 10.0);
        assert_eq!(trip.fare.duration_min, 15.5);
        assert_eq!(trip.fare.start_hour, 19);
        assert_eq!(trip.fare.promo_code, None);
        assert_eq!(trip.created_at, None);
    }

    #[test]
    fn test_trip_display() {
        let trip = Trip {
            id: 1,
            driver: "Asha".to_string(),
            distance_km: 10.0,
            duration_min: 15.0,
            traffic: "heavy".to_string(),
            day: "Sunday".to_string(),
            start_hour: 19,
            fare_cents: 34500,
            promo_code: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 4, 19, 0, 0).unwrap(),
        };

        let text = trip.to_string();
        assert!(text.starts_with("Trip #1: Driver=Asha, Distance=10 km, Time=15 min"));
        assert!(text.contains("Promo=None, Fare=₹345.00"));
        assert_eq!(trip.traffic_level(), Some(TrafficLevel::Heavy));
    }
}
