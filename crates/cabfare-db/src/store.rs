//! # Trip Store
//!
//! Books trips: validate, price, timestamp, persist.
//!
//! ## create_trip Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewTrip                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  validate_new_trip ──✗──► DbError::InvalidInput (nothing written)       │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  normalize traffic / day / promo                                        │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  FareCalculator::calculate_fare                                         │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  TripRepository::insert (one INSERT) ──► Trip with row id               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cabfare_core::types::{normalize_day, normalize_promo_code, normalize_traffic};
use cabfare_core::validation::{validate_fare_request, validate_new_trip};
use cabfare_core::{FareBreakdown, FareCalculator, FareRequest, Money, NewTrip, Trip};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::repository::trip::TripRepository;

/// Validates, prices and persists trips.
///
/// Cheap to clone; the calculator is shared.
#[derive(Debug, Clone)]
pub struct TripStore {
    trips: TripRepository,
    calculator: Arc<FareCalculator>,
}

impl TripStore {
    pub fn new(trips: TripRepository, calculator: FareCalculator) -> Self {
        TripStore {
            trips,
            calculator: Arc::new(calculator),
        }
    }

    /// The calculator this store prices trips with.
    pub fn calculator(&self) -> &FareCalculator {
        &self.calculator
    }

    /// Prices, stores and returns a trip.
    ///
    /// ## Errors
    /// * `DbError::InvalidInput` - empty driver, negative or non-finite
    ///   distance/duration, hour outside 0-23. Nothing is written.
    /// * Any storage error from the INSERT.
    pub async fn create_trip(&self, new_trip: NewTrip) -> DbResult<Trip> {
        validate_new_trip(&new_trip)?;

        let NewTrip {
            driver,
            fare: request,
            created_at,
        } = new_trip;

        let traffic = normalize_traffic(&request.traffic);
        let day = normalize_day(&request.day);
        let promo_code = normalize_promo_code(request.promo_code.as_deref());

        let fare = self.calculator.calculate_fare(
            request.distance_km,
            request.duration_min,
            &traffic,
            &day,
            request.start_hour,
            promo_code.as_deref(),
        );

        debug!(driver = %driver.trim(), %fare, "Fare calculated");

        let trip = Trip {
            id: 0,
            driver: driver.trim().to_string(),
            distance_km: request.distance_km,
            duration_min: request.duration_min,
            traffic,
            day,
            start_hour: request.start_hour,
            fare_cents: fare.cents(),
            promo_code,
            created_at: created_at.unwrap_or_else(Utc::now),
        };

        let stored = self.trips.insert(&trip).await?;
        info!(id = stored.id, driver = %stored.driver, fare = %stored.fare(), "Trip recorded");

        Ok(stored)
    }

    /// Quotes a fare without storing anything.
    pub fn estimate(&self, request: &FareRequest) -> DbResult<FareBreakdown> {
        validate_fare_request(request)?;

        Ok(self.calculator.breakdown(request))
    }

    /// Every stored trip, in insertion order.
    pub async fn list_trips(&self) -> DbResult<Vec<Trip>> {
        self.trips.list().await
    }

    /// Fares of one driver, in insertion order. Unknown driver → empty.
    pub async fn list_trips_by_driver(&self, driver: &str) -> DbResult<Vec<Money>> {
        self.trips.fares_for_driver(driver).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
