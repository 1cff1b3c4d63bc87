//! # Report Generator
//!
//! Read-only reports over stored trips. Fetches rows through
//! [`TripRepository`] and hands the arithmetic to `cabfare_core::report`.
//!
//! Every call is a snapshot of the table at that moment.

use cabfare_core::report::{driver_report, overall_report};
use cabfare_core::{DriverEarnings, DriverReport, OverallReport};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::trip::TripRepository;

/// Aggregate statistics over the trips table.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    trips: TripRepository,
}

impl ReportGenerator {
    pub fn new(trips: TripRepository) -> Self {
        ReportGenerator { trips }
    }

    /// Summary over every trip. `None` means no trips are stored yet.
    pub async fn overall_report(&self) -> DbResult<Option<OverallReport>> {
        let trips = self.trips.list().await?;
        debug!(trips = trips.len(), "Building overall report");
        Ok(overall_report(&trips))
    }

    /// Summary of one driver. `None` means the driver has no trips.
    pub async fn driver_report(&self, driver: &str) -> DbResult<Option<DriverReport>> {
        let driver = driver.trim();
        let fares = self.trips.fares_for_driver(driver).await?;
        debug!(driver, trips = fares.len(), "Building driver report");
        Ok(driver_report(driver, &fares))
    }

    /// Trip count and total per driver, ordered by driver name.
    pub async fn driver_earnings(&self) -> DbResult<Vec<DriverEarnings>> {
        self.trips.driver_earnings().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::store::TripStore;
    use cabfare_core::{FareCalculator, FareRequest, Money, NewTrip};

    async fn setup() -> (TripStore, ReportGenerator) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (
            TripStore::new(db.trips(), FareCalculator::default()),
            ReportGenerator::new(db.trips()),
        )
    }

    #[tokio::test]
    async fn test_empty_table_has_no_data() {
        let (_, reports) = setup().await;

        assert_eq!(reports.overall_report().await.unwrap(), None);
        assert_eq!(reports.driver_report("Asha").await.unwrap(), None);
        assert!(reports.driver_earnings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reports_after_bookings() {
        let (store, reports) = setup().await;

        // 345.00, 200.00, 180.00
        let bookings = [
            ("Asha", FareRequest::new(10.0, 15.0, "heavy", "Sunday", 19)),
            ("Ravi", FareRequest::new(10.0, 15.0, "light", "Monday", 10)),
            ("Asha", FareRequest::new(10.0, 15.0, "light", "Monday", 10).with_promo("DISC10")),
        ];
        for (driver, request) in bookings {
            store.create_trip(NewTrip::new(driver, request)).await.unwrap();
        }

        let overall = reports.overall_report().await.unwrap().unwrap();
        assert_eq!(overall.trip_count, 3);
        assert_eq!(overall.total_fare(), Money::from_cents(72500));
        assert_eq!(overall.average_fare(), Money::from_cents(24167));
        assert_eq!(overall.traffic.light, 2);
        assert_eq!(overall.traffic.heavy, 1);
        assert_eq!(overall.highest.driver, "Asha");
        assert_eq!(overall.lowest.fare(), Money::from_cents(18000));

        let asha = reports.driver_report(" Asha ").await.unwrap().unwrap();
        assert_eq!(asha.trip_count, 2);
        assert_eq!(asha.total_fare(), Money::from_cents(52500));
        assert_eq!(asha.average_fare(), Money::from_cents(26250));

        assert_eq!(reports.driver_report("Meera").await.unwrap(), None);

        let earnings = reports.driver_earnings().await.unwrap();
        let names: Vec<&str> = earnings.iter().map(|e| e.driver.as_str()).collect();
        assert_eq!(names, ["Asha", "Ravi"]);
        assert_eq!(earnings[0].total_fare(), asha.total_fare());
    }
}
