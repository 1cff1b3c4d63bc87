//! # Report Module
//!
//! Aggregate statistics over trips. Pure functions: the database layer
//! fetches rows, this module does the arithmetic.
//!
//! ## Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OverallReport   every stored trip                                      │
//! │                  count, total, mean, light/medium/heavy counts,         │
//! │                  highest and lowest fare trip                           │
//! │                                                                         │
//! │  DriverReport    fares of one driver                                    │
//! │                  count, total, mean                                     │
//! │                                                                         │
//! │  DriverEarnings  one row per driver (count, total)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty input yields `None`: "no data" for the overall report,
//! "not found" for a driver.
//!
//! Totals are integer sums that saturate at the i64 limit. Means are rounded
//! half up to the paisa.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{TrafficLevel, Trip};

// =============================================================================
// Overall Report
// =============================================================================

/// Trip counts per known traffic level. Unknown labels are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrafficBreakdown {
    pub light: usize,
    pub medium: usize,
    pub heavy: usize,
}

impl TrafficBreakdown {
    fn record(&mut self, level: TrafficLevel) {
        match level {
            TrafficLevel::Light => self.light += 1,
            TrafficLevel::Medium => self.medium += 1,
            TrafficLevel::Heavy => self.heavy += 1,
        }
    }

    pub fn count(&self, level: TrafficLevel) -> usize {
        match level {
            TrafficLevel::Light => self.light,
            TrafficLevel::Medium => self.medium,
            TrafficLevel::Heavy => self.heavy,
        }
    }
}

impl fmt::Display for TrafficBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = TrafficLevel::ALL
            .iter()
            .map(|level| format!("{}={}", level, self.count(*level)))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// The trip behind a highest/lowest fare line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TripHighlight {
    pub trip_id: i64,
    pub driver: String,
    pub fare_cents: i64,
}

impl TripHighlight {
    fn of(trip: &Trip) -> Self {
        TripHighlight {
            trip_id: trip.id,
            driver: trip.driver.clone(),
            fare_cents: trip.fare_cents,
        }
    }

    #[inline]
    pub fn fare(&self) -> Money {
        Money::from_cents(self.fare_cents)
    }
}

/// Summary over every stored trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OverallReport {
    pub trip_count: usize,
    pub total_fare_cents: i64,
    pub average_fare_cents: i64,
    pub traffic: TrafficBreakdown,
    pub highest: TripHighlight,
    pub lowest: TripHighlight,
}

impl OverallReport {
    pub fn total_fare(&self) -> Money {
        Money::from_cents(self.total_fare_cents)
    }

    pub fn average_fare(&self) -> Money {
        Money::from_cents(self.average_fare_cents)
    }
}

impl fmt::Display for OverallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Daily Report -----")?;
        writeln!(f, "Total Trips: {}", self.trip_count)?;
        writeln!(f, "Total Earnings: {}", self.total_fare())?;
        writeln!(f, "Average Fare: {}", self.average_fare())?;
        writeln!(f, "Traffic Summary: {}", self.traffic)?;
        writeln!(
            f,
            "Highest Fare Trip: {} ({})",
            self.highest.fare(),
            self.highest.driver
        )?;
        write!(
            f,
            "Lowest Fare Trip: {} ({})",
            self.lowest.fare(),
            self.lowest.driver
        )
    }
}

/// Builds the overall report, or `None` when there are no trips.
///
/// Ties for highest or lowest fare go to the trip that comes first in
/// `trips` (storage order).
pub fn overall_report(trips: &[Trip]) -> Option<OverallReport> {
    let (first, rest) = trips.split_first()?;

    let mut highest = first;
    let mut lowest = first;
    for trip in rest {
        if trip.fare_cents > highest.fare_cents {
            highest = trip;
        }
        if trip.fare_cents < lowest.fare_cents {
            lowest = trip;
        }
    }

    let mut traffic = TrafficBreakdown::default();
    for level in trips.iter().filter_map(Trip::traffic_level) {
        traffic.record(level);
    }

    let total: Money = trips.iter().map(Trip::fare).sum();
    let average = total.average_over(trips.len())?;

    Some(OverallReport {
        trip_count: trips.len(),
        total_fare_cents: total.cents(),
        average_fare_cents: average.cents(),
        traffic,
        highest: TripHighlight::of(highest),
        lowest: TripHighlight::of(lowest),
    })
}

// =============================================================================
// Driver Report
// =============================================================================

/// Summary of one driver's fares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DriverReport {
    pub driver: String,
    pub trip_count: usize,
    pub total_fare_cents: i64,
    pub average_fare_cents: i64,
}

impl DriverReport {
    pub fn total_fare(&self) -> Money {
        Money::from_cents(self.total_fare_cents)
    }

    pub fn average_fare(&self) -> Money {
        Money::from_cents(self.average_fare_cents)
    }
}

impl fmt::Display for DriverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Driver Report: {} -----", self.driver)?;
        writeln!(f, "Total Trips: {}", self.trip_count)?;
        writeln!(f, "Total Earnings: {}", self.total_fare())?;
        write!(f, "Average Fare: {}", self.average_fare())
    }
}

/// Builds a driver report from that driver's fares, or `None` when the
/// driver has no trips.
pub fn driver_report(driver: &str, fares: &[Money]) -> Option<DriverReport> {
    let total: Money = fares.iter().sum();
    let average = total.average_over(fares.len())?;

    Some(DriverReport {
        driver: driver.to_string(),
        trip_count: fares.len(),
        total_fare_cents: total.cents(),
        average_fare_cents: average.cents(),
    })
}

// =============================================================================
// Driver Earnings
// =============================================================================

/// One row of the per-driver earnings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DriverEarnings {
    pub driver: String,
    pub trip_count: usize,
    pub total_fare_cents: i64,
}

impl DriverEarnings {
    pub fn total_fare(&self) -> Money {
        Money::from_cents(self.total_fare_cents)
    }
}

impl fmt::Display for DriverEarnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} trips, {}",
            self.driver,
            self.trip_count,
            self.total_fare()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn trip(id: i64, driver: &str, traffic: &str, fare_cents: i64) -> Trip {
        Trip {
            id,
            driver: driver.to_string(),
            distance_km: 1.0,
            duration_min: 1.0,
            traffic: traffic.to_string(),
            day: "Monday".to_string(),
            start_hour: 10,
            fare_cents,
            promo_code: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_overall_report_empty_is_none() {
        assert_eq!(overall_report(&[]), None);
    }

    #[test]
    fn test_overall_report() {
        let trips = vec![
            trip(1, "Asha", "light", 20000),
            trip(2, "Ravi", "heavy", 34500),
            trip(3, "Asha", "heavy", 10001),
            trip(4, "Meera", "traffic jam", 15000),
        ];

        let report = overall_report(&trips).unwrap();
        assert_eq!(report.trip_count, 4);
        assert_eq!(report.total_fare_cents, 79501);
        // 79501 / 4 = 19875.25
        assert_eq!(report.average_fare_cents, 19875);
        assert_eq!(
            report.traffic,
            TrafficBreakdown {
                light: 1,
                medium: 0,
                heavy: 2
            }
        );
        assert_eq!(report.highest.trip_id, 2);
        assert_eq!(report.lowest.trip_id, 3);
    }

    #[test]
    fn test_ties_go_to_first_trip() {
        let trips = vec![
            trip(1, "Asha", "light", 5000),
            trip(2, "Ravi", "light", 5000),
            trip(3, "Meera", "light", 5000),
        ];

        let report = overall_report(&trips).unwrap();
        assert_eq!(report.highest.driver, "Asha");
        assert_eq!(report.lowest.driver, "Asha");
    }

    #[test]
    fn test_overall_report_display() {
        let trips = vec![trip(1, "Asha", "heavy", 34500), trip(2, "Ravi", "light", 20000)];
        let text = overall_report(&trips).unwrap().to_string();

        assert!(text.starts_with("----- Daily Report -----\n"));
        assert!(text.contains("Total Trips: 2"));
        assert!(text.contains("Total Earnings: ₹545.00"));
        assert!(text.contains("Average Fare: ₹272.50"));
        assert!(text.contains("Traffic Summary: light=1, medium=0, heavy=1"));
        assert!(text.contains("Highest Fare Trip: ₹345.00 (Asha)"));
        assert!(text.ends_with("Lowest Fare Trip: ₹200.00 (Ravi)"));
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let trips = vec![
            trip(1, "Asha", "heavy", i64::MAX),
            trip(2, "Asha", "heavy", i64::MAX),
        ];
        let report = overall_report(&trips).unwrap();
        assert_eq!(report.total_fare_cents, i64::MAX);
        assert_eq!(report.highest.trip_id, 1);

        let fares = [Money::from_cents(i64::MAX), Money::from_cents(1)];
        let report = driver_report("Asha", &fares).unwrap();
        assert_eq!(report.total_fare_cents, i64::MAX);
    }

    #[test]
    fn test_driver_report() {
        assert_eq!(driver_report("Nobody", &[]), None);

        let fares = [Money::from_cents(34500), Money::from_cents(20001)];
        let report = driver_report("Asha", &fares).unwrap();
        assert_eq!(report.trip_count, 2);
        assert_eq!(report.total_fare_cents, 54501);
        assert_eq!(report.average_fare_cents, 27251);

        let text = report.to_string();
        assert!(text.starts_with("----- Driver Report: Asha -----"));
        assert!(text.contains("Total Earnings: ₹545.01"));
        assert!(text.ends_with("Average Fare: ₹272.51"));
    }
}
