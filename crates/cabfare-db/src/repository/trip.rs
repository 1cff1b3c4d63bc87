//! # Trip Repository
//!
//! Database operations for the `trips` table.
//!
//! ## Storage Edge Conversions
//! ```text
//! ┌──────────────────────┬───────────────────────┬──────────────────────────┐
//! │ Trip field           │ Column                │ Conversion               │
//! ├──────────────────────┼───────────────────────┼──────────────────────────┤
//! │ fare_cents: i64      │ fare REAL             │ paise ↔ rupees (2 dp)    │
//! │ start_hour: u8       │ start_hour INTEGER    │ checked on read (0-23)   │
//! │ created_at: DateTime │ timestamp TEXT        │ RFC 3339                 │
//! │ traffic: String      │ traffic_level TEXT    │ none                     │
//! │ duration_min: f64    │ duration REAL         │ none                     │
//! └──────────────────────┴───────────────────────┴──────────────────────────┘
//! ```

use cabfare_core::validation::validate_start_hour;
use cabfare_core::{DriverEarnings, Money, Trip};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

// =============================================================================
// Row Types
// =============================================================================

/// A `trips` row exactly as SQLite returns it.
#[derive(Debug, sqlx::FromRow)]
struct TripRow {
    id: i64,
    driver: String,
    distance: f64,
    duration: f64,
    traffic_level: String,
    day: String,
    start_hour: i64,
    fare: f64,
    promo_code: Option<String>,
    timestamp: String,
}

impl TryFrom<TripRow> for Trip {
    type Error = DbError;

    fn try_from(row: TripRow) -> Result<Self, Self::Error> {
        let start_hour = validate_start_hour(row.start_hour)
            .map_err(|e| DbError::corrupt(row.id, e.to_string()))?;

        let created_at = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|e| DbError::corrupt(row.id, format!("bad timestamp '{}': {e}", row.timestamp)))?
            .with_timezone(&Utc);

        Ok(Trip {
            id: row.id,
            driver: row.driver,
            distance_km: row.distance,
            duration_min: row.duration,
            traffic: row.traffic_level,
            day: row.day,
            start_hour,
            fare_cents: Money::from_major(row.fare).cents(),
            promo_code: row.promo_code,
            created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EarningsRow {
    driver: String,
    trip_count: i64,
    total_cents: i64,
}

impl From<EarningsRow> for DriverEarnings {
    fn from(row: EarningsRow) -> Self {
        DriverEarnings {
            driver: row.driver,
            trip_count: row.trip_count.max(0) as usize,
            total_fare_cents: row.total_cents,
        }
    }
}

const SELECT_TRIPS: &str = r#"
    SELECT
        id,
        driver,
        distance,
        duration,
        traffic_level,
        day,
        start_hour,
        fare,
        promo_code,
        timestamp
    FROM trips
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for trip database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.trips();
///
/// let stored = repo.insert(&trip).await?;
/// let all = repo.list().await?;
/// let fares = repo.fares_for_driver("Asha").await?;
/// ```
#[derive(Debug, Clone)]
pub struct TripRepository {
    pool: SqlitePool,
}

impl TripRepository {
    /// Creates a new TripRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TripRepository { pool }
    }

    /// Appends a trip.
    ///
    /// `trip.id` is ignored; the returned Trip carries the row id SQLite
    /// assigned. A single INSERT, so a failure leaves nothing behind.
    pub async fn insert(&self, trip: &Trip) -> DbResult<Trip> {
        debug!(driver = %trip.driver, fare_cents = trip.fare_cents, "Inserting trip");

        let result = sqlx::query(
            r#"
            INSERT INTO trips (
                driver, distance, duration, traffic_level, day,
                start_hour, fare, promo_code, timestamp
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9
            )
            "#,
        )
        .bind(&trip.driver)
        .bind(trip.distance_km)
        .bind(trip.duration_min)
        .bind(&trip.traffic)
        .bind(&trip.day)
        .bind(trip.start_hour as i64)
        .bind(trip.fare().to_major())
        .bind(&trip.promo_code)
        .bind(trip.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Trip inserted");

        Ok(Trip {
            id,
            ..trip.clone()
        })
    }

    /// Lists every trip in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Trip>> {
        let rows: Vec<TripRow> = sqlx::query_as(&format!("{SELECT_TRIPS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed trips");
        rows.into_iter().map(Trip::try_from).collect()
    }

    /// Returns the fares of one driver in insertion order.
    ///
    /// Matching is exact (case-sensitive), like the stored name.
    pub async fn fares_for_driver(&self, driver: &str) -> DbResult<Vec<Money>> {
        let fares: Vec<f64> = sqlx::query_scalar("SELECT fare FROM trips WHERE driver = ?1 ORDER BY id")
            .bind(driver)
            .fetch_all(&self.pool)
            .await?;

        debug!(driver, count = fares.len(), "Fetched driver fares");
        Ok(fares.into_iter().map(Money::from_major).collect())
    }

    /// Per-driver trip count and total, ordered by driver name.
    pub async fn driver_earnings(&self) -> DbResult<Vec<DriverEarnings>> {
        // Round each fare to paise before summing
        let rows: Vec<EarningsRow> = sqlx::query_as(
            r#"
            SELECT
                driver,
                COUNT(*) AS trip_count,
                SUM(CAST(ROUND(fare * 100) AS INTEGER)) AS total_cents
            FROM trips
            GROUP BY driver
            ORDER BY driver
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DriverEarnings::from).collect())
    }

    /// Counts stored trips.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trips")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;

    fn trip(driver: &str, traffic: &str, fare_cents: i64) -> Trip {
        Trip {
            id: 0,
            driver: driver.to_string(),
            distance_km: 10.0,
            duration_min: 15.0,
            traffic: traffic.to_string(),
            day: "Sunday".to_string(),
            start_hour: 19,
            fare_cents,
            promo_code: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 4, 19, 30, 0).unwrap(),
        }
    }

    async fn repo() -> TripRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().trips()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = repo().await;

        let first = repo.insert(&trip("Asha", "heavy", 34500)).await.unwrap();
        let second = repo.insert(&trip("Ravi", "light", 20000)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_round_trips_fields() {
        let repo = repo().await;
        let mut original = trip("Asha", "heavy", 31051);
        original.promo_code = Some("DISC10".to_string());
        original.duration_min = 15.5;

        let stored = repo.insert(&original).await.unwrap();
        let listed = repo.list().await.unwrap();

        assert_eq!(listed, vec![stored]);
        assert_eq!(listed[0].fare(), Money::from_cents(31051));
        assert_eq!(listed[0].created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_fares_for_driver() {
        let repo = repo().await;
        repo.insert(&trip("Asha", "heavy", 34500)).await.unwrap();
        repo.insert(&trip("Ravi", "light", 20000)).await.unwrap();
        repo.insert(&trip("Asha", "light", 12345)).await.unwrap();

        let fares = repo.fares_for_driver("Asha").await.unwrap();
        assert_eq!(fares, vec![Money::from_cents(34500), Money::from_cents(12345)]);

        assert!(repo.fares_for_driver("asha").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_driver_earnings_grouped_by_name() {
        let repo = repo().await;
        repo.insert(&trip("Ravi", "light", 20000)).await.unwrap();
        repo.insert(&trip("Asha", "heavy", 34500)).await.unwrap();
        repo.insert(&trip("Asha", "light", 10001)).await.unwrap();

        let earnings = repo.driver_earnings().await.unwrap();
        assert_eq!(
            earnings,
            vec![
                DriverEarnings {
                    driver: "Asha".to_string(),
                    trip_count: 2,
                    total_fare_cents: 44501,
                },
                DriverEarnings {
                    driver: "Ravi".to_string(),
                    trip_count: 1,
                    total_fare_cents: 20000,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query(
            r#"
            INSERT INTO trips (driver, distance, duration, traffic_level, day,
                               start_hour, fare, promo_code, timestamp)
            VALUES ('Asha', 1.0, 1.0, 'light', 'Monday', 99, 70.0, NULL, '2026-01-05T10:00:00Z')
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.trips().list().await.unwrap_err();
        assert!(matches!(err, DbError::CorruptRecord { id: 1, .. }));
    }
}
