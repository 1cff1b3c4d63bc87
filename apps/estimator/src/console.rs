//! # Interactive Console
//!
//! Line-oriented booking loop: prompt for one trip, record it, print the
//! overall and driver reports, repeat.
//!
//! ```text
//! 🚖 Enter Trip Details (or type 'exit' to quit):
//! Driver Name: Asha
//! Distance (km): 10
//! Time (minutes): 15
//! Traffic (light/medium/heavy): heavy
//! Day of the week: Sunday
//! Start Hour (0–23): 19
//! Promo Code (or press Enter to skip):
//!
//! ✅ Trip Recorded: Trip #1: Driver=Asha, Distance=10 km, ... Fare=₹345.00, ...
//! ```
//!
//! `exit` at the driver prompt, or end of input, ends the session. A line
//! that is not a number aborts the current trip; nothing is stored.

use cabfare_core::validation::validate_start_hour;
use cabfare_core::{FareRequest, NewTrip, Trip};
use cabfare_db::{DbError, ReportGenerator, TripStore};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

use crate::error::AppError;

/// What one pass over the prompts produced.
enum Entry {
    Trip(NewTrip),
    Skip,
    Quit,
}

/// A console session over any line reader and writer.
pub struct ConsoleSession<R, W> {
    input: R,
    output: W,
    store: TripStore,
    reports: ReportGenerator,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(input: R, output: W, store: TripStore, reports: ReportGenerator) -> Self {
        ConsoleSession {
            input,
            output,
            store,
            reports,
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Runs until `exit` or end of input. Returns the number of trips recorded.
    ///
    /// Rejected input is reported and the loop continues; storage failures
    /// end the session.
    pub async fn run(&mut self) -> Result<usize, AppError> {
        let mut recorded = 0;

        loop {
            let new_trip = match self.read_trip()? {
                Entry::Trip(new_trip) => new_trip,
                Entry::Skip => continue,
                Entry::Quit => break,
            };

            match self.store.create_trip(new_trip).await {
                Ok(trip) => {
                    recorded += 1;
                    self.print_summary(&trip).await?;
                }
                Err(DbError::InvalidInput(e)) => {
                    writeln!(self.output, "⚠ Trip not recorded: {}", e)?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!(recorded, "Console session finished");
        Ok(recorded)
    }

    fn read_trip(&mut self) -> Result<Entry, AppError> {
        writeln!(self.output, "\n🚖 Enter Trip Details (or type 'exit' to quit):")?;

        let Some(driver) = self.prompt("Driver Name: ")? else {
            return Ok(Entry::Quit);
        };
        if driver.trim().eq_ignore_ascii_case("exit") {
            return Ok(Entry::Quit);
        }

        let Some(raw) = self.prompt("Distance (km): ")? else {
            return Ok(Entry::Quit);
        };
        let Some(distance_km) = self.parse_number::<f64>(&raw, "distance")? else {
            return Ok(Entry::Skip);
        };

        let Some(raw) = self.prompt("Time (minutes): ")? else {
            return Ok(Entry::Quit);
        };
        let Some(duration_min) = self.parse_number::<f64>(&raw, "time")? else {
            return Ok(Entry::Skip);
        };

        let Some(traffic) = self.prompt("Traffic (light/medium/heavy): ")? else {
            return Ok(Entry::Quit);
        };
        let Some(day) = self.prompt("Day of the week: ")? else {
            return Ok(Entry::Quit);
        };

        let Some(raw) = self.prompt("Start Hour (0–23): ")? else {
            return Ok(Entry::Quit);
        };
        let Some(hour) = self.parse_number::<i64>(&raw, "start hour")? else {
            return Ok(Entry::Skip);
        };
        let start_hour = match validate_start_hour(hour) {
            Ok(hour) => hour,
            Err(e) => {
                writeln!(self.output, "⚠ Trip not recorded: {}", e)?;
                return Ok(Entry::Skip);
            }
        };

        let Some(promo) = self.prompt("Promo Code (or press Enter to skip): ")? else {
            return Ok(Entry::Quit);
        };

        let mut request = FareRequest::new(distance_km, duration_min, traffic, day, start_hour);
        if !promo.trim().is_empty() {
            request = request.with_promo(promo);
        }

        Ok(Entry::Trip(NewTrip::new(driver, request)))
    }

    async fn print_summary(&mut self, trip: &Trip) -> Result<(), AppError> {
        writeln!(self.output, "\n✅ Trip Recorded: {}", trip)?;

        match self.reports.overall_report().await? {
            Some(report) => writeln!(self.output, "\n{}", report)?,
            None => writeln!(self.output, "\nNo trips recorded yet.")?,
        }

        match self.reports.driver_report(&trip.driver).await? {
            Some(report) => writeln!(self.output, "\n{}", report)?,
            None => writeln!(self.output, "\nNo trips found for driver {}.", trip.driver)?,
        }

        Ok(())
    }

    /// Writes `label` and reads one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Parses a numeric answer, reporting it when it is not a number.
    fn parse_number<T: FromStr>(&mut self, raw: &str, field: &str) -> Result<Option<T>, AppError> {
        match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "\n⚠ Invalid number for {}: '{}'", field, raw.trim())?;
                Ok(None)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cabfare_core::FareCalculator;
    use cabfare_db::{Database, DbConfig};
    use std::io::Cursor;

    async fn session(input: &str) -> (ConsoleSession<Cursor<Vec<u8>>, Vec<u8>>, Database) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let session = ConsoleSession::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            TripStore::new(db.trips(), FareCalculator::default()),
            ReportGenerator::new(db.trips()),
        );
        (session, db)
    }

    fn printed(session: &ConsoleSession<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.output().clone()).unwrap()
    }

    #[tokio::test]
    async fn test_records_trip_and_prints_reports() {
        let (mut session, db) = session("Asha\n10\n15\nheavy\nSunday\n19\n\nexit\n").await;

        assert_eq!(session.run().await.unwrap(), 1);

        let out = printed(&session);
        assert!(out.contains("Driver Name: "));
        assert!(out.contains("Promo Code (or press Enter to skip): "));
        assert!(out.contains("✅ Trip Recorded: Trip #1: Driver=Asha"));
        assert!(out.contains("Fare=₹345.00"));
        assert!(out.contains("----- Daily Report -----"));
        assert!(out.contains("Total Trips: 1"));
        assert!(out.contains("----- Driver Report: Asha -----"));

        let trips = db.trips().list().await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].promo_code, None);
    }

    #[tokio::test]
    async fn test_promo_code_is_applied() {
        let (mut session, db) = session("Ravi\n10\n15\nlight\nMonday\n10\nDISC10\nEXIT\n").await;

        assert_eq!(session.run().await.unwrap(), 1);

        let trips = db.trips().list().await.unwrap();
        assert_eq!(trips[0].fare().cents(), 18000);
        assert_eq!(trips[0].promo_code.as_deref(), Some("DISC10"));
    }

    #[tokio::test]
    async fn test_invalid_number_skips_trip() {
        let (mut session, db) = session(
            "Asha\nten\nRavi\n2\n5\nmedium\nFriday\n12\n\n",
        )
        .await;

        assert_eq!(session.run().await.unwrap(), 1);

        let out = printed(&session);
        assert!(out.contains("Invalid number for distance: 'ten'"));

        let trips = db.trips().list().await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].driver, "Ravi");
    }

    #[tokio::test]
    async fn test_rejected_values_are_reported() {
        let (mut session, db) = session(
            "Asha\n-3\n5\nlight\nMonday\n10\n\nAsha\n3\n5\nlight\nMonday\n24\nexit\n",
        )
        .await;

        assert_eq!(session.run().await.unwrap(), 0);

        let out = printed(&session);
        assert!(out.contains("distance must not be negative"));
        assert!(out.contains("start hour must be between 0 and 23"));
        assert!(db.trips().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let (mut session, _db) = session("Asha\n10\n").await;

        assert_eq!(session.run().await.unwrap(), 0);
    }
}
