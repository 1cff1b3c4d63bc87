//! # Seed Data Generator
//!
//! Populates the database with demo trips for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 trips (default)
//! cargo run -p cabfare-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p cabfare-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p cabfare-db --bin seed -- --db ./data/cab_system.db
//! ```
//!
//! ## Generated Trips
//! The same inputs every run: driver, traffic, day and promo code cycle
//! through fixed lists, distance and duration are derived from the trip
//! index. Fares come from the default rate schedule, exactly as if the
//! trips had been booked through the console.

use cabfare_core::{FareCalculator, FareRequest, NewTrip};
use cabfare_db::{Database, DbConfig, ReportGenerator, TripStore};
use chrono::{Duration, TimeZone, Utc};
use std::env;

const DRIVERS: &[&str] = &["Asha", "Ravi", "Meera", "Imran", "Kavya", "Joseph"];

const TRAFFIC: &[&str] = &["light", "medium", "heavy", "light", "medium"];

const DAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Most trips have no promo.
const PROMOS: &[Option<&str>] = &[None, None, Some("DISC10"), None, Some("NEW50"), None, Some("SAVE20")];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./cab_system_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cab Fare Estimator Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of trips to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./cab_system_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Cab Fare Estimator Seed Data Generator");
    println!("=========================================");
    println!("Database: {}", db_path);
    println!("Trips: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.trips().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} trips", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let store = TripStore::new(db.trips(), FareCalculator::default());

    println!();
    println!("Generating trips...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let trip = generate_trip(seed);

        if let Err(e) = store.create_trip(trip).await {
            eprintln!("Failed to insert trip {}: {}", seed, e);
            continue;
        }

        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} trips...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} trips in {:?}", generated, elapsed);

    if let Some(report) = ReportGenerator::new(db.trips()).overall_report().await? {
        println!();
        println!("{}", report);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one demo trip from its index.
fn generate_trip(seed: usize) -> NewTrip {
    // 0.5 km - 30.4 km, 5 - 94 minutes
    let distance_km = 0.5 + ((seed * 37) % 300) as f64 / 10.0;
    let duration_min = 5.0 + ((seed * 13) % 90) as f64;
    let start_hour = ((seed * 5) % 24) as u8;

    let mut request = FareRequest::new(
        distance_km,
        duration_min,
        TRAFFIC[seed % TRAFFIC.len()],
        DAYS[seed % DAYS.len()],
        start_hour,
    );
    if let Some(code) = PROMOS[seed % PROMOS.len()] {
        request = request.with_promo(code);
    }

    // 17 minutes apart from a fixed date, in booking order
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single();
    let created_at = base.map(|b| b + Duration::minutes(seed as i64 * 17));

    let trip = NewTrip::new(DRIVERS[seed % DRIVERS.len()], request);
    match created_at {
        Some(at) => trip.with_created_at(at),
        None => trip,
    }
}
