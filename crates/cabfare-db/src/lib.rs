//! # cabfare-db: Database Layer for the Cab Fare Estimator
//!
//! SQLite persistence for trips, plus the two services the front ends talk
//! to: [`TripStore`] (book and list trips) and [`ReportGenerator`]
//! (aggregate statistics).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cab Fare Estimator Data Flow                       │
//! │                                                                         │
//! │  Console loop / HTTP handler                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    cabfare-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  TripStore    │    │ReportGenerator│    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │    │ (reports.rs)  │    │  (embedded)  │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           └──────────┬─────────┘                               │   │
//! │  │                      ▼                                          │   │
//! │  │              TripRepository ── SqlitePool (pool.rs)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: <data dir>/cab_system.db                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - SQL for the trips table
//! - [`store`] - TripStore: validate, price, persist
//! - [`reports`] - ReportGenerator: read-only aggregates
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cabfare_core::{FareCalculator, FareRequest, NewTrip};
//! use cabfare_db::{Database, DbConfig, TripStore};
//!
//! let db = Database::new(DbConfig::new("cab_system.db")).await?;
//! let store = TripStore::new(db.trips(), FareCalculator::default());
//!
//! let trip = store
//!     .create_trip(NewTrip::new("Asha", FareRequest::new(10.0, 15.0, "heavy", "Sunday", 19)))
//!     .await?;
//! println!("{trip}");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod reports;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use reports::ReportGenerator;
pub use repository::trip::TripRepository;
pub use store::TripStore;
