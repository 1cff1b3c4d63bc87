//! # cabfare-core: Pure Business Logic for the Cab Fare Estimator
//!
//! This crate is the **heart** of the estimator. It contains the fare rules,
//! trip types and report aggregation as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cab Fare Estimator Architecture                     │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │   Console (stdin/stdout) │      │   HTTP API (browser UI)      │    │
//! │  └────────────┬─────────────┘      └──────────────┬───────────────┘    │
//! │               └──────────────┬────────────────────┘                    │
//! │                              │                                          │
//! │  ┌───────────────────────────▼─────────────────────────────────────┐   │
//! │  │               ★ cabfare-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   fare    │  │  report   │  │ validation│  │   │
//! │  │   │   Trip    │  │ RateSched │  │ Overall   │  │   rules   │  │   │
//! │  │   │  NewTrip  │  │ FareCalc  │  │ Driver    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │  ┌───────────────────────────▼─────────────────────────────────────┐   │
//! │  │                 cabfare-db (Database Layer)                     │   │
//! │  │            SQLite trips table, TripStore, ReportGenerator       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Trip, NewTrip, FareRequest, TrafficLevel)
//! - [`money`] - Money type in minor units
//! - [`fare`] - Rate schedule and fare calculator
//! - [`report`] - Aggregate statistics over trips
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use cabfare_core::fare::FareCalculator;
//!
//! let calculator = FareCalculator::default();
//! let fare = calculator.calculate_fare(10.0, 15.0, "heavy", "Sunday", 19, None);
//!
//! // (50 + 100 + 30 + 20) × 1.25 × 1.20 × 1.15
//! assert_eq!(fare.cents(), 34500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fare;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use fare::{Discount, FareBreakdown, FareCalculator, Multiplier, MultiplierTable, RateSchedule};
pub use money::Money;
pub use report::{DriverEarnings, DriverReport, OverallReport, TrafficBreakdown, TripHighlight};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used when rendering [`Money`] for people.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Maximum length of a driver name.
pub const MAX_DRIVER_NAME_LEN: usize = 100;

/// Maximum length of a promo code.
pub const MAX_PROMO_CODE_LEN: usize = 32;

/// Highest valid trip start hour (hours are 0-23).
pub const MAX_START_HOUR: u8 = 23;

/// Longest trip distance accepted, in kilometers.
pub const MAX_DISTANCE_KM: f64 = 10_000.0;

/// Longest trip duration accepted, in minutes (one week).
pub const MAX_DURATION_MIN: f64 = 10_080.0;
