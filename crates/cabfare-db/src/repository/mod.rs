//! # Repository Module
//!
//! SQL for the trips table lives here and nowhere else.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TripStore / ReportGenerator                                           │
//! │       │                                                                 │
//! │       │  db.trips().list()                                             │
//! │       ▼                                                                 │
//! │  TripRepository                                                        │
//! │  ├── insert(&self, trip)                                               │
//! │  ├── list(&self)                                                       │
//! │  ├── fares_for_driver(&self, driver)                                   │
//! │  ├── driver_earnings(&self)                                            │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite trips table                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no update or delete: trips are immutable once
//! stored.

pub mod trip;
