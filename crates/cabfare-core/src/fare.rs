//! # Fare Module
//!
//! The rate schedule and the fare calculator.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Fare Pipeline (fixed order)                     │
//! │                                                                         │
//! │  1. subtotal = base + distance × per_km + duration × per_min + booking  │
//! │  2. × traffic multiplier       (unknown label → ×1.00)                  │
//! │  3. × peak multiplier          (only when start hour is a peak hour)    │
//! │  4. × weekend multiplier       (only on Saturday / Sunday)              │
//! │  5. − promo discount           (flat amount or percentage)              │
//! │  6. round to the paisa, clamp at zero                                   │
//! │                                                                         │
//! │  Steps 1-5 run in f64 minor units. Step 6 is the ONLY rounding point.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cabfare_core::fare::FareCalculator;
//!
//! let calculator = FareCalculator::default();
//!
//! // 50 + 10×10 + 15×2 + 20 = 200, no surcharges on a Monday morning
//! let fare = calculator.calculate_fare(10.0, 15.0, "light", "Monday", 10, None);
//! assert_eq!(fare.cents(), 20000);
//!
//! // DISC10 takes 10% off
//! let fare = calculator.calculate_fare(10.0, 15.0, "light", "Monday", 10, Some("disc10"));
//! assert_eq!(fare.cents(), 18000);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{is_weekend, normalize_promo_code, normalize_traffic, FareRequest};
use crate::MAX_START_HOUR;

/// Basis points in 1.0 (10000 bps = ×1.00 = 100%).
const BPS_PER_UNIT: u32 = 10_000;

// =============================================================================
// Multiplier
// =============================================================================

/// A fare multiplier in basis points.
///
/// 10000 bps = ×1.00, 12500 bps = ×1.25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct Multiplier(u32);

impl Multiplier {
    /// ×1.00, applied to anything the schedule does not recognize.
    pub const NEUTRAL: Multiplier = Multiplier(BPS_PER_UNIT);

    /// Creates a multiplier from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Multiplier(bps)
    }

    /// Creates a multiplier from a factor (for convenience): `1.25` → 12500 bps.
    pub fn from_factor(factor: f64) -> Self {
        Multiplier((factor * BPS_PER_UNIT as f64).round() as u32)
    }

    /// Returns the multiplier in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the multiplier as a factor: 12500 bps → 1.25.
    #[inline]
    pub fn factor(&self) -> f64 {
        self.0 as f64 / BPS_PER_UNIT as f64
    }

    #[inline]
    pub const fn is_neutral(&self) -> bool {
        self.0 == BPS_PER_UNIT
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::NEUTRAL
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "×{:.2}", self.factor())
    }
}

// =============================================================================
// Discount
// =============================================================================

/// What a promo code takes off the fare.
///
/// In `estimator.toml`:
/// ```toml
/// [rates.promo_codes]
/// NEW50 = { kind = "flat", cents = 5000 }
/// DISC10 = { kind = "percent", bps = 1000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discount {
    /// A fixed amount off, in minor units.
    Flat { cents: i64 },

    /// A percentage off, in basis points (1000 = 10%).
    Percent { bps: u32 },
}

impl Discount {
    /// Applies the discount to an amount in (fractional) minor units.
    fn apply(&self, amount: f64) -> f64 {
        match self {
            Discount::Flat { cents } => amount - *cents as f64,
            Discount::Percent { bps } => {
                amount * (BPS_PER_UNIT as f64 - *bps as f64) / BPS_PER_UNIT as f64
            }
        }
    }
}

// =============================================================================
// Multiplier Table
// =============================================================================

/// Label → multiplier lookup with an explicit neutral default.
///
/// Labels are normalized on every construction path, deserialization
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Multiplier>",
    into = "BTreeMap<String, Multiplier>"
)]
pub struct MultiplierTable(BTreeMap<String, Multiplier>);

impl MultiplierTable {
    /// Builds a table; labels are stored normalized (trimmed, lower case).
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Multiplier)>,
        S: AsRef<str>,
    {
        MultiplierTable(
            entries
                .into_iter()
                .map(|(label, multiplier)| (normalize_traffic(label.as_ref()), multiplier))
                .collect(),
        )
    }

    /// Case-insensitive lookup. Unknown labels get [`Multiplier::NEUTRAL`].
    pub fn lookup_or_neutral(&self, label: &str) -> Multiplier {
        let label = label.trim();
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(label))
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(Multiplier::NEUTRAL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Multiplier)> {
        self.0.iter().map(|(label, multiplier)| (label.as_str(), *multiplier))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Multiplier>> for MultiplierTable {
    fn from(entries: BTreeMap<String, Multiplier>) -> Self {
        MultiplierTable::new(entries)
    }
}

impl From<MultiplierTable> for BTreeMap<String, Multiplier> {
    fn from(table: MultiplierTable) -> Self {
        table.0
    }
}

// =============================================================================
// Rate Schedule
// =============================================================================

/// The full set of fare rules. Immutable once handed to a calculator.
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSchedule {
    /// Flat charge every trip starts from.
    pub base_fare_cents: i64,

    /// Charge per kilometer.
    pub per_km_cents: i64,

    /// Charge per minute.
    pub per_minute_cents: i64,

    /// Booking fee added before any multiplier.
    pub booking_fee_cents: i64,

    /// Multiplier per traffic label.
    pub traffic_multipliers: MultiplierTable,

    /// Start hours that trigger the peak multiplier.
    pub peak_hours: BTreeSet<u8>,

    pub peak_multiplier: Multiplier,

    /// Applied on Saturday and Sunday.
    pub weekend_multiplier: Multiplier,

    /// Recognized promo codes (upper case) and what they take off.
    pub promo_codes: BTreeMap<String, Discount>,
}

impl Default for RateSchedule {
    fn default() -> Self {
        RateSchedule {
            base_fare_cents: 5000,
            per_km_cents: 1000,
            per_minute_cents: 200,
            booking_fee_cents: 2000,
            traffic_multipliers: MultiplierTable::new([
                ("light", Multiplier::from_bps(10000)),
                ("medium", Multiplier::from_bps(11000)),
                ("heavy", Multiplier::from_bps(12500)),
            ]),
            peak_hours: [6, 7, 8, 9, 18, 19, 20, 21].into_iter().collect(),
            peak_multiplier: Multiplier::from_bps(12000),
            weekend_multiplier: Multiplier::from_bps(11500),
            promo_codes: BTreeMap::from([
                ("NEW50".to_string(), Discount::Flat { cents: 5000 }),
                ("DISC10".to_string(), Discount::Percent { bps: 1000 }),
                ("SAVE20".to_string(), Discount::Percent { bps: 2000 }),
            ]),
        }
    }
}

impl RateSchedule {
    /// Checks that the calculator can use this schedule.
    ///
    /// ## Rules
    /// - Rates and fees must not be negative
    /// - Multipliers must be greater than zero
    /// - Peak hours must be 0-23
    /// - Flat discounts must not be negative, percentages at most 100%
    pub fn validate(&self) -> CoreResult<()> {
        let amounts = [
            ("base fare", self.base_fare_cents),
            ("per km rate", self.per_km_cents),
            ("per minute rate", self.per_minute_cents),
            ("booking fee", self.booking_fee_cents),
        ];
        for (name, cents) in amounts {
            if cents < 0 {
                return Err(CoreError::invalid_schedule(format!("{name} is negative")));
            }
        }

        for (label, multiplier) in self.traffic_multipliers.iter() {
            if multiplier.bps() == 0 {
                return Err(CoreError::invalid_schedule(format!(
                    "traffic multiplier for '{label}' is zero"
                )));
            }
        }
        if self.peak_multiplier.bps() == 0 {
            return Err(CoreError::invalid_schedule("peak multiplier is zero"));
        }
        if self.weekend_multiplier.bps() == 0 {
            return Err(CoreError::invalid_schedule("weekend multiplier is zero"));
        }

        if let Some(hour) = self.peak_hours.iter().find(|h| **h > MAX_START_HOUR) {
            return Err(CoreError::invalid_schedule(format!(
                "peak hour {hour} is out of range"
            )));
        }

        for (code, discount) in &self.promo_codes {
            match discount {
                Discount::Flat { cents } if *cents < 0 => {
                    return Err(CoreError::invalid_schedule(format!(
                        "promo {code} has a negative discount"
                    )));
                }
                Discount::Percent { bps } if *bps > BPS_PER_UNIT => {
                    return Err(CoreError::invalid_schedule(format!(
                        "promo {code} takes off more than 100%"
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Looks up a promo code after trimming and upper-casing it.
    pub fn discount_for(&self, code: &str) -> Option<Discount> {
        let code = normalize_promo_code(Some(code))?;
        self.promo_codes
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(&code))
            .map(|(_, discount)| *discount)
    }

    /// True when `hour` is one of the peak hours.
    pub fn is_peak_hour(&self, hour: u8) -> bool {
        self.peak_hours.contains(&hour)
    }
}

// =============================================================================
// Fare Breakdown
// =============================================================================

/// An itemized fare, as shown by the estimate endpoint.
///
/// Line items are rounded for display; `total_cents` is computed from the
/// unrounded pipeline, so the items need not add up to the paisa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FareBreakdown {
    pub base_fare_cents: i64,
    pub distance_charge_cents: i64,
    pub time_charge_cents: i64,
    pub booking_fee_cents: i64,

    /// Sum of the four items above.
    pub subtotal_cents: i64,

    pub traffic_multiplier: Multiplier,

    /// Set when the start hour is a peak hour.
    pub peak_multiplier: Option<Multiplier>,

    /// Set when the trip starts on a weekend.
    pub weekend_multiplier: Option<Multiplier>,

    /// Fare after multipliers, before any discount.
    pub surcharged_cents: i64,

    /// The recognized promo code (normalized), if any.
    pub promo_code: Option<String>,

    pub discount: Option<Discount>,

    /// Amount actually taken off (never more than the surcharged fare).
    pub discount_cents: i64,

    /// Final fare.
    pub total_cents: i64,
}

impl FareBreakdown {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Fare Calculator
// =============================================================================

/// Prices trips against an injected [`RateSchedule`]. Pure and stateless.
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    schedule: RateSchedule,
}

impl FareCalculator {
    /// Creates a calculator after validating the schedule.
    pub fn new(schedule: RateSchedule) -> CoreResult<Self> {
        schedule.validate()?;
        Ok(FareCalculator { schedule })
    }

    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    /// Computes the fare for a trip.
    ///
    /// Unknown traffic labels, days and promo codes are neutral. `distance`
    /// and `duration` are expected to be validated (finite, non-negative)
    /// by the caller; the result is clamped at zero regardless.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::fare::FareCalculator;
    ///
    /// let calculator = FareCalculator::default();
    /// let fare = calculator.calculate_fare(10.0, 15.0, "heavy", "Sunday", 19, None);
    /// assert_eq!(fare.to_string(), "₹345.00");
    /// ```
    pub fn calculate_fare(
        &self,
        distance_km: f64,
        duration_min: f64,
        traffic: &str,
        day: &str,
        start_hour: u8,
        promo_code: Option<&str>,
    ) -> Money {
        self.itemize(distance_km, duration_min, traffic, day, start_hour, promo_code)
            .total()
    }

    /// Computes the fare with every step itemized.
    pub fn breakdown(&self, request: &FareRequest) -> FareBreakdown {
        self.itemize(
            request.distance_km,
            request.duration_min,
            &request.traffic,
            &request.day,
            request.start_hour,
            request.promo_code.as_deref(),
        )
    }

    fn itemize(
        &self,
        distance_km: f64,
        duration_min: f64,
        traffic: &str,
        day: &str,
        start_hour: u8,
        promo_code: Option<&str>,
    ) -> FareBreakdown {
        let s = &self.schedule;

        // Step 1: additive components
        let base = s.base_fare_cents as f64;
        let distance_charge = distance_km * s.per_km_cents as f64;
        let time_charge = duration_min * s.per_minute_cents as f64;
        let booking_fee = s.booking_fee_cents as f64;
        let subtotal = base + distance_charge + time_charge + booking_fee;

        // Steps 2-4: multipliers
        let traffic_multiplier = s.traffic_multipliers.lookup_or_neutral(traffic);
        let peak_multiplier = s.is_peak_hour(start_hour).then_some(s.peak_multiplier);
        let weekend_multiplier = is_weekend(day).then_some(s.weekend_multiplier);

        let mut surcharged = subtotal * traffic_multiplier.factor();
        if let Some(peak) = peak_multiplier {
            surcharged *= peak.factor();
        }
        if let Some(weekend) = weekend_multiplier {
            surcharged *= weekend.factor();
        }

        // Step 5: promo
        let promo = promo_code
            .and_then(|code| s.discount_for(code).map(|d| (normalize_promo_code(Some(code)), d)));
        let discounted = match &promo {
            Some((_, discount)) => discount.apply(surcharged),
            None => surcharged,
        };

        // Step 6: single rounding point
        let total_cents = (discounted.round() as i64).max(0);
        let surcharged_cents = surcharged.round() as i64;

        let (promo_code, discount) = match promo {
            Some((code, discount)) => (code, Some(discount)),
            None => (None, None),
        };

        FareBreakdown {
            base_fare_cents: s.base_fare_cents,
            distance_charge_cents: distance_charge.round() as i64,
            time_charge_cents: time_charge.round() as i64,
            booking_fee_cents: s.booking_fee_cents,
            subtotal_cents: subtotal.round() as i64,
            traffic_multiplier,
            peak_multiplier,
            weekend_multiplier,
            surcharged_cents,
            promo_code,
            discount,
            discount_cents: (surcharged_cents - total_cents).max(0),
            total_cents,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
