//! # Money Module
//!
//! Provides the `Money` type for handling fares safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float fares drifts:                                            │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise)                              │
//! │    A fare is rounded to the paisa exactly once, when it is computed.   │
//! │    Totals and driver earnings are then exact integer sums.              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cabfare_core::money::Money;
//!
//! let fare = Money::from_cents(34500); // ₹345.00
//! let total = fare + Money::from_cents(12050);
//! assert_eq!(total.to_string(), "₹465.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// The field is named "cents" throughout the codebase for brevity; one
/// cent here is 1/100 of the currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::money::Money;
    ///
    /// let fare = Money::from_cents(5000); // ₹50.00
    /// assert_eq!(fare.cents(), 5000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a major-unit amount, rounding to the
    /// nearest minor unit.
    ///
    /// ## Where This Is Used
    /// Only at the storage edge: the `trips.fare` column holds a REAL in
    /// major units with two decimals. Fares are never computed through here.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(345.0).cents(), 34500);
    /// assert_eq!(Money::from_major(12.34).cents(), 1234);
    /// ```
    pub fn from_major(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units (for storage and display only).
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Arithmetic mean of `count` amounts totalling `self`, rounded half up
    /// to the nearest minor unit.
    ///
    /// Returns `None` when `count` is zero.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::money::Money;
    ///
    /// let total = Money::from_cents(1000);
    /// assert_eq!(total.average_over(3), Some(Money::from_cents(333)));
    /// assert_eq!(total.average_over(0), None);
    /// ```
    pub fn average_over(&self, count: usize) -> Option<Money> {
        if count == 0 {
            return None;
        }

        // i128 keeps `total * 2` from overflowing on absurd totals
        let total = self.0 as i128;
        let n = count as i128;
        let rounded = if total >= 0 {
            (2 * total + n) / (2 * n)
        } else {
            -((-2 * total + n) / (2 * n))
        };

        Some(Money(rounded as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Addition and subtraction saturate at the i64 bounds instead of wrapping.

/// Display shows money the way the console prints fares: `₹345.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.major_part().abs(),
            self.minor_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major_part(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_rounds_to_minor_unit() {
        assert_eq!(Money::from_major(345.0).cents(), 34500);
        assert_eq!(Money::from_major(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_major(41.4).cents(), 4140);
        assert_eq!(Money::from_cents(1234).to_major(), 12.34);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(34500)), "₹345.00");
        assert_eq!(format!("{}", Money::from_cents(505)), "₹5.05");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let fares = [a, b, Money::from_cents(1)];
        let total: Money = fares.iter().sum();
        assert_eq!(total.cents(), 1501);
    }

    #[test]
    fn test_sum_saturates_at_limit() {
        let fares = [Money::from_cents(i64::MAX), Money::from_cents(i64::MAX)];
        let total: Money = fares.iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let mut running = Money::from_cents(i64::MAX - 1);
        running += Money::from_cents(5);
        assert_eq!(running.cents(), i64::MAX);

        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(Money::from_cents(300).average_over(2), Some(Money::from_cents(150)));
        // 1001 / 2 = 500.5 → 501
        assert_eq!(Money::from_cents(1001).average_over(2), Some(Money::from_cents(501)));
        // 1000 / 3 = 333.33 → 333
        assert_eq!(Money::from_cents(1000).average_over(3), Some(Money::from_cents(333)));
        assert_eq!(Money::from_cents(-1001).average_over(2), Some(Money::from_cents(-501)));
        assert_eq!(Money::zero().average_over(0), None);
    }
}
