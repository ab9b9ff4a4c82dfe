//! # Money Module
//!
//! Nightly prices are stored as integer minor units (cents) in the
//! `properties.cost_per_night` column. Search filters arrive in major
//! units (dollars) and are converted once, at the boundary.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Search form: "$50 - $150 per night"                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Money::from_major_units(50.0)  → 5000 cents                            │
//! │  Money::from_major_units(150.0) → 15000 cents                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cost_per_night >= $3 AND cost_per_night <= $4                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use crate::error::{CoreError, CoreResult};

const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// A monetary value in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use lightbnb_core::money::Money;
    ///
    /// let nightly = Money::from_cents(12_500);
    /// assert_eq!(nightly.cents(), 12_500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units to cents, rounding to the
    /// nearest cent.
    ///
    /// Only used at the input boundary (search filters). Everything past
    /// this point works in integer cents.
    ///
    /// ```rust
    /// use lightbnb_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_units(50.0).unwrap().cents(), 5000);
    /// assert_eq!(Money::from_major_units(19.99).unwrap().cents(), 1999);
    /// assert!(Money::from_major_units(f64::NAN).is_err());
    /// ```
    pub fn from_major_units(amount: f64) -> CoreResult<Self> {
        if !amount.is_finite() {
            return Err(CoreError::InvalidPrice(amount.to_string()));
        }

        let cents = (amount * MINOR_UNITS_PER_MAJOR as f64).round();
        if cents > i64::MAX as f64 || cents < i64::MIN as f64 {
            return Err(CoreError::InvalidPrice(amount.to_string()));
        }

        Ok(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / MINOR_UNITS_PER_MAJOR
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % MINOR_UNITS_PER_MAJOR).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Formats as `$125.00` (or `-$5.50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_units_rounds_to_nearest_cent() {
        assert_eq!(Money::from_major_units(150.0).unwrap().cents(), 15_000);
        assert_eq!(Money::from_major_units(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_major_units(19.99).unwrap().cents(), 1999);
        assert_eq!(Money::from_major_units(-5.5).unwrap().cents(), -550);
    }

    #[test]
    fn test_from_major_units_rejects_non_finite() {
        assert!(Money::from_major_units(f64::INFINITY).is_err());
        assert!(Money::from_major_units(f64::NAN).is_err());
        assert!(Money::from_major_units(1e30).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(12_550).to_string(), "$125.50");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }
}
