//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel as plain JSON numbers (the catalog sends `109.95`, and the
//! persisted cart stores the same shape), but all arithmetic happens on
//! [`Decimal`] so cart totals never pick up binary floating point noise.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative amount in the store currency.
///
/// ```
/// use corner_shop_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(1995, 2)).unwrap();
/// assert_eq!(price.display(), "19.95");
/// assert_eq!(price.line_total(3).display(), "59.85");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `qty` units. Saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(self, qty: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(qty))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Format with exactly two fractional digits, rounding half away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|e| PriceError::Invalid(e.to_string()))?;
        Self::new(amount)
    }
}

/// Saturates at [`Decimal::MAX`]; prices are never negative so there is no
/// lower bound to hit.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_pads_to_two_digits() {
        assert_eq!(price("5").display(), "5.00");
        assert_eq!(price("0.5").display(), "0.50");
        assert_eq!(Price::ZERO.display(), "0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(price("2.005").display(), "2.01");
        assert_eq!(price("2.004").display(), "2.00");
    }

    #[test]
    fn test_sum_has_no_float_drift() {
        // 0.1 + 0.2 is the classic f64 failure
        let total: Price = [price("0.1"), price("0.2")].into_iter().sum();
        assert_eq!(total, price("0.3"));
        assert_eq!(total.display(), "0.30");
    }

    #[test]
    fn test_line_total() {
        assert_eq!(price("109.95").line_total(2).display(), "219.90");
        assert_eq!(price("109.95").line_total(0), Price::ZERO);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = serde_json::from_str::<Price>("1e20").unwrap();
        let line = huge.line_total(4_000_000_000);
        assert_eq!(line.amount(), Decimal::MAX);

        let total: Price = [line, price("0.01"), line].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
        assert!(total.display().ends_with(".00"));
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!("-0.01".parse::<Price>(), Err(PriceError::Negative(_))));
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_json_number_shape() {
        let p = price("109.95");
        assert_eq!(serde_json::to_string(&p).unwrap(), "109.95");
        assert_eq!(serde_json::from_str::<Price>("109.95").unwrap(), p);
        assert_eq!(serde_json::from_str::<Price>("22").unwrap(), price("22"));
    }

    #[test]
    fn test_json_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3.5").is_err());
    }
}
