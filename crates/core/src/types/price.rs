//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] so that quantity math never picks up
//! floating point error, but they are written to the persisted cart snapshot
//! as plain JSON numbers.
//!
//! Arithmetic saturates at [`Decimal::MAX`] instead of overflowing, and a
//! stored number beyond that range decodes as [`Decimal::MAX`].

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative unit price in the store's single currency.
///
/// Serialized as a JSON number (e.g. `10` or `19.99`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable price.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price, capped at [`Price::MAX`].
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Sum of two prices, capped at [`Price::MAX`].
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.checked_add(other.0).unwrap_or(Decimal::MAX))
    }

    /// Convert a JSON number to a price.
    fn from_f64(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::Invalid(value.to_string()));
        }
        if value < 0.0 {
            return Err(PriceError::Negative);
        }
        // Go through the shortest decimal rendering so 19.99 stays 19.99.
        let text = value.to_string();
        match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
            Ok(amount) => Self::new(amount),
            // Out of range: too large, or smaller than the finest representable step
            Err(_) if value >= 1.0 => Ok(Self::MAX),
            Err(_) => Ok(Self::ZERO),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|e| PriceError::Invalid(e.to_string()))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Every Decimal fits in an f64 (with rounding).
        serializer.serialize_f64(self.0.to_f64().unwrap_or(f64::MAX))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_f64(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from(10).to_string(), "$10.00");
        assert_eq!("19.999".parse::<Price>().unwrap().to_string(), "$20.00");
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_value(Price::from(5)).unwrap();
        assert!(json.is_number());
        assert_eq!(json.as_f64(), Some(5.0));
    }

    #[test]
    fn test_deserializes_integer_and_fraction() {
        let whole: Price = serde_json::from_str("5").unwrap();
        assert_eq!(whole, Price::from(5));

        let fraction: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(fraction, "19.99".parse().unwrap());
    }

    #[test]
    fn test_line_total() {
        let price: Price = "2.50".parse().unwrap();
        assert_eq!(price.line_total(3), "7.50".parse().unwrap());
        assert_eq!(price.line_total(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from(1), Price::from(2), "0.5".parse().unwrap()]
            .into_iter()
            .sum();
        assert_eq!(total, "3.5".parse().unwrap());
    }

    #[test]
    fn test_line_total_saturates() {
        let price = Price::from_f64(5e27).unwrap();
        assert_eq!(price.line_total(100), Price::MAX);
        assert_eq!(Price::MAX.line_total(u32::MAX), Price::MAX);
    }

    #[test]
    fn test_sum_saturates() {
        let total: Price = [Price::MAX, Price::from(1), Price::MAX].into_iter().sum();
        assert_eq!(total, Price::MAX);
    }

    #[test]
    fn test_out_of_range_number_decodes_as_max() {
        let price: Price = serde_json::from_str("1e29").unwrap();
        assert_eq!(price, Price::MAX);

        let round_trip: Price =
            serde_json::from_str(&serde_json::to_string(&Price::MAX).unwrap()).unwrap();
        assert_eq!(round_trip, Price::MAX);
    }

    #[test]
    fn test_negative_rejected_everywhere() {
        assert!(serde_json::from_str::<Price>("-1").is_err());
        assert_eq!("-1".parse::<Price>(), Err(PriceError::Negative));
        assert_eq!(
            Price::try_from(Decimal::NEGATIVE_ONE),
            Err(PriceError::Negative)
        );
        assert_eq!(serde_json::from_str::<Price>("-0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage_and_negative() {
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
        assert_eq!("-1".parse::<Price>(), Err(PriceError::Negative));
    }
}
