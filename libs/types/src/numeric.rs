//! Fixed-point decimal types for prices and quantities
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Both types serialize as decimal strings and accept either JSON strings or
//! numbers on the way in. Input is validated, so a `Price` is always strictly
//! positive and a `Quantity` never negative.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::TypeError;

/// A strictly positive price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Wrap a decimal, rejecting zero and negative values.
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Whole-number price literal.
    ///
    /// # Panics
    /// Panics if `value` is zero.
    pub fn from_u64(value: u64) -> Self {
        assert!(value > 0, "Price must be positive");
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = TypeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or_else(|| TypeError::InvalidPrice(value.to_string()))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| TypeError::InvalidPrice(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// A non-negative size, denominated in the base asset of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// Wrap a decimal, rejecting negative values.
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value >= Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = TypeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or_else(|| TypeError::InvalidQuantity(value.to_string()))
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl FromStr for Quantity {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            Decimal::from_str(s.trim()).map_err(|_| TypeError::InvalidQuantity(s.to_string()))?;
        Self::try_from(value)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Exact difference `a - b`. The result may be negative.
pub fn subtract(a: Decimal, b: Decimal) -> Decimal {
    a - b
}

/// Number of significant fractional digits, ignoring trailing zeros.
///
/// `0.05 -> 2`, `0.10 -> 1`, `25 -> 0`.
pub fn decimal_places(value: Decimal) -> u32 {
    value.normalize().scale()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_non_positive() {
        assert!(Price::try_new(Decimal::ZERO).is_none());
        assert!(Price::try_new(Decimal::from(-1)).is_none());
        assert!(Price::try_new(Decimal::ONE).is_some());
    }

    #[test]
    fn test_quantity_allows_zero_rejects_negative() {
        assert!(Quantity::try_new(Decimal::ZERO).is_some());
        assert!(Quantity::try_new(Decimal::from(-1)).is_none());
        assert!(Quantity::zero().is_zero());
    }

    #[test]
    fn test_from_str() {
        let price = Price::from_str("50100.5").unwrap();
        assert_eq!(price.as_decimal(), Decimal::from_str_exact("50100.5").unwrap());

        assert_eq!(
            Price::from_str("abc"),
            Err(TypeError::InvalidPrice("abc".to_string()))
        );
        assert!(matches!(
            Quantity::from_str("-2"),
            Err(TypeError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_quantity_sum() {
        let total: Quantity = ["1.5", "2", "0.25"]
            .iter()
            .map(|s| Quantity::from_str(s).unwrap())
            .sum();
        assert_eq!(total.as_decimal(), Decimal::from_str_exact("3.75").unwrap());
    }

    #[test]
    fn test_serde_validates() {
        let price: Price = serde_json::from_str("\"0.0012\"").unwrap();
        assert_eq!(price.as_decimal(), Decimal::from_str_exact("0.0012").unwrap());

        assert!(serde_json::from_str::<Price>("\"0\"").is_err());
        assert!(serde_json::from_str::<Quantity>("\"-1\"").is_err());
    }

    #[test]
    fn test_serde_accepts_numbers() {
        let price: Price = serde_json::from_str("50012").unwrap();
        assert_eq!(price.as_decimal(), Decimal::from(50_012));
        let size: Quantity = serde_json::from_str("0.25").unwrap();
        assert_eq!(size.as_decimal(), Decimal::from_str_exact("0.25").unwrap());

        assert!(serde_json::from_str::<Price>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1.5").is_err());

        assert_eq!(serde_json::to_string(&price).unwrap(), "\"50012\"");
    }

    #[test]
    fn test_subtract_can_go_negative() {
        assert_eq!(subtract(Decimal::ONE, Decimal::from(3)), Decimal::from(-2));
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(Decimal::from_str_exact("0.05").unwrap()), 2);
        assert_eq!(decimal_places(Decimal::from_str_exact("0.10").unwrap()), 1);
        assert_eq!(decimal_places(Decimal::from(25)), 0);
        assert_eq!(decimal_places(Decimal::from(100)), 0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decimal_places_is_exact(mantissa in 1i64..10_000_000, scale in 0u32..10) {
                let value = Decimal::new(mantissa, scale);
                let dp = decimal_places(value);
                prop_assert_eq!(value.round_dp(dp), value);
                if dp > 0 {
                    prop_assert_ne!(value.round_dp(dp - 1), value);
                }
            }
        }
    }
}
