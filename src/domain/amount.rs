use crate::error::{Result, ShopError};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// An amount to be paid, held at two decimal places.
///
/// Built through [`PaymentAmount::new`] it is never negative; the unchecked
/// constructor exists only to reproduce the legacy payload format. Values too
/// large to carry two fraction digits are rejected by both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PaymentAmount(Decimal);

impl PaymentAmount {
    pub const SCALE: u32 = 2;

    pub fn new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ShopError::InvalidAmount(format!(
                "amount must not be negative, got {}",
                value
            )));
        }
        Self::new_unchecked(value)
    }

    /// Rounds without validating the sign.
    pub fn new_unchecked(value: Decimal) -> Result<Self> {
        let mut rounded =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointNearestEven);
        // rescale silently keeps a smaller scale when the mantissa has no room
        rounded.rescale(Self::SCALE);
        if rounded.scale() != Self::SCALE {
            return Err(ShopError::InvalidAmount(format!(
                "amount {} is too large to carry {} fraction digits",
                value,
                Self::SCALE
            )));
        }
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        Ok(Self(rounded))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl TryFrom<Decimal> for PaymentAmount {
    type Error = ShopError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<f64> for PaymentAmount {
    type Error = ShopError;

    fn try_from(value: f64) -> Result<Self> {
        let decimal = decimal_from_f64(value)?;
        Self::new(decimal)
    }
}

impl FromStr for PaymentAmount {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(parse_decimal(s)?)
    }
}

impl From<PaymentAmount> for Decimal {
    fn from(amount: PaymentAmount) -> Self {
        amount.0
    }
}

/// Always exactly two fraction digits, e.g. `150.00`.
impl fmt::Display for PaymentAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a binary float, rejecting NaN and infinities.
pub fn decimal_from_f64(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(ShopError::InvalidAmount(format!(
            "amount must be finite, got {}",
            value
        )));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| ShopError::InvalidAmount(format!("amount {} is out of range", value)))
}

/// Parses user-supplied amount text. Accepts plain and scientific notation.
pub fn parse_decimal(text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ShopError::InvalidAmount(format!("'{}' is not a number", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_two_fraction_digits() {
        assert_eq!(PaymentAmount::new(dec!(150)).unwrap().to_string(), "150.00");
        assert_eq!(PaymentAmount::new(dec!(1250.5)).unwrap().to_string(), "1250.50");
        assert_eq!(PaymentAmount::new(dec!(0)).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_rounds_half_to_even() {
        assert_eq!(PaymentAmount::new(dec!(2.345)).unwrap().to_string(), "2.34");
        assert_eq!(PaymentAmount::new(dec!(2.355)).unwrap().to_string(), "2.36");
        assert_eq!(PaymentAmount::new(dec!(9.999)).unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            PaymentAmount::new(dec!(-5)),
            Err(ShopError::InvalidAmount(_))
        ));
        assert!(PaymentAmount::new(dec!(-0.00)).is_ok());
    }

    #[test]
    fn test_unchecked_keeps_sign() {
        let amount = PaymentAmount::new_unchecked(dec!(-5)).unwrap();
        assert!(amount.is_negative());
        assert_eq!(amount.to_string(), "-5.00");
    }

    #[test]
    fn test_largest_amounts() {
        assert_eq!(
            PaymentAmount::new(dec!(99999999999999999999999999.99))
                .unwrap()
                .to_string(),
            "99999999999999999999999999.99"
        );
        assert!(matches!(
            PaymentAmount::new(dec!(1000000000000000000000000000)),
            Err(ShopError::InvalidAmount(_))
        ));
        assert!(matches!(
            PaymentAmount::new(Decimal::MAX),
            Err(ShopError::InvalidAmount(_))
        ));
        assert!(matches!(
            PaymentAmount::new_unchecked(Decimal::MIN),
            Err(ShopError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            PaymentAmount::try_from(f64::NAN),
            Err(ShopError::InvalidAmount(_))
        ));
        assert!(matches!(
            PaymentAmount::try_from(f64::INFINITY),
            Err(ShopError::InvalidAmount(_))
        ));
        assert_eq!(PaymentAmount::try_from(150.0).unwrap().to_string(), "150.00");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("99.5".parse::<PaymentAmount>().unwrap().to_string(), "99.50");
        assert_eq!("1e2".parse::<PaymentAmount>().unwrap().to_string(), "100.00");
        assert!(matches!(
            "abc".parse::<PaymentAmount>(),
            Err(ShopError::InvalidAmount(_))
        ));
    }
}
