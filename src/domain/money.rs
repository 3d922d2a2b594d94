use crate::error::{OrderError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Represents an exact monetary value.
///
/// This is a wrapper around `rust_decimal::Decimal` so that totals and
/// subtotals never accumulate floating-point rounding drift.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Multiplies by an integer quantity, failing on overflow of the
    /// underlying decimal representation.
    pub fn checked_mul(&self, quantity: i64) -> Result<Self> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Self)
            .ok_or(OrderError::ArithmeticError("money multiplication overflowed"))
    }

    /// Adds another value, failing on overflow.
    pub fn checked_add(&self, rhs: Self) -> Result<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(OrderError::ArithmeticError("money addition overflowed"))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(10.0));
        let b = Money::new(dec!(5.0));
        assert_eq!(a + b, Money::new(dec!(15.0)));
        assert_eq!(a - b, Money::new(dec!(5.0)));
    }

    #[test]
    fn test_checked_mul_exact() {
        let price = Money::new(dec!(19.99));
        assert_eq!(price.checked_mul(3).unwrap(), Money::new(dec!(59.97)));
    }

    #[test]
    fn test_checked_mul_overflow() {
        let huge = Money::new(Decimal::MAX);
        assert!(matches!(
            huge.checked_mul(2),
            Err(OrderError::ArithmeticError(_))
        ));
    }

    #[test]
    fn test_checked_add_overflow() {
        let huge = Money::new(Decimal::MAX);
        assert!(matches!(
            huge.checked_add(huge),
            Err(OrderError::ArithmeticError(_))
        ));
    }

    #[test]
    fn test_negative_result_is_representable() {
        // Checkout can drive a total below zero; Money does not clamp.
        let total = Money::new(dec!(5.00)) - Money::new(dec!(10.00));
        assert_eq!(total, Money::new(dec!(-5.00)));
    }
}
