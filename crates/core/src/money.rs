use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Currency symbol prefixed to every rendered amount.
pub const CURRENCY_SYMBOL: &str = "RM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Pinned to the representable limit matching the sign of an overflowed result.
    fn saturated(negative: bool) -> Self {
        Money(if negative { Decimal::MIN } else { Decimal::MAX })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{CURRENCY_SYMBOL}{rounded:.2}")
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Money(sum),
            None => Money::saturated(self.0.is_sign_negative()),
        }
    }
}

/// Unit price times quantity. Saturates instead of overflowing.
impl Mul<Decimal> for Money {
    type Output = Self;
    fn mul(self, rhs: Decimal) -> Self {
        match self.0.checked_mul(rhs) {
            Some(product) => Money(product),
            None => Money::saturated(self.0.is_sign_negative() != rhs.is_sign_negative()),
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}
