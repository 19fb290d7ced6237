use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

/// number of decimal places carried by every monetary amount
const CENT_PRECISION: u32 = 2;

/// Money type with cent precision, every operation re-rounds to whole cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(CENT_PRECISION))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(CENT_PRECISION)))
    }

    /// create from whole currency units (euros, dollars)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from cents
    pub fn from_minor_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CENT_PRECISION))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative()
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// calculate percentage (e.g., 5% of 100 is 5)
    pub fn percentage(&self, pct: Decimal) -> Self {
        Money((self.0 * pct / Decimal::from(100)).round_dp(CENT_PRECISION))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(CENT_PRECISION))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(CENT_PRECISION);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(CENT_PRECISION))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(CENT_PRECISION);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(CENT_PRECISION))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(CENT_PRECISION))
    }
}

/// nominal annual interest rate stored as a percentage value (5.0 means 5% p.a.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from percentage value (e.g., 5 for 5%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p)
    }

    /// create from a decimal fraction (e.g., 0.05 for 5%)
    pub fn from_fraction(f: Decimal) -> Self {
        Rate(f * Decimal::from(100))
    }

    /// get as percentage value
    pub fn as_percent(&self) -> Decimal {
        self.0
    }

    /// get as decimal fraction
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::from(100)
    }

    /// monthly rate factor by the nominal convention: percent / 100 / 12.
    /// the only rate-to-month conversion in the crate; engine, projector
    /// and policy all go through here.
    pub fn monthly_factor(&self) -> Decimal {
        self.0 / dec!(1200)
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_percent(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_cent_rounding() {
        let m = Money::from_str_exact("100.125").unwrap();
        assert_eq!(m.to_string(), "100.12"); // banker's rounding to cents

        let m = Money::from_str_exact("100.129").unwrap();
        assert_eq!(m.to_string(), "100.13");
    }

    #[test]
    fn test_money_minor_units() {
        assert_eq!(Money::from_minor_cents(12345), Money::from_str_exact("123.45").unwrap());
        assert_eq!(Money::from_minor_cents(1), Money::CENT);
        assert_eq!(Money::from_minor_cents(100), Money::from_major(1));
    }

    #[test]
    fn test_money_arithmetic_stays_in_cents() {
        let a = Money::from_str_exact("0.10").unwrap();
        let b = Money::from_str_exact("0.20").unwrap();
        assert_eq!(a + b, Money::from_str_exact("0.30").unwrap());

        let third = Money::from_major(100) / dec!(3);
        assert_eq!(third, Money::from_str_exact("33.33").unwrap());
    }

    #[test]
    fn test_money_percentage() {
        let principal = Money::from_major(200_000);
        assert_eq!(principal.percentage(dec!(5)), Money::from_major(10_000));
    }

    #[test]
    fn test_money_signs() {
        assert!(!Money::ZERO.is_positive());
        assert!(Money::CENT.is_positive());
        assert!((Money::ZERO - Money::CENT).is_negative());
    }

    #[test]
    fn test_rate_monthly_factor_convention() {
        // 5% p.a. divides to 5/1200 per month, nominal convention
        let rate = Rate::from_percent(dec!(5));
        assert_eq!(rate.monthly_factor(), dec!(5) / dec!(1200));
        assert_eq!(rate.as_fraction(), dec!(0.05));
    }

    #[test]
    fn test_rate_from_fraction() {
        let rate = Rate::from_fraction(dec!(0.065));
        assert_eq!(rate.as_percent(), dec!(6.5));
        assert_eq!(rate.to_string(), "6.5%");
    }
}
