use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result, ValidationFailure};

/// validated loan principal, business range 1,000 to 10,000,000 currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanAmount(Money);

impl LoanAmount {
    pub const MINIMUM: Decimal = dec!(1000);
    pub const MAXIMUM: Decimal = dec!(10000000);

    pub fn try_from_decimal(d: Decimal) -> Result<Self> {
        let amount = Money::from_decimal(d);
        check_range("principal", amount.as_decimal(), Self::MINIMUM, Self::MAXIMUM)?;
        Ok(LoanAmount(amount))
    }

    pub fn try_from_f64(v: f64) -> Result<Self> {
        Self::try_from_decimal(decimal_from_f64("principal", v)?)
    }

    pub fn as_money(&self) -> Money {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0.as_decimal()
    }
}

impl fmt::Display for LoanAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// validated nominal annual rate in percent, 0 to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterestRate(Rate);

impl InterestRate {
    pub const MINIMUM: Decimal = Decimal::ZERO;
    pub const MAXIMUM: Decimal = dec!(100);

    pub fn try_from_decimal(percent: Decimal) -> Result<Self> {
        check_range("annual_rate", percent, Self::MINIMUM, Self::MAXIMUM)?;
        Ok(InterestRate(Rate::from_percent(percent)))
    }

    pub fn try_from_f64(v: f64) -> Result<Self> {
        Self::try_from_decimal(decimal_from_f64("annual_rate", v)?)
    }

    pub fn as_rate(&self) -> Rate {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0.as_percent()
    }

    /// monthly rate factor, nominal convention (percent / 100 / 12)
    pub fn monthly_factor(&self) -> Decimal {
        self.0.monthly_factor()
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// validated term length in months, 1 to 600 (bounds simulation cost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthCount(u32);

impl MonthCount {
    pub const MINIMUM: u32 = 1;
    pub const MAXIMUM: u32 = 600;

    pub fn try_from_u32(months: u32) -> Result<Self> {
        check_range(
            "term_months",
            Decimal::from(months),
            Decimal::from(Self::MINIMUM),
            Decimal::from(Self::MAXIMUM),
        )?;
        Ok(MonthCount(months))
    }

    pub fn try_from_f64(v: f64) -> Result<Self> {
        if !v.is_finite() || v.fract() != 0.0 {
            return Err(EngineError::invalid_input(
                "term_months",
                ValidationFailure::InvalidNumber {
                    detail: format!("expected a whole number of months, got {v}"),
                },
            ));
        }
        if v < 0.0 || v > u32::MAX as f64 {
            return Err(EngineError::invalid_input(
                "term_months",
                ValidationFailure::InvalidNumber {
                    detail: format!("month count out of representable range: {v}"),
                },
            ));
        }
        Self::try_from_u32(v as u32)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MonthCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.0)
    }
}

/// validated monthly payment, strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthlyPayment(Money);

impl MonthlyPayment {
    pub fn try_from_decimal(d: Decimal) -> Result<Self> {
        let amount = Money::from_decimal(d);
        if !amount.is_positive() {
            return Err(EngineError::invalid_input(
                "monthly_payment",
                ValidationFailure::BelowMinimum {
                    minimum: Money::CENT.as_decimal(),
                    provided: amount.as_decimal(),
                },
            ));
        }
        Ok(MonthlyPayment(amount))
    }

    pub fn try_from_f64(v: f64) -> Result<Self> {
        Self::try_from_decimal(decimal_from_f64("monthly_payment", v)?)
    }

    pub fn as_money(&self) -> Money {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0.as_decimal()
    }
}

impl fmt::Display for MonthlyPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn check_range(field: &'static str, value: Decimal, minimum: Decimal, maximum: Decimal) -> Result<()> {
    if value < minimum {
        return Err(EngineError::invalid_input(
            field,
            ValidationFailure::BelowMinimum {
                minimum,
                provided: value,
            },
        ));
    }
    if value > maximum {
        return Err(EngineError::invalid_input(
            field,
            ValidationFailure::AboveMaximum {
                maximum,
                provided: value,
            },
        ));
    }
    Ok(())
}

fn decimal_from_f64(field: &'static str, v: f64) -> Result<Decimal> {
    if !v.is_finite() {
        return Err(EngineError::invalid_input(
            field,
            ValidationFailure::InvalidNumber {
                detail: format!("not a finite number: {v}"),
            },
        ));
    }
    Decimal::from_f64(v).ok_or_else(|| {
        EngineError::invalid_input(
            field,
            ValidationFailure::InvalidNumber {
                detail: format!("not representable as a decimal: {v}"),
            },
        )
    })
}
