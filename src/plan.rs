use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decimal::Money;
use crate::errors::{EngineError, Result, ValidationFailure};

/// sparse schedule of extra principal payments ("Sondertilgung"),
/// keyed by 1-based payment month. absent months pay no extra.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPaymentPlan {
    payments: BTreeMap<u32, Money>,
}

impl ExtraPaymentPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// record an extra payment for a month. setting a month twice replaces
    /// the earlier amount; keys stay unique.
    pub fn set(&mut self, month: u32, amount: Money) -> Result<()> {
        if month == 0 {
            return Err(EngineError::invalid_input(
                "extra_payment_month",
                ValidationFailure::InvalidNumber {
                    detail: "payment months are 1-based, got 0".to_string(),
                },
            ));
        }
        if amount.is_negative() {
            return Err(EngineError::invalid_input(
                "extra_payment_amount",
                ValidationFailure::BelowMinimum {
                    minimum: Money::ZERO.as_decimal(),
                    provided: amount.as_decimal(),
                },
            ));
        }
        self.payments.insert(month, amount);
        Ok(())
    }

    /// extra principal due in a month, zero when none planned
    pub fn amount_for(&self, month: u32) -> Money {
        self.payments.get(&month).copied().unwrap_or(Money::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Money)> + '_ {
        self.payments.iter().map(|(month, amount)| (*month, *amount))
    }

    /// sum of all planned extras
    pub fn total(&self) -> Money {
        self.payments
            .values()
            .fold(Money::ZERO, |acc, amount| acc + *amount)
    }

    /// sum of extras planned for a 1-based loan year (months 1-12, 13-24, ...)
    pub fn total_for_year(&self, year: u32) -> Money {
        if year == 0 {
            return Money::ZERO;
        }
        let first = (year - 1).saturating_mul(12).saturating_add(1);
        let last = year.saturating_mul(12);
        self.payments
            .range(first..=last)
            .fold(Money::ZERO, |acc, (_, amount)| acc + *amount)
    }

    /// highest month with a planned extra
    pub fn last_month(&self) -> Option<u32> {
        self.payments.keys().next_back().copied()
    }
}
