use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// one simulated month of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub payment_number: u32,
    pub starting_balance: Money,
    pub ending_balance: Money,
    pub interest_paid: Money,
    /// regular principal plus extra, capped at the remaining balance
    pub principal_paid: Money,
    /// the extra portion actually absorbed after the payoff cap
    pub extra_payment_applied: Money,
    pub interest_paid_total: Money,
    pub principal_paid_total: Money,
}

/// full month-by-month payment schedule, immutable once built.
/// the first entry starts at the principal, the last ends at exactly zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    entries: Vec<ScheduleEntry>,
    total_interest: Money,
    total_principal: Money,
    total_extra: Money,
}

impl AmortizationSchedule {
    pub(crate) fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        let total_interest = entries
            .iter()
            .map(|e| e.interest_paid)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_principal = entries
            .iter()
            .map(|e| e.principal_paid)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_extra = entries
            .iter()
            .map(|e| e.extra_payment_applied)
            .fold(Money::ZERO, |acc, x| acc + x);

        Self {
            entries,
            total_interest,
            total_principal,
            total_extra,
        }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// entry for a 1-based payment number
    pub fn entry(&self, payment_number: u32) -> Option<&ScheduleEntry> {
        if payment_number == 0 {
            return None;
        }
        self.entries.get((payment_number - 1) as usize)
    }

    pub fn last_entry(&self) -> Option<&ScheduleEntry> {
        self.entries.last()
    }

    /// number of payments until payoff
    pub fn months(&self) -> u32 {
        self.entries.len() as u32
    }

    /// 1-based month in which the loan is paid off
    pub fn payoff_month(&self) -> Option<u32> {
        self.last_entry().map(|e| e.payment_number)
    }

    /// balance after a payment; payment number 0 means before any payment
    pub fn balance_after(&self, payment_number: u32) -> Money {
        if payment_number == 0 {
            return self
                .entries
                .first()
                .map(|e| e.starting_balance)
                .unwrap_or(Money::ZERO);
        }
        self.entry(payment_number)
            .map(|e| e.ending_balance)
            .unwrap_or(Money::ZERO)
    }

    pub fn final_balance(&self) -> Money {
        self.last_entry().map(|e| e.ending_balance).unwrap_or(Money::ZERO)
    }

    pub fn total_interest(&self) -> Money {
        self.total_interest
    }

    pub fn total_principal(&self) -> Money {
        self.total_principal
    }

    pub fn total_extra(&self) -> Money {
        self.total_extra
    }
}
