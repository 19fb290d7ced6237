pub mod schedule;

use rust_decimal::Decimal;

use crate::config::LoanConfiguration;
use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::plan::ExtraPaymentPlan;

pub use schedule::{AmortizationSchedule, ScheduleEntry};

/// absolute iteration cap, regardless of term length
pub(crate) const ABSOLUTE_ITERATION_CAP: u32 = 1200;

/// iteration ceiling for a term: twice the contractual term, clamped to the
/// absolute cap. exceeding it means the configuration cannot converge
/// within sane bounds.
pub(crate) fn iteration_ceiling(term_months: u32) -> u32 {
    term_months.saturating_mul(2).min(ABSOLUTE_ITERATION_CAP)
}

/// outcome of advancing the balance by one month
#[derive(Debug, Clone, Copy)]
pub(crate) struct MonthOutcome {
    pub interest: Money,
    pub principal: Money,
    pub extra_applied: Money,
    pub ending_balance: Money,
}

/// the single per-month step: interest on the starting balance, regular
/// principal from the fixed payment, extra principal from the plan, all
/// capped so the balance lands on exactly zero at payoff.
///
/// shared by `simulate` and the balance projector; there is deliberately
/// no second copy of this arithmetic anywhere in the crate.
pub(crate) fn advance_month(
    balance: Money,
    monthly_factor: Decimal,
    payment: Money,
    extra: Money,
    month: u32,
) -> Result<MonthOutcome> {
    let interest = Money::from_decimal(balance.as_decimal() * monthly_factor);

    let regular_principal = payment - interest;
    if regular_principal <= Money::ZERO {
        return Err(EngineError::NonAmortizing {
            month,
            payment,
            interest_due: interest,
        });
    }

    let principal = (regular_principal + extra).min(balance);
    let extra_applied = (principal - regular_principal).max(Money::ZERO);

    Ok(MonthOutcome {
        interest,
        principal,
        extra_applied,
        ending_balance: balance - principal,
    })
}

/// simulate the full life of a loan.
///
/// pure function of its inputs: no clock, no i/o, no shared state.
/// identical inputs produce identical schedules.
pub fn simulate(
    config: &LoanConfiguration,
    extra_payments: &ExtraPaymentPlan,
) -> Result<AmortizationSchedule> {
    config.validate()?;

    let monthly_factor = config.monthly_factor();
    let payment = config.monthly_payment().as_money();
    let ceiling = iteration_ceiling(config.term_months().as_u32());

    let mut balance = config.principal().as_money();
    let mut interest_total = Money::ZERO;
    let mut principal_total = Money::ZERO;
    let mut entries = Vec::new();
    let mut month = 0u32;

    while balance > Money::ZERO {
        month += 1;
        if month > ceiling {
            return Err(EngineError::EndlessLoopDetected { iterations: ceiling });
        }

        let extra = extra_payments.amount_for(month);
        let outcome = advance_month(balance, monthly_factor, payment, extra, month)?;

        interest_total += outcome.interest;
        principal_total += outcome.principal;

        entries.push(ScheduleEntry {
            payment_number: month,
            starting_balance: balance,
            ending_balance: outcome.ending_balance,
            interest_paid: outcome.interest,
            principal_paid: outcome.principal,
            extra_payment_applied: outcome.extra_applied,
            interest_paid_total: interest_total,
            principal_paid_total: principal_total,
        });

        balance = outcome.ending_balance;
    }

    Ok(AmortizationSchedule::from_entries(entries))
}
