use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::config::LoanConfiguration;
use crate::decimal::Money;
use crate::engine::{advance_month, iteration_ceiling};
use crate::errors::{EngineError, Result};
use crate::plan::ExtraPaymentPlan;

/// point-in-time view of a running loan. derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub current_balance: Money,
    pub months_elapsed: u32,
    pub remaining_payments: u32,
    pub remaining_interest: Money,
    pub interest_paid_to_date: Money,
    pub principal_paid_to_date: Money,
}

/// project the state of a loan after `months_elapsed` payments.
///
/// replays the engine's per-month step for the elapsed months with extras
/// applied, then looks forward assuming regular payments only: the
/// remaining payment count comes from the closed-form annuity inversion,
/// the remaining interest from replaying the same step to payoff.
pub fn project_balance(
    config: &LoanConfiguration,
    extra_payments: &ExtraPaymentPlan,
    months_elapsed: u32,
) -> Result<BalanceSnapshot> {
    config.validate()?;

    let monthly_factor = config.monthly_factor();
    let payment = config.monthly_payment().as_money();
    let ceiling = iteration_ceiling(config.term_months().as_u32());

    let mut balance = config.principal().as_money();
    let mut interest_paid = Money::ZERO;
    let mut principal_paid = Money::ZERO;

    for month in 1..=months_elapsed {
        if balance <= Money::ZERO {
            break;
        }
        if month > ceiling {
            return Err(EngineError::EndlessLoopDetected { iterations: ceiling });
        }

        let extra = extra_payments.amount_for(month);
        let outcome = advance_month(balance, monthly_factor, payment, extra, month)?;
        interest_paid += outcome.interest;
        principal_paid += outcome.principal;
        balance = outcome.ending_balance;
    }

    if balance <= Money::ZERO {
        return Ok(BalanceSnapshot {
            current_balance: Money::ZERO,
            months_elapsed,
            remaining_payments: 0,
            remaining_interest: Money::ZERO,
            interest_paid_to_date: interest_paid,
            principal_paid_to_date: principal_paid,
        });
    }

    let remaining_payments = remaining_payment_count(balance, monthly_factor, payment)?;
    let remaining_interest =
        remaining_interest(balance, monthly_factor, payment, months_elapsed, ceiling)?;

    Ok(BalanceSnapshot {
        current_balance: balance,
        months_elapsed,
        remaining_payments,
        remaining_interest,
        interest_paid_to_date: interest_paid,
        principal_paid_to_date: principal_paid,
    })
}

/// closed-form annuity inversion: n = -ln(1 - B*r/A) / ln(1 + r),
/// ceiling-rounded to whole months. a log argument at or below zero means
/// the payment can never cover the interest on the balance.
fn remaining_payment_count(balance: Money, monthly_factor: Decimal, payment: Money) -> Result<u32> {
    if balance <= Money::ZERO {
        return Ok(0);
    }

    if monthly_factor.is_zero() {
        let count = (balance.as_decimal() / payment.as_decimal()).ceil();
        return Ok(count.to_u32().unwrap_or(u32::MAX));
    }

    let argument = Decimal::ONE - balance.as_decimal() * monthly_factor / payment.as_decimal();
    if argument <= Decimal::ZERO {
        return Err(EngineError::NonAmortizing {
            month: 0,
            payment,
            interest_due: Money::from_decimal(balance.as_decimal() * monthly_factor),
        });
    }

    let count = -argument.ln() / (Decimal::ONE + monthly_factor).ln();
    Ok(count.ceil().to_u32().unwrap_or(u32::MAX))
}

/// interest still to be paid: continue the shared step to payoff,
/// regular payments only
fn remaining_interest(
    balance: Money,
    monthly_factor: Decimal,
    payment: Money,
    months_elapsed: u32,
    ceiling: u32,
) -> Result<Money> {
    let mut balance = balance;
    let mut interest = Money::ZERO;
    let mut steps = 0u32;

    while balance > Money::ZERO {
        steps += 1;
        if steps > ceiling {
            return Err(EngineError::EndlessLoopDetected { iterations: ceiling });
        }

        let outcome = advance_month(
            balance,
            monthly_factor,
            payment,
            Money::ZERO,
            months_elapsed + steps,
        )?;
        interest += outcome.interest;
        balance = outcome.ending_balance;
    }

    Ok(interest)
}
