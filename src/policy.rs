use std::collections::BTreeMap;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result, ValidationFailure};
use crate::plan::ExtraPaymentPlan;
use crate::values::LoanAmount;

/// check a plan against a market's annual extra-payment cap, e.g. the
/// Sondertilgung clause of a german mortgage contract: extras in any loan
/// year (months 1-12, 13-24, ...) may not exceed a percentage of the
/// original principal.
///
/// kept apart from the engine on purpose: the simulation itself is
/// policy-agnostic, callers in markets without such caps never call this.
pub fn validate_sondertilgung_plan(
    plan: &ExtraPaymentPlan,
    principal: LoanAmount,
    annual_cap_percent: Rate,
) -> Result<()> {
    if annual_cap_percent.as_percent() <= rust_decimal::Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "annual_cap_percent",
            ValidationFailure::BelowMinimum {
                minimum: rust_decimal::Decimal::ZERO,
                provided: annual_cap_percent.as_percent(),
            },
        ));
    }

    let cap = principal.as_money().percentage(annual_cap_percent.as_percent());

    let mut by_year: BTreeMap<u32, Money> = BTreeMap::new();
    for (month, amount) in plan.iter() {
        let year = (month - 1) / 12 + 1;
        *by_year.entry(year).or_insert(Money::ZERO) += amount;
    }

    for (year, requested) in by_year {
        if requested > cap {
            return Err(EngineError::PolicyViolation {
                year,
                cap,
                requested,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn principal_200k() -> LoanAmount {
        LoanAmount::try_from_decimal(dec!(200000)).unwrap()
    }

    #[test]
    fn test_empty_plan_passes() {
        let plan = ExtraPaymentPlan::new();
        assert!(validate_sondertilgung_plan(&plan, principal_200k(), Rate::from_percent(dec!(5))).is_ok());
    }

    #[test]
    fn test_at_cap_passes_over_cap_fails() {
        // 5% of 200,000 allows 10,000 per loan year
        let mut plan = ExtraPaymentPlan::new();
        plan.set(3, Money::from_major(6_000)).unwrap();
        plan.set(9, Money::from_major(4_000)).unwrap();
        assert!(validate_sondertilgung_plan(&plan, principal_200k(), Rate::from_percent(dec!(5))).is_ok());

        plan.set(11, Money::from_major(1_000)).unwrap();
        let err = validate_sondertilgung_plan(&plan, principal_200k(), Rate::from_percent(dec!(5)))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::PolicyViolation {
                year: 1,
                cap: Money::from_major(10_000),
                requested: Money::from_major(11_000),
            }
        );
    }

    #[test]
    fn test_cap_applies_per_loan_year() {
        // 10,000 in year one and 10,000 in year two are both within cap
        let mut plan = ExtraPaymentPlan::new();
        plan.set(12, Money::from_major(10_000)).unwrap();
        plan.set(13, Money::from_major(10_000)).unwrap();
        assert!(validate_sondertilgung_plan(&plan, principal_200k(), Rate::from_percent(dec!(5))).is_ok());

        // but 10,001 in year three is not
        plan.set(30, Money::from_major(10_001)).unwrap();
        let err = validate_sondertilgung_plan(&plan, principal_200k(), Rate::from_percent(dec!(5)))
            .unwrap_err();
        assert!(matches!(err, EngineError::PolicyViolation { year: 3, .. }));
    }

    #[test]
    fn test_violation_is_independent_of_simulation() {
        // a plan the engine would happily simulate still violates the cap
        let mut plan = ExtraPaymentPlan::new();
        plan.set(1, Money::from_major(50_000)).unwrap();
        let result = validate_sondertilgung_plan(&plan, principal_200k(), Rate::from_percent(dec!(5)));
        assert!(matches!(result, Err(EngineError::PolicyViolation { year: 1, .. })));
    }

    #[test]
    fn test_nonpositive_cap_rejected() {
        let plan = ExtraPaymentPlan::new();
        assert!(matches!(
            validate_sondertilgung_plan(&plan, principal_200k(), Rate::ZERO),
            Err(EngineError::InvalidInput { field: "annual_cap_percent", .. })
        ));
    }
}
