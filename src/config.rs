use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::values::{InterestRate, LoanAmount, MonthCount, MonthlyPayment};

/// immutable loan terms, validated on construction.
///
/// the amortization precondition (payment must exceed the first month's
/// interest) is enforced here so a hopeless configuration is rejected
/// before any simulation runs, never discovered by looping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanConfiguration {
    principal: LoanAmount,
    annual_rate: InterestRate,
    term_months: MonthCount,
    monthly_payment: MonthlyPayment,
}

impl LoanConfiguration {
    pub fn new(
        principal: LoanAmount,
        annual_rate: InterestRate,
        term_months: MonthCount,
        monthly_payment: MonthlyPayment,
    ) -> Result<Self> {
        let config = Self {
            principal,
            annual_rate,
            term_months,
            monthly_payment,
        };
        config.check_amortizes()?;
        Ok(config)
    }

    /// boundary constructor for callers holding raw numbers (UI forms, APIs)
    pub fn from_f64(
        principal: f64,
        annual_rate_percent: f64,
        term_months: u32,
        monthly_payment: f64,
    ) -> Result<Self> {
        Self::new(
            LoanAmount::try_from_f64(principal)?,
            InterestRate::try_from_f64(annual_rate_percent)?,
            MonthCount::try_from_u32(term_months)?,
            MonthlyPayment::try_from_f64(monthly_payment)?,
        )
    }

    pub fn principal(&self) -> LoanAmount {
        self.principal
    }

    pub fn annual_rate(&self) -> InterestRate {
        self.annual_rate
    }

    pub fn term_months(&self) -> MonthCount {
        self.term_months
    }

    pub fn monthly_payment(&self) -> MonthlyPayment {
        self.monthly_payment
    }

    /// monthly rate factor, nominal convention
    pub fn monthly_factor(&self) -> Decimal {
        self.annual_rate.monthly_factor()
    }

    /// interest charged in the first month, on the full principal
    pub fn first_month_interest(&self) -> Money {
        Money::from_decimal(self.principal.as_decimal() * self.monthly_factor())
    }

    /// re-validate every field plus the amortization precondition.
    ///
    /// `new` already guarantees this; the engine calls it again because a
    /// configuration can arrive through deserialization, which bypasses
    /// the constructors.
    pub fn validate(&self) -> Result<()> {
        LoanAmount::try_from_decimal(self.principal.as_decimal())?;
        InterestRate::try_from_decimal(self.annual_rate.as_decimal())?;
        MonthCount::try_from_u32(self.term_months.as_u32())?;
        MonthlyPayment::try_from_decimal(self.monthly_payment.as_decimal())?;
        self.check_amortizes()
    }

    fn check_amortizes(&self) -> Result<()> {
        let interest_due = self.first_month_interest();
        if self.monthly_payment.as_money() <= interest_due {
            return Err(EngineError::NonAmortizing {
                month: 0,
                payment: self.monthly_payment.as_money(),
                interest_due,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_configuration() {
        let config = LoanConfiguration::from_f64(50_000.0, 5.0, 60, 1_000.0).unwrap();
        assert_eq!(config.principal().as_decimal(), dec!(50000));
        assert_eq!(config.term_months().as_u32(), 60);
        assert_eq!(config.first_month_interest(), Money::from_str_exact("208.33").unwrap());
    }

    #[test]
    fn test_payment_must_exceed_first_month_interest() {
        // 100,000 at 6% accrues 500/month; a 500 payment never amortizes
        let err = LoanConfiguration::from_f64(100_000.0, 6.0, 120, 500.0).unwrap_err();
        assert!(matches!(err, EngineError::NonAmortizing { month: 0, .. }));

        // one cent above the interest charge is accepted
        assert!(LoanConfiguration::from_f64(100_000.0, 6.0, 120, 500.01).is_ok());
    }

    #[test]
    fn test_invalid_field_propagates() {
        assert!(matches!(
            LoanConfiguration::from_f64(500.0, 5.0, 60, 1_000.0),
            Err(EngineError::InvalidInput { field: "principal", .. })
        ));
        assert!(LoanConfiguration::from_f64(50_000.0, -1.0, 60, 1_000.0).is_err());
        assert!(LoanConfiguration::from_f64(50_000.0, 5.0, 0, 1_000.0).is_err());
        assert!(LoanConfiguration::from_f64(50_000.0, 5.0, 60, 0.0).is_err());
    }

    #[test]
    fn test_deserialized_configuration_can_be_revalidated() {
        // serde bypasses the constructors, validate() catches the damage
        let json = r#"{
            "principal": "0",
            "annual_rate": "5",
            "term_months": 60,
            "monthly_payment": "500"
        }"#;
        let config: LoanConfiguration = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidInput { field: "principal", .. })
        ));

        let good = LoanConfiguration::from_f64(50_000.0, 5.0, 60, 1_000.0).unwrap();
        let round_tripped: LoanConfiguration =
            serde_json::from_str(&serde_json::to_string(&good).unwrap()).unwrap();
        assert_eq!(round_tripped, good);
        assert!(round_tripped.validate().is_ok());
    }
}
