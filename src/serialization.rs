/// serialization boundary for presentation layers: flat json-friendly
/// views over the engine's results, so tables and charts consume plain
/// records instead of engine types
use serde::{Deserialize, Serialize};

use crate::config::LoanConfiguration;
use crate::decimal::{Money, Rate};
use crate::engine::{AmortizationSchedule, ScheduleEntry};
use crate::projection::BalanceSnapshot;

/// serializable view of a simulated schedule with its loan terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub loan: LoanView,
    pub summary: SummaryView,
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanView {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub monthly_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub months_to_payoff: u32,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_extra: Money,
    pub final_balance: Money,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &AmortizationSchedule, config: &LoanConfiguration) -> Self {
        ScheduleView {
            loan: LoanView {
                principal: config.principal().as_money(),
                annual_rate: config.annual_rate().as_rate(),
                term_months: config.term_months().as_u32(),
                monthly_payment: config.monthly_payment().as_money(),
            },
            summary: SummaryView {
                months_to_payoff: schedule.months(),
                total_interest: schedule.total_interest(),
                total_principal: schedule.total_principal(),
                total_extra: schedule.total_extra(),
                final_balance: schedule.final_balance(),
            },
            entries: schedule.entries().to_vec(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// serializable view of a point-in-time balance snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotView {
    pub current_balance: Money,
    pub months_elapsed: u32,
    pub remaining_payments: u32,
    pub remaining_interest: Money,
    pub interest_paid_to_date: Money,
    pub principal_paid_to_date: Money,
}

impl SnapshotView {
    pub fn from_snapshot(snapshot: &BalanceSnapshot) -> Self {
        SnapshotView {
            current_balance: snapshot.current_balance,
            months_elapsed: snapshot.months_elapsed,
            remaining_payments: snapshot.remaining_payments,
            remaining_interest: snapshot.remaining_interest,
            interest_paid_to_date: snapshot.interest_paid_to_date,
            principal_paid_to_date: snapshot.principal_paid_to_date,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simulate;
    use crate::plan::ExtraPaymentPlan;
    use crate::projection::project_balance;

    fn scenario() -> (LoanConfiguration, ExtraPaymentPlan) {
        let config = LoanConfiguration::from_f64(50_000.0, 5.0, 60, 1_000.0).unwrap();
        let mut plan = ExtraPaymentPlan::new();
        plan.set(12, Money::from_major(2_000)).unwrap();
        (config, plan)
    }

    #[test]
    fn test_schedule_view_round_trips_through_json() {
        let (config, plan) = scenario();
        let schedule = simulate(&config, &plan).unwrap();
        let view = ScheduleView::from_schedule(&schedule, &config);

        let json = view.to_json_pretty().unwrap();
        let parsed: ScheduleView = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, view);

        // money travels as strings, immune to json float precision
        assert!(json.contains("\"principal\": \"50000\""));
    }

    #[test]
    fn test_schedule_view_summary_matches_schedule() {
        let (config, plan) = scenario();
        let schedule = simulate(&config, &plan).unwrap();
        let view = ScheduleView::from_schedule(&schedule, &config);

        assert_eq!(view.summary.months_to_payoff, schedule.months());
        assert_eq!(view.summary.total_interest, schedule.total_interest());
        assert_eq!(view.summary.final_balance, Money::ZERO);
        assert_eq!(view.entries.len() as u32, schedule.months());
    }

    #[test]
    fn test_snapshot_view_round_trips_through_json() {
        let (config, plan) = scenario();
        let snapshot = project_balance(&config, &plan, 18).unwrap();
        let view = SnapshotView::from_snapshot(&snapshot);

        let json = view.to_json_pretty().unwrap();
        let parsed: SnapshotView = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, view);
    }
}
