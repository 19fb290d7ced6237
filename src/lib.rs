pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod plan;
pub mod policy;
pub mod projection;
pub mod serialization;
pub mod values;

// re-export key types
pub use config::LoanConfiguration;
pub use decimal::{Money, Rate};
pub use engine::{simulate, AmortizationSchedule, ScheduleEntry};
pub use errors::{EngineError, Result, ValidationFailure};
pub use plan::ExtraPaymentPlan;
pub use policy::validate_sondertilgung_plan;
pub use projection::{project_balance, BalanceSnapshot};
pub use serialization::{LoanView, ScheduleView, SnapshotView, SummaryView};
pub use values::{InterestRate, LoanAmount, MonthCount, MonthlyPayment};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
