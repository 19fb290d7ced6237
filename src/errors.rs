use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal::Money;

/// why a value failed range or format validation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationFailure {
    #[error("below minimum: minimum {minimum}, provided {provided}")]
    BelowMinimum {
        minimum: Decimal,
        provided: Decimal,
    },

    #[error("above maximum: maximum {maximum}, provided {provided}")]
    AboveMaximum {
        maximum: Decimal,
        provided: Decimal,
    },

    #[error("invalid number: {detail}")]
    InvalidNumber {
        detail: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid input for {field}: {failure}")]
    InvalidInput {
        field: &'static str,
        failure: ValidationFailure,
    },

    /// month 0 means the configuration was rejected before any month was simulated
    #[error("non-amortizing configuration: at month {month} payment {payment} does not exceed interest due {interest_due}")]
    NonAmortizing {
        month: u32,
        payment: Money,
        interest_due: Money,
    },

    #[error("endless loop detected: simulation exceeded {iterations} iterations")]
    EndlessLoopDetected {
        iterations: u32,
    },

    #[error("policy violation: extra payments of {requested} in loan year {year} exceed annual cap {cap}")]
    PolicyViolation {
        year: u32,
        cap: Money,
        requested: Money,
    },
}

impl EngineError {
    pub(crate) fn invalid_input(field: &'static str, failure: ValidationFailure) -> Self {
        EngineError::InvalidInput { field, failure }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
