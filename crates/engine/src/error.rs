//! The module contains the errors the engine can return.
//!
//! Balance computation itself never fails: only parsing amounts and
//! validating expenses at the data-entry boundary do.
//!
//! - [`InvalidAmount`] returned when a money amount cannot be parsed.
//! - [`InvalidExpense`] returned when an expense draft is rejected.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidExpense`]: EngineError::InvalidExpense
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}
