//! Pricing-related error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while computing prices and payouts.
///
/// Degenerate inputs are rejected up front so no formula can divide by zero
/// or hand back a nonsensical amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Student count must be at least 1, got {0}")]
    InvalidStudentCount(i32),

    #[error("Hour count must be at least 1, got {0}")]
    InvalidHours(i32),

    #[error("'{field}' must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("Target margin must lie in [0, 100), got {0}")]
    MarginOutOfRange(Decimal),

    #[error("Price step must be positive, got {0}")]
    InvalidStep(Decimal),
}
