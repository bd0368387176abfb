//! Budget error types.

use cdc_budget_shared::AppError;
use cdc_budget_shared::types::BudgetLineId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Budget input validation errors.
///
/// Every variant is raised before any computation runs; nothing is
/// coerced to zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// An amount that must be non-negative was negative.
    #[error("{field} cannot be negative: {amount}")]
    NegativeAmount {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected amount.
        amount: Decimal,
    },

    /// An amount arrived as NaN or infinity.
    #[error("{field} must be a finite number")]
    NonFiniteAmount {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The budget line has no total budgeted amount.
    #[error("Budget line {0} has no total budgeted amount")]
    MissingTotalBudget(BudgetLineId),

    /// A month outside 1..=12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// The same month appears twice in a budget line's phasing.
    #[error("Month {0} appears more than once in the monthly phasing")]
    DuplicateMonth(u32),

    /// An intermediate amount does not fit in a decimal.
    #[error("{operation} overflows")]
    AmountOverflow {
        /// The calculation that overflowed.
        operation: &'static str,
    },
}

impl BudgetError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::NonFiniteAmount { .. } => "NON_FINITE_AMOUNT",
            Self::MissingTotalBudget(_) => "MISSING_TOTAL_BUDGET",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::DuplicateMonth(_) => "DUPLICATE_MONTH",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_amount_error() {
        let err = BudgetError::NegativeAmount {
            field: "candidate_amount",
            amount: dec!(-5),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "NEGATIVE_AMOUNT");
        assert_eq!(err.to_string(), "candidate_amount cannot be negative: -5");
    }

    #[test]
    fn test_amount_overflow_error() {
        let err = BudgetError::AmountOverflow {
            operation: "committed total",
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "AMOUNT_OVERFLOW");
        assert_eq!(err.to_string(), "committed total overflows");
    }

    #[test]
    fn test_into_app_error_is_validation() {
        let app: AppError = BudgetError::InvalidMonth(13).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
        assert_eq!(app.to_string(), "Validation error: Invalid month: 13");
    }
}
