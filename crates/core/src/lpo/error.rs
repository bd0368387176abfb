//! LPO error types.

use cdc_budget_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while pricing an LPO.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LpoError {
    /// A price or quantity was negative.
    #[error("{field} cannot be negative: {amount}")]
    NegativeAmount {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        amount: Decimal,
    },

    /// An amount or percentage does not fit in a decimal.
    #[error("{operation} overflows")]
    AmountOverflow {
        /// The calculation that overflowed.
        operation: &'static str,
    },
}

impl LpoError {
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
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
        }
    }
}

impl From<LpoError> for AppError {
    fn from(err: LpoError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_amount_error() {
        let err = LpoError::NegativeAmount {
            field: "quantity",
            amount: dec!(-2),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "NEGATIVE_AMOUNT");
        assert_eq!(err.to_string(), "quantity cannot be negative: -2");

        let app: AppError = err.into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }
}
