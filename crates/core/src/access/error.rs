//! Access control error types.

use cdc_budget_shared::AppError;
use thiserror::Error;

/// Errors raised by role and permission lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The role code is not present in the role table.
    #[error("Unknown role code: {0}")]
    UnknownRole(i32),

    /// Two roles were declared with the same code.
    #[error("Duplicate role code: {0}")]
    DuplicateRole(i32),
}

impl AccessError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnknownRole(_) => 403,
            Self::DuplicateRole(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::DuplicateRole(_) => "DUPLICATE_ROLE",
        }
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::UnknownRole(_) => Self::Forbidden(err.to_string()),
            AccessError::DuplicateRole(_) => Self::Internal(err.to_string()),
        }
    }
}
