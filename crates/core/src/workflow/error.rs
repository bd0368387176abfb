//! Workflow error types for requisition and LPO lifecycles.

use cdc_budget_shared::AppError;
use thiserror::Error;

use crate::access::AccessError;

/// Errors that can occur during workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The action is not allowed from the current status.
    #[error("Cannot {action} from status {from}")]
    InvalidTransition {
        /// The current status.
        from: String,
        /// The attempted action.
        action: &'static str,
    },

    /// The acting role lacks the permission the action requires.
    #[error("Role {role_code} lacks permission {permission}")]
    MissingPermission {
        /// The acting role.
        role_code: i32,
        /// The required permission.
        permission: &'static str,
    },

    /// A reason is required but was blank.
    #[error("A reason is required to {action}")]
    ReasonRequired {
        /// The attempted action.
        action: &'static str,
    },

    /// The acting role is not in the role table.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::ReasonRequired { .. } => 400,
            Self::MissingPermission { .. } => 403,
            Self::Access(err) => err.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::MissingPermission { .. } => "MISSING_PERMISSION",
            Self::ReasonRequired { .. } => "REASON_REQUIRED",
            Self::Access(err) => err.error_code(),
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidTransition { .. } => Self::BusinessRule(err.to_string()),
            WorkflowError::ReasonRequired { .. } => Self::Validation(err.to_string()),
            WorkflowError::MissingPermission { .. } => Self::Forbidden(err.to_string()),
            WorkflowError::Access(inner) => inner.into(),
        }
    }
}
