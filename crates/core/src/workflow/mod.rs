//! Requisition and LPO workflow management.
//!
//! Both lifecycles are small state machines. Each action names the
//! permission it needs, so role checks go through the role table rather
//! than hard-coded role codes.
//!
//! # Modules
//!
//! - `types` - Statuses, actions, and transition records
//! - `error` - Workflow-specific error types
//! - `service` - Permission-gated state transitions

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{
    LpoAction, LpoStatus, RequisitionAction, RequisitionRecord, RequisitionStatus, Transition,
    TransitionRecord,
};
