//! Workflow domain types for requisition and LPO lifecycles.

use std::fmt;

use cdc_budget_shared::types::{BudgetLineId, RequisitionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::access::permission;

/// Requisition status.
///
/// The valid transitions are:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
/// - Approved → Forwarded (forward)
/// - Forwarded → Completed (raise LPO)
/// - Pending / Approved / Forwarded → Cancelled (cancel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequisitionStatus {
    /// Raised, awaiting a decision.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Rejected by a manager.
    Rejected,
    /// Forwarded to supplies for purchasing.
    Forwarded,
    /// An LPO has been raised against it.
    Completed,
    /// Withdrawn before completion.
    Cancelled,
}

impl RequisitionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Forwarded => "Forwarded",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "forwarded" => Some(Self::Forwarded),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the amount counts against the budget line.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Approved | Self::Forwarded)
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for RequisitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LPO status.
///
/// The valid transitions are:
/// - Pending → Approved (approve)
/// - Approved → Completed (complete)
/// - Pending / Approved → Cancelled (cancel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LpoStatus {
    /// Raised, awaiting approval.
    Pending,
    /// Approved for purchase.
    Approved,
    /// Goods received.
    Completed,
    /// Withdrawn.
    Cancelled,
}

impl LpoStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for LpoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action that moves an entity from one status to another.
pub trait Transition: Copy + fmt::Debug {
    /// Status type the action operates on.
    type Status: Copy + fmt::Debug + fmt::Display + PartialEq;

    /// Action name for logs and errors.
    fn name(&self) -> &'static str;

    /// Permission the acting role must hold.
    fn required_permission(&self) -> &'static str;

    /// Whether a non-blank note is mandatory.
    fn requires_reason(&self) -> bool {
        false
    }

    /// Target status from `from`, or `None` if the action is not allowed there.
    fn next(&self, from: Self::Status) -> Option<Self::Status>;
}

/// Requisition actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequisitionAction {
    /// Approve a pending requisition.
    Approve,
    /// Reject a pending requisition.
    Reject,
    /// Forward an approved requisition to supplies.
    Forward,
    /// Mark a forwarded requisition as converted into an LPO.
    RaiseLpo,
    /// Cancel an open requisition.
    Cancel,
}

impl RequisitionAction {
    /// Every requisition action.
    pub const ALL: [Self; 5] = [
        Self::Approve,
        Self::Reject,
        Self::Forward,
        Self::RaiseLpo,
        Self::Cancel,
    ];
}

impl Transition for RequisitionAction {
    type Status = RequisitionStatus;

    fn name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Forward => "forward",
            Self::RaiseLpo => "raise_lpo",
            Self::Cancel => "cancel",
        }
    }

    fn required_permission(&self) -> &'static str {
        match self {
            Self::RaiseLpo => permission::CREATE_LPOS,
            Self::Approve | Self::Reject | Self::Forward | Self::Cancel => {
                permission::UPDATE_REQUISITIONS
            }
        }
    }

    fn requires_reason(&self) -> bool {
        matches!(self, Self::Reject)
    }

    fn next(&self, from: RequisitionStatus) -> Option<RequisitionStatus> {
        use RequisitionStatus as S;

        match (self, from) {
            (Self::Approve, S::Pending) => Some(S::Approved),
            (Self::Reject, S::Pending) => Some(S::Rejected),
            (Self::Forward, S::Approved) => Some(S::Forwarded),
            (Self::RaiseLpo, S::Forwarded) => Some(S::Completed),
            (Self::Cancel, S::Pending | S::Approved | S::Forwarded) => Some(S::Cancelled),
            _ => None,
        }
    }
}

/// LPO actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LpoAction {
    /// Approve a pending LPO.
    Approve,
    /// Mark an approved LPO as completed.
    Complete,
    /// Cancel an open LPO.
    Cancel,
}

impl LpoAction {
    /// Every LPO action.
    pub const ALL: [Self; 3] = [Self::Approve, Self::Complete, Self::Cancel];
}

impl Transition for LpoAction {
    type Status = LpoStatus;

    fn name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }

    fn required_permission(&self) -> &'static str {
        permission::APPROVE_LPOS
    }

    fn next(&self, from: LpoStatus) -> Option<LpoStatus> {
        match (self, from) {
            (Self::Approve, LpoStatus::Pending) => Some(LpoStatus::Approved),
            (Self::Complete, LpoStatus::Approved) => Some(LpoStatus::Completed),
            (Self::Cancel, LpoStatus::Pending | LpoStatus::Approved) => Some(LpoStatus::Cancelled),
            _ => None,
        }
    }
}

/// A completed transition with audit data.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRecord<S> {
    /// Status before the action.
    pub from: S,
    /// Status after the action.
    pub to: S,
    /// Action name.
    pub action: &'static str,
    /// Role code of the acting user.
    pub performed_by_role: i32,
    /// When the transition was made.
    pub performed_at: DateTime<Utc>,
    /// Optional comments or reason.
    pub note: Option<String>,
}

/// A requisition as returned by the data-fetch layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequisitionRecord {
    /// Requisition ID.
    pub id: RequisitionId,
    /// Budget line the requisition spends against.
    pub budget_line_id: BudgetLineId,
    /// Current status.
    pub status: RequisitionStatus,
    /// Requested amount.
    pub amount: Decimal,
}
