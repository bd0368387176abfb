//! Workflow service for requisition and LPO status transitions.
//!
//! Every transition is gated on a permission, never on a raw role code.

use cdc_budget_shared::types::BudgetLineId;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::access::{Role, RoleTable};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{
    LpoAction, LpoStatus, RequisitionAction, RequisitionRecord, RequisitionStatus, Transition,
    TransitionRecord,
};

/// Stateless service for workflow transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Apply `action` to an entity in status `from` on behalf of `role`.
    ///
    /// Checks, in order: the role holds the required permission, a reason
    /// is present when mandatory, the action is valid from `from`.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::MissingPermission` if the role lacks the permission
    /// * `WorkflowError::ReasonRequired` if a mandatory note is blank
    /// * `WorkflowError::InvalidTransition` if the action is not allowed from `from`
    pub fn apply<A: Transition>(
        from: A::Status,
        action: A,
        role: &Role,
        note: Option<&str>,
    ) -> Result<TransitionRecord<A::Status>, WorkflowError> {
        let permission = action.required_permission();
        if !role.grants(permission) {
            tracing::warn!(
                role_code = role.code,
                action = action.name(),
                permission,
                "transition denied"
            );
            return Err(WorkflowError::MissingPermission {
                role_code: role.code,
                permission,
            });
        }

        let note = note.map(str::trim).filter(|n| !n.is_empty());
        if action.requires_reason() && note.is_none() {
            return Err(WorkflowError::ReasonRequired {
                action: action.name(),
            });
        }

        let Some(to) = action.next(from) else {
            tracing::warn!(
                from = %from,
                action = action.name(),
                "invalid status transition"
            );
            return Err(WorkflowError::InvalidTransition {
                from: from.to_string(),
                action: action.name(),
            });
        };

        tracing::debug!(from = %from, to = %to, action = action.name(), "status transition");

        Ok(TransitionRecord {
            from,
            to,
            action: action.name(),
            performed_by_role: role.code,
            performed_at: Utc::now(),
            note: note.map(str::to_string),
        })
    }

    /// Apply a requisition action for the standard role `role_code`.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Access` for unknown role codes, otherwise as `apply`.
    pub fn transition_requisition(
        from: RequisitionStatus,
        action: RequisitionAction,
        role_code: i32,
        note: Option<&str>,
    ) -> Result<TransitionRecord<RequisitionStatus>, WorkflowError> {
        let role = RoleTable::standard().get(role_code)?;
        Self::apply(from, action, role, note)
    }

    /// Apply an LPO action for the standard role `role_code`.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Access` for unknown role codes, otherwise as `apply`.
    pub fn transition_lpo(
        from: LpoStatus,
        action: LpoAction,
        role_code: i32,
        note: Option<&str>,
    ) -> Result<TransitionRecord<LpoStatus>, WorkflowError> {
        let role = RoleTable::standard().get(role_code)?;
        Self::apply(from, action, role, note)
    }

    /// Actions `role` may take on an entity in status `from`, in declaration order.
    #[must_use]
    pub fn available_actions<A: Transition>(
        actions: &[A],
        from: A::Status,
        role: &Role,
    ) -> Vec<A> {
        actions
            .iter()
            .copied()
            .filter(|a| role.grants(a.required_permission()) && a.next(from).is_some())
            .collect()
    }

    /// Amounts of approved or forwarded requisitions against `budget_line_id`.
    #[must_use]
    pub fn committed_amounts(
        records: &[RequisitionRecord],
        budget_line_id: BudgetLineId,
    ) -> Vec<Decimal> {
        records
            .iter()
            .filter(|r| r.budget_line_id == budget_line_id && r.status.is_committed())
            .map(|r| r.amount)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::role_code;
    use cdc_budget_shared::types::RequisitionId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_manager_approves_pending_requisition() {
        let record = WorkflowService::transition_requisition(
            RequisitionStatus::Pending,
            RequisitionAction::Approve,
            role_code::GROUP_MANAGER,
            None,
        )
        .unwrap();
        assert_eq!(record.from, RequisitionStatus::Pending);
        assert_eq!(record.to, RequisitionStatus::Approved);
        assert_eq!(record.action, "approve");
        assert_eq!(record.performed_by_role, role_code::GROUP_MANAGER);
        assert_eq!(record.note, None);
    }

    #[test]
    fn test_reject_requires_reason() {
        let err = WorkflowService::transition_requisition(
            RequisitionStatus::Pending,
            RequisitionAction::Reject,
            role_code::MANAGING_CONTROLLER,
            Some("   "),
        )
        .unwrap_err();
        assert_eq!(err, WorkflowError::ReasonRequired { action: "reject" });

        let record = WorkflowService::transition_requisition(
            RequisitionStatus::Pending,
            RequisitionAction::Reject,
            role_code::MANAGING_CONTROLLER,
            Some("  Over quota "),
        )
        .unwrap();
        assert_eq!(record.to, RequisitionStatus::Rejected);
        assert_eq!(record.note.as_deref(), Some("Over quota"));
    }

    #[test]
    fn test_supplies_manager_cannot_approve_requisitions() {
        let err = WorkflowService::transition_requisition(
            RequisitionStatus::Pending,
            RequisitionAction::Approve,
            role_code::SUPPLIES_MANAGER,
            None,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "MISSING_PERMISSION");
    }

    #[test]
    fn test_supplies_manager_raises_lpo_from_forwarded() {
        let record = WorkflowService::transition_requisition(
            RequisitionStatus::Forwarded,
            RequisitionAction::RaiseLpo,
            role_code::SUPPLIES_MANAGER,
            None,
        )
        .unwrap();
        assert_eq!(record.to, RequisitionStatus::Completed);

        let err = WorkflowService::transition_requisition(
            RequisitionStatus::Approved,
            RequisitionAction::RaiseLpo,
            role_code::SUPPLIES_MANAGER,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            WorkflowError::InvalidTransition {
                from: "Approved".to_string(),
                action: "raise_lpo",
            }
        );
    }

    #[test]
    fn test_lpo_lifecycle() {
        let approved = WorkflowService::transition_lpo(
            LpoStatus::Pending,
            LpoAction::Approve,
            role_code::HOMC,
            Some("ok"),
        )
        .unwrap();
        assert_eq!(approved.to, LpoStatus::Approved);

        let completed = WorkflowService::transition_lpo(
            approved.to,
            LpoAction::Complete,
            role_code::ADMIN,
            None,
        )
        .unwrap();
        assert_eq!(completed.to, LpoStatus::Completed);

        let err = WorkflowService::transition_lpo(
            completed.to,
            LpoAction::Cancel,
            role_code::ADMIN,
            None,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
    }

    #[test]
    fn test_only_admin_and_homc_manage_lpos() {
        for code in 1..=6 {
            let result =
                WorkflowService::transition_lpo(LpoStatus::Pending, LpoAction::Approve, code, None);
            let expected = code == role_code::ADMIN || code == role_code::HOMC;
            assert_eq!(result.is_ok(), expected, "role {code}");
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = WorkflowService::transition_lpo(LpoStatus::Pending, LpoAction::Approve, 99, None)
            .unwrap_err();
        assert_eq!(
            err,
            WorkflowError::Access(crate::access::AccessError::UnknownRole(99))
        );
    }

    #[test]
    fn test_available_actions() {
        let homc = RoleTable::standard().get(role_code::HOMC).unwrap();
        assert_eq!(
            WorkflowService::available_actions(&LpoAction::ALL, LpoStatus::Approved, homc),
            vec![LpoAction::Complete, LpoAction::Cancel]
        );

        let estate_manager = RoleTable::standard()
            .get(role_code::ESTATE_MANAGER)
            .unwrap();
        assert_eq!(
            WorkflowService::available_actions(
                &RequisitionAction::ALL,
                RequisitionStatus::Pending,
                estate_manager
            ),
            vec![
                RequisitionAction::Approve,
                RequisitionAction::Reject,
                RequisitionAction::Cancel
            ]
        );
        assert!(
            WorkflowService::available_actions(&LpoAction::ALL, LpoStatus::Pending, estate_manager)
                .is_empty()
        );
    }

    #[test]
    fn test_committed_amounts() {
        let line = BudgetLineId::new();
        let other = BudgetLineId::new();
        let record = |budget_line_id, status, amount| RequisitionRecord {
            id: RequisitionId::new(),
            budget_line_id,
            status,
            amount,
        };
        let records = vec![
            record(line, RequisitionStatus::Approved, dec!(100)),
            record(line, RequisitionStatus::Pending, dec!(200)),
            record(line, RequisitionStatus::Forwarded, dec!(300)),
            record(other, RequisitionStatus::Approved, dec!(400)),
            record(line, RequisitionStatus::Completed, dec!(500)),
        ];

        assert_eq!(
            WorkflowService::committed_amounts(&records, line),
            vec![dec!(100), dec!(300)]
        );
    }
}
