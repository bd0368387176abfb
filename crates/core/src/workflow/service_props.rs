//! Property-based tests for WorkflowService.

use proptest::prelude::*;

use crate::access::RoleTable;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{
    LpoAction, LpoStatus, RequisitionAction, RequisitionStatus, Transition,
};

fn arb_requisition_status() -> impl Strategy<Value = RequisitionStatus> {
    prop_oneof![
        Just(RequisitionStatus::Pending),
        Just(RequisitionStatus::Approved),
        Just(RequisitionStatus::Rejected),
        Just(RequisitionStatus::Forwarded),
        Just(RequisitionStatus::Completed),
        Just(RequisitionStatus::Cancelled),
    ]
}

fn arb_lpo_status() -> impl Strategy<Value = LpoStatus> {
    prop_oneof![
        Just(LpoStatus::Pending),
        Just(LpoStatus::Approved),
        Just(LpoStatus::Completed),
        Just(LpoStatus::Cancelled),
    ]
}

fn arb_requisition_action() -> impl Strategy<Value = RequisitionAction> {
    prop::sample::select(RequisitionAction::ALL.to_vec())
}

fn arb_lpo_action() -> impl Strategy<Value = LpoAction> {
    prop::sample::select(LpoAction::ALL.to_vec())
}

fn arb_note() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[ a-z]{0,12}")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A transition succeeds iff permission, reason and state all allow it
    #[test]
    fn prop_requisition_transition_is_fully_gated(
        from in arb_requisition_status(),
        action in arb_requisition_action(),
        code in 1i32..=6,
        note in arb_note(),
    ) {
        let role = RoleTable::standard().get(code).unwrap();
        let result = WorkflowService::apply(from, action, role, note.as_deref());

        let permitted = role.grants(action.required_permission());
        let has_reason = note.as_deref().is_some_and(|n| !n.trim().is_empty());
        let reason_ok = !action.requires_reason() || has_reason;
        let target = action.next(from);

        match result {
            Ok(record) => {
                prop_assert!(permitted && reason_ok);
                prop_assert_eq!(Some(record.to), target);
                prop_assert_eq!(record.from, from);
            }
            Err(WorkflowError::MissingPermission { .. }) => prop_assert!(!permitted),
            Err(WorkflowError::ReasonRequired { .. }) => prop_assert!(permitted && !reason_ok),
            Err(WorkflowError::InvalidTransition { .. }) => {
                prop_assert!(permitted && reason_ok && target.is_none());
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    /// Terminal LPO statuses never move
    #[test]
    fn prop_terminal_lpo_status_is_final(
        from in arb_lpo_status(),
        action in arb_lpo_action(),
    ) {
        let result = WorkflowService::transition_lpo(from, action, 1, None);
        if from.is_terminal() {
            prop_assert!(result.is_err());
        } else if let Ok(record) = result {
            prop_assert_ne!(record.to, from);
        }
    }

    /// Available actions are exactly those apply would accept
    #[test]
    fn prop_available_actions_match_apply(
        from in arb_requisition_status(),
        code in 1i32..=6,
    ) {
        let role = RoleTable::standard().get(code).unwrap();
        let available = WorkflowService::available_actions(&RequisitionAction::ALL, from, role);

        for action in RequisitionAction::ALL {
            let accepted = WorkflowService::apply(from, action, role, Some("reason")).is_ok();
            prop_assert_eq!(available.contains(&action), accepted);
        }
    }
}
