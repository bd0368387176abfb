//! Property-based tests for role lookups and menu filtering.

use proptest::prelude::*;

use crate::access::menu::MenuItem;
use crate::access::role::{RoleTable, permission};
use crate::access::{AccessError, filter_menu, has_permission};

const PERMISSION_POOL: &[&str] = &[
    permission::MANAGE_USERS,
    permission::VIEW_BUDGETS,
    permission::CREATE_REQUISITIONS,
    permission::VIEW_LPOS,
    permission::CREATE_LPOS,
    permission::VIEW_REPORTS,
    permission::VIEW_LPO_REPORTS,
    permission::MANAGE_ROLES,
    "",
    "view:lpos",
];

fn arb_permission() -> impl Strategy<Value = String> {
    prop::sample::select(PERMISSION_POOL).prop_map(str::to_string)
}

fn arb_sub_item() -> impl Strategy<Value = MenuItem> {
    (
        "[A-Z][a-z]{2,8}",
        prop::collection::vec(arb_permission(), 0..3),
    )
        .prop_map(|(title, permissions)| MenuItem::new(title, permissions))
}

fn arb_menu() -> impl Strategy<Value = Vec<MenuItem>> {
    prop::collection::vec(
        (
            "[A-Z][a-z]{2,8}",
            prop::collection::vec(arb_permission(), 0..3),
            prop::collection::vec(arb_sub_item(), 0..4),
        )
            .prop_map(|(title, permissions, items)| {
                MenuItem::new(title, permissions).with_items(items)
            }),
        0..8,
    )
    .prop_map(|mut menu| {
        // Make titles unique so retained entries can be traced back.
        for (i, item) in menu.iter_mut().enumerate() {
            item.title = format!("{}{i}", item.title);
            for (j, sub) in item.items.iter_mut().enumerate() {
                sub.title = format!("{}{j}", sub.title);
            }
        }
        menu
    })
}

fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// has_permission is literal membership in the role's permission list
    #[test]
    fn prop_has_permission_is_membership(
        code in 1i32..=6,
        perm in arb_permission(),
    ) {
        let role = RoleTable::standard().get(code).unwrap();
        let expected = role.permissions().iter().any(|p| *p == perm);
        prop_assert_eq!(has_permission(code, &perm).unwrap(), expected);
    }

    /// Codes outside the table always fail, never return false
    #[test]
    fn prop_unknown_codes_fail(
        code in prop_oneof![i32::MIN..=0, 7i32..=i32::MAX],
        perm in arb_permission(),
    ) {
        prop_assert_eq!(has_permission(code, &perm), Err(AccessError::UnknownRole(code)));
    }

    /// Filtering for one role never changes the result for another
    #[test]
    fn prop_filter_is_order_independent(
        menu in arb_menu(),
        a in 1i32..=6,
        b in 1i32..=6,
    ) {
        let snapshot = menu.clone();

        let a_then_b = (filter_menu(&menu, a).unwrap(), filter_menu(&menu, b).unwrap());
        let b_then_a = (filter_menu(&menu, b).unwrap(), filter_menu(&menu, a).unwrap());

        prop_assert_eq!(&a_then_b.0, &b_then_a.1);
        prop_assert_eq!(&a_then_b.1, &b_then_a.0);
        prop_assert_eq!(menu, snapshot);
    }

    /// Retained entries keep their declaration order at every level
    #[test]
    fn prop_filter_preserves_order(menu in arb_menu(), code in 1i32..=6) {
        let filtered = filter_menu(&menu, code).unwrap();

        let original: Vec<String> = menu.iter().map(|i| i.title.clone()).collect();
        let kept: Vec<String> = filtered.iter().map(|i| i.title.clone()).collect();
        prop_assert!(is_subsequence(&kept, &original));

        for item in &filtered {
            let origin = menu.iter().find(|m| m.title == item.title).unwrap();
            let original_sub: Vec<String> = origin.items.iter().map(|i| i.title.clone()).collect();
            let kept_sub: Vec<String> = item.items.iter().map(|i| i.title.clone()).collect();
            prop_assert!(is_subsequence(&kept_sub, &original_sub));
        }
    }
}
