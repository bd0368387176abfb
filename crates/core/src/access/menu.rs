//! Navigation menu and per-role filtering.
//!
//! The navigation tree is static configuration shared by every session.
//! Filtering never touches it; each call builds a fresh tree.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::access::error::AccessError;
use crate::access::role::{Role, RoleTable, permission};

/// A navigation or action entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display title, unique within its level.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Icon name, top-level entries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Any-of permission requirement. An empty string means "no permission required".
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Sub-items in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MenuItem>,
}

impl MenuItem {
    /// Creates an entry with the given any-of permission requirement.
    pub fn new<I, S>(title: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            url: "#".to_string(),
            icon: None,
            permissions: permissions.into_iter().map(Into::into).collect(),
            items: Vec::new(),
        }
    }

    /// Sets the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the sub-items.
    #[must_use]
    pub fn with_items(mut self, items: Vec<MenuItem>) -> Self {
        self.items = items;
        self
    }

    // TODO: confirm with stakeholders whether `''` should really open an entry to every role.
    fn is_unrestricted(&self) -> bool {
        self.permissions.iter().any(String::is_empty)
    }

    fn own_permissions_match(&self, role: &Role) -> bool {
        self.is_unrestricted() || role.grants_any(&self.permissions)
    }

    /// A sub-item with no requirement list is always visible.
    fn sub_item_visible(&self, role: &Role) -> bool {
        self.permissions.is_empty() || self.own_permissions_match(role)
    }
}

/// Filters sub-items at any depth below the top level.
fn filter_sub_items(items: &[MenuItem], role: &Role) -> Vec<MenuItem> {
    items
        .iter()
        .filter_map(|item| {
            let children = filter_sub_items(&item.items, role);
            (item.sub_item_visible(role) || !children.is_empty()).then(|| MenuItem {
                items: children,
                ..shallow_clone(item)
            })
        })
        .collect()
}

/// Copies an entry without its children.
fn shallow_clone(item: &MenuItem) -> MenuItem {
    MenuItem {
        title: item.title.clone(),
        url: item.url.clone(),
        icon: item.icon.clone(),
        permissions: item.permissions.clone(),
        items: Vec::new(),
    }
}

/// Returns the entries of `menu` visible to `role`, preserving declaration order.
///
/// A top-level entry is kept if the role holds one of its permissions or if
/// any of its sub-items survives filtering.
#[must_use]
pub fn filter_menu_for_role(menu: &[MenuItem], role: &Role) -> Vec<MenuItem> {
    menu.iter()
        .filter_map(|item| {
            let children = filter_sub_items(&item.items, role);
            (item.own_permissions_match(role) || !children.is_empty()).then(|| MenuItem {
                items: children,
                ..shallow_clone(item)
            })
        })
        .collect()
}

impl RoleTable {
    /// Filters `menu` for the role with `code`.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UnknownRole` if the code is not in the table.
    pub fn filter_menu(&self, menu: &[MenuItem], code: i32) -> Result<Vec<MenuItem>, AccessError> {
        let role = self.get(code)?;
        let filtered = filter_menu_for_role(menu, role);
        tracing::debug!(
            role_code = code,
            visible = filtered.len(),
            total = menu.len(),
            "filtered navigation menu"
        );
        Ok(filtered)
    }
}

static DEFAULT_NAVIGATION: Lazy<Vec<MenuItem>> = Lazy::new(|| {
    use permission::*;

    vec![
        MenuItem::new("Budgets", [VIEW_BUDGETS, ""])
            .with_icon("book-check")
            .with_items(vec![
                MenuItem::new("Create New Budget", [CREATE_BUDGETS]),
                MenuItem::new("View Budgets", [VIEW_BUDGETS]),
            ]),
        MenuItem::new("Requisitions", [VIEW_REQUISITIONS])
            .with_icon("inbox")
            .with_items(vec![
                MenuItem::new("Create New Requisition", [CREATE_REQUISITIONS]),
                MenuItem::new("View Requisitions", [VIEW_REQUISITIONS]),
            ]),
        MenuItem::new("Local Purchase Orders", [VIEW_LPOS])
            .with_icon("hand-coins")
            .with_items(vec![
                MenuItem::new("Create New LPO", [CREATE_LPOS, VIEW_FORWARDED_REQUISITIONS]),
                MenuItem::new("View LPOs", [VIEW_LPOS]),
            ]),
        MenuItem::new("Reports", [VIEW_REPORTS])
            .with_icon("search")
            .with_items(vec![
                MenuItem::new("View LPO Reports", [VIEW_LPO_REPORTS]),
                MenuItem::new("View Expenditure Reports", [VIEW_EXPENDITURE_REPORTS]),
            ]),
        MenuItem::new("Groups", [MANAGE_GROUPS])
            .with_icon("group")
            .with_items(vec![
                MenuItem::new("Create New Group", [MANAGE_GROUPS]),
                MenuItem::new("View Groups", [MANAGE_GROUPS]),
            ]),
        MenuItem::new("Estates", [MANAGE_ESTATES])
            .with_icon("home")
            .with_items(vec![
                MenuItem::new("Create New Estate", [MANAGE_ESTATES]),
                MenuItem::new("View Estates", [MANAGE_ESTATES]),
            ]),
        MenuItem::new("Cost Centers", [MANAGE_COST_CENTERS])
            .with_icon("calendar")
            .with_items(vec![
                MenuItem::new("Create New Cost Center", [MANAGE_COST_CENTERS]),
                MenuItem::new("View Cost Centers", [MANAGE_COST_CENTERS]),
            ]),
        MenuItem::new("Cost Units", [MANAGE_COST_CENTERS])
            .with_icon("calendar")
            .with_items(vec![
                MenuItem::new("Create New Cost Unit", [MANAGE_COST_UNITS]),
                MenuItem::new("View Cost Units", [MANAGE_COST_UNITS]),
            ]),
        MenuItem::new("Roles", [MANAGE_ROLES])
            .with_icon("settings")
            .with_items(vec![
                MenuItem::new("Create New Role", [MANAGE_ROLES]),
                MenuItem::new("View Roles", [MANAGE_ROLES]),
            ]),
        MenuItem::new("Manage Users", [MANAGE_USERS])
            .with_icon("users")
            .with_items(vec![
                MenuItem::new("Create New User", [MANAGE_USERS]),
                MenuItem::new("View Users", [MANAGE_USERS]),
                MenuItem::new("Password Reset Requests", [MANAGE_USERS]),
            ]),
    ]
});

/// The application's navigation tree.
#[must_use]
pub fn default_navigation() -> &'static [MenuItem] {
    &DEFAULT_NAVIGATION
}
