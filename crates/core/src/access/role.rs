//! Roles, permissions, and the role table.
//!
//! A role is identified by the integer code carried in the user's token.
//! Each role grants an ordered set of permission strings and a scope that
//! bounds which groups and estates it may act upon.

use std::collections::BTreeMap;
use std::fmt;

use cdc_budget_shared::types::{EstateId, GroupId};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::access::error::AccessError;

/// Permission strings understood by the system.
pub mod permission {
    /// Create, view, and edit user accounts.
    pub const MANAGE_USERS: &str = "manage:users";
    /// Create budgets and import budget lines.
    pub const CREATE_BUDGETS: &str = "create:budgets";
    /// View budgets and budget lines.
    pub const VIEW_BUDGETS: &str = "view:budgets";
    /// Edit budgets.
    pub const UPDATE_BUDGETS: &str = "update:budgets";
    /// Raise requisitions.
    pub const CREATE_REQUISITIONS: &str = "create:requisitions";
    /// View requisitions.
    pub const VIEW_REQUISITIONS: &str = "view:requisitions";
    /// Approve, reject, forward, or cancel requisitions.
    pub const UPDATE_REQUISITIONS: &str = "update:requisitions";
    /// View requisitions forwarded for purchasing.
    pub const VIEW_FORWARDED_REQUISITIONS: &str = "view:forwarded-requisitions";
    /// View reports.
    pub const VIEW_REPORTS: &str = "view:reports";
    /// View local purchase orders.
    pub const VIEW_LPOS: &str = "view:LPOs";
    /// Raise local purchase orders.
    pub const CREATE_LPOS: &str = "create:LPOs";
    /// Edit local purchase orders.
    pub const UPDATE_LPOS: &str = "update:LPOs";
    /// Approve, complete, or cancel local purchase orders.
    pub const APPROVE_LPOS: &str = "approve:LPOs";
    /// View LPO reports.
    pub const VIEW_LPO_REPORTS: &str = "view:LPO-reports";
    /// View expenditure reports.
    pub const VIEW_EXPENDITURE_REPORTS: &str = "view:expenditure-reports";
    /// Manage estates.
    pub const MANAGE_ESTATES: &str = "manage:estates";
    /// Manage groups.
    pub const MANAGE_GROUPS: &str = "manage:groups";
    /// Manage cost centers.
    pub const MANAGE_COST_CENTERS: &str = "manage:cost-centers";
    /// Manage cost units.
    pub const MANAGE_COST_UNITS: &str = "manage:cost-units";
    /// Manage roles.
    pub const MANAGE_ROLES: &str = "manage:roles";
}

/// Role codes of the standard role table.
pub mod role_code {
    /// Admin.
    pub const ADMIN: i32 = 1;
    /// Group Manager.
    pub const GROUP_MANAGER: i32 = 2;
    /// Managing Controller.
    pub const MANAGING_CONTROLLER: i32 = 3;
    /// Estate Manager.
    pub const ESTATE_MANAGER: i32 = 4;
    /// Supplies Manager.
    pub const SUPPLIES_MANAGER: i32 = 5;
    /// Head of Management Control.
    pub const HOMC: i32 = 6;
}

/// Which entities a role may act upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Every group and estate.
    All,
    /// Only the user's own group.
    Group,
    /// Only the user's own estate.
    Estate,
}

impl Scope {
    /// Returns the string representation of the scope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Group => "group",
            Self::Estate => "estate",
        }
    }

    /// Returns true if a user with this scope and `assignment` may act on `target`.
    #[must_use]
    pub fn covers(&self, assignment: &Assignment, target: &ScopeTarget) -> bool {
        match self {
            Self::All => true,
            Self::Group => assignment.group_id == Some(target.group_id),
            Self::Estate => target.estate_id.is_some() && assignment.estate_id == target.estate_id,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The group and estate a user is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The user's group, if any.
    pub group_id: Option<GroupId>,
    /// The user's estate, if any.
    pub estate_id: Option<EstateId>,
}

/// The group and estate an entity (budget, requisition, LPO) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeTarget {
    /// Owning group.
    pub group_id: GroupId,
    /// Owning estate; `None` for group-level entities.
    pub estate_id: Option<EstateId>,
}

/// A role and the permissions it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Integer role code.
    pub code: i32,
    /// Display name.
    pub name: String,
    /// Granted permissions, in declaration order without duplicates.
    permissions: Vec<String>,
    /// Entity scope.
    pub scope: Scope,
}

impl Role {
    /// Creates a role. Repeated permissions keep their first position.
    pub fn new<I, S>(code: i32, name: impl Into<String>, scope: Scope, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for permission in permissions {
            let permission = permission.into();
            if !deduped.contains(&permission) {
                deduped.push(permission);
            }
        }

        Self {
            code,
            name: name.into(),
            permissions: deduped,
            scope,
        }
    }

    /// Returns the granted permissions in declaration order.
    #[must_use]
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Returns true if the role grants exactly this permission string.
    #[must_use]
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Returns true if the role grants at least one of `permissions`.
    #[must_use]
    pub fn grants_any<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        permissions.iter().any(|p| self.grants(p.as_ref()))
    }
}

/// Immutable lookup table from role code to role.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    roles: BTreeMap<i32, Role>,
}

impl RoleTable {
    /// Builds a table from role definitions.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::DuplicateRole` if two roles share a code.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, AccessError> {
        let mut table = BTreeMap::new();
        for role in roles {
            let code = role.code;
            if table.insert(code, role).is_some() {
                return Err(AccessError::DuplicateRole(code));
            }
        }
        Ok(Self { roles: table })
    }

    /// The role table shipped with the application.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_ROLES
    }

    /// Looks up a role by code.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UnknownRole` if the code is not in the table.
    pub fn get(&self, code: i32) -> Result<&Role, AccessError> {
        self.roles.get(&code).ok_or_else(|| {
            tracing::warn!(role_code = code, "unknown role code");
            AccessError::UnknownRole(code)
        })
    }

    /// Returns true iff `permission` is granted to the role with `code`.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UnknownRole` if the code is not in the table.
    pub fn has_permission(&self, code: i32, permission: &str) -> Result<bool, AccessError> {
        Ok(self.get(code)?.grants(permission))
    }

    /// Returns true if the role's scope lets `assignment` act on `target`.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UnknownRole` if the code is not in the table.
    pub fn can_access(
        &self,
        code: i32,
        assignment: &Assignment,
        target: &ScopeTarget,
    ) -> Result<bool, AccessError> {
        Ok(self.get(code)?.scope.covers(assignment, target))
    }

    /// Iterates over the roles in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }
}

static STANDARD_ROLES: Lazy<RoleTable> = Lazy::new(|| {
    use permission::*;

    let roles = [
        Role::new(
            role_code::ADMIN,
            "Admin",
            Scope::All,
            [
                MANAGE_USERS,
                CREATE_BUDGETS,
                VIEW_BUDGETS,
                UPDATE_BUDGETS,
                CREATE_REQUISITIONS,
                VIEW_REQUISITIONS,
                UPDATE_REQUISITIONS,
                VIEW_FORWARDED_REQUISITIONS,
                VIEW_REPORTS,
                VIEW_LPOS,
                CREATE_LPOS,
                CREATE_LPOS,
                UPDATE_LPOS,
                APPROVE_LPOS,
                VIEW_LPO_REPORTS,
                VIEW_EXPENDITURE_REPORTS,
                MANAGE_ESTATES,
                MANAGE_GROUPS,
            ],
        ),
        Role::new(
            role_code::GROUP_MANAGER,
            "Group Manager",
            Scope::Group,
            [
                VIEW_BUDGETS,
                VIEW_REQUISITIONS,
                UPDATE_REQUISITIONS,
                VIEW_REPORTS,
                VIEW_EXPENDITURE_REPORTS,
            ],
        ),
        Role::new(
            role_code::MANAGING_CONTROLLER,
            "Managing Controller",
            Scope::Group,
            [
                VIEW_BUDGETS,
                VIEW_REQUISITIONS,
                UPDATE_REQUISITIONS,
                VIEW_REPORTS,
                VIEW_EXPENDITURE_REPORTS,
            ],
        ),
        Role::new(
            role_code::ESTATE_MANAGER,
            "Estate Manager",
            Scope::Estate,
            [
                VIEW_BUDGETS,
                VIEW_REQUISITIONS,
                UPDATE_REQUISITIONS,
                CREATE_REQUISITIONS,
                VIEW_REPORTS,
                VIEW_EXPENDITURE_REPORTS,
            ],
        ),
        Role::new(
            role_code::SUPPLIES_MANAGER,
            "Supplies Manager",
            Scope::All,
            [
                VIEW_FORWARDED_REQUISITIONS,
                CREATE_LPOS,
                UPDATE_LPOS,
                VIEW_LPOS,
                VIEW_LPO_REPORTS,
            ],
        ),
        Role::new(
            role_code::HOMC,
            "HOMC",
            Scope::All,
            [
                VIEW_LPOS,
                UPDATE_LPOS,
                APPROVE_LPOS,
                VIEW_LPO_REPORTS,
                VIEW_REPORTS,
                VIEW_EXPENDITURE_REPORTS,
            ],
        ),
    ];

    let mut table = BTreeMap::new();
    for role in roles {
        table.insert(role.code, role);
    }
    RoleTable { roles: table }
});
