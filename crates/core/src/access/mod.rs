//! Role-based access control.
//!
//! Roles map to permission sets; the navigation tree and individual actions
//! are gated on those permissions rather than on raw role codes.
//!
//! # Modules
//!
//! - `role` - Role table, permissions, and scopes
//! - `menu` - Navigation tree and per-role filtering
//! - `error` - Access errors

pub mod error;
pub mod menu;
pub mod role;

#[cfg(test)]
mod props;

pub use error::AccessError;
pub use menu::{MenuItem, default_navigation, filter_menu_for_role};
pub use role::{Assignment, Role, RoleTable, Scope, ScopeTarget, permission, role_code};

/// Returns true iff the standard role `role_code` grants `permission`.
///
/// # Errors
///
/// Returns `AccessError::UnknownRole` for codes outside the role table.
pub fn has_permission(role_code: i32, permission: &str) -> Result<bool, AccessError> {
    RoleTable::standard().has_permission(role_code, permission)
}

/// Filters `menu` for the standard role `role_code`.
///
/// # Errors
///
/// Returns `AccessError::UnknownRole` for codes outside the role table.
pub fn filter_menu(menu: &[MenuItem], role_code: i32) -> Result<Vec<MenuItem>, AccessError> {
    RoleTable::standard().filter_menu(menu, role_code)
}
