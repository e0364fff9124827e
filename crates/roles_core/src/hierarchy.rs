//! Role hierarchy extraction from remote state.

use propelauth_client::RolesAndPermissions;

#[cfg(test)]
#[path = "hierarchy_tests.rs"]
mod tests;

/// Returns the effective role hierarchy of a project, highest authority first.
///
/// PropelAuth stores roles in hierarchy order when members hold a single role,
/// so the hierarchy is the stored role order. Multi-role projects have no
/// hierarchy and yield `None`.
pub fn extract_role_hierarchy(state: &RolesAndPermissions) -> Option<Vec<String>> {
    if state.multiple_roles_per_user() {
        return None;
    }
    Some(state.role_names())
}
