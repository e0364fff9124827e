//! Drift detection between a local roles configuration and remote state.
//!
//! PropelAuth is authoritative. Scalar fields are always copied from the
//! remote value. List fields that callers treat as sets (`external_permissions`,
//! `roles_can_manage`) are only replaced when their contents differ, so that a
//! reordering on the server does not show up as a change on every refresh.
//! The role hierarchy is different: position encodes authority, so it is
//! compared order-sensitively.

use propelauth_client::{RoleDefinition, RolesAndPermissions};
use roles_config::{RoleConfig, RolesConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::{find_hanging_names, find_permission, hierarchy::extract_role_hierarchy};

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;

/// Order-insensitive list comparison.
///
/// Lists match when they have the same length and every local element is
/// present in the remote list.
pub fn lists_match_unordered(local: &[String], remote: &[String]) -> bool {
    local.len() == remote.len() && local.iter().all(|item| remote.contains(item))
}

/// Order-sensitive hierarchy comparison.
pub fn hierarchy_matches(local: &[String], remote: &[String]) -> bool {
    local == remote
}

/// Replaces `local` with the remote ordering when the two lists differ as sets.
///
/// Returns true when the local list was replaced.
pub fn reconcile_list(local: &mut Vec<String>, remote: &[String]) -> bool {
    if lists_match_unordered(local, remote) {
        return false;
    }
    *local = remote.to_vec();
    true
}

/// Fields of one role that differed from the remote definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleDrift {
    /// Scalar fields whose local value was overwritten.
    pub scalar_fields: Vec<&'static str>,

    /// List fields replaced because their contents differed.
    pub list_fields: Vec<&'static str>,
}

impl RoleDrift {
    pub fn is_empty(&self) -> bool {
        self.scalar_fields.is_empty() && self.list_fields.is_empty()
    }
}

fn sync_scalar<T: PartialEq + Clone>(
    field: &'static str,
    local: &mut T,
    remote: &T,
    changed: &mut Vec<&'static str>,
) {
    if local != remote {
        changed.push(field);
    }
    *local = remote.clone();
}

/// Brings one local role in line with its remote definition.
pub fn reconcile_role(local: &mut RoleConfig, remote: &RoleDefinition) -> RoleDrift {
    let mut drift = RoleDrift::default();
    let changed = &mut drift.scalar_fields;

    sync_scalar(
        "can_view_other_members",
        &mut local.can_view_other_members,
        &remote.can_view_other_members,
        changed,
    );
    sync_scalar("can_invite", &mut local.can_invite, &remote.can_invite, changed);
    sync_scalar(
        "can_change_roles",
        &mut local.can_change_roles,
        &remote.can_change_roles,
        changed,
    );
    sync_scalar(
        "can_manage_api_keys",
        &mut local.can_manage_api_keys,
        &remote.can_manage_api_keys,
        changed,
    );
    sync_scalar(
        "can_remove_users",
        &mut local.can_remove_users,
        &remote.can_remove_users,
        changed,
    );
    sync_scalar(
        "can_setup_saml",
        &mut local.can_setup_saml,
        &remote.can_setup_saml,
        changed,
    );
    sync_scalar(
        "can_delete_org",
        &mut local.can_delete_org,
        &remote.can_delete_org,
        changed,
    );
    sync_scalar(
        "can_edit_org_access",
        &mut local.can_edit_org_access,
        &remote.can_edit_org_access,
        changed,
    );
    sync_scalar(
        "can_update_org_metadata",
        &mut local.can_update_org_metadata,
        &remote.can_update_org_metadata,
        changed,
    );
    sync_scalar(
        "is_internal",
        &mut local.is_internal,
        &!remote.is_visible_to_end_user,
        changed,
    );
    sync_scalar("disabled", &mut local.disabled, &remote.disabled, changed);
    sync_scalar(
        "description",
        &mut local.description,
        &remote.description,
        changed,
    );

    if reconcile_list(&mut local.external_permissions, &remote.external_permissions) {
        drift.list_fields.push("external_permissions");
    }
    if reconcile_list(&mut local.roles_can_manage, &remote.roles_can_manage) {
        drift.list_fields.push("roles_can_manage");
    }

    drift
}

/// Everything that differed between a local configuration and remote state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    /// Top-level settings that were overwritten
    /// (`multiple_roles_per_user`, `default_role`, `default_owner_role`).
    pub settings_changed: Vec<&'static str>,

    /// True when the single-role hierarchy was replaced.
    pub hierarchy_changed: bool,

    /// Per-role drift, keyed by role name. Roles without drift are omitted.
    pub changed_roles: BTreeMap<String, RoleDrift>,

    /// Locally declared roles that do not exist remotely.
    pub missing_roles: Vec<String>,

    /// Remote roles that nothing declares.
    pub hanging_roles: Vec<String>,

    /// Permissions whose display name or description was overwritten.
    pub changed_permissions: Vec<String>,

    /// Locally declared permissions that do not exist remotely.
    pub missing_permissions: Vec<String>,

    /// Remote permissions that nothing declares.
    pub hanging_permissions: Vec<String>,
}

impl DriftReport {
    /// Returns true if anything differed.
    pub fn has_drift(&self) -> bool {
        !self.settings_changed.is_empty()
            || self.hierarchy_changed
            || !self.changed_roles.is_empty()
            || !self.missing_roles.is_empty()
            || !self.hanging_roles.is_empty()
            || !self.changed_permissions.is_empty()
            || !self.missing_permissions.is_empty()
            || !self.hanging_permissions.is_empty()
    }
}

/// Reconciles a local configuration in place against the remote state.
///
/// Roles and permissions that exist on only one side are reported but never
/// added to or removed from `local`. Remote roles named by a local `replaces`
/// or listed in `protected_roles` are not reported as hanging.
pub fn reconcile_roles_config(local: &mut RolesConfig, remote: &RolesAndPermissions) -> DriftReport {
    let mut report = DriftReport::default();

    sync_scalar(
        "multiple_roles_per_user",
        &mut local.multiple_roles_per_user,
        &remote.multiple_roles_per_user(),
        &mut report.settings_changed,
    );
    sync_scalar(
        "default_role",
        &mut local.default_role,
        &remote.default_role,
        &mut report.settings_changed,
    );
    sync_scalar(
        "default_owner_role",
        &mut local.default_owner_role,
        &remote.default_owner_role,
        &mut report.settings_changed,
    );

    if let Some(remote_hierarchy) = extract_role_hierarchy(remote) {
        if !hierarchy_matches(&local.role_hierarchy, &remote_hierarchy) {
            local.role_hierarchy = remote_hierarchy;
            report.hierarchy_changed = true;
        }
    }

    for (name, role) in local.roles.iter_mut() {
        match remote.role(name) {
            Some(remote_role) => {
                let drift = reconcile_role(role, &remote_role.definition);
                if !drift.is_empty() {
                    debug!(role = %name, fields = ?drift, "Role drifted from remote");
                    report.changed_roles.insert(name.clone(), drift);
                }
            }
            None => report.missing_roles.push(name.clone()),
        }
    }

    let tracked_roles: Vec<String> = local
        .roles
        .iter()
        .flat_map(|(name, role)| std::iter::once(name.clone()).chain(role.replaces.clone()))
        .collect();
    report.hanging_roles =
        find_hanging_names(&remote.role_names(), &tracked_roles, &local.protected_roles);

    for permission in local.permissions.iter_mut() {
        match find_permission(&remote.permissions, &permission.name) {
            Some(remote_permission) => {
                let mut changed = Vec::new();
                sync_scalar(
                    "display_name",
                    &mut permission.display_name,
                    &remote_permission.display_name,
                    &mut changed,
                );
                sync_scalar(
                    "description",
                    &mut permission.description,
                    &remote_permission.description,
                    &mut changed,
                );
                if !changed.is_empty() {
                    report.changed_permissions.push(permission.name.clone());
                }
            }
            None => report.missing_permissions.push(permission.name.clone()),
        }
    }

    let remote_permissions: Vec<String> =
        remote.permissions.iter().map(|p| p.name.clone()).collect();
    let local_permissions: Vec<String> =
        local.permissions.iter().map(|p| p.name.clone()).collect();
    report.hanging_permissions = find_hanging_names(&remote_permissions, &local_permissions, &[]);

    report
}
