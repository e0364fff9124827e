//! Roles and permissions update builder.
//!
//! This module provides the [`UpdateBuilder`], which collects the desired
//! roles, permissions and ownership mode for one update and turns them into a
//! single [`RolesAndPermissionsUpdate`]. A builder is owned by one call site
//! and consumed once; nothing is shared between updates.

use propelauth_client::{
    OrgRoleStructure, Permission, Role, RoleDefinition, RolesAndPermissionsUpdate,
};
use roles_config::RolesConfig;
use std::collections::BTreeMap;
use tracing::debug;

use crate::{migration::compute_role_migration_map, RolesError, RolesResult};

/// Accumulates the desired state of one roles and permissions update.
///
/// Every setter takes the builder by value and hands it back, so calls can be
/// chained. None of them validate their input; cross references are only
/// checked by [`UpdateBuilder::build`].
///
/// # Examples
///
/// ```rust
/// use propelauth_client::{RoleDefinition, RoleMapping};
/// use roles_core::UpdateBuilder;
///
/// let update = UpdateBuilder::new()
///     .set_multiple_roles_per_user(false)
///     .set_default_role("Member")
///     .set_default_owner_role("Owner")
///     .set_role_hierarchy(vec!["Owner".to_string(), "Member".to_string()])
///     .insert_role("Owner", RoleDefinition::default())
///     .insert_role("Member", RoleDefinition::default())
///     .insert_old_role_name("Manager")
///     .insert_old_to_new_role_mapping("Manager", "Owner")
///     .build()
///     .unwrap();
///
/// assert_eq!(update.roles[0].name, "Owner");
/// assert_eq!(
///     update.role_migration_map.get("Manager"),
///     Some(&RoleMapping::Renamed("Owner".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    multiple_roles_per_user: bool,
    default_role: String,
    default_owner_role: String,
    role_hierarchy: Vec<String>,
    roles: BTreeMap<String, RoleDefinition>,
    permissions: Vec<Permission>,
    old_to_new_role_mapping: BTreeMap<String, String>,
    old_role_names: Vec<String>,
}

impl UpdateBuilder {
    /// Creates an empty builder in single-role mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder from a desired configuration.
    ///
    /// Every declared role is inserted, every `replaces` becomes an explicit
    /// rename and every name in `old_role_names` is recorded as a role that
    /// existed before this update.
    pub fn from_config<I, S>(config: &RolesConfig, old_role_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::new()
            .set_multiple_roles_per_user(config.multiple_roles_per_user)
            .set_default_role(config.default_role.clone())
            .set_default_owner_role(config.default_owner_role.clone())
            .set_role_hierarchy(config.role_hierarchy.clone());

        for permission in &config.permissions {
            builder = builder.insert_permission(permission.clone());
        }

        for (name, role) in &config.roles {
            builder = builder.insert_role(name.clone(), role.to_definition());
            if let Some(old_name) = &role.replaces {
                builder = builder.insert_old_to_new_role_mapping(old_name.clone(), name.clone());
            }
        }

        for old_name in old_role_names {
            builder = builder.insert_old_role_name(old_name);
        }

        builder
    }

    pub fn set_multiple_roles_per_user(mut self, multiple_roles_per_user: bool) -> Self {
        self.multiple_roles_per_user = multiple_roles_per_user;
        self
    }

    pub fn set_default_role(mut self, name: impl Into<String>) -> Self {
        self.default_role = name.into();
        self
    }

    pub fn set_default_owner_role(mut self, name: impl Into<String>) -> Self {
        self.default_owner_role = name.into();
        self
    }

    /// Sets the role order, highest authority first. Ignored in multi-role mode.
    pub fn set_role_hierarchy(mut self, names: Vec<String>) -> Self {
        self.role_hierarchy = names;
        self
    }

    /// Inserts or replaces the definition stored under `name`.
    pub fn insert_role(mut self, name: impl Into<String>, definition: RoleDefinition) -> Self {
        self.roles.insert(name.into(), definition);
        self
    }

    /// Appends a permission. Duplicate names are kept.
    pub fn insert_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    /// Records that members of `old_name` move to `new_name`.
    pub fn insert_old_to_new_role_mapping(
        mut self,
        old_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        self.old_to_new_role_mapping
            .insert(old_name.into(), new_name.into());
        self
    }

    /// Records a role name that existed before this update.
    pub fn insert_old_role_name(mut self, old_name: impl Into<String>) -> Self {
        self.old_role_names.push(old_name.into());
        self
    }

    /// Builds the update payload and its role migration map.
    ///
    /// In multi-role mode the roles are emitted sorted by name. In single-role
    /// mode they are emitted in hierarchy order.
    ///
    /// # Errors
    ///
    /// Returns `RolesError::UndefinedHierarchyRole` in single-role mode when a
    /// hierarchy entry has no inserted role definition.
    pub fn build(&self) -> RolesResult<RolesAndPermissionsUpdate> {
        let org_role_structure =
            OrgRoleStructure::from_multiple_roles_per_user(self.multiple_roles_per_user);

        let roles = match org_role_structure {
            OrgRoleStructure::MultiRole => self
                .roles
                .iter()
                .map(|(name, definition)| Role::new(name.clone(), definition.clone()))
                .collect(),
            OrgRoleStructure::SingleRoleInHierarchy => self
                .role_hierarchy
                .iter()
                .map(|name| {
                    self.roles
                        .get(name)
                        .map(|definition| Role::new(name.clone(), definition.clone()))
                        .ok_or_else(|| RolesError::UndefinedHierarchyRole { role: name.clone() })
                })
                .collect::<RolesResult<Vec<_>>>()?,
        };

        let role_migration_map = compute_role_migration_map(
            &self.old_to_new_role_mapping,
            self.roles.keys(),
            &self.old_role_names,
        );

        debug!(
            org_role_structure = ?org_role_structure,
            role_count = roles.len(),
            permission_count = self.permissions.len(),
            migration_count = role_migration_map.len(),
            "Built roles and permissions update"
        );

        Ok(RolesAndPermissionsUpdate {
            org_role_structure,
            default_role: self.default_role.clone(),
            default_owner_role: self.default_owner_role.clone(),
            roles,
            permissions: self.permissions.clone(),
            role_migration_map,
        })
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
