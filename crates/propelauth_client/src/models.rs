//! Wire types for the PropelAuth roles and permissions endpoints.
//!
//! The same role and permission shapes are used when reading the current
//! state of a project and when submitting an update. The update payload adds
//! the role migration map that tells PropelAuth how to carry organization
//! members over when roles are renamed or removed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// How roles relate to each other across the whole project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRoleStructure {
    /// Members may hold several roles; authority is expressed per role
    /// through `roles_can_manage`.
    MultiRole,

    /// Members hold exactly one role taken from a total ordering, highest
    /// authority first.
    SingleRoleInHierarchy,
}

impl OrgRoleStructure {
    /// Maps the project-wide `multiple_roles_per_user` flag to a structure.
    pub fn from_multiple_roles_per_user(multiple_roles_per_user: bool) -> Self {
        if multiple_roles_per_user {
            Self::MultiRole
        } else {
            Self::SingleRoleInHierarchy
        }
    }

    /// Returns true for [`OrgRoleStructure::MultiRole`].
    pub fn is_multi_role(self) -> bool {
        matches!(self, Self::MultiRole)
    }
}

/// A custom permission that can be attached to roles.
///
/// # Examples
///
/// ```
/// use propelauth_client::Permission;
///
/// let permission = Permission::new("read:reports");
/// assert_eq!(permission.display_name(), "read:reports");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Unique permission key. Matched exactly and case-sensitively.
    pub name: String,

    /// Human label shown in the PropelAuth dashboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Permission {
    /// Creates a permission with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
        }
    }

    /// The display name, falling back to the permission name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Capabilities and relationships of a single role.
///
/// The role name is not part of the definition; it is the key under which the
/// definition is stored (see [`Role`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    #[serde(default)]
    pub can_view_other_members: bool,
    #[serde(default)]
    pub can_invite: bool,
    #[serde(default)]
    pub can_change_roles: bool,
    #[serde(default)]
    pub can_manage_api_keys: bool,
    #[serde(default)]
    pub can_remove_users: bool,
    #[serde(default)]
    pub can_setup_saml: bool,
    #[serde(default)]
    pub can_delete_org: bool,
    #[serde(default)]
    pub can_edit_org_access: bool,
    #[serde(default)]
    pub can_update_org_metadata: bool,

    /// Names of the custom permissions granted by this role.
    #[serde(default)]
    pub external_permissions: Vec<String>,

    /// Roles this role may administer. Only meaningful in multi-role mode.
    #[serde(default)]
    pub roles_can_manage: Vec<String>,

    /// False for internal roles that end users never see.
    #[serde(default = "default_visible")]
    pub is_visible_to_end_user: bool,

    /// Disabled roles cannot be assigned but still take part in migration.
    #[serde(default)]
    pub disabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// Roles are visible unless the API says otherwise.
fn default_visible() -> bool {
    true
}

/// A named role as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,

    #[serde(flatten)]
    pub definition: RoleDefinition,
}

impl Role {
    /// Creates a role from its name and definition.
    pub fn new(name: impl Into<String>, definition: RoleDefinition) -> Self {
        Self {
            name: name.into(),
            definition,
        }
    }
}

/// The current roles and permissions of a project, as returned by PropelAuth.
///
/// In single-role mode the `roles` list is ordered from highest to lowest
/// authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesAndPermissions {
    pub org_role_structure: OrgRoleStructure,
    pub default_role: String,
    pub default_owner_role: String,

    #[serde(default)]
    pub roles: Vec<Role>,

    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl RolesAndPermissions {
    /// Returns true when members may hold several roles at once.
    pub fn multiple_roles_per_user(&self) -> bool {
        self.org_role_structure.is_multi_role()
    }

    /// Looks up a role by exact name.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Names of all roles in their stored order.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }
}

/// Where the members of a previously known role end up after an update.
///
/// Serialized as the new role name, or `null` when the role was removed
/// without a replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum RoleMapping {
    /// Members move to the named role. The name may equal the old one.
    Renamed(String),

    /// The role is gone and has no replacement.
    Removed,
}

impl From<Option<String>> for RoleMapping {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) => Self::Renamed(name),
            None => Self::Removed,
        }
    }
}

impl From<RoleMapping> for Option<String> {
    fn from(value: RoleMapping) -> Self {
        match value {
            RoleMapping::Renamed(name) => Some(name),
            RoleMapping::Removed => None,
        }
    }
}

/// Mapping from every previously known role name to its successor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMigrationMap {
    pub old_to_new_role_mapping: BTreeMap<String, RoleMapping>,
}

impl RoleMigrationMap {
    /// Resolves an old role name, returning `None` when the name is unknown.
    pub fn get(&self, old_role: &str) -> Option<&RoleMapping> {
        self.old_to_new_role_mapping.get(old_role)
    }

    pub fn len(&self) -> usize {
        self.old_to_new_role_mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old_to_new_role_mapping.is_empty()
    }
}

/// Payload for replacing the roles and permissions of a project.
///
/// Built once per update by the roles update builder and then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesAndPermissionsUpdate {
    pub org_role_structure: OrgRoleStructure,
    pub default_role: String,
    pub default_owner_role: String,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub role_migration_map: RoleMigrationMap,
}
