//! Roles and permissions configuration document.
//!
//! # Example TOML Configuration
//!
//! ```toml
//! multiple_roles_per_user = false
//! default_role = "Member"
//! default_owner_role = "Owner"
//! role_hierarchy = ["Owner", "Admin", "Member"]
//!
//! [[permissions]]
//! name = "read:reports"
//! display_name = "Read reports"
//!
//! [roles.Owner]
//! can_view_other_members = true
//! can_delete_org = true
//! external_permissions = ["read:reports"]
//!
//! [roles.Admin]
//! can_invite = true
//! replaces = "Manager"
//!
//! [roles.Member]
//! can_view_other_members = true
//! ```

use propelauth_client::{OrgRoleStructure, Permission, RoleDefinition};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, info, warn};

use crate::{
    errors::{ConfigurationError, ConfigurationResult},
    validator::RolesConfigValidator,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Desired roles and permissions for one PropelAuth project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesConfig {
    /// Members may hold several roles at once when true.
    #[serde(default)]
    pub multiple_roles_per_user: bool,

    /// Role given to members who join an organization.
    pub default_role: String,

    /// Role given to the user who creates an organization.
    pub default_owner_role: String,

    /// Role names from highest to lowest authority. Only used in
    /// single-role mode.
    #[serde(default)]
    pub role_hierarchy: Vec<String>,

    /// Remote role names that are managed outside this document and must
    /// never be reported as hanging.
    #[serde(default)]
    pub protected_roles: Vec<String>,

    /// Permission catalog in declaration order.
    #[serde(default)]
    pub permissions: Vec<Permission>,

    /// Role definitions keyed by role name.
    #[serde(default)]
    pub roles: BTreeMap<String, RoleConfig>,
}

/// A single declared role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
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

    #[serde(default)]
    pub external_permissions: Vec<String>,

    #[serde(default)]
    pub roles_can_manage: Vec<String>,

    /// Internal roles are hidden from end users.
    #[serde(default)]
    pub is_internal: bool,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Name of a previous role whose members move to this role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces: Option<String>,
}

impl RoleConfig {
    /// Converts the declared role into its wire definition.
    pub fn to_definition(&self) -> RoleDefinition {
        RoleDefinition {
            can_view_other_members: self.can_view_other_members,
            can_invite: self.can_invite,
            can_change_roles: self.can_change_roles,
            can_manage_api_keys: self.can_manage_api_keys,
            can_remove_users: self.can_remove_users,
            can_setup_saml: self.can_setup_saml,
            can_delete_org: self.can_delete_org,
            can_edit_org_access: self.can_edit_org_access,
            can_update_org_metadata: self.can_update_org_metadata,
            external_permissions: self.external_permissions.clone(),
            roles_can_manage: self.roles_can_manage.clone(),
            is_visible_to_end_user: !self.is_internal,
            disabled: self.disabled,
            description: self.description.clone(),
        }
    }
}

impl RolesConfig {
    /// Loads a configuration document from a TOML file.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::FileNotFound` if `path` does not exist
    /// - `ConfigurationError::FileAccessError` if the file cannot be read
    /// - `ConfigurationError::ParseError` if the content is not a valid document
    pub fn load(path: &Path) -> ConfigurationResult<Self> {
        debug!("Loading roles configuration from {:?}", path);

        if !path.exists() {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigurationError::FileAccessError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            role_count = config.roles.len(),
            permission_count = config.permissions.len(),
            "Roles configuration loaded"
        );
        Ok(config)
    }

    /// Parses a configuration document from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigurationResult<Self> {
        toml::from_str(content).map_err(|e| ConfigurationError::ParseError {
            reason: e.to_string(),
        })
    }

    /// Runs the validator and returns the configuration only if it has no errors.
    ///
    /// Warnings are logged and do not fail validation.
    pub fn validated(self) -> ConfigurationResult<Self> {
        let result = RolesConfigValidator::new().validate(&self);

        for warning in &result.warnings {
            warn!(
                field = %warning.field_path,
                "Roles configuration warning: {}",
                warning.message
            );
        }

        if !result.is_valid() {
            return Err(ConfigurationError::ValidationFailed {
                error_count: result.errors.len(),
                errors: result.errors,
            });
        }

        Ok(self)
    }

    /// The ownership mode the configuration declares.
    pub fn org_role_structure(&self) -> OrgRoleStructure {
        OrgRoleStructure::from_multiple_roles_per_user(self.multiple_roles_per_user)
    }
}
