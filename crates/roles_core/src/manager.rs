//! Roles and permissions management operations.
//!
//! This module provides the [`RolesAndPermissionsManager`] component, which
//! runs one plan, apply or refresh cycle for a project against a
//! [`RolesAndPermissionsClient`].

use propelauth_client::{RolesAndPermissions, RolesAndPermissionsClient, RolesAndPermissionsUpdate};
use roles_config::RolesConfig;
use tracing::{info, instrument, warn};

use crate::{reconciler::reconcile_roles_config, DriftReport, RolesResult, UpdateBuilder};

/// Manages the roles and permissions of one PropelAuth project.
///
/// # Examples
///
/// ```rust,ignore
/// use roles_config::RolesConfig;
/// use roles_core::RolesAndPermissionsManager;
///
/// let manager = RolesAndPermissionsManager::new(client);
/// let config = RolesConfig::load(Path::new("roles.toml"))?;
///
/// let result = manager.apply(&config).await?;
/// if result.drift.has_drift() {
///     println!("PropelAuth did not store the update as declared");
/// }
/// ```
pub struct RolesAndPermissionsManager<C> {
    /// Client for API operations
    client: C,
}

impl<C: RolesAndPermissionsClient> RolesAndPermissionsManager<C> {
    /// Creates a new manager.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Builds the update that applying `config` would submit.
    ///
    /// The role names currently stored remotely are used as the previous role
    /// names, so roles that disappear from the configuration are mapped to
    /// "no replacement" unless another role `replaces` them.
    ///
    /// # Errors
    ///
    /// - `RolesError::Configuration` if the configuration fails validation
    /// - `RolesError::Client` if the current state cannot be read
    /// - `RolesError::UndefinedHierarchyRole` if the hierarchy is inconsistent
    #[instrument(skip(self, config))]
    pub async fn plan(&self, config: &RolesConfig) -> RolesResult<RolesAndPermissionsUpdate> {
        config.clone().validated()?;

        let current = self.client.get_roles_and_permissions().await?;
        let update = build_update(config, &current)?;

        info!(
            role_count = update.roles.len(),
            permission_count = update.permissions.len(),
            migration_count = update.role_migration_map.len(),
            "Planned roles and permissions update"
        );
        Ok(update)
    }

    /// Submits the update for `config` and verifies the stored result.
    ///
    /// The canonical state returned by PropelAuth is reconciled against a copy
    /// of `config`; any drift is logged and returned in the result.
    #[instrument(skip(self, config))]
    pub async fn apply(&self, config: &RolesConfig) -> RolesResult<ApplyRolesResult> {
        let update = self.plan(config).await?;

        let state = self.client.update_roles_and_permissions(&update).await?;

        let mut observed = config.clone();
        let drift = reconcile_roles_config(&mut observed, &state);
        if drift.has_drift() {
            warn!(
                changed_roles = drift.changed_roles.len(),
                missing_roles = ?drift.missing_roles,
                hanging_roles = ?drift.hanging_roles,
                "Stored roles and permissions differ from the submitted update"
            );
        } else {
            info!(role_count = state.roles.len(), "Roles and permissions applied");
        }

        Ok(ApplyRolesResult {
            update,
            state,
            drift,
        })
    }

    /// Reads the remote state and reconciles `config` against it in place.
    #[instrument(skip(self, config))]
    pub async fn refresh(&self, config: &mut RolesConfig) -> RolesResult<DriftReport> {
        let current = self.client.get_roles_and_permissions().await?;
        let drift = reconcile_roles_config(config, &current);

        info!(
            has_drift = drift.has_drift(),
            hanging_roles = drift.hanging_roles.len(),
            hanging_permissions = drift.hanging_permissions.len(),
            "Refreshed roles and permissions"
        );
        Ok(drift)
    }
}

/// Outcome of [`RolesAndPermissionsManager::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRolesResult {
    /// The payload that was submitted.
    pub update: RolesAndPermissionsUpdate,

    /// The canonical state PropelAuth returned.
    pub state: RolesAndPermissions,

    /// Differences between the declared configuration and `state`.
    pub drift: DriftReport,
}

impl ApplyRolesResult {
    /// Returns true if PropelAuth stored exactly what was declared.
    pub fn is_success(&self) -> bool {
        !self.drift.has_drift()
    }
}

fn build_update(
    config: &RolesConfig,
    current: &RolesAndPermissions,
) -> RolesResult<RolesAndPermissionsUpdate> {
    UpdateBuilder::from_config(config, current.role_names()).build()
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
