//! Read-only client backed by a saved remote state.
//!
//! The CLI does not talk to PropelAuth directly. Instead it reads a JSON
//! snapshot of the project's roles and permissions, in the shape the API
//! returns, and serves it through the client trait.

use async_trait::async_trait;
use propelauth_client::{RolesAndPermissions, RolesAndPermissionsClient, RolesAndPermissionsUpdate};
use std::{fs, path::Path};
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

/// Serves a fixed [`RolesAndPermissions`] state and rejects updates.
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    state: RolesAndPermissions,
}

impl SnapshotClient {
    pub fn new(state: RolesAndPermissions) -> Self {
        Self { state }
    }

    /// Loads a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading remote snapshot from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| Error::Snapshot {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let state = serde_json::from_str(&content).map_err(|e| Error::Snapshot {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self::new(state))
    }
}

#[async_trait]
impl RolesAndPermissionsClient for SnapshotClient {
    async fn get_roles_and_permissions(
        &self,
    ) -> Result<RolesAndPermissions, propelauth_client::Error> {
        Ok(self.state.clone())
    }

    async fn update_roles_and_permissions(
        &self,
        _update: &RolesAndPermissionsUpdate,
    ) -> Result<RolesAndPermissions, propelauth_client::Error> {
        Err(propelauth_client::Error::ApiError {
            status: 405,
            message: "remote snapshots are read-only".to_string(),
        })
    }
}
