//! Crate for the PropelAuth roles and permissions API surface.
//!
//! This crate holds the wire types exchanged with the PropelAuth
//! roles-and-permissions endpoints and the [`RolesAndPermissionsClient`] trait
//! that the rest of the workspace talks to. Transport concerns (HTTP,
//! authentication, retries) live behind that trait.

use async_trait::async_trait;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{
    OrgRoleStructure, Permission, Role, RoleDefinition, RoleMapping, RoleMigrationMap,
    RolesAndPermissions, RolesAndPermissionsUpdate,
};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Access to the roles and permissions of a single PropelAuth project.
///
/// Implementations perform the actual I/O. The update call returns the
/// canonical state the backend stored so that callers can verify that the
/// update took effect.
///
/// # Examples
///
/// ```rust,ignore
/// use propelauth_client::RolesAndPermissionsClient;
///
/// async fn print_roles(client: &dyn RolesAndPermissionsClient) -> Result<(), propelauth_client::Error> {
///     let current = client.get_roles_and_permissions().await?;
///     for role in &current.roles {
///         println!("{}", role.name);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RolesAndPermissionsClient: Send + Sync {
    /// Fetches the current roles, permissions and ownership mode of the project.
    async fn get_roles_and_permissions(&self) -> Result<RolesAndPermissions, Error>;

    /// Submits an update and returns the resulting canonical state.
    async fn update_roles_and_permissions(
        &self,
        update: &RolesAndPermissionsUpdate,
    ) -> Result<RolesAndPermissions, Error>;
}

#[async_trait]
impl<T> RolesAndPermissionsClient for std::sync::Arc<T>
where
    T: RolesAndPermissionsClient + ?Sized,
{
    async fn get_roles_and_permissions(&self) -> Result<RolesAndPermissions, Error> {
        (**self).get_roles_and_permissions().await
    }

    async fn update_roles_and_permissions(
        &self,
        update: &RolesAndPermissionsUpdate,
    ) -> Result<RolesAndPermissions, Error> {
        (**self).update_roles_and_permissions(update).await
    }
}
