//! Roles and permissions update building and drift reconciliation.
//!
//! This crate turns a desired [`RolesConfig`](roles_config::RolesConfig) into
//! a single [`RolesAndPermissionsUpdate`](propelauth_client::RolesAndPermissionsUpdate)
//! and compares what PropelAuth reports back against what was declared.
//!
//! - [`UpdateBuilder`] accumulates roles, permissions, ownership mode and
//!   previous role names, then builds the payload and its role migration map.
//! - [`reconciler`] decides field by field whether a difference between the
//!   local configuration and the remote state is real drift.
//! - [`RolesAndPermissionsManager`] runs plan, apply and refresh against a
//!   [`RolesAndPermissionsClient`](propelauth_client::RolesAndPermissionsClient).
//!
//! Nothing in here performs I/O apart from the manager, which only goes
//! through the client trait.

pub mod builder;
pub mod errors;
pub mod hanging;
pub mod hierarchy;
pub mod manager;
pub mod migration;
pub mod permissions;
pub mod reconciler;

pub use builder::UpdateBuilder;
pub use errors::{RolesError, RolesResult};
pub use hanging::find_hanging_names;
pub use hierarchy::extract_role_hierarchy;
pub use manager::{ApplyRolesResult, RolesAndPermissionsManager};
pub use migration::compute_role_migration_map;
pub use permissions::find_permission;
pub use reconciler::{
    hierarchy_matches, lists_match_unordered, reconcile_list, reconcile_role,
    reconcile_roles_config, DriftReport, RoleDrift,
};
