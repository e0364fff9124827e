//! Desired-state configuration for PropelAuth roles and permissions.
//!
//! A project's roles, permissions and ownership mode are declared in a TOML
//! document. This crate loads that document into a [`RolesConfig`], checks it
//! for referential problems with the [`RolesConfigValidator`] and converts the
//! declared roles into the wire types of `propelauth_client`.

pub mod config;
pub mod errors;
pub mod validator;

pub use config::{RoleConfig, RolesConfig};
pub use errors::{ConfigurationError, ConfigurationResult};
pub use validator::{
    RolesConfigValidator, ValidationError, ValidationErrorType, ValidationResult,
    ValidationWarning,
};
