//! Error types for roles and permissions operations.

use roles_config::ConfigurationError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while building or applying a roles and permissions update.
#[derive(Error, Debug)]
pub enum RolesError {
    /// A `role_hierarchy` entry has no matching role definition.
    #[error("Role hierarchy references undefined role '{role}'")]
    UndefinedHierarchyRole { role: String },

    #[error("Invalid roles configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("PropelAuth API error: {0}")]
    Client(#[from] propelauth_client::Error),
}

/// Result type alias for roles operations.
pub type RolesResult<T> = Result<T, RolesError>;
