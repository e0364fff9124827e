use roles_config::ConfigurationError;
use roles_core::RolesError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the PropelAuth roles CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// The roles configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Building, applying or reconciling the update failed.
    #[error("Roles error: {0}")]
    Roles(#[from] RolesError),

    /// The remote snapshot file could not be read or parsed.
    #[error("Failed to load remote snapshot {path}: {reason}")]
    Snapshot { path: String, reason: String },

    /// Output could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}
