//! Command implementations for the PropelAuth roles CLI.
//!
//! - `validate`: check a roles configuration file
//! - `plan`: render the update payload that applying the configuration would send
//! - `diff`: reconcile the configuration against a remote snapshot and render the drift

use std::path::Path;

use roles_config::{RolesConfig, RolesConfigValidator, ValidationResult};
use roles_core::{DriftReport, RolesAndPermissionsManager};
use tracing::{info, instrument};

use crate::{errors::Error, snapshot::SnapshotClient};

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Loads a configuration file and validates it.
#[instrument]
pub fn validate_config(config_path: &Path) -> Result<ValidationResult, Error> {
    let config = RolesConfig::load(config_path)?;
    let result = RolesConfigValidator::new().validate(&config);

    info!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validated roles configuration"
    );
    Ok(result)
}

/// Renders a validation result as one line per finding.
pub fn render_validation(result: &ValidationResult) -> String {
    let mut output = String::new();
    for error in &result.errors {
        output.push_str(&format!(
            "error[{}] {}: {}\n",
            error.error_type, error.field_path, error.message
        ));
        if let Some(suggestion) = &error.suggestion {
            output.push_str(&format!("  help: {}\n", suggestion));
        }
    }
    for warning in &result.warnings {
        output.push_str(&format!(
            "warning {}: {}\n",
            warning.field_path, warning.message
        ));
    }
    if result.is_valid() {
        output.push_str(&format!(
            "Configuration is valid ({} warning(s))\n",
            result.warnings.len()
        ));
    }
    output
}

/// Builds the update for a configuration against a remote snapshot and
/// renders it as pretty JSON.
#[instrument]
pub async fn plan_update(config_path: &Path, remote_path: &Path) -> Result<String, Error> {
    let config = RolesConfig::load(config_path)?;
    let manager = RolesAndPermissionsManager::new(SnapshotClient::load(remote_path)?);

    let update = manager.plan(&config).await?;
    Ok(serde_json::to_string_pretty(&update)?)
}

/// Reconciles a configuration against a remote snapshot.
#[instrument]
pub async fn diff_config(config_path: &Path, remote_path: &Path) -> Result<DriftReport, Error> {
    let mut config = RolesConfig::load(config_path)?;
    let manager = RolesAndPermissionsManager::new(SnapshotClient::load(remote_path)?);

    Ok(manager.refresh(&mut config).await?)
}
