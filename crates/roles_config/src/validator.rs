//! Roles configuration validation.
//!
//! The validator checks a [`RolesConfig`] for references that do not resolve
//! (default roles, hierarchy entries, managed roles, permissions) and for
//! declarations that PropelAuth would ignore. All problems are collected in a
//! single pass.
//!
//! # Examples
//!
//! ```rust
//! use roles_config::{RolesConfig, RolesConfigValidator};
//!
//! let config = RolesConfig::from_toml_str(r#"
//!     default_role = "Member"
//!     default_owner_role = "Owner"
//!     role_hierarchy = ["Owner", "Member"]
//!
//!     [roles.Owner]
//!     [roles.Member]
//! "#).unwrap();
//!
//! let result = RolesConfigValidator::new().validate(&config);
//! assert!(result.is_valid());
//! ```

use std::collections::{BTreeMap, HashSet};

use propelauth_client::OrgRoleStructure;

use crate::config::RolesConfig;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Result of configuration validation.
///
/// Validation is considered successful only if no errors are present.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// List of validation errors (blocking issues).
    pub errors: Vec<ValidationError>,
    /// List of validation warnings (non-blocking suggestions).
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a new empty validation result.
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add a validation error.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a validation warning.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Individual validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The category of validation error.
    pub error_type: ValidationErrorType,
    /// Dot-separated path to the field that failed validation.
    pub field_path: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    pub suggestion: Option<String>,
}

/// Validation error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorType {
    /// A required field is missing or empty.
    RequiredFieldMissing,
    /// A name refers to a role or permission that is not declared.
    UnknownReference,
    /// The same name appears more than once where it must be unique.
    DuplicateEntry,
    /// A rule of the PropelAuth role model was violated.
    BusinessRuleViolation,
}

impl std::fmt::Display for ValidationErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiredFieldMissing => write!(f, "RequiredFieldMissing"),
            Self::UnknownReference => write!(f, "UnknownReference"),
            Self::DuplicateEntry => write!(f, "DuplicateEntry"),
            Self::BusinessRuleViolation => write!(f, "BusinessRuleViolation"),
        }
    }
}

/// Non-blocking validation warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Dot-separated path to the field that triggered the warning.
    pub field_path: String,
    /// Human-readable warning message.
    pub message: String,
    /// Optional recommendation.
    pub recommendation: Option<String>,
}

/// Validator for roles configuration documents.
#[derive(Debug, Default)]
pub struct RolesConfigValidator;

impl RolesConfigValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a configuration and returns every error and warning found.
    pub fn validate(&self, config: &RolesConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        self.validate_default_role(config, "default_role", &config.default_role, &mut result);
        self.validate_default_role(
            config,
            "default_owner_role",
            &config.default_owner_role,
            &mut result,
        );

        match config.org_role_structure() {
            OrgRoleStructure::MultiRole => {
                if !config.role_hierarchy.is_empty() {
                    result.add_warning(ValidationWarning {
                        field_path: "role_hierarchy".to_string(),
                        message: "role_hierarchy is ignored when multiple_roles_per_user is true"
                            .to_string(),
                        recommendation: Some(
                            "Express authority through roles_can_manage instead".to_string(),
                        ),
                    });
                }
            }
            OrgRoleStructure::SingleRoleInHierarchy => {
                self.validate_hierarchy(config, &mut result);
            }
        }

        self.validate_permissions(config, &mut result);
        self.validate_roles(config, &mut result);
        self.validate_replacements(config, &mut result);

        result
    }

    // ========================================================================
    // Validation Helpers
    // ========================================================================

    fn validate_default_role(
        &self,
        config: &RolesConfig,
        field: &str,
        value: &str,
        result: &mut ValidationResult,
    ) {
        if value.is_empty() {
            result.add_error(ValidationError {
                error_type: ValidationErrorType::RequiredFieldMissing,
                field_path: field.to_string(),
                message: format!("{} must not be empty", field),
                suggestion: None,
            });
        } else if !config.roles.contains_key(value) {
            result.add_error(ValidationError {
                error_type: ValidationErrorType::UnknownReference,
                field_path: field.to_string(),
                message: format!("Role '{}' is not defined", value),
                suggestion: Some(format!("Add a [roles.{}] table", value)),
            });
        }
    }

    fn validate_hierarchy(&self, config: &RolesConfig, result: &mut ValidationResult) {
        if config.role_hierarchy.is_empty() {
            if !config.roles.is_empty() {
                result.add_error(ValidationError {
                    error_type: ValidationErrorType::RequiredFieldMissing,
                    field_path: "role_hierarchy".to_string(),
                    message: "role_hierarchy is required when multiple_roles_per_user is false"
                        .to_string(),
                    suggestion: Some(
                        "List every role from highest to lowest authority".to_string(),
                    ),
                });
            }
            return;
        }

        let mut seen = HashSet::new();
        for (index, name) in config.role_hierarchy.iter().enumerate() {
            let field_path = format!("role_hierarchy[{}]", index);
            if !config.roles.contains_key(name) {
                result.add_error(ValidationError {
                    error_type: ValidationErrorType::UnknownReference,
                    field_path: field_path.clone(),
                    message: format!("Role '{}' is not defined", name),
                    suggestion: None,
                });
            }
            if !seen.insert(name.as_str()) {
                result.add_error(ValidationError {
                    error_type: ValidationErrorType::DuplicateEntry,
                    field_path,
                    message: format!("Role '{}' appears more than once in the hierarchy", name),
                    suggestion: None,
                });
            }
        }

        for name in config.roles.keys() {
            if !seen.contains(name.as_str()) {
                result.add_error(ValidationError {
                    error_type: ValidationErrorType::BusinessRuleViolation,
                    field_path: format!("roles.{}", name),
                    message: format!("Role '{}' is not part of role_hierarchy", name),
                    suggestion: Some(format!(
                        "Add '{}' to role_hierarchy or remove its [roles.{}] table",
                        name, name
                    )),
                });
            }
        }
    }

    fn validate_permissions(&self, config: &RolesConfig, result: &mut ValidationResult) {
        let mut seen = HashSet::new();
        for (index, permission) in config.permissions.iter().enumerate() {
            let field_path = format!("permissions[{}]", index);
            if permission.name.is_empty() {
                result.add_error(ValidationError {
                    error_type: ValidationErrorType::RequiredFieldMissing,
                    field_path,
                    message: "Permission name must not be empty".to_string(),
                    suggestion: None,
                });
                continue;
            }
            if !seen.insert(permission.name.as_str()) {
                result.add_warning(ValidationWarning {
                    field_path,
                    message: format!("Permission '{}' is declared more than once", permission.name),
                    recommendation: Some("Only the first declaration is used for lookups".to_string()),
                });
            }
        }
    }

    fn validate_roles(&self, config: &RolesConfig, result: &mut ValidationResult) {
        let catalog: HashSet<&str> = config.permissions.iter().map(|p| p.name.as_str()).collect();

        for (name, role) in &config.roles {
            for permission in &role.external_permissions {
                if !catalog.contains(permission.as_str()) {
                    result.add_error(ValidationError {
                        error_type: ValidationErrorType::UnknownReference,
                        field_path: format!("roles.{}.external_permissions", name),
                        message: format!("Permission '{}' is not declared", permission),
                        suggestion: Some(format!(
                            "Add a [[permissions]] entry with name = \"{}\"",
                            permission
                        )),
                    });
                }
            }

            if !config.multiple_roles_per_user && !role.roles_can_manage.is_empty() {
                result.add_warning(ValidationWarning {
                    field_path: format!("roles.{}.roles_can_manage", name),
                    message: "roles_can_manage is ignored in single-role mode".to_string(),
                    recommendation: Some("Authority follows role_hierarchy instead".to_string()),
                });
            }

            for managed in &role.roles_can_manage {
                if !config.roles.contains_key(managed) {
                    result.add_error(ValidationError {
                        error_type: ValidationErrorType::UnknownReference,
                        field_path: format!("roles.{}.roles_can_manage", name),
                        message: format!("Role '{}' is not defined", managed),
                        suggestion: None,
                    });
                }
            }
        }
    }

    fn validate_replacements(&self, config: &RolesConfig, result: &mut ValidationResult) {
        let mut replaced_by: BTreeMap<&str, &str> = BTreeMap::new();

        for (name, role) in &config.roles {
            let Some(old_name) = role.replaces.as_deref() else {
                continue;
            };
            let field_path = format!("roles.{}.replaces", name);

            if config.roles.contains_key(old_name) {
                result.add_error(ValidationError {
                    error_type: ValidationErrorType::BusinessRuleViolation,
                    field_path: field_path.clone(),
                    message: format!(
                        "Role '{}' cannot replace '{}' because '{}' is still defined",
                        name, old_name, old_name
                    ),
                    suggestion: Some(format!("Remove [roles.{}] or drop replaces", old_name)),
                });
            }

            if let Some(previous) = replaced_by.insert(old_name, name) {
                result.add_error(ValidationError {
                    error_type: ValidationErrorType::DuplicateEntry,
                    field_path,
                    message: format!(
                        "Roles '{}' and '{}' both replace '{}'",
                        previous, name, old_name
                    ),
                    suggestion: None,
                });
            }
        }
    }
}
