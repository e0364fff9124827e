use super::*;
use roles_config::ConfigurationError;
use roles_core::RolesError;
use std::fs;
use tempfile::TempDir;

const ROLES_TOML: &str = r#"
default_role = "Member"
default_owner_role = "Owner"
role_hierarchy = ["Owner", "Admin", "Member"]

[[permissions]]
name = "read:reports"

[roles.Owner]
can_view_other_members = true
external_permissions = ["read:reports"]

[roles.Admin]
can_invite = true
replaces = "Manager"

[roles.Member]
"#;

const REMOTE_JSON: &str = r#"{
    "org_role_structure": "single_role_in_hierarchy",
    "default_role": "Member",
    "default_owner_role": "Owner",
    "roles": [
        {
            "name": "Owner",
            "can_view_other_members": true,
            "can_invite": false,
            "can_change_roles": false,
            "can_manage_api_keys": false,
            "can_remove_users": false,
            "can_setup_saml": false,
            "can_delete_org": false,
            "can_edit_org_access": false,
            "can_update_org_metadata": false,
            "external_permissions": ["read:reports"],
            "is_visible_to_end_user": true
        },
        {
            "name": "Manager",
            "can_view_other_members": false,
            "can_invite": true,
            "can_change_roles": false,
            "can_manage_api_keys": false,
            "can_remove_users": false,
            "can_setup_saml": false,
            "can_delete_org": false,
            "can_edit_org_access": false,
            "can_update_org_metadata": false,
            "is_visible_to_end_user": true
        },
        {
            "name": "Member",
            "can_view_other_members": false,
            "can_invite": false,
            "can_change_roles": false,
            "can_manage_api_keys": false,
            "can_remove_users": false,
            "can_setup_saml": false,
            "can_delete_org": false,
            "can_edit_org_access": false,
            "can_update_org_metadata": false,
            "is_visible_to_end_user": true
        }
    ],
    "permissions": [{ "name": "read:reports" }, { "name": "legacy:export" }]
}"#;

fn write_files(dir: &TempDir, roles: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let config_path = dir.path().join("roles.toml");
    let remote_path = dir.path().join("remote.json");
    fs::write(&config_path, roles).unwrap();
    fs::write(&remote_path, REMOTE_JSON).unwrap();
    (config_path, remote_path)
}

#[test]
fn test_validate_config_valid() {
    let dir = TempDir::new().unwrap();
    let (config_path, _) = write_files(&dir, ROLES_TOML);

    let result = validate_config(&config_path).expect("Config should load");

    assert!(result.is_valid());
    assert_eq!(
        render_validation(&result),
        "Configuration is valid (0 warning(s))\n"
    );
}

#[test]
fn test_validate_config_renders_errors() {
    let dir = TempDir::new().unwrap();
    let (config_path, _) = write_files(&dir, &ROLES_TOML.replace("\"Member\"\ndefault_owner", "\"Viewer\"\ndefault_owner"));

    let result = validate_config(&config_path).unwrap();
    let rendered = render_validation(&result);

    assert!(!result.is_valid());
    assert!(rendered.contains("error[UnknownReference] default_role: Role 'Viewer' is not defined"));
    assert!(rendered.contains("help: Add a [roles.Viewer] table"));
    assert!(!rendered.contains("Configuration is valid"));
}

#[test]
fn test_validate_config_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = validate_config(&dir.path().join("absent.toml"));

    assert!(matches!(
        result,
        Err(Error::Configuration(ConfigurationError::FileNotFound { .. }))
    ));
}

#[tokio::test]
async fn test_plan_update_renders_payload() {
    let dir = TempDir::new().unwrap();
    let (config_path, remote_path) = write_files(&dir, ROLES_TOML);

    let rendered = plan_update(&config_path, &remote_path)
        .await
        .expect("Plan should succeed");
    let payload: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(payload["org_role_structure"], "single_role_in_hierarchy");
    assert_eq!(payload["roles"][1]["name"], "Admin");
    assert_eq!(
        payload["role_migration_map"]["old_to_new_role_mapping"]["Manager"],
        "Admin"
    );
}

#[tokio::test]
async fn test_plan_update_with_invalid_config() {
    let dir = TempDir::new().unwrap();
    let (config_path, remote_path) = write_files(
        &dir,
        &ROLES_TOML.replace("[\"Owner\", \"Admin\", \"Member\"]", "[\"Owner\", \"Admin\", \"Ghost\"]"),
    );

    let result = plan_update(&config_path, &remote_path).await;

    assert!(matches!(
        result,
        Err(Error::Roles(RolesError::Configuration(
            ConfigurationError::ValidationFailed { .. }
        )))
    ));
}

#[tokio::test]
async fn test_diff_config_reports_drift() {
    let dir = TempDir::new().unwrap();
    let (config_path, remote_path) = write_files(&dir, ROLES_TOML);

    let report = diff_config(&config_path, &remote_path)
        .await
        .expect("Diff should succeed");

    assert!(report.has_drift());
    assert!(report.hierarchy_changed);
    assert_eq!(report.missing_roles, vec!["Admin"]);
    assert!(report.hanging_roles.is_empty(), "Manager is replaced by Admin");
    assert_eq!(report.hanging_permissions, vec!["legacy:export"]);
    assert!(report.changed_roles.is_empty());
}

#[test]
fn test_render_validation_lists_warnings_and_errors() {
    let mut result = ValidationResult::new();
    result.add_warning(roles_config::ValidationWarning {
        field_path: "permissions[1]".to_string(),
        message: "Permission 'read:reports' is declared more than once".to_string(),
        recommendation: None,
    });

    assert_eq!(
        render_validation(&result),
        "warning permissions[1]: Permission 'read:reports' is declared more than once\n\
         Configuration is valid (1 warning(s))\n"
    );

    result.add_error(roles_config::ValidationError {
        error_type: roles_config::ValidationErrorType::BusinessRuleViolation,
        field_path: "roles.Extra".to_string(),
        message: "Role 'Extra' is not part of role_hierarchy".to_string(),
        suggestion: None,
    });

    assert_eq!(
        render_validation(&result),
        "error[BusinessRuleViolation] roles.Extra: Role 'Extra' is not part of role_hierarchy\n\
         warning permissions[1]: Permission 'read:reports' is declared more than once\n"
    );
}
