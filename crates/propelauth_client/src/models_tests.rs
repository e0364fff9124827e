//! Tests for the wire models.

use super::*;
use serde_json::json;

fn owner_definition() -> RoleDefinition {
    RoleDefinition {
        can_view_other_members: true,
        can_invite: true,
        can_change_roles: true,
        can_manage_api_keys: true,
        can_remove_users: true,
        can_setup_saml: true,
        can_delete_org: true,
        can_edit_org_access: true,
        can_update_org_metadata: true,
        external_permissions: vec!["read:reports".to_string()],
        roles_can_manage: vec![],
        is_visible_to_end_user: true,
        disabled: false,
        description: Some("Full control".to_string()),
    }
}

#[test]
fn test_org_role_structure_from_flag() {
    assert_eq!(
        OrgRoleStructure::from_multiple_roles_per_user(true),
        OrgRoleStructure::MultiRole
    );
    assert_eq!(
        OrgRoleStructure::from_multiple_roles_per_user(false),
        OrgRoleStructure::SingleRoleInHierarchy
    );
}

#[test]
fn test_org_role_structure_wire_names() {
    assert_eq!(
        serde_json::to_value(OrgRoleStructure::MultiRole).unwrap(),
        json!("multi_role")
    );
    assert_eq!(
        serde_json::to_value(OrgRoleStructure::SingleRoleInHierarchy).unwrap(),
        json!("single_role_in_hierarchy")
    );
}

#[test]
fn test_permission_display_name_falls_back_to_name() {
    let mut permission = Permission::new("write:reports");
    assert_eq!(permission.display_name(), "write:reports");

    permission.display_name = Some("Write reports".to_string());
    assert_eq!(permission.display_name(), "Write reports");
}

#[test]
fn test_permission_omits_absent_optional_fields() {
    let value = serde_json::to_value(Permission::new("read:reports")).unwrap();
    assert_eq!(value, json!({ "name": "read:reports" }));
}

#[test]
fn test_role_serializes_definition_inline() {
    let role = Role::new("Owner", owner_definition());
    let value = serde_json::to_value(&role).unwrap();

    assert_eq!(value["name"], json!("Owner"));
    assert_eq!(value["can_delete_org"], json!(true));
    assert_eq!(value["external_permissions"], json!(["read:reports"]));
    assert_eq!(value["roles_can_manage"], json!([]));
    assert_eq!(value["is_visible_to_end_user"], json!(true));
    assert_eq!(value["description"], json!("Full control"));
}

#[test]
fn test_role_deserializes_with_missing_lists() {
    let value = json!({
        "name": "Member",
        "can_view_other_members": true,
        "can_invite": false,
        "can_change_roles": false,
        "can_manage_api_keys": false,
        "can_remove_users": false,
        "can_setup_saml": false,
        "can_delete_org": false,
        "can_edit_org_access": false,
        "can_update_org_metadata": false,
        "is_visible_to_end_user": true
    });

    let role: Role = serde_json::from_value(value).unwrap();
    assert_eq!(role.name, "Member");
    assert!(role.definition.can_view_other_members);
    assert!(role.definition.external_permissions.is_empty());
    assert!(role.definition.roles_can_manage.is_empty());
    assert!(!role.definition.disabled);
    assert_eq!(role.definition.description, None);
}

#[test]
fn test_role_deserializes_with_only_a_name() {
    let role: Role = serde_json::from_value(json!({ "name": "Viewer" })).unwrap();

    assert_eq!(role.name, "Viewer");
    assert!(!role.definition.can_view_other_members);
    assert!(!role.definition.can_invite);
    assert!(!role.definition.can_update_org_metadata);
    assert!(role.definition.is_visible_to_end_user);
    assert!(role.definition.external_permissions.is_empty());
}

#[test]
fn test_role_mapping_serializes_as_string_or_null() {
    let mut map = RoleMigrationMap::default();
    map.old_to_new_role_mapping
        .insert("Manager".to_string(), RoleMapping::Renamed("Owner".to_string()));
    map.old_to_new_role_mapping
        .insert("Guest".to_string(), RoleMapping::Removed);

    let value = serde_json::to_value(&map).unwrap();
    assert_eq!(
        value,
        json!({
            "old_to_new_role_mapping": {
                "Guest": null,
                "Manager": "Owner"
            }
        })
    );
}

#[test]
fn test_role_mapping_deserializes_null_as_removed() {
    let map: RoleMigrationMap = serde_json::from_value(json!({
        "old_to_new_role_mapping": { "Guest": null, "Admin": "Admin" }
    }))
    .unwrap();

    assert_eq!(map.get("Guest"), Some(&RoleMapping::Removed));
    assert_eq!(
        map.get("Admin"),
        Some(&RoleMapping::Renamed("Admin".to_string()))
    );
    assert_eq!(map.get("Unknown"), None);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_roles_and_permissions_helpers() {
    let state = RolesAndPermissions {
        org_role_structure: OrgRoleStructure::SingleRoleInHierarchy,
        default_role: "Member".to_string(),
        default_owner_role: "Owner".to_string(),
        roles: vec![
            Role::new("Owner", owner_definition()),
            Role::new("Member", RoleDefinition::default()),
        ],
        permissions: vec![Permission::new("read:reports")],
    };

    assert!(!state.multiple_roles_per_user());
    assert_eq!(state.role_names(), vec!["Owner", "Member"]);
    assert!(state.role("Owner").is_some());
    assert!(state.role("owner").is_none());
}

#[test]
fn test_update_payload_shape() {
    let mut role_migration_map = RoleMigrationMap::default();
    role_migration_map
        .old_to_new_role_mapping
        .insert("Owner".to_string(), RoleMapping::Renamed("Owner".to_string()));

    let update = RolesAndPermissionsUpdate {
        org_role_structure: OrgRoleStructure::MultiRole,
        default_role: "Owner".to_string(),
        default_owner_role: "Owner".to_string(),
        roles: vec![Role::new("Owner", owner_definition())],
        permissions: vec![Permission::new("read:reports")],
        role_migration_map,
    };

    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value["org_role_structure"], json!("multi_role"));
    assert_eq!(value["default_role"], json!("Owner"));
    assert_eq!(value["default_owner_role"], json!("Owner"));
    assert_eq!(value["roles"][0]["name"], json!("Owner"));
    assert_eq!(value["permissions"], json!([{ "name": "read:reports" }]));
    assert_eq!(
        value["role_migration_map"]["old_to_new_role_mapping"]["Owner"],
        json!("Owner")
    );
}
