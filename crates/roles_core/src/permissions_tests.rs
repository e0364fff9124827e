//! Tests for permission lookup.

use super::*;

fn catalog() -> Vec<Permission> {
    vec![
        Permission {
            name: "read:reports".to_string(),
            display_name: Some("Read reports".to_string()),
            description: None,
        },
        Permission::new("write:reports"),
        Permission {
            name: "read:reports".to_string(),
            display_name: Some("Shadowed".to_string()),
            description: None,
        },
    ]
}

#[test]
fn test_find_permission_by_name() {
    let catalog = catalog();
    let found = find_permission(&catalog, "write:reports").expect("Permission should exist");
    assert_eq!(found.name, "write:reports");
}

#[test]
fn test_find_permission_first_match_wins() {
    let catalog = catalog();
    let found = find_permission(&catalog, "read:reports").unwrap();
    assert_eq!(found.display_name(), "Read reports");
}

#[test]
fn test_find_permission_is_case_sensitive() {
    assert!(find_permission(&catalog(), "READ:reports").is_none());
}

#[test]
fn test_find_permission_in_empty_catalog() {
    assert!(find_permission(&[], "read:reports").is_none());
}
