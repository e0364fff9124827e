//! Tests for roles error types.

use super::*;

#[test]
fn test_undefined_hierarchy_role_names_the_role() {
    let error = RolesError::UndefinedHierarchyRole {
        role: "Billing".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Role hierarchy references undefined role 'Billing'"
    );
}

#[test]
fn test_configuration_error_conversion() {
    let error: RolesError = ConfigurationError::ParseError {
        reason: "bad toml".to_string(),
    }
    .into();

    assert!(matches!(error, RolesError::Configuration(_)));
    assert_eq!(
        error.to_string(),
        "Invalid roles configuration: Failed to parse configuration: bad toml"
    );
}

#[test]
fn test_client_error_conversion() {
    let error: RolesError = propelauth_client::Error::RateLimitExceeded.into();

    assert!(matches!(
        error,
        RolesError::Client(propelauth_client::Error::RateLimitExceeded)
    ));
    assert_eq!(error.to_string(), "PropelAuth API error: Rate limit exceeded");
}
