//! Permission catalog lookup.

use propelauth_client::Permission;

#[cfg(test)]
#[path = "permissions_tests.rs"]
mod tests;

/// Finds a permission by exact, case-sensitive name.
///
/// The catalog keeps its insertion order and may contain duplicates; the first
/// match wins.
pub fn find_permission<'a>(catalog: &'a [Permission], name: &str) -> Option<&'a Permission> {
    catalog.iter().find(|permission| permission.name == name)
}
