//! Role migration map computation.

use propelauth_client::{RoleMapping, RoleMigrationMap};
use std::collections::BTreeMap;

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;

/// Computes where the members of every known role end up after an update.
///
/// Each name gets exactly one entry, resolved in this order:
///
/// 1. explicit renames (`old -> new`) as given;
/// 2. current role names without an entry map to themselves;
/// 3. old role names still without an entry map to [`RoleMapping::Removed`].
pub fn compute_role_migration_map<'a, I>(
    explicit_renames: &BTreeMap<String, String>,
    current_role_names: I,
    old_role_names: &[String],
) -> RoleMigrationMap
where
    I: IntoIterator<Item = &'a String>,
{
    let mut mapping: BTreeMap<String, RoleMapping> = explicit_renames
        .iter()
        .map(|(old, new)| (old.clone(), RoleMapping::Renamed(new.clone())))
        .collect();

    for name in current_role_names {
        mapping
            .entry(name.clone())
            .or_insert_with(|| RoleMapping::Renamed(name.clone()));
    }

    for name in old_role_names {
        mapping.entry(name.clone()).or_insert(RoleMapping::Removed);
    }

    RoleMigrationMap {
        old_to_new_role_mapping: mapping,
    }
}
