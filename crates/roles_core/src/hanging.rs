//! Detection of remote entities nobody declares.

use std::collections::HashSet;

#[cfg(test)]
#[path = "hanging_tests.rs"]
mod tests;

/// Returns remote names that are neither tracked locally nor protected.
///
/// Hanging names are reported for the caller to deal with explicitly. They are
/// never dropped from or adopted into the local configuration here. The result
/// keeps the remote order and contains each name once.
pub fn find_hanging_names(
    remote_names: &[String],
    tracked_names: &[String],
    protected_names: &[String],
) -> Vec<String> {
    let known: HashSet<&str> = tracked_names
        .iter()
        .chain(protected_names)
        .map(String::as_str)
        .collect();

    let mut reported = HashSet::new();
    let mut hanging = Vec::new();
    for name in remote_names {
        if !known.contains(name.as_str()) && reported.insert(name.as_str()) {
            hanging.push(name.clone());
        }
    }
    hanging
}
