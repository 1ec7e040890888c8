//! Utility functions

pub mod debounce;
pub mod filename;
pub mod fs;
pub mod guards;
pub mod text;
pub mod version;

pub use debounce::{debounce, Debounced};
pub use filename::filename;
pub use fs::{empty_dir, find_exists, is_empty_dir, is_file, path_exists};
pub use guards::{is_nil, is_object, is_plain_object};
pub use text::{camel_case, pretty_time, upper_first};
pub use version::{compare_semver, is_satisfy_rspack_version};

use crate::domain::{OneOrMany, Target};
use serde_json::{Map, Value};

/// Flatten an optional scalar-or-list into a list.
pub fn cast_array<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(OneOrMany::into_vec).unwrap_or_default()
}

/// Split items into (matching, not matching), keeping order.
pub fn partition<T>(
    items: impl IntoIterator<Item = T>,
    mut predicate: impl FnMut(&T) -> bool,
) -> (Vec<T>, Vec<T>) {
    let mut truthy = Vec::new();
    let mut falsy = Vec::new();

    for item in items {
        if predicate(&item) {
            truthy.push(item);
        } else {
            falsy.push(item);
        }
    }

    (truthy, falsy)
}

/// Copy the listed keys of a JSON object. Absent keys are skipped.
pub fn pick(object: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| object.get(*key).map(|value| ((*key).to_string(), value.clone())))
        .collect()
}

pub fn is_web_target(targets: &[Target]) -> bool {
    targets.iter().any(|target| matches!(target, Target::Web | Target::WebWorker))
}
