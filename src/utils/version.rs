//! Bundler version gate

use crate::domain::RSPACK_MIN_VERSION;
use std::cmp::Ordering;

/// Compare dotted numeric versions; missing parts count as zero.
pub fn compare_semver(version1: &str, version2: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> { v.split('.').map(|p| p.parse().unwrap_or(0)).collect() };
    let parts1 = parse(version1);
    let parts2 = parse(version2);
    let len = parts1.len().max(parts2.len());

    for i in 0..len {
        let item1 = parts1.get(i).copied().unwrap_or(0);
        let item2 = parts2.get(i).copied().unwrap_or(0);
        match item1.cmp(&item2) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Whether the installed rspack is new enough.
///
/// Nightly builds carry a `-canary-<sha>` suffix which is ignored; any other
/// non-numeric version is treated as unstable and accepted.
pub fn is_satisfy_rspack_version(original_version: &str) -> bool {
    let version = original_version.split("-canary").next().unwrap_or(original_version);

    if !version.is_empty() && version.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return compare_semver(version, RSPACK_MIN_VERSION) != Ordering::Less;
    }

    true
}
