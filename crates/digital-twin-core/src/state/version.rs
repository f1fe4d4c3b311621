//! Model version strings.

use crate::error::{TwinError, TwinResult};

/// `MAJOR.MINOR.PATCH`, optionally followed by `-pre` or `+build`.
pub fn is_semver(version: &str) -> bool {
    let core = version
        .split(|c: char| c == '-' || c == '+')
        .next()
        .unwrap_or_default();
    let parts: Vec<_> = core.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Fail with [`TwinError::InvalidVersion`] unless `version` is semver.
pub(crate) fn check_version(version: &str) -> TwinResult<()> {
    if is_semver(version) {
        Ok(())
    } else {
        Err(TwinError::InvalidVersion {
            version: version.to_string(),
        })
    }
}
