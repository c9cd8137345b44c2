//! Version parsing, ordering, and single-range resolution.
//!
//! Ranges use the `semver` crate's requirement syntax (`^18.2`, `~1.2.3`,
//! `>=1.0, <2.0`). Comma-separated comparators are conjunctive.

use semver::{Version, VersionReq};

use crate::error::{Error, Result};

/// Parse a version string, reporting the offending input on failure.
pub fn parse_version(s: &str) -> Result<Version> {
    Version::parse(s.trim()).map_err(|e| Error::InvalidVersion {
        version: s.to_string(),
        source: e,
    })
}

/// Parse a version range string, reporting the offending input on failure.
pub fn parse_range(s: &str) -> Result<VersionReq> {
    VersionReq::parse(s.trim()).map_err(|e| Error::InvalidRange {
        range: s.to_string(),
        source: e,
    })
}

/// Return the maximum version under semantic-version ordering.
pub fn latest(versions: &[Version]) -> Option<&Version> {
    versions.iter().max()
}

/// Return the maximum version in `versions` satisfying `range`, or `None`.
pub fn resolve(versions: &[Version], range: &VersionReq) -> Option<Version> {
    versions
        .iter()
        .filter(|v| range.matches(v))
        .max()
        .cloned()
}

/// Whether a version is a release (no pre-release identifiers).
pub fn is_stable(version: &Version) -> bool {
    version.pre.is_empty()
}
