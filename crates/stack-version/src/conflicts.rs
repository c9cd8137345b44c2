//! Requirement grouping and range intersection.
//!
//! Several modules may pin the same package with different ranges. Grouping
//! happens by dependency name; the intersection of all ranges for one name is
//! then decided against a known-available version set. With no package index
//! to consult, the available set defaults to the anchor versions harvested
//! from the ranges' own comparator bounds (each bound plus its patch, minor,
//! and major successors), which is sufficient to witness any non-empty
//! intersection of conjunctive semver ranges.

use std::collections::BTreeMap;

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

use crate::compare::parse_range;

/// One module's version requirement on a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Package name the range applies to.
    pub dependency: String,
    /// Raw range string as declared by the module.
    pub range: String,
    /// Name of the module that declared the range.
    pub required_by: String,
}

/// An unsatisfiable intersection, naming every contributing requirer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConflict {
    /// Package the requirements disagree on.
    pub dependency: String,
    /// Every requirement that contributed to the empty intersection.
    pub requirements: Vec<Requirement>,
}

/// Outcome of [`resolve_conflicts`]: chosen versions, conflicts, warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResolution {
    /// Maximal satisfying version per non-conflicting package.
    pub resolved: BTreeMap<String, Version>,
    /// Packages whose range intersection is empty.
    pub conflicts: Vec<VersionConflict>,
    /// Non-fatal anomalies (unparseable ranges are skipped with a warning).
    pub warnings: Vec<String>,
}

/// Group requirements by dependency name and intersect all ranges per name.
///
/// Uses the anchor set harvested from the ranges themselves as the available
/// versions. See [`resolve_conflicts_with`] to supply a real version list.
pub fn resolve_conflicts(requirements: &[Requirement]) -> VersionResolution {
    resolve_conflicts_with(requirements, &BTreeMap::new())
}

/// Like [`resolve_conflicts`], with explicit known-available versions.
///
/// For packages present in `available`, the maximal listed version satisfying
/// every range is chosen. For absent packages, the anchor set stands in.
pub fn resolve_conflicts_with(
    requirements: &[Requirement],
    available: &BTreeMap<String, Vec<Version>>,
) -> VersionResolution {
    let mut result = VersionResolution::default();

    let mut grouped: BTreeMap<&str, Vec<&Requirement>> = BTreeMap::new();
    for req in requirements {
        grouped.entry(req.dependency.as_str()).or_default().push(req);
    }

    for (dependency, reqs) in grouped {
        let mut ranges: Vec<(&Requirement, VersionReq)> = Vec::with_capacity(reqs.len());
        for req in &reqs {
            match parse_range(&req.range) {
                Ok(range) => ranges.push((req, range)),
                Err(e) => result.warnings.push(format!(
                    "ignoring requirement of '{}' on {}: {e}",
                    req.required_by, dependency
                )),
            }
        }
        if ranges.is_empty() {
            continue;
        }

        let candidates = match available.get(dependency) {
            Some(versions) if !versions.is_empty() => versions.clone(),
            _ => anchor_versions(ranges.iter().map(|(_, r)| r)),
        };

        let chosen = candidates
            .iter()
            .filter(|v| ranges.iter().all(|(_, range)| range.matches(v)))
            .max();

        match chosen {
            Some(version) => {
                result.resolved.insert(dependency.to_string(), version.clone());
            }
            None => result.conflicts.push(VersionConflict {
                dependency: dependency.to_string(),
                requirements: ranges.iter().map(|(req, _)| (*req).clone()).collect(),
            }),
        }
    }

    result
}

/// Harvest candidate versions from the comparator bounds of a range set.
///
/// Each comparator contributes its own version plus the next patch, minor,
/// and major — enough to land strictly inside any open lower bound.
fn anchor_versions<'a>(ranges: impl Iterator<Item = &'a VersionReq>) -> Vec<Version> {
    let mut anchors = Vec::new();
    for range in ranges {
        for cmp in &range.comparators {
            let major = cmp.major;
            let minor = cmp.minor.unwrap_or(0);
            let patch = cmp.patch.unwrap_or(0);

            let mut base = Version::new(major, minor, patch);
            base.pre = cmp.pre.clone();
            anchors.push(base);
            anchors.push(Version::new(major, minor, patch + 1));
            anchors.push(Version::new(major, minor + 1, 0));
            anchors.push(Version::new(major + 1, 0, 0));
        }
    }
    anchors.sort();
    anchors.dedup();
    anchors
}
