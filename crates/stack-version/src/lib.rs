//! Semantic version comparison and range intersection for Stacksmith.
//!
//! Modules carry opaque package-name → version-range maps; when several
//! modules pin the same package, this crate decides whether the ranges can be
//! satisfied together and which version wins. It is a thin, deterministic
//! layer over the `semver` crate with no I/O and no global state.

pub mod compare;
pub mod conflicts;
pub mod error;

pub use compare::{is_stable, latest, parse_range, parse_version, resolve};
pub use conflicts::{
    Requirement, VersionConflict, VersionResolution, resolve_conflicts, resolve_conflicts_with,
};
pub use error::{Error, Result};
