//! Dependency resolution for Stacksmith.
//!
//! Takes a user selection, queries the registry and version manager, builds a
//! dependency graph, detects conflicts and cycles, and produces a
//! deterministic installation order.
//!
//! Conflicts, missing requirements, and suggestions come back as structured
//! data so a caller can render specific, actionable messages; only structural
//! errors — a selected name the registry does not know, or a requirement
//! cycle — abort resolution with an `Err`.
//!
//! Resolution runs over a shared borrow of the registry, so the registry
//! cannot be mutated mid-resolution; a reload between two calls is picked up
//! through the registry's generation counter, which also invalidates any
//! cached results.

pub mod conflict;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod selection;

pub use conflict::{
    Conflict, MissingRequirement, RequirementKind, Suggestion, SuggestionKind,
};
pub use error::{Error, Result};
pub use graph::DependencyGraph;
pub use resolver::{ConflictResolution, DependencyResolver, ResolveOptions, Resolution};
pub use selection::Selection;
