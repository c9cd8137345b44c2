//! Shared test fixtures for the stacksmith workspace.
//!
//! This crate provides standardised module and registry builders to
//! eliminate duplication across crate test suites. It is a dev-dependency
//! only — never published.

pub mod module;
pub mod project;

pub use module::{ModuleBuilder, registry_with};
pub use project::TestProject;
