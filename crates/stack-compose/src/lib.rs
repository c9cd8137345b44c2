//! Template composition engine.
//!
//! Takes the resolver's ordered module list and a target directory, collects
//! each module's per-file contributions, merges or replaces content per path
//! according to strategy, renders variables, and writes the project tree.
//!
//! Overlap handling is deterministic: contributions are collected in
//! resolution order, strategies are elected per path (a declared override
//! wins, conflicting overrides fail that path only), and every write is
//! atomic. Per-path failures are collected in the report rather than thrown;
//! only an unwritable target directory aborts the run.

pub mod composer;
pub mod error;
pub mod merge;
pub mod strategy;
pub mod vars;
pub mod writer;

pub use composer::{ComposeReport, Composer, PathFailure};
pub use error::{Error, Result};
pub use merge::DataFormat;
pub use vars::{Renderer, TemplateContext};
