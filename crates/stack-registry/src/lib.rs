//! Module descriptor discovery, validation, and indexing.
//!
//! The registry is the single source of truth for "what modules exist and
//! what do they declare." Descriptors arrive from an ordered list of
//! [`ModuleSource`]s (built-in catalog, plugin directories, an environment
//! override path), are validated into [`Module`] records, and are indexed by
//! name and category. Earlier sources outrank later ones: a name already
//! claimed by a higher-priority source shadows later definitions with a
//! recorded warning instead of overwriting.
//!
//! Nothing here executes code. Sources yield data only, and the registry is
//! an explicitly constructed value passed by reference into the resolver and
//! composition layers — there is no ambient global instance.

pub mod builtin;
pub mod category;
pub mod descriptor;
pub mod error;
pub mod module;
pub mod registry;
pub mod source;
pub mod template;
pub mod validate;

pub use category::{Category, CategoryPolicy};
pub use descriptor::{RawDescriptor, RawModuleMeta};
pub use error::{Error, Result};
pub use module::{CompatSpec, Module};
pub use registry::{DiscoveryReport, ModuleRegistry, ResolvedCompatibility};
pub use source::{DirectorySource, MODULE_PATH_ENV, ModuleSource, StaticSource, env_override_source};
pub use template::{MergeStrategy, TemplateContribution};
pub use validate::{ValidationError, validate};

/// Canonical descriptor filename extension searched in plugin directories.
pub const DESCRIPTOR_EXTENSION: &str = "toml";
