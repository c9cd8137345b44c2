//! Permissive on-disk descriptor form (`stack_module.toml`).
//!
//! Descriptors are parsed into [`RawDescriptor`] first — every field
//! optional, unknown fields ignored for forward compatibility — and promoted
//! to a [`Module`](crate::Module) by [`validate`](crate::validate::validate),
//! which reports *all* missing required fields at once rather than failing on
//! the first.
//!
//! # Example TOML
//!
//! ```toml
//! [module]
//! name = "react"
//! version = "18.2.0"
//! category = "frontend-framework"
//! description = "Declarative component-based UI library"
//! priority = 10
//! provides = ["react"]
//! incompatible_with = ["vue"]
//!
//! [dependencies]
//! react = "^18.2.0"
//!
//! [[templates]]
//! path = "package.json"
//! content = """{ "name": "{{project_name}}" }"""
//! strategy = "merge-structured"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::template::TemplateContribution;

/// Unvalidated module descriptor as read from a source.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDescriptor {
    #[serde(default)]
    pub module: RawModuleMeta,
    /// Package-name → version-range map, opaque to the engine.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub templates: Vec<TemplateContribution>,
    /// Opaque per-module configuration schema, carried for validation only.
    #[serde(default)]
    pub config_schema: Option<toml::Value>,
}

/// The `[module]` table of a descriptor. All fields optional until
/// validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawModuleMeta {
    pub name: Option<String>,
    pub version: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    /// Capability tags; the module's own name is implicit.
    #[serde(default)]
    pub provides: Vec<String>,
    /// Capability tags or module names; `module:` prefix forces module-kind.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Expanded only when the resolver runs with `include_dev`.
    #[serde(default)]
    pub dev_requires: Vec<String>,
    /// Module names, or `"*"` for all. Defaults to all when omitted.
    #[serde(default)]
    pub compatible_with: Option<Vec<String>>,
    #[serde(default)]
    pub incompatible_with: Vec<String>,
}

impl RawDescriptor {
    /// Parse a descriptor from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::DescriptorParse {
            origin: None,
            source: e,
        })
    }

    /// Read and parse a descriptor file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|e| Error::DescriptorParse {
            origin: Some(path.display().to_string()),
            source: e,
        })
    }
}
