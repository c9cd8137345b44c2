//! The validated module record.

use std::collections::{BTreeMap, BTreeSet};

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::template::TemplateContribution;

/// A module-name set that may be the wildcard `*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatSpec {
    /// Matches every module.
    All,
    /// Matches exactly the named modules.
    Named(BTreeSet<String>),
}

impl CompatSpec {
    /// Build from descriptor entries; `"*"` anywhere means all.
    pub fn from_entries(entries: &[String]) -> Self {
        if entries.iter().any(|e| e == "*") {
            CompatSpec::All
        } else {
            CompatSpec::Named(entries.iter().cloned().collect())
        }
    }

    pub fn none() -> Self {
        CompatSpec::Named(BTreeSet::new())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CompatSpec::All)
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            CompatSpec::All => true,
            CompatSpec::Named(names) => names.contains(name),
        }
    }
}

/// A named, versioned unit contributing dependencies and file templates to a
/// generated project. Produced by validation; never constructed from raw
/// descriptor input directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub version: Version,
    pub category: Category,
    pub description: String,
    pub display_name: Option<String>,
    pub tags: Vec<String>,
    /// Higher wins ties in provider selection and exclusivity auto-picks.
    pub priority: i64,
    /// Capability tags, always including the module's own name.
    pub provides: BTreeSet<String>,
    /// Capability tags or module names, in declaration order.
    pub requires: Vec<String>,
    pub dev_requires: Vec<String>,
    pub compatible_with: CompatSpec,
    pub incompatible_with: CompatSpec,
    /// Opaque package-name → version-range maps.
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub templates: Vec<TemplateContribution>,
    pub config_schema: Option<toml::Value>,
}

impl Module {
    /// Whether this module provides the given capability (or *is* it).
    pub fn provides(&self, capability: &str) -> bool {
        self.provides.contains(capability)
    }

    /// Whether this module declares the other incompatible.
    pub fn declares_incompatible(&self, other: &str) -> bool {
        // The wildcard never makes a module incompatible with itself.
        other != self.name && self.incompatible_with.contains(other)
    }

    /// Name shown in listings: display name when declared, else the key.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str) -> Module {
        Module {
            name: name.to_string(),
            version: Version::new(1, 0, 0),
            category: Category::Other,
            description: format!("{name} module"),
            display_name: None,
            tags: Vec::new(),
            priority: 0,
            provides: [name.to_string()].into_iter().collect(),
            requires: Vec::new(),
            dev_requires: Vec::new(),
            compatible_with: CompatSpec::All,
            incompatible_with: CompatSpec::none(),
            dependencies: BTreeMap::new(),
            dev_dependencies: BTreeMap::new(),
            templates: Vec::new(),
            config_schema: None,
        }
    }

    #[test]
    fn test_compat_spec_wildcard() {
        let spec = CompatSpec::from_entries(&["vue".to_string(), "*".to_string()]);
        assert!(spec.is_all());
        assert!(spec.contains("anything"));
    }

    #[test]
    fn test_compat_spec_named() {
        let spec = CompatSpec::from_entries(&["vue".to_string()]);
        assert!(spec.contains("vue"));
        assert!(!spec.contains("react"));
    }

    #[test]
    fn test_provides_own_name() {
        let m = module("redux");
        assert!(m.provides("redux"));
        assert!(!m.provides("state"));
    }

    #[test]
    fn test_wildcard_incompatibility_excludes_self() {
        let mut m = module("hermit");
        m.incompatible_with = CompatSpec::All;
        assert!(m.declares_incompatible("anyone"));
        assert!(!m.declares_incompatible("hermit"));
    }

    #[test]
    fn test_label_prefers_display_name() {
        let mut m = module("react");
        assert_eq!(m.label(), "react");
        m.display_name = Some("React".to_string());
        assert_eq!(m.label(), "React");
    }
}
