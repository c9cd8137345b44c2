//! Structured conflict, missing-requirement, and suggestion records.
//!
//! These are data, not errors: the resolver aggregates them so the caller
//! can present alternatives instead of aborting the whole run. Every record
//! carries the module, capability, and version detail needed to render a
//! specific message.

use serde::{Deserialize, Serialize};
use stack_registry::Category;
use stack_version::Requirement;

/// An unresolvable relationship between selected modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Conflict {
    /// Two or more modules share an exclusive category.
    Category {
        category: Category,
        /// The rivals, in resolution order.
        modules: Vec<String>,
    },
    /// One module lists the other (or `*`) in `incompatible_with`.
    Direct {
        module: String,
        conflicts_with: String,
    },
    /// Package version ranges with an empty intersection.
    Version {
        dependency: String,
        requirements: Vec<Requirement>,
    },
}

impl Conflict {
    /// One-line human-readable description.
    pub fn describe(&self) -> String {
        match self {
            Conflict::Category { category, modules } => format!(
                "category '{category}' allows one module, selection pulls in: {}",
                modules.join(", ")
            ),
            Conflict::Direct {
                module,
                conflicts_with,
            } => format!("'{module}' is incompatible with '{conflicts_with}'"),
            Conflict::Version {
                dependency,
                requirements,
            } => {
                let ranges: Vec<String> = requirements
                    .iter()
                    .map(|r| format!("{} wants {}", r.required_by, r.range))
                    .collect();
                format!(
                    "no version of '{dependency}' satisfies all of: {}",
                    ranges.join("; ")
                )
            }
        }
    }
}

/// What kind of thing an unmet requirement named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequirementKind {
    /// The entry explicitly named a module (`module:` prefix).
    Module,
    /// A capability tag no included or known module provides.
    Capability,
}

/// A requirement with no resolvable provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRequirement {
    /// The module that declared the requirement.
    pub module: String,
    /// The capability tag or module name required.
    pub requires: String,
    pub kind: RequirementKind,
}

impl MissingRequirement {
    pub fn describe(&self) -> String {
        match self.kind {
            RequirementKind::Module => {
                format!("'{}' requires module '{}', which is not available", self.module, self.requires)
            }
            RequirementKind::Capability => format!(
                "'{}' requires capability '{}', which nothing selected or known provides",
                self.module, self.requires
            ),
        }
    }
}

/// Kind of remedial action a suggestion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    RemoveModule,
    AddModule,
}

/// A remedial action the caller can offer the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    #[serde(default)]
    pub remove: Option<String>,
    #[serde(default)]
    pub add: Option<String>,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_serializes_with_type_tag() {
        let conflict = Conflict::Direct {
            module: "react".into(),
            conflicts_with: "vue".into(),
        };
        let json = serde_json::to_value(&conflict).unwrap();
        assert_eq!(json["type"], "direct");
        assert_eq!(json["module"], "react");
        assert_eq!(json["conflicts_with"], "vue");
    }

    #[test]
    fn test_describe_names_every_requirer() {
        let conflict = Conflict::Version {
            dependency: "react".into(),
            requirements: vec![
                Requirement {
                    dependency: "react".into(),
                    range: "^17.0.0".into(),
                    required_by: "legacy-kit".into(),
                },
                Requirement {
                    dependency: "react".into(),
                    range: "^18.0.0".into(),
                    required_by: "react".into(),
                },
            ],
        };
        let message = conflict.describe();
        assert!(message.contains("legacy-kit"));
        assert!(message.contains("^17.0.0"));
        assert!(message.contains("^18.0.0"));
    }

    #[test]
    fn test_missing_kind_serde() {
        let missing = MissingRequirement {
            module: "b".into(),
            requires: "state".into(),
            kind: RequirementKind::Capability,
        };
        let json = serde_json::to_value(&missing).unwrap();
        assert_eq!(json["kind"], "capability");
    }
}
