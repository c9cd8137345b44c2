//! Descriptor validation: raw descriptor → [`Module`].
//!
//! Required fields are `name`, `version`, `category`, `description`. A
//! failing descriptor is rejected with one [`ValidationError`] naming every
//! missing field and every malformed value at once, so a descriptor author
//! fixes a file in one pass. Validation failure excludes that descriptor
//! only — discovery continues.

use std::collections::BTreeSet;
use std::fmt;

use crate::category::Category;
use crate::descriptor::RawDescriptor;
use crate::module::{CompatSpec, Module};

/// A rejected descriptor, with everything wrong with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The descriptor's name when it declared one.
    pub name: Option<String>,
    /// Required fields that were absent.
    pub missing: Vec<String>,
    /// Malformed values (bad version, unknown category, empty template path).
    pub problems: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid module descriptor '{}'",
            self.name.as_deref().unwrap_or("<unnamed>")
        )?;
        if !self.missing.is_empty() {
            write!(f, ": missing required fields [{}]", self.missing.join(", "))?;
        }
        for problem in &self.problems {
            write!(f, "; {problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Validate a raw descriptor into a [`Module`].
pub fn validate(raw: &RawDescriptor) -> Result<Module, ValidationError> {
    let meta = &raw.module;
    let mut missing = Vec::new();
    let mut problems = Vec::new();

    if meta.name.as_deref().is_none_or(str::is_empty) {
        missing.push("name".to_string());
    }
    if meta.version.is_none() {
        missing.push("version".to_string());
    }
    if meta.category.is_none() {
        missing.push("category".to_string());
    }
    if meta.description.as_deref().is_none_or(str::is_empty) {
        missing.push("description".to_string());
    }

    let version = meta.version.as_deref().and_then(|v| {
        stack_version::parse_version(v)
            .map_err(|e| problems.push(e.to_string()))
            .ok()
    });

    let category = meta.category.as_deref().and_then(|c| {
        let parsed = Category::parse(c);
        if parsed.is_none() {
            problems.push(format!(
                "unknown category '{c}' (expected one of: {})",
                Category::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        parsed
    });

    for contribution in &raw.templates {
        if contribution.path.is_empty() {
            problems.push("template with empty target path".to_string());
        }
    }

    let (Some(name), Some(version), Some(category), Some(description)) = (
        meta.name.clone().filter(|n| !n.is_empty()),
        version,
        category,
        meta.description.clone().filter(|d| !d.is_empty()),
    ) else {
        return Err(ValidationError {
            name: meta.name.clone(),
            missing,
            problems,
        });
    };
    if !problems.is_empty() {
        return Err(ValidationError {
            name: Some(name),
            missing,
            problems,
        });
    }

    // A module's own name is implicitly in its provides set.
    let mut provides: BTreeSet<String> = meta.provides.iter().cloned().collect();
    provides.insert(name.clone());

    Ok(Module {
        name,
        version,
        category,
        description,
        display_name: meta.display_name.clone(),
        tags: meta.tags.clone(),
        priority: meta.priority.unwrap_or(0),
        provides,
        requires: meta.requires.clone(),
        dev_requires: meta.dev_requires.clone(),
        compatible_with: meta
            .compatible_with
            .as_ref()
            .map(|entries| CompatSpec::from_entries(entries))
            .unwrap_or(CompatSpec::All),
        incompatible_with: CompatSpec::from_entries(&meta.incompatible_with),
        dependencies: raw.dependencies.clone(),
        dev_dependencies: raw.dev_dependencies.clone(),
        templates: raw.templates.clone(),
        config_schema: raw.config_schema.clone(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::descriptor::RawDescriptor;

    fn raw(toml_str: &str) -> RawDescriptor {
        RawDescriptor::from_toml(toml_str).unwrap()
    }

    const VALID: &str = r#"
[module]
name = "react"
version = "18.2.0"
category = "frontend-framework"
description = "Declarative component-based UI library"
"#;

    #[test]
    fn test_valid_descriptor() {
        let module = validate(&raw(VALID)).unwrap();
        assert_eq!(module.name, "react");
        assert_eq!(module.version, semver::Version::new(18, 2, 0));
        assert_eq!(module.category, Category::FrontendFramework);
        assert!(module.compatible_with.is_all());
        assert!(module.provides("react"));
    }

    #[test]
    fn test_all_missing_fields_named() {
        let err = validate(&raw("[module]\n")).unwrap_err();
        assert_eq!(
            err.missing,
            vec!["name", "version", "category", "description"]
        );
        let message = err.to_string();
        for field in ["name", "version", "category", "description"] {
            assert!(message.contains(field), "message should name {field}: {message}");
        }
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let err = validate(&raw(
            "[module]\nname = \"\"\nversion = \"1.0.0\"\ncategory = \"other\"\ndescription = \"\"\n",
        ))
        .unwrap_err();
        assert_eq!(err.missing, vec!["name", "description"]);
    }

    #[test]
    fn test_bad_version_reported() {
        let err = validate(&raw(
            "[module]\nname = \"m\"\nversion = \"latest\"\ncategory = \"other\"\ndescription = \"d\"\n",
        ))
        .unwrap_err();
        assert!(err.missing.is_empty());
        assert!(err.problems[0].contains("latest"));
    }

    #[test]
    fn test_unknown_category_reported_with_expected_set() {
        let err = validate(&raw(
            "[module]\nname = \"m\"\nversion = \"1.0.0\"\ncategory = \"middleware\"\ndescription = \"d\"\n",
        ))
        .unwrap_err();
        assert!(err.problems[0].contains("middleware"));
        assert!(err.problems[0].contains("frontend-framework"));
    }

    #[test]
    fn test_missing_and_malformed_reported_together() {
        let err = validate(&raw(
            "[module]\nname = \"m\"\nversion = \"nope\"\ncategory = \"other\"\n",
        ))
        .unwrap_err();
        assert_eq!(err.missing, vec!["description"]);
        assert_eq!(err.problems.len(), 1);
    }

    #[test]
    fn test_own_name_added_to_provides() {
        let module = validate(&raw(
            r#"
[module]
name = "redux"
version = "5.0.0"
category = "state-manager"
description = "Predictable state container"
provides = ["state"]
"#,
        ))
        .unwrap();
        assert!(module.provides("redux"));
        assert!(module.provides("state"));
    }

    #[test]
    fn test_empty_template_path_rejected() {
        let err = validate(&raw(
            r#"
[module]
name = "m"
version = "1.0.0"
category = "other"
description = "d"

[[templates]]
path = ""
content = "x"
"#,
        ))
        .unwrap_err();
        assert!(err.problems[0].contains("template"));
    }

    #[test]
    fn test_defaults() {
        let module = validate(&raw(VALID)).unwrap();
        assert_eq!(module.priority, 0);
        assert!(module.requires.is_empty());
        assert!(!module.incompatible_with.contains("anything"));
    }
}
