//! [`ModuleBuilder`] and registry fixtures for test scenarios.
//!
//! # Example
//!
//! ```rust
//! use stack_test_utils::{ModuleBuilder, registry_with};
//!
//! let registry = registry_with(vec![
//!     ModuleBuilder::new("redux", "state-manager").provides(&["state"]),
//!     ModuleBuilder::new("app-kit", "other").requires(&["state"]),
//! ]);
//! assert!(registry.get("redux").is_some());
//! ```

use stack_registry::{
    CategoryPolicy, MergeStrategy, Module, ModuleRegistry, RawDescriptor, StaticSource,
    TemplateContribution, validate,
};

/// Fluent builder for descriptor fixtures.
///
/// Defaults: version `1.0.0`, a generated description, priority 0, no
/// requirements, compatible with everything.
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    raw: RawDescriptor,
}

impl ModuleBuilder {
    pub fn new(name: &str, category: &str) -> Self {
        let mut raw = RawDescriptor::default();
        raw.module.name = Some(name.to_string());
        raw.module.version = Some("1.0.0".to_string());
        raw.module.category = Some(category.to_string());
        raw.module.description = Some(format!("{name} test module"));
        Self { raw }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.raw.module.version = Some(version.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.raw.module.description = Some(description.to_string());
        self
    }

    pub fn display_name(mut self, display_name: &str) -> Self {
        self.raw.module.display_name = Some(display_name.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.raw.module.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.raw.module.priority = Some(priority);
        self
    }

    pub fn provides(mut self, capabilities: &[&str]) -> Self {
        self.raw.module.provides = capabilities.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn requires(mut self, requirements: &[&str]) -> Self {
        self.raw.module.requires = requirements.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn dev_requires(mut self, requirements: &[&str]) -> Self {
        self.raw.module.dev_requires = requirements.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn compatible_with(mut self, names: &[&str]) -> Self {
        self.raw.module.compatible_with = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn incompatible_with(mut self, names: &[&str]) -> Self {
        self.raw.module.incompatible_with = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn dependency(mut self, package: &str, range: &str) -> Self {
        self.raw
            .dependencies
            .insert(package.to_string(), range.to_string());
        self
    }

    pub fn dev_dependency(mut self, package: &str, range: &str) -> Self {
        self.raw
            .dev_dependencies
            .insert(package.to_string(), range.to_string());
        self
    }

    /// Add a template with the default strategy and priority.
    pub fn template(self, path: &str, content: &str) -> Self {
        self.template_with(path, content, None, None)
    }

    /// Add a template with explicit strategy and/or priority overrides.
    pub fn template_with(
        mut self,
        path: &str,
        content: &str,
        strategy: Option<MergeStrategy>,
        priority: Option<i64>,
    ) -> Self {
        self.raw.templates.push(TemplateContribution {
            path: path.to_string(),
            content: content.to_string(),
            strategy,
            priority,
        });
        self
    }

    /// The raw descriptor, for registry discovery.
    pub fn build_raw(self) -> RawDescriptor {
        self.raw
    }

    /// The validated module.
    ///
    /// # Panics
    /// Panics when the fixture fails validation — a test-authoring bug.
    pub fn build(self) -> Module {
        validate(&self.raw).expect("test fixture must validate")
    }
}

/// A discovered registry over the given fixtures, with the default
/// exclusivity policy.
pub fn registry_with(builders: Vec<ModuleBuilder>) -> ModuleRegistry {
    let descriptors = builders.into_iter().map(ModuleBuilder::build_raw).collect();
    let source = StaticSource::new("fixture", descriptors);
    let mut registry = ModuleRegistry::new(vec![Box::new(source)], CategoryPolicy::default());
    registry
        .discover()
        .expect("fixture discovery must succeed");
    registry
}
