//! The module registry: discovery, indices, and queries.

use std::collections::{BTreeMap, BTreeSet};

use crate::category::{Category, CategoryPolicy};
use crate::error::{Error, Result};
use crate::module::Module;
use crate::source::ModuleSource;
use crate::validate::{ValidationError, validate};

/// Outcome of a discovery pass.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Names admitted to the index, in admission order.
    pub loaded: Vec<String>,
    /// Definitions kept out because a higher-priority source already claimed
    /// the name: `(name, losing source id)`.
    pub shadowed: Vec<(String, String)>,
    /// Descriptors rejected by validation.
    pub invalid: Vec<ValidationError>,
    /// Human-readable warnings covering the above plus source read failures.
    pub warnings: Vec<String>,
}

/// Compatibility sets for one module with the wildcard expanded against all
/// currently known modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCompatibility {
    pub compatible: BTreeSet<String>,
    pub incompatible: BTreeSet<String>,
}

/// Single source of truth for what modules exist and what they declare.
///
/// Constructed from an ordered list of sources (earlier = higher priority)
/// and an exclusivity policy, then populated by [`discover`](Self::discover).
/// All queries iterate in deterministic order. The generation counter bumps
/// on every mutation so downstream caches can key on it.
pub struct ModuleRegistry {
    sources: Vec<Box<dyn ModuleSource>>,
    policy: CategoryPolicy,
    modules: BTreeMap<String, Module>,
    by_category: BTreeMap<Category, Vec<String>>,
    warnings: Vec<String>,
    generation: u64,
}

impl ModuleRegistry {
    /// Create an empty registry over the given ranked sources.
    pub fn new(sources: Vec<Box<dyn ModuleSource>>, policy: CategoryPolicy) -> Self {
        Self {
            sources,
            policy,
            modules: BTreeMap::new(),
            by_category: BTreeMap::new(),
            warnings: Vec::new(),
            generation: 0,
        }
    }

    /// A registry over the built-in catalog only, already discovered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new(
            vec![Box::new(crate::builtin::builtin_source())],
            CategoryPolicy::default(),
        );
        // The embedded catalog is validated by its own tests; a discovery
        // failure here would mean a StaticSource failed to clone.
        if let Err(e) = registry.discover() {
            tracing::warn!("builtin catalog discovery failed: {e}");
        }
        registry
    }

    /// Read all ranked sources and rebuild the indices.
    ///
    /// Within the merged stream the first definition of a name wins; later
    /// ones are recorded as shadowed. Invalid descriptors are excluded and
    /// reported, never fatal to the pass. A source whose read fails entirely
    /// is skipped with a warning so one bad plugin directory cannot take
    /// down the catalog.
    pub fn discover(&mut self) -> Result<DiscoveryReport> {
        let mut report = DiscoveryReport::default();
        let mut modules: BTreeMap<String, Module> = BTreeMap::new();

        for source in &self.sources {
            let descriptors = match source.load() {
                Ok(descriptors) => descriptors,
                Err(e) => {
                    report
                        .warnings
                        .push(format!("source '{}' failed to load: {e}", source.id()));
                    continue;
                }
            };

            for raw in &descriptors {
                match validate(raw) {
                    Ok(module) => {
                        if modules.contains_key(&module.name) {
                            report.warnings.push(format!(
                                "module '{}' from source '{}' shadowed by a higher-priority definition",
                                module.name,
                                source.id()
                            ));
                            report.shadowed.push((module.name, source.id().to_string()));
                        } else {
                            report.loaded.push(module.name.clone());
                            modules.insert(module.name.clone(), module);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("source '{}': {e}", source.id());
                        report.warnings.push(e.to_string());
                        report.invalid.push(e);
                    }
                }
            }
        }

        self.modules = modules;
        self.rebuild_category_index();
        self.warnings = report.warnings.clone();
        self.generation += 1;
        tracing::debug!(
            "discovery pass complete: {} modules, {} shadowed, {} invalid",
            report.loaded.len(),
            report.shadowed.len(),
            report.invalid.len()
        );
        Ok(report)
    }

    /// Re-read a single module's descriptor and rebuild only its entries.
    ///
    /// Sources are consulted in rank order; the first definition found
    /// replaces the indexed one. Returns `false` when no source still
    /// defines the name (the stale entry is dropped). A name that was never
    /// indexed and is in no source is an [`Error::UnknownModule`].
    pub fn reload_module(&mut self, name: &str) -> Result<bool> {
        let mut found = None;
        'sources: for source in &self.sources {
            let descriptors = match source.load() {
                Ok(descriptors) => descriptors,
                Err(e) => {
                    tracing::warn!("source '{}' failed during reload: {e}", source.id());
                    continue;
                }
            };
            for raw in descriptors {
                if raw.module.name.as_deref() == Some(name) {
                    found = Some(raw);
                    break 'sources;
                }
            }
        }

        match found {
            Some(raw) => {
                let module = validate(&raw)?;
                self.modules.insert(module.name.clone(), module);
                self.rebuild_category_index();
                self.generation += 1;
                Ok(true)
            }
            None if self.modules.remove(name).is_some() => {
                self.rebuild_category_index();
                self.generation += 1;
                Ok(false)
            }
            None => Err(Error::UnknownModule(name.to_string())),
        }
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Modules in a category, name-ordered.
    pub fn by_category(&self, category: Category) -> Vec<&Module> {
        self.by_category
            .get(&category)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| self.modules.get(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All modules, name-ordered.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// All module names, ordered.
    pub fn names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// Union of every provides set (capability tags plus module names).
    pub fn capabilities(&self) -> BTreeSet<&str> {
        self.modules
            .values()
            .flat_map(|m| m.provides.iter().map(String::as_str))
            .collect()
    }

    /// Modules providing a capability, ordered by priority (desc) then name.
    pub fn providers_of(&self, capability: &str) -> Vec<&Module> {
        let mut providers: Vec<&Module> = self
            .modules
            .values()
            .filter(|m| m.provides(capability))
            .collect();
        providers.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.name.cmp(&b.name)));
        providers
    }

    /// Compatibility sets for `name`, wildcard expanded at query time so
    /// modules discovered after this one are still covered.
    pub fn compatibility(&self, name: &str) -> Option<ResolvedCompatibility> {
        let module = self.modules.get(name)?;
        let others = || {
            self.modules
                .keys()
                .filter(|other| other.as_str() != name)
                .cloned()
        };

        let compatible = match &module.compatible_with {
            crate::module::CompatSpec::All => others().collect(),
            crate::module::CompatSpec::Named(names) => names.clone(),
        };
        let incompatible = match &module.incompatible_with {
            crate::module::CompatSpec::All => others().collect(),
            crate::module::CompatSpec::Named(names) => names.clone(),
        };

        Some(ResolvedCompatibility {
            compatible,
            incompatible,
        })
    }

    pub fn policy(&self) -> &CategoryPolicy {
        &self.policy
    }

    /// Bumped on every discovery or reload; cache keys include it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Warnings recorded by the most recent discovery pass.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn rebuild_category_index(&mut self) {
        let mut by_category: BTreeMap<Category, Vec<String>> = BTreeMap::new();
        for module in self.modules.values() {
            by_category
                .entry(module.category)
                .or_default()
                .push(module.name.clone());
        }
        self.by_category = by_category;
    }
}
