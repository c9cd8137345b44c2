//! The dependency resolver: selection → ordered module list + conflict
//! report.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use stack_cache::CacheManager;
use stack_registry::{Category, Module, ModuleRegistry};
use stack_version::{Requirement, resolve_conflicts};

use crate::conflict::{
    Conflict, MissingRequirement, RequirementKind, Suggestion, SuggestionKind,
};
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::selection::Selection;

/// How exclusive-category rivalries are settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictResolution {
    /// Report a category conflict and fail the resolution.
    #[default]
    Fail,
    /// Keep the highest-priority rival, drop the rest with suggestions.
    Priority,
}

/// Per-call resolver options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Breadth-first expansion-depth bound; `None` is unbounded.
    pub max_depth: Option<usize>,
    pub conflict_resolution: ConflictResolution,
    /// Keep the computed order even when conflicts or missing entries exist.
    pub allow_conflicts: bool,
    /// Also expand `dev_requires` and check `dev_dependencies`.
    pub include_dev: bool,
}

impl ResolveOptions {
    /// Stable encoding for cache keys.
    fn fingerprint(&self) -> String {
        format!(
            "d{}.c{}.a{}.v{}",
            self.max_depth
                .map_or_else(|| "inf".to_string(), |d| d.to_string()),
            match self.conflict_resolution {
                ConflictResolution::Fail => "fail",
                ConflictResolution::Priority => "priority",
            },
            u8::from(self.allow_conflicts),
            u8::from(self.include_dev),
        )
    }
}

/// Outcome of one resolver invocation. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Topologically valid installation order; empty on a failed result.
    pub order: Vec<Module>,
    pub conflicts: Vec<Conflict>,
    pub missing: Vec<MissingRequirement>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    /// Chosen version per package for the satisfiable requirements.
    pub resolved_versions: BTreeMap<String, semver::Version>,
}

impl Resolution {
    /// Conflict-free and nothing missing.
    pub fn is_success(&self) -> bool {
        self.conflicts.is_empty() && self.missing.is_empty()
    }

    /// Module names in installation order.
    pub fn order_names(&self) -> Vec<&str> {
        self.order.iter().map(|m| m.name.as_str()).collect()
    }
}

/// Working state during expansion: the included set in insertion order.
#[derive(Default)]
struct Expansion {
    order: Vec<String>,
    modules: HashMap<String, Module>,
    /// BFS depth each module was included at.
    depths: HashMap<String, usize>,
    missing: Vec<MissingRequirement>,
    warnings: Vec<String>,
}

impl Expansion {
    fn insert(&mut self, module: Module, depth: usize) -> bool {
        if self.modules.contains_key(&module.name) {
            return false;
        }
        self.order.push(module.name.clone());
        self.depths.insert(module.name.clone(), depth);
        self.modules.insert(module.name.clone(), module);
        true
    }

    /// Whether this module's requirements were left unexamined by the
    /// expansion depth bound.
    fn beyond_depth(&self, name: &str, max_depth: Option<usize>) -> bool {
        max_depth.is_some_and(|limit| self.depths.get(name).copied().unwrap_or(0) >= limit)
    }

    fn remove(&mut self, name: &str) {
        self.order.retain(|n| n != name);
        self.modules.remove(name);
        self.depths.remove(name);
    }

    /// Highest-priority included provider of a capability; earliest
    /// insertion wins ties.
    fn capability_provider(&self, capability: &str) -> Option<&str> {
        let mut best: Option<(&str, i64)> = None;
        for name in &self.order {
            let module = &self.modules[name];
            if module.provides(capability)
                && best.is_none_or(|(_, priority)| module.priority > priority)
            {
                best = Some((name, module.priority));
            }
        }
        best.map(|(name, _)| name)
    }

    fn requirement_entries(&self, name: &str, include_dev: bool) -> Vec<String> {
        let module = &self.modules[name];
        let mut entries = module.requires.clone();
        if include_dev {
            entries.extend(module.dev_requires.iter().cloned());
        }
        entries
    }
}

/// Split a requirement entry into its forced kind and target.
fn parse_requirement(entry: &str) -> (bool, &str) {
    match entry.strip_prefix("module:") {
        Some(rest) => (true, rest),
        None => (false, entry),
    }
}

/// Resolves a selection against an immutable registry borrow.
pub struct DependencyResolver<'a> {
    registry: &'a ModuleRegistry,
    cache: Option<&'a CacheManager>,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self {
            registry,
            cache: None,
        }
    }

    /// Attach a result cache. Purely an optimization: cached and uncached
    /// paths must return identical resolutions.
    pub fn with_cache(mut self, cache: &'a CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Expand the selection into a conflict-checked, ordered module set.
    pub fn resolve(&self, selection: &Selection, options: &ResolveOptions) -> Result<Resolution> {
        let names = selection.normalized();
        let cache_key = format!(
            "resolve:{}:{}:{}",
            selection.signature(),
            self.registry.generation(),
            options.fingerprint()
        );

        if let Some(cache) = self.cache {
            if let Some(cached) = cache.get_json::<Resolution>(&cache_key) {
                tracing::debug!("resolution cache hit for selection of {}", names.len());
                return Ok(cached);
            }
        }

        let resolution = self.resolve_uncached(&names, options)?;

        if let Some(cache) = self.cache {
            cache.set_json(&cache_key, &resolution, false);
        }
        Ok(resolution)
    }

    fn resolve_uncached(&self, names: &[String], options: &ResolveOptions) -> Result<Resolution> {
        let mut expansion = self.expand(names, options)?;
        let mut conflicts = Vec::new();
        let mut suggestions = Vec::new();

        self.settle_exclusive_categories(
            &mut expansion,
            options,
            &mut conflicts,
            &mut suggestions,
        );
        self.detect_direct_conflicts(&expansion, &mut conflicts);

        let version_resolution = self.check_versions(&expansion, options, &mut conflicts);

        let graph = self.build_graph(&mut expansion, options);
        if let Some(cycle) = graph.find_cycle() {
            return Err(Error::CircularDependency { cycle });
        }
        let order_names = graph
            .topological_sort()
            .map_err(|cycle| Error::CircularDependency { cycle })?;

        let order: Vec<Module> = order_names
            .iter()
            .filter_map(|name| expansion.modules.get(name).cloned())
            .collect();

        let mut resolution = Resolution {
            order,
            conflicts,
            missing: expansion.missing,
            warnings: expansion.warnings,
            suggestions,
            resolved_versions: version_resolution.resolved,
        };
        resolution
            .warnings
            .extend(version_resolution.warnings);

        // A failed result keeps its diagnostics but yields no order.
        if !options.allow_conflicts && !resolution.is_success() {
            resolution.order.clear();
        }
        Ok(resolution)
    }

    /// Steps 1–2: seed with the selection, expand breadth-first.
    fn expand(&self, names: &[String], options: &ResolveOptions) -> Result<Expansion> {
        let mut expansion = Expansion::default();
        let mut queue: VecDeque<(String, usize)> = VecDeque::new();

        for name in names {
            let module = self
                .registry
                .get(name)
                .ok_or_else(|| Error::ModuleNotFound(name.clone()))?;
            if expansion.insert(module.clone(), 0) {
                queue.push_back((name.clone(), 0));
            }
        }

        while let Some((name, depth)) = queue.pop_front() {
            if options.max_depth.is_some_and(|limit| depth >= limit) {
                tracing::debug!("expansion depth limit {depth} reached at '{name}'");
                continue;
            }

            for entry in expansion.requirement_entries(&name, options.include_dev) {
                let (forced_module, target) = parse_requirement(&entry);

                // Already satisfied by an included module or capability.
                if expansion.modules.contains_key(target) {
                    continue;
                }
                // A module named directly is included as-is.
                if let Some(module) = self.registry.get(target) {
                    tracing::debug!("'{name}' pulls in module '{target}'");
                    expansion.insert(module.clone(), depth + 1);
                    queue.push_back((target.to_string(), depth + 1));
                    continue;
                }
                if !forced_module {
                    if expansion.capability_provider(target).is_some() {
                        continue;
                    }
                    // Highest-priority provider across the full registry.
                    if let Some(provider) =
                        self.registry.providers_of(target).first().copied()
                    {
                        tracing::debug!(
                            "'{name}' pulls in '{}' providing '{target}'",
                            provider.name
                        );
                        let provider_name = provider.name.clone();
                        expansion.insert(provider.clone(), depth + 1);
                        queue.push_back((provider_name, depth + 1));
                        continue;
                    }
                }

                expansion.missing.push(MissingRequirement {
                    module: name.clone(),
                    requires: target.to_string(),
                    kind: if forced_module {
                        RequirementKind::Module
                    } else {
                        RequirementKind::Capability
                    },
                });
            }
        }

        Ok(expansion)
    }

    /// Step 3: exclusive-category rivalry, conflict or priority auto-pick.
    fn settle_exclusive_categories(
        &self,
        expansion: &mut Expansion,
        options: &ResolveOptions,
        conflicts: &mut Vec<Conflict>,
        suggestions: &mut Vec<Suggestion>,
    ) {
        let mut by_category: BTreeMap<Category, Vec<String>> = BTreeMap::new();
        for name in &expansion.order {
            let category = expansion.modules[name].category;
            if self.registry.policy().is_exclusive(category) {
                by_category.entry(category).or_default().push(name.clone());
            }
        }

        for (category, rivals) in by_category {
            if rivals.len() < 2 {
                continue;
            }
            match options.conflict_resolution {
                ConflictResolution::Fail => {
                    conflicts.push(Conflict::Category {
                        category,
                        modules: rivals,
                    });
                }
                ConflictResolution::Priority => {
                    let kept = rivals
                        .iter()
                        .max_by_key(|name| {
                            // Ties go to the earliest-included rival.
                            let position =
                                rivals.iter().position(|r| r == *name).unwrap_or(0);
                            (expansion.modules[*name].priority, rivals.len() - position)
                        })
                        .cloned()
                        .unwrap_or_else(|| rivals[0].clone());

                    for dropped in rivals.iter().filter(|r| **r != kept) {
                        expansion.warnings.push(format!(
                            "dropped '{dropped}': category '{category}' allows one module and '{kept}' wins on priority"
                        ));
                        suggestions.push(Suggestion {
                            kind: SuggestionKind::RemoveModule,
                            remove: Some(dropped.clone()),
                            add: Some(kept.clone()),
                            reason: format!(
                                "category '{category}' is exclusive; '{kept}' was kept"
                            ),
                        });
                        expansion.remove(dropped);
                    }
                }
            }
        }
    }

    /// Step 4: pairwise `incompatible_with` checks, symmetric by
    /// construction.
    fn detect_direct_conflicts(&self, expansion: &Expansion, conflicts: &mut Vec<Conflict>) {
        for (i, a_name) in expansion.order.iter().enumerate() {
            for b_name in expansion.order.iter().skip(i + 1) {
                let a = &expansion.modules[a_name];
                let b = &expansion.modules[b_name];
                if a.declares_incompatible(b_name) || b.declares_incompatible(a_name) {
                    conflicts.push(Conflict::Direct {
                        module: a_name.clone(),
                        conflicts_with: b_name.clone(),
                    });
                }
            }
        }
    }

    /// Step 5: package-range intersection across the included set.
    fn check_versions(
        &self,
        expansion: &Expansion,
        options: &ResolveOptions,
        conflicts: &mut Vec<Conflict>,
    ) -> stack_version::VersionResolution {
        let mut requirements = Vec::new();
        for name in &expansion.order {
            let module = &expansion.modules[name];
            for (package, range) in &module.dependencies {
                requirements.push(Requirement {
                    dependency: package.clone(),
                    range: range.clone(),
                    required_by: name.clone(),
                });
            }
            if options.include_dev {
                for (package, range) in &module.dev_dependencies {
                    requirements.push(Requirement {
                        dependency: package.clone(),
                        range: range.clone(),
                        required_by: name.clone(),
                    });
                }
            }
        }

        let resolution = resolve_conflicts(&requirements);
        for conflict in &resolution.conflicts {
            conflicts.push(Conflict::Version {
                dependency: conflict.dependency.clone(),
                requirements: conflict.requirements.clone(),
            });
        }
        resolution
    }

    /// Steps 6–7 input: requires-edges over the final included set.
    ///
    /// Providers are re-elected against the final set so edges never point
    /// at a module dropped by the category pass; a requirement stranded by
    /// such a drop becomes a missing entry.
    fn build_graph(&self, expansion: &mut Expansion, options: &ResolveOptions) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for name in &expansion.order {
            graph.add_node(name.clone());
        }

        let included: Vec<String> = expansion.order.clone();
        let mut stranded: Vec<MissingRequirement> = Vec::new();

        for name in &included {
            if expansion.beyond_depth(name, options.max_depth) {
                continue;
            }
            for entry in expansion.requirement_entries(name, options.include_dev) {
                let (forced_module, target) = parse_requirement(&entry);

                let provider = if expansion.modules.contains_key(target) {
                    Some(target.to_string())
                } else if !forced_module {
                    expansion
                        .capability_provider(target)
                        .map(str::to_string)
                } else {
                    None
                };

                match provider {
                    Some(provider) => {
                        if provider != *name {
                            graph.add_edge(name, &provider);
                        }
                    }
                    None => {
                        let already_missing = expansion
                            .missing
                            .iter()
                            .any(|m| m.module == *name && m.requires == target);
                        if !already_missing {
                            expansion.warnings.push(format!(
                                "provider for '{target}' required by '{name}' was dropped from the selection"
                            ));
                            stranded.push(MissingRequirement {
                                module: name.clone(),
                                requires: target.to_string(),
                                kind: if forced_module {
                                    RequirementKind::Module
                                } else {
                                    RequirementKind::Capability
                                },
                            });
                        }
                    }
                }
            }
        }

        expansion.missing.extend(stranded);
        graph
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stack_cache::{CacheConfig, CacheManager};
    use stack_test_utils::{ModuleBuilder, registry_with};

    use super::*;

    fn resolve(
        registry: &ModuleRegistry,
        names: &[&str],
        options: &ResolveOptions,
    ) -> Result<Resolution> {
        DependencyResolver::new(registry).resolve(&Selection::from_names(names.to_vec()), options)
    }

    fn resolve_default(registry: &ModuleRegistry, names: &[&str]) -> Resolution {
        resolve(registry, names, &ResolveOptions::default()).unwrap()
    }

    // --- expansion ---

    #[test]
    fn test_selected_unknown_name_is_hard_error() {
        let registry = registry_with(vec![ModuleBuilder::new("known", "other")]);
        let err = resolve(&registry, &["phantom"], &ResolveOptions::default()).unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound(name) if name == "phantom"));
    }

    #[test]
    fn test_direct_module_requirement_pulled_in() {
        let registry = registry_with(vec![
            ModuleBuilder::new("app", "other").requires(&["lib"]),
            ModuleBuilder::new("lib", "other"),
        ]);
        let resolution = resolve_default(&registry, &["app"]);
        assert!(resolution.is_success());
        assert_eq!(resolution.order_names(), vec!["lib", "app"]);
    }

    #[test]
    fn test_capability_resolved_to_highest_priority_registry_provider() {
        let registry = registry_with(vec![
            ModuleBuilder::new("consumer", "other").requires(&["state"]),
            ModuleBuilder::new("minor", "other").provides(&["state"]).priority(1),
            ModuleBuilder::new("major", "other").provides(&["state"]).priority(9),
        ]);
        let resolution = resolve_default(&registry, &["consumer"]);
        assert!(resolution.is_success());
        assert_eq!(resolution.order_names(), vec!["major", "consumer"]);
    }

    #[test]
    fn test_included_provider_preferred_over_registry() {
        // "minor" is selected, so it satisfies "state" even though "major"
        // outranks it in the registry.
        let registry = registry_with(vec![
            ModuleBuilder::new("consumer", "other").requires(&["state"]),
            ModuleBuilder::new("minor", "other").provides(&["state"]).priority(1),
            ModuleBuilder::new("major", "other").provides(&["state"]).priority(9),
        ]);
        let resolution = resolve_default(&registry, &["consumer", "minor"]);
        assert!(resolution.is_success());
        assert_eq!(resolution.order_names(), vec!["minor", "consumer"]);
    }

    #[test]
    fn test_missing_capability_reported() {
        let registry = registry_with(vec![
            ModuleBuilder::new("consumer-b", "other").requires(&["state"]),
        ]);
        let resolution = resolve_default(&registry, &["consumer-b"]);
        assert!(!resolution.is_success());
        assert!(resolution.order.is_empty());
        assert_eq!(
            resolution.missing,
            vec![MissingRequirement {
                module: "consumer-b".to_string(),
                requires: "state".to_string(),
                kind: RequirementKind::Capability,
            }]
        );
    }

    #[test]
    fn test_missing_then_satisfied_end_to_end() {
        let registry = registry_with(vec![
            ModuleBuilder::new("provider-a", "other").provides(&["state"]),
            ModuleBuilder::new("consumer-b", "other").requires(&["state"]),
        ]);
        let resolution = resolve_default(&registry, &["consumer-b", "provider-a"]);
        assert!(resolution.is_success());
        assert_eq!(resolution.order_names(), vec!["provider-a", "consumer-b"]);
    }

    #[test]
    fn test_forced_module_requirement_missing_kind() {
        let registry = registry_with(vec![
            ModuleBuilder::new("app", "other").requires(&["module:exact-lib"]),
            // Provides the capability name, but the requirement insists on a
            // module called exact-lib.
            ModuleBuilder::new("impostor", "other").provides(&["exact-lib"]),
        ]);
        let resolution = resolve_default(&registry, &["app", "impostor"]);
        assert_eq!(resolution.missing.len(), 1);
        assert_eq!(resolution.missing[0].kind, RequirementKind::Module);
        assert_eq!(resolution.missing[0].requires, "exact-lib");
    }

    #[test]
    fn test_max_depth_bounds_expansion() {
        let registry = registry_with(vec![
            ModuleBuilder::new("a", "other").requires(&["b"]),
            ModuleBuilder::new("b", "other").requires(&["c"]),
            ModuleBuilder::new("c", "other"),
        ]);
        let options = ResolveOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        let resolution = resolve(&registry, &["a"], &options).unwrap();
        assert!(resolution.is_success());
        assert_eq!(resolution.order_names(), vec!["b", "a"]);
    }

    // --- category exclusivity ---

    fn rival_registry() -> ModuleRegistry {
        registry_with(vec![
            ModuleBuilder::new("x-frame", "frontend-framework").priority(10),
            ModuleBuilder::new("y-frame", "frontend-framework").priority(2),
        ])
    }

    #[test]
    fn test_exclusive_category_conflict_by_default() {
        let resolution = resolve_default(&rival_registry(), &["x-frame", "y-frame"]);
        assert!(resolution.order.is_empty());
        assert_eq!(resolution.conflicts.len(), 1);
        match &resolution.conflicts[0] {
            Conflict::Category { category, modules } => {
                assert_eq!(*category, Category::FrontendFramework);
                assert_eq!(modules, &["x-frame", "y-frame"]);
            }
            other => panic!("expected category conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_priority_mode_keeps_winner_with_suggestion() {
        let options = ResolveOptions {
            conflict_resolution: ConflictResolution::Priority,
            ..Default::default()
        };
        let resolution = resolve(&rival_registry(), &["x-frame", "y-frame"], &options).unwrap();
        assert!(resolution.is_success());
        assert_eq!(resolution.order_names(), vec!["x-frame"]);
        assert_eq!(resolution.suggestions.len(), 1);
        let suggestion = &resolution.suggestions[0];
        assert_eq!(suggestion.kind, SuggestionKind::RemoveModule);
        assert_eq!(suggestion.remove.as_deref(), Some("y-frame"));
        assert_eq!(suggestion.add.as_deref(), Some("x-frame"));
    }

    #[test]
    fn test_non_exclusive_category_stacks_freely() {
        let registry = registry_with(vec![
            ModuleBuilder::new("tailwind", "ui-library"),
            ModuleBuilder::new("shadcn", "ui-library"),
        ]);
        let resolution = resolve_default(&registry, &["tailwind", "shadcn"]);
        assert!(resolution.is_success());
        assert_eq!(resolution.order.len(), 2);
    }

    // --- direct incompatibility ---

    #[test]
    fn test_direct_conflict_is_symmetric() {
        let registry = registry_with(vec![
            ModuleBuilder::new("react", "frontend-framework").incompatible_with(&["vue"]),
            ModuleBuilder::new("vue", "frontend-framework"),
        ]);
        // Use a permissive check: both orders report the same direct
        // conflict (the category conflict is also present here).
        let forward = resolve_default(&registry, &["react", "vue"]);
        let backward = resolve_default(&registry, &["vue", "react"]);

        let direct = |r: &Resolution| {
            r.conflicts
                .iter()
                .find(|c| matches!(c, Conflict::Direct { .. }))
                .cloned()
        };
        let expected = Conflict::Direct {
            module: "react".to_string(),
            conflicts_with: "vue".to_string(),
        };
        assert_eq!(direct(&forward), Some(expected.clone()));
        assert_eq!(direct(&backward), Some(expected));
    }

    #[test]
    fn test_wildcard_incompatibility() {
        let registry = registry_with(vec![
            ModuleBuilder::new("hermit", "other").incompatible_with(&["*"]),
            ModuleBuilder::new("anyone", "other"),
        ]);
        let resolution = resolve_default(&registry, &["anyone", "hermit"]);
        assert_eq!(resolution.conflicts.len(), 1);
        assert!(matches!(
            &resolution.conflicts[0],
            Conflict::Direct { module, conflicts_with }
                if module == "anyone" && conflicts_with == "hermit"
        ));
    }

    // --- version conflicts ---

    #[test]
    fn test_version_conflict_names_every_requirer() {
        let registry = registry_with(vec![
            ModuleBuilder::new("legacy-kit", "other").dependency("react", "^17.0.0"),
            ModuleBuilder::new("modern-kit", "other").dependency("react", "^18.0.0"),
        ]);
        let resolution = resolve_default(&registry, &["legacy-kit", "modern-kit"]);
        assert!(!resolution.is_success());

        let version = resolution
            .conflicts
            .iter()
            .find_map(|c| match c {
                Conflict::Version {
                    dependency,
                    requirements,
                } => Some((dependency.clone(), requirements.clone())),
                _ => None,
            })
            .expect("expected a version conflict");
        assert_eq!(version.0, "react");
        let requirers: Vec<&str> = version.1.iter().map(|r| r.required_by.as_str()).collect();
        assert_eq!(requirers, vec!["legacy-kit", "modern-kit"]);
    }

    #[test]
    fn test_compatible_versions_resolved() {
        let registry = registry_with(vec![
            ModuleBuilder::new("a", "other").dependency("react", "^18.0.0"),
            ModuleBuilder::new("b", "other").dependency("react", ">=18.2"),
        ]);
        let resolution = resolve_default(&registry, &["a", "b"]);
        assert!(resolution.is_success());
        assert!(resolution.resolved_versions.contains_key("react"));
    }

    #[test]
    fn test_dev_dependencies_checked_only_with_include_dev() {
        let registry = registry_with(vec![
            ModuleBuilder::new("a", "other").dev_dependency("vite", "^4.0.0"),
            ModuleBuilder::new("b", "other").dev_dependency("vite", "^5.0.0"),
        ]);
        assert!(resolve_default(&registry, &["a", "b"]).is_success());

        let options = ResolveOptions {
            include_dev: true,
            ..Default::default()
        };
        let resolution = resolve(&registry, &["a", "b"], &options).unwrap();
        assert!(!resolution.is_success());
    }

    // --- cycles ---

    fn cyclic_registry() -> ModuleRegistry {
        registry_with(vec![
            ModuleBuilder::new("a", "other").requires(&["b"]),
            ModuleBuilder::new("b", "other").requires(&["c"]),
            ModuleBuilder::new("c", "other").requires(&["a"]),
        ])
    }

    #[rstest::rstest]
    #[case("a")]
    #[case("b")]
    #[case("c")]
    fn test_cycle_named_exactly_from_any_entry(#[case] seed: &str) {
        let err = resolve(&cyclic_registry(), &[seed], &ResolveOptions::default()).unwrap_err();
        match err {
            Error::CircularDependency { cycle } => {
                assert_eq!(cycle, vec!["a", "b", "c"]);
            }
            other => panic!("expected CircularDependency, got {other:?}"),
        }
    }

    // --- failure semantics ---

    #[test]
    fn test_allow_conflicts_keeps_order() {
        let options = ResolveOptions {
            allow_conflicts: true,
            ..Default::default()
        };
        let resolution = resolve(&rival_registry(), &["x-frame", "y-frame"], &options).unwrap();
        assert!(!resolution.is_success());
        assert_eq!(resolution.order.len(), 2);
    }

    #[test]
    fn test_empty_selection_is_trivially_successful() {
        let registry = registry_with(vec![ModuleBuilder::new("unused", "other")]);
        let resolution = resolve_default(&registry, &[]);
        assert!(resolution.is_success());
        assert!(resolution.order.is_empty());
    }

    // --- determinism & caching ---

    #[test]
    fn test_shuffled_selection_identical_resolution() {
        let registry = registry_with(vec![
            ModuleBuilder::new("frame", "frontend-framework").provides(&["ui"]),
            ModuleBuilder::new("styles", "ui-library"),
            ModuleBuilder::new("api", "backend-service"),
            ModuleBuilder::new("store", "state-manager").requires(&["frame"]),
        ]);
        let forward = resolve_default(&registry, &["frame", "styles", "api", "store"]);
        let backward = resolve_default(&registry, &["store", "api", "styles", "frame"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_cache_returns_identical_resolution() {
        let registry = registry_with(vec![
            ModuleBuilder::new("app", "other").requires(&["lib"]),
            ModuleBuilder::new("lib", "other"),
        ]);
        let cache = CacheManager::new(CacheConfig::default());
        let resolver = DependencyResolver::new(&registry).with_cache(&cache);
        let selection = Selection::from_names(["app"]);

        let first = resolver.resolve(&selection, &ResolveOptions::default()).unwrap();
        let second = resolver.resolve(&selection, &ResolveOptions::default()).unwrap();
        assert_eq!(first, second);
        assert!(cache.stats().hits >= 1);
    }

    #[test]
    fn test_options_change_cache_key() {
        let resolution = rival_registry();
        let cache = CacheManager::new(CacheConfig::default());
        let resolver = DependencyResolver::new(&resolution).with_cache(&cache);
        let selection = Selection::from_names(["x-frame", "y-frame"]);

        let fail = resolver.resolve(&selection, &ResolveOptions::default()).unwrap();
        let priority = resolver
            .resolve(
                &selection,
                &ResolveOptions {
                    conflict_resolution: ConflictResolution::Priority,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(fail.order.is_empty());
        assert_eq!(priority.order_names(), vec!["x-frame"]);
    }

    #[test]
    fn test_dropped_provider_strands_requirement() {
        // "store-a" provides state and wins the exclusive category; the
        // consumer's requirement re-resolves to it rather than the dropped
        // rival.
        let registry = registry_with(vec![
            ModuleBuilder::new("consumer", "other").requires(&["state"]),
            ModuleBuilder::new("store-a", "state-manager")
                .provides(&["state"])
                .priority(9),
            ModuleBuilder::new("store-b", "state-manager")
                .provides(&["state"])
                .priority(1),
        ]);
        let options = ResolveOptions {
            conflict_resolution: ConflictResolution::Priority,
            ..Default::default()
        };
        let resolution =
            resolve(&registry, &["consumer", "store-a", "store-b"], &options).unwrap();
        assert!(resolution.is_success());
        assert_eq!(resolution.order_names(), vec!["store-a", "consumer"]);
    }
}
