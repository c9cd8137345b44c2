//! Resolution scenarios over fixture registries and the built-in catalog.

use pretty_assertions::assert_eq;
use stack_cache::{CacheConfig, CacheManager};
use stack_registry::ModuleRegistry;
use stack_resolver::{
    Conflict, ConflictResolution, DependencyResolver, RequirementKind, ResolveOptions, Selection,
    SuggestionKind,
};
use stack_test_utils::{ModuleBuilder, registry_with};

fn resolve(
    registry: &ModuleRegistry,
    names: &[&str],
    options: &ResolveOptions,
) -> stack_resolver::Resolution {
    DependencyResolver::new(registry)
        .resolve(&Selection::from_names(names.to_vec()), options)
        .unwrap()
}

#[test]
fn missing_capability_then_satisfied() {
    // Module A provides capability `state`; module B requires it and
    // nothing else.
    let without_a = registry_with(vec![
        ModuleBuilder::new("b", "other").requires(&["state"]),
    ]);
    let resolution = resolve(&without_a, &["b"], &ResolveOptions::default());
    assert!(!resolution.is_success());
    assert_eq!(resolution.missing.len(), 1);
    assert_eq!(resolution.missing[0].module, "b");
    assert_eq!(resolution.missing[0].requires, "state");
    assert_eq!(resolution.missing[0].kind, RequirementKind::Capability);

    let with_a = registry_with(vec![
        ModuleBuilder::new("a", "other").provides(&["state"]),
        ModuleBuilder::new("b", "other").requires(&["state"]),
    ]);
    let resolution = resolve(&with_a, &["b", "a"], &ResolveOptions::default());
    assert!(resolution.is_success());
    assert_eq!(resolution.order_names(), vec!["a", "b"]);
}

#[test]
fn exclusive_category_default_fail_and_priority_pick() {
    let registry = registry_with(vec![
        ModuleBuilder::new("x", "frontend-framework").priority(10),
        ModuleBuilder::new("y", "frontend-framework").priority(1),
    ]);

    let failed = resolve(&registry, &["x", "y"], &ResolveOptions::default());
    assert!(failed.order.is_empty());
    assert!(matches!(&failed.conflicts[0], Conflict::Category { .. }));

    let picked = resolve(
        &registry,
        &["x", "y"],
        &ResolveOptions {
            conflict_resolution: ConflictResolution::Priority,
            ..Default::default()
        },
    );
    assert!(picked.is_success());
    assert_eq!(picked.order_names(), vec!["x"]);
    assert_eq!(picked.suggestions.len(), 1);
    assert_eq!(picked.suggestions[0].kind, SuggestionKind::RemoveModule);
    assert_eq!(picked.suggestions[0].remove.as_deref(), Some("y"));
}

#[test]
fn builtin_catalog_full_stack_resolves_topologically() {
    let registry = ModuleRegistry::with_builtins();
    let resolution = resolve(
        &registry,
        &["react", "tailwind", "express", "jwt-auth", "redux"],
        &ResolveOptions::default(),
    );
    assert!(
        resolution.is_success(),
        "conflicts: {:?}, missing: {:?}",
        resolution.conflicts,
        resolution.missing
    );

    let order = resolution.order_names();
    assert_eq!(order.len(), 5);

    // Topological validity: every provider of a required capability
    // appears before its dependent.
    let position = |name: &str| order.iter().position(|n| *n == name).unwrap();
    assert!(position("express") < position("jwt-auth"), "order: {order:?}");
    assert!(position("react") < position("redux"), "order: {order:?}");

    // Version requirements across react + redux are satisfiable.
    assert!(resolution.resolved_versions.contains_key("react"));
}

#[test]
fn builtin_frontend_rivals_conflict_directly() {
    let registry = ModuleRegistry::with_builtins();
    let resolution = resolve(&registry, &["react", "vue"], &ResolveOptions::default());
    assert!(!resolution.is_success());

    let has_direct = resolution.conflicts.iter().any(|c| {
        matches!(
            c,
            Conflict::Direct { module, conflicts_with }
                if module == "react" && conflicts_with == "vue"
        )
    });
    let has_category = resolution
        .conflicts
        .iter()
        .any(|c| matches!(c, Conflict::Category { .. }));
    assert!(has_direct, "conflicts: {:?}", resolution.conflicts);
    assert!(has_category, "conflicts: {:?}", resolution.conflicts);
}

#[test]
fn cached_resolution_is_identical_and_invalidated_by_reload() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("widget.toml"),
        "[module]\nname = \"widget\"\nversion = \"1.0.0\"\ncategory = \"other\"\ndescription = \"widget\"\n",
    )
    .unwrap();

    let mut registry = ModuleRegistry::new(
        vec![Box::new(stack_registry::DirectorySource::new(dir.path()))],
        stack_registry::CategoryPolicy::default(),
    );
    registry.discover().unwrap();

    let cache = CacheManager::new(CacheConfig::default());
    let selection = Selection::from_names(["widget"]);

    let first = DependencyResolver::new(&registry)
        .with_cache(&cache)
        .resolve(&selection, &ResolveOptions::default())
        .unwrap();
    let second = DependencyResolver::new(&registry)
        .with_cache(&cache)
        .resolve(&selection, &ResolveOptions::default())
        .unwrap();
    assert_eq!(first, second);
    assert!(cache.stats().hits >= 1);

    // A reload bumps the registry generation; the stale entry is unused.
    std::fs::write(
        dir.path().join("widget.toml"),
        "[module]\nname = \"widget\"\nversion = \"2.0.0\"\ncategory = \"other\"\ndescription = \"widget\"\n",
    )
    .unwrap();
    registry.reload_module("widget").unwrap();

    let third = DependencyResolver::new(&registry)
        .with_cache(&cache)
        .resolve(&selection, &ResolveOptions::default())
        .unwrap();
    assert_eq!(third.order[0].version.to_string(), "2.0.0");
}

#[test]
fn search_is_advisory_only() {
    // Clearing or rebuilding the search index must not affect resolution.
    let registry = ModuleRegistry::with_builtins();
    let before = resolve(&registry, &["react"], &ResolveOptions::default());

    let index = stack_search::SearchIndex::build(registry.modules());
    assert!(!index.is_empty());
    drop(index);

    let after = resolve(&registry, &["react"], &ResolveOptions::default());
    assert_eq!(before, after);
}
