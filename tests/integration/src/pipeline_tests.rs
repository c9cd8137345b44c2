//! Full resolve → compose runs over the built-in catalog.

use pretty_assertions::assert_eq;
use stack_compose::{Composer, TemplateContext};
use stack_registry::ModuleRegistry;
use stack_resolver::{DependencyResolver, ResolveOptions, Selection};
use stack_test_utils::TestProject;

fn scaffold(project: &TestProject, modules: &[&str]) -> stack_compose::ComposeReport {
    let registry = ModuleRegistry::with_builtins();
    let resolution = DependencyResolver::new(&registry)
        .resolve(&Selection::from_names(modules.to_vec()), &ResolveOptions::default())
        .unwrap();
    assert!(
        resolution.is_success(),
        "conflicts: {:?}, missing: {:?}",
        resolution.conflicts,
        resolution.missing
    );

    let context = TemplateContext::for_project("storefront");
    Composer::new(project.root())
        .compose(&resolution.order, &context)
        .unwrap()
}

#[test]
fn full_stack_project_tree() {
    let project = TestProject::new();
    let report = scaffold(&project, &["react", "tailwind", "express", "jwt-auth"]);

    assert!(report.failed.is_empty(), "failures: {:?}", report.failed);

    // package.json contributions from react and express deep-merged.
    let package: serde_json::Value =
        serde_json::from_str(&project.read("package.json")).unwrap();
    assert_eq!(package["name"], "storefront");
    assert_eq!(package["scripts"]["dev"], "vite");
    assert_eq!(package["scripts"]["serve"], "node server/index.js");

    // .gitignore entries from react and express, deduplicated.
    let gitignore = project.read(".gitignore");
    assert_eq!(
        gitignore.matches("node_modules/").count(),
        1,
        "gitignore: {gitignore}"
    );
    assert!(gitignore.contains(".env"));

    // .env.example appended uniquely across express and jwt-auth.
    let env = project.read(".env.example");
    assert!(env.contains("PORT=3000"));
    assert!(env.contains("JWT_SECRET=change-me"));

    // The auth conditional in the server template is active.
    project.assert_contains("server/index.js", "authRouter");
    project.assert_file_exists("server/auth.js");
    project.assert_file_exists("tailwind.config.js");
}

#[test]
fn conditional_block_inactive_without_auth() {
    let project = TestProject::new();
    scaffold(&project, &["express"]);

    let server = project.read("server/index.js");
    assert!(!server.contains("authRouter"), "server: {server}");
    project.assert_file_not_exists("server/auth.js");
}

#[test]
fn composition_is_byte_identical_across_runs() {
    let first = TestProject::new();
    let second = TestProject::new();
    let modules = ["react", "tailwind", "express", "jwt-auth"];

    scaffold(&first, &modules);
    scaffold(&second, &modules);

    for path in [
        "package.json",
        ".gitignore",
        ".env.example",
        "server/index.js",
        "src/App.jsx",
        "tailwind.config.js",
    ] {
        assert_eq!(first.read(path), second.read(path), "divergence in {path}");
    }
}

#[test]
fn project_name_variants_render() {
    let project = TestProject::new();
    scaffold(&project, &["react"]);

    // src/App.jsx uses the pascal variant of "storefront".
    project.assert_contains("src/App.jsx", "Storefront");
}

#[test]
fn report_classifies_created_and_merged() {
    let project = TestProject::new();
    project.write(".gitignore", "coverage/\n");

    let report = scaffold(&project, &["react"]);

    assert!(report.created.contains(&"package.json".to_string()));
    assert!(report.merged.contains(&".gitignore".to_string()));

    // The user's ignore rule survives the merge.
    let gitignore = project.read(".gitignore");
    assert!(gitignore.starts_with("coverage/\n"), "gitignore: {gitignore}");
    assert!(gitignore.contains("node_modules/"));
}
