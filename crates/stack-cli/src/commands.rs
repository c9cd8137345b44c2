//! Command implementations: engine calls plus terminal rendering.
//!
//! No resolution or composition logic lives here; the commands build
//! engine inputs, invoke the library crates, and render their structured
//! output.

use std::path::PathBuf;

use colored::Colorize;
use stack_compose::{ComposeReport, Composer, TemplateContext};
use stack_registry::Category;
use stack_resolver::{
    ConflictResolution, DependencyResolver, ResolveOptions, Resolution, Selection,
};
use stack_search::SearchFilters;

use crate::context::AppContext;
use crate::error::{CliError, Result};

pub fn run_list(context: &AppContext, category: Option<Category>, json: bool) -> Result<()> {
    let modules: Vec<_> = match category {
        Some(category) => context.registry.by_category(category),
        None => context.registry.modules().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }

    for module in modules {
        println!(
            "{:<14} {:>8}  {:<18} {}",
            module.name.green().bold(),
            module.version.to_string(),
            module.category.to_string().cyan(),
            module.description.dimmed()
        );
    }
    Ok(())
}

pub fn run_search(
    context: &AppContext,
    query: &str,
    category: Option<Category>,
    limit: usize,
) -> Result<()> {
    let index = context.search_index();
    let filters = SearchFilters { category };
    let hits = index.search(query, &filters);

    if hits.is_empty() {
        println!("no modules match '{query}'");
        return Ok(());
    }
    for hit in hits.iter().take(limit) {
        println!(
            "{:<14} {:<18} {}",
            hit.name.green().bold(),
            hit.category.to_string().cyan(),
            hit.label.dimmed()
        );
    }
    Ok(())
}

pub fn run_suggest(context: &AppContext, prefix: &str, limit: usize) -> Result<()> {
    for name in context.search_index().suggest(prefix, limit) {
        println!("{name}");
    }
    Ok(())
}

pub fn run_resolve(
    context: &AppContext,
    modules: &[String],
    options: &ResolveOptions,
    json: bool,
) -> Result<()> {
    let resolver = DependencyResolver::new(&context.registry).with_cache(&context.cache);
    let selection = Selection::from_names(modules.iter().cloned());
    let resolution = resolver.resolve(&selection, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    render_resolution(&resolution);
    if resolution.is_success() {
        Ok(())
    } else {
        Err(CliError::user(
            "resolution failed; adjust the selection or rerun with --priority",
        ))
    }
}

pub fn run_new(
    context: &AppContext,
    name: &str,
    modules: &[String],
    path: Option<PathBuf>,
    priority: bool,
) -> Result<()> {
    let options = ResolveOptions {
        conflict_resolution: if priority {
            ConflictResolution::Priority
        } else {
            ConflictResolution::Fail
        },
        ..Default::default()
    };

    let resolver = DependencyResolver::new(&context.registry).with_cache(&context.cache);
    let selection = Selection::from_names(modules.iter().cloned());
    let resolution = resolver.resolve(&selection, &options)?;
    render_resolution(&resolution);

    if !resolution.is_success() {
        return Err(CliError::user(
            "resolution failed; adjust the selection or rerun with --priority",
        ));
    }

    let target = path.unwrap_or_else(|| PathBuf::from(name));
    let template_context = TemplateContext::for_project(name);
    let report = Composer::new(&target).compose(&resolution.order, &template_context)?;
    render_compose_report(&target, &report);

    if report.failed.is_empty() {
        println!(
            "{} project '{}' ready at {}",
            "ok".green().bold(),
            name,
            target.display()
        );
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} file(s) failed to compose",
            report.failed.len()
        )))
    }
}

fn render_resolution(resolution: &Resolution) {
    if !resolution.order.is_empty() {
        println!("{}", "installation order:".bold());
        for (position, module) in resolution.order.iter().enumerate() {
            println!(
                "  {}. {} {}",
                position + 1,
                module.name.green(),
                module.version.to_string().dimmed()
            );
        }
    }

    for conflict in &resolution.conflicts {
        println!("{} {}", "conflict:".red().bold(), conflict.describe());
    }
    for missing in &resolution.missing {
        println!("{} {}", "missing:".yellow().bold(), missing.describe());
    }
    for suggestion in &resolution.suggestions {
        println!("{} {}", "suggestion:".cyan().bold(), suggestion.reason);
    }
    for warning in &resolution.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }
}

fn render_compose_report(target: &std::path::Path, report: &ComposeReport) {
    for path in &report.created {
        println!("  {} {}", "create".green(), target.join(path).display());
    }
    for path in &report.merged {
        println!("  {} {}", "merge ".cyan(), target.join(path).display());
    }
    for warning in &report.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }
    for failure in &report.failed {
        println!("{} {}: {}", "failed:".red().bold(), failure.path, failure.reason);
    }
}
