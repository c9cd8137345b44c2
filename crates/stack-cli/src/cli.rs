//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stack_registry::Category;

/// Stacksmith - assemble a project from composable stack modules
#[derive(Parser, Debug)]
#[command(name = "stacksmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a stacksmith.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List known modules
    List {
        /// Only modules in this category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Fuzzy-search modules by name, tags, and description
    Search {
        /// Search query
        query: String,

        /// Only modules in this category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Complete a module-name prefix
    Suggest {
        /// Name prefix
        prefix: String,

        /// Maximum number of completions
        #[arg(short, long, default_value_t = 8)]
        limit: usize,
    },

    /// Preview resolution of a module selection
    ///
    /// Examples:
    ///   stacksmith resolve react tailwind
    ///   stacksmith resolve react redux --include-dev --json
    Resolve {
        /// Module names to resolve
        #[arg(required = true)]
        modules: Vec<String>,

        /// Auto-pick the highest-priority module among exclusive rivals
        #[arg(long)]
        priority: bool,

        /// Keep the computed order even when conflicts exist
        #[arg(long)]
        allow_conflicts: bool,

        /// Also expand dev-only requirements
        #[arg(long)]
        include_dev: bool,

        /// Bound on transitive expansion depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Resolve a selection and compose it into a new project directory
    New {
        /// Project name
        name: String,

        /// Module names to include
        #[arg(required = true)]
        modules: Vec<String>,

        /// Target directory (defaults to ./<name>)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Auto-pick the highest-priority module among exclusive rivals
        #[arg(long)]
        priority: bool,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        format!(
            "unknown category '{s}' (expected one of: {})",
            Category::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}
