//! Stacksmith CLI
//!
//! The command-line shell over the module registry, resolver, and
//! composition engine.

mod cli;
mod commands;
mod config;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use config::StacksmithConfig;
use context::AppContext;
use error::Result;
use stack_resolver::{ConflictResolution, ResolveOptions};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let config = StacksmithConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(command) => {
            let context = AppContext::build(&config)?;
            execute_command(&context, command)
        }
        None => {
            println!("{} Stacksmith CLI", "stacksmith".green().bold());
            println!();
            println!(
                "Run {} for available commands.",
                "stacksmith --help".cyan()
            );
            Ok(())
        }
    }
}

fn execute_command(context: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::List { category, json } => commands::run_list(context, category, json),
        Commands::Search {
            query,
            category,
            limit,
        } => commands::run_search(context, &query, category, limit),
        Commands::Suggest { prefix, limit } => commands::run_suggest(context, &prefix, limit),
        Commands::Resolve {
            modules,
            priority,
            allow_conflicts,
            include_dev,
            max_depth,
            json,
        } => {
            let options = ResolveOptions {
                max_depth,
                conflict_resolution: if priority {
                    ConflictResolution::Priority
                } else {
                    ConflictResolution::Fail
                },
                allow_conflicts,
                include_dev,
            };
            commands::run_resolve(context, &modules, &options, json)
        }
        Commands::New {
            name,
            modules,
            path,
            priority,
        } => commands::run_new(context, &name, &modules, path, priority),
    }
}
