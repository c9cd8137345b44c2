//! Error types for stack-resolver

/// Result type for stack-resolver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Structural resolution failures.
///
/// Everything else — conflicts, missing requirements — is returned as data
/// inside [`Resolution`](crate::Resolution).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicitly selected module name the registry does not know.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// A requires-cycle. The cycle lists each participant once, in edge
    /// order; the first module requires the second, and the last requires
    /// the first.
    #[error("circular dependency: {}", format_cycle(.cycle))]
    CircularDependency { cycle: Vec<String> },

    #[error(transparent)]
    Registry(#[from] stack_registry::Error),
}

fn format_cycle(cycle: &[String]) -> String {
    let mut names: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = names.first().copied() {
        names.push(first);
    }
    names.join(" -> ")
}
