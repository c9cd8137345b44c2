//! Error types for stack-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Registry(#[from] stack_registry::Error),

    #[error(transparent)]
    Resolver(#[from] stack_resolver::Error),

    #[error(transparent)]
    Compose(#[from] stack_compose::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse config {path}: {message}")]
    Config { path: String, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
