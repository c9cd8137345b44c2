//! Error types for stack-registry

use std::path::PathBuf;

use crate::validate::ValidationError;

/// Result type for stack-registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in registry operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to parse a descriptor's TOML.
    #[error("failed to parse module descriptor{}: {source}", origin_suffix(.origin))]
    DescriptorParse {
        /// File path or source id the descriptor came from, when known.
        origin: Option<String>,
        #[source]
        source: toml::de::Error,
    },

    /// Descriptor parsed but failed required-field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O error reading a discovery source.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A module name absent from every configured source.
    #[error("unknown module: {0}")]
    UnknownModule(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn origin_suffix(origin: &Option<String>) -> String {
    match origin {
        Some(origin) => format!(" from {origin}"),
        None => String::new(),
    }
}
