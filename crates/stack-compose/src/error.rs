//! Error types for stack-compose

use std::path::PathBuf;

use stack_registry::MergeStrategy;

/// Result type for stack-compose operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during composition.
///
/// Only [`Error::TargetUnwritable`] aborts a whole run; everything else is
/// scoped to one target path and collected in the report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("target directory {path} is not writable: {source}")]
    TargetUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// Contributions to one path declared incompatible strategies.
    #[error("incompatible merge strategies for {path}: {}", format_strategies(.strategies))]
    MergeConflict {
        path: String,
        strategies: Vec<MergeStrategy>,
    },

    /// Structured merge requested for a path with no recognizable data
    /// format.
    #[error("cannot structured-merge {path}: unrecognized data format")]
    UnsupportedFormat { path: String },

    /// A contribution (or the existing file) is not valid structured data.
    #[error("failed to parse {path} content from '{module}' as {format}: {message}")]
    ContentParse {
        path: String,
        module: String,
        format: String,
        message: String,
    },

    /// A target path escaping the project directory.
    #[error("refusing template path outside the project directory: {path}")]
    UnsafePath { path: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_strategies(strategies: &[MergeStrategy]) -> String {
    strategies
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" vs ")
}
