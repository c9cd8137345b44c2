//! Error types for stack-cache

use std::path::PathBuf;

/// Result type for stack-cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cache spillover I/O.
///
/// These never cross the [`CacheManager`](crate::CacheManager) boundary: disk
/// failures are logged and the cache degrades to memory-only.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
