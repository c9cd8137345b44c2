//! Error types for stack-version

/// Result type for stack-version operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing versions or ranges
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("invalid version range '{range}': {source}")]
    InvalidRange {
        range: String,
        #[source]
        source: semver::Error,
    },
}
