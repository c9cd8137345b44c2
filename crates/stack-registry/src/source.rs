//! Ranked module discovery sources.
//!
//! A source yields raw descriptors; it never executes code. The registry
//! consumes an ordered list of sources where earlier entries outrank later
//! ones, and merges strictly by that rank — never by I/O completion order —
//! so discovery stays deterministic however the reads are scheduled.

use std::fs;
use std::path::{Path, PathBuf};

use crate::DESCRIPTOR_EXTENSION;
use crate::descriptor::RawDescriptor;
use crate::error::{Error, Result};

/// Environment variable naming an extra highest-priority descriptor
/// directory.
pub const MODULE_PATH_ENV: &str = "STACKSMITH_MODULE_PATH";

/// A provider of raw module descriptors.
pub trait ModuleSource {
    /// Stable identifier used in shadowing and validation warnings.
    fn id(&self) -> &str;

    /// Yield every descriptor this source currently holds.
    ///
    /// Per-descriptor problems (a malformed file among many) are the
    /// implementation's to log and skip; a `Err` here means the source as a
    /// whole could not be read.
    fn load(&self) -> Result<Vec<RawDescriptor>>;
}

/// An in-memory source: backs the built-in catalog and test fixtures.
pub struct StaticSource {
    id: String,
    descriptors: Vec<RawDescriptor>,
}

impl StaticSource {
    pub fn new(id: impl Into<String>, descriptors: Vec<RawDescriptor>) -> Self {
        Self {
            id: id.into(),
            descriptors,
        }
    }

    /// Build from embedded TOML texts, skipping malformed entries with a
    /// warning. Used for the compiled-in catalog where a parse failure is a
    /// packaging defect, not a runtime error.
    pub fn from_toml_texts(id: impl Into<String>, texts: &[&str]) -> Self {
        let id = id.into();
        let descriptors = texts
            .iter()
            .filter_map(|text| match RawDescriptor::from_toml(text) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    tracing::warn!("skipping malformed descriptor in source '{id}': {e}");
                    None
                }
            })
            .collect();
        Self { id, descriptors }
    }
}

impl ModuleSource for StaticSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<Vec<RawDescriptor>> {
        Ok(self.descriptors.clone())
    }
}

/// A plugin directory of `*.toml` descriptors.
///
/// Files are read in name order for determinism. A malformed file is logged
/// and skipped; only an unreadable directory fails the load.
pub struct DirectorySource {
    id: String,
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            id: format!("dir:{}", dir.display()),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ModuleSource for DirectorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<Vec<RawDescriptor>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION)
            })
            .collect();
        paths.sort();

        let mut descriptors = Vec::with_capacity(paths.len());
        for path in paths {
            match RawDescriptor::from_path(&path) {
                Ok(raw) => descriptors.push(raw),
                Err(e) => tracing::warn!("failed to load {}: {e}", path.display()),
            }
        }
        Ok(descriptors)
    }
}

/// Source for the `STACKSMITH_MODULE_PATH` override directory, if set.
pub fn env_override_source() -> Option<DirectorySource> {
    std::env::var_os(MODULE_PATH_ENV).map(DirectorySource::new)
}
