//! Optional `stacksmith.toml` engine configuration.
//!
//! ```toml
//! [registry]
//! plugin_dirs = ["./modules", "~/.stacksmith/modules"]
//!
//! [cache]
//! max_bytes = 4194304
//! spill_dir = "/tmp/stacksmith-cache"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CliError, Result};

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "stacksmith.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StacksmithConfig {
    #[serde(default)]
    pub registry: RegistrySection,
    #[serde(default)]
    pub cache: CacheSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrySection {
    /// Plugin directories searched for module descriptors, in priority
    /// order (all rank below the environment override, above builtins).
    #[serde(default)]
    pub plugin_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSection {
    /// In-memory byte budget; engine default when omitted.
    #[serde(default)]
    pub max_bytes: Option<usize>,
    /// Spill directory for persistent entries; disabled when omitted.
    #[serde(default)]
    pub spill_dir: Option<PathBuf>,
}

impl StacksmithConfig {
    /// Load from an explicit path, or from `./stacksmith.toml` when present,
    /// or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
