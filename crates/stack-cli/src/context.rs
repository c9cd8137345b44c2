//! Wiring: registry, cache, and search index from configuration.

use stack_cache::{CacheConfig, CacheManager};
use stack_registry::{
    CategoryPolicy, DirectorySource, ModuleRegistry, ModuleSource, builtin,
    env_override_source,
};
use stack_search::SearchIndex;

use crate::config::StacksmithConfig;
use crate::error::Result;

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub registry: ModuleRegistry,
    pub cache: CacheManager,
}

impl AppContext {
    /// Build the ranked source list and run discovery.
    ///
    /// Source priority, highest first: the `STACKSMITH_MODULE_PATH`
    /// override, configured plugin directories, the built-in catalog.
    pub fn build(config: &StacksmithConfig) -> Result<Self> {
        let mut sources: Vec<Box<dyn ModuleSource>> = Vec::new();
        if let Some(override_source) = env_override_source() {
            sources.push(Box::new(override_source));
        }
        for dir in &config.registry.plugin_dirs {
            sources.push(Box::new(DirectorySource::new(dir)));
        }
        sources.push(Box::new(builtin::builtin_source()));

        let mut registry = ModuleRegistry::new(sources, CategoryPolicy::default());
        let report = registry.discover()?;
        for warning in &report.warnings {
            tracing::warn!("{warning}");
        }

        let mut cache_config = CacheConfig::default();
        if let Some(max_bytes) = config.cache.max_bytes {
            cache_config.max_bytes = max_bytes;
        }
        cache_config.spill_dir = config.cache.spill_dir.clone();

        Ok(Self {
            registry,
            cache: CacheManager::new(cache_config),
        })
    }

    /// A fresh search index over the current registry state.
    pub fn search_index(&self) -> SearchIndex {
        SearchIndex::build(self.registry.modules())
    }
}
