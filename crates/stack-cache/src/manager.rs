//! The bounded LRU store.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::spill;

/// Cache sizing and spillover configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Byte budget for the in-memory store.
    pub max_bytes: usize,
    /// Directory for persistent-entry mirroring; `None` disables spillover.
    pub spill_dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_bytes: 8 * 1024 * 1024,
            spill_dir: None,
        }
    }
}

impl CacheConfig {
    /// Enable spillover under the platform cache directory when available.
    pub fn with_default_spill(mut self) -> Self {
        self.spill_dir = spill::default_spill_dir();
        self
    }
}

/// Hit/miss/eviction counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

struct CacheEntry {
    value: Vec<u8>,
    last_access: u64,
    persistent: bool,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    total_bytes: usize,
    tick: u64,
    stats: CacheStats,
}

/// Bounded in-memory key → bytes store with strict LRU eviction.
///
/// All mutation goes through one mutex, giving the single-writer-at-a-time
/// semantics the engine needs; call volumes here never justify anything
/// lock-free.
pub struct CacheManager {
    config: CacheConfig,
    inner: Mutex<CacheInner>,
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Look up a key, refreshing its LRU position on a hit.
    ///
    /// Misses fall through to the spill directory for entries that were
    /// mirrored by an earlier process; a disk hit is re-admitted to memory.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut guard = self.inner.lock().expect("cache mutex poisoned");
        let inner = &mut *guard;
        inner.tick += 1;
        let tick = inner.tick;

        if let Some(entry) = inner.entries.get_mut(key) {
            entry.last_access = tick;
            inner.stats.hits += 1;
            return Some(entry.value.clone());
        }

        if let Some(ref dir) = self.config.spill_dir {
            match spill::read_entry(dir, key) {
                Ok(Some(value)) => {
                    inner.stats.hits += 1;
                    Self::insert_locked(inner, self.config.max_bytes, key, value.clone(), true);
                    return Some(value);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("cache spill read failed for '{key}': {e}"),
            }
        }

        inner.stats.misses += 1;
        None
    }

    /// Insert or overwrite a key.
    ///
    /// Persistent entries are mirrored to the spill directory best-effort;
    /// a failed mirror write is logged and the in-memory insert stands.
    pub fn set(&self, key: &str, value: Vec<u8>, persistent: bool) {
        if persistent {
            if let Some(ref dir) = self.config.spill_dir {
                if let Err(e) = spill::write_entry(dir, key, &value) {
                    tracing::warn!("cache spill write failed for '{key}': {e}");
                }
            }
        }

        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        inner.tick += 1;
        Self::insert_locked(&mut inner, self.config.max_bytes, key, value, persistent);
    }

    /// Deserialize a cached JSON value.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.get(key)?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("cache entry '{key}' failed to deserialize: {e}");
                self.invalidate(key);
                None
            }
        }
    }

    /// Serialize a value into the cache as JSON.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T, persistent: bool) {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.set(key, bytes, persistent),
            Err(e) => tracing::warn!("cache entry '{key}' failed to serialize: {e}"),
        }
    }

    /// Drop a key from memory and from the spill directory.
    pub fn invalidate(&self, key: &str) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        if let Some(entry) = inner.entries.remove(key) {
            inner.total_bytes -= entry.value.len();
        }
        drop(inner);

        if let Some(ref dir) = self.config.spill_dir {
            if let Err(e) = spill::remove_entry(dir, key) {
                tracing::warn!("cache spill remove failed for '{key}': {e}");
            }
        }
    }

    /// Drop everything. Counters are preserved.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        inner.entries.clear();
        inner.total_bytes = 0;
        drop(inner);

        if let Some(ref dir) = self.config.spill_dir {
            if let Err(e) = spill::clear(dir) {
                tracing::warn!("cache spill clear failed: {e}");
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().expect("cache mutex poisoned").stats
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache mutex poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_locked(
        inner: &mut CacheInner,
        max_bytes: usize,
        key: &str,
        value: Vec<u8>,
        persistent: bool,
    ) {
        if let Some(old) = inner.entries.remove(key) {
            inner.total_bytes -= old.value.len();
        }
        inner.total_bytes += value.len();
        let tick = inner.tick;
        inner.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                last_access: tick,
                persistent,
            },
        );
        Self::evict_until_under_budget(inner, max_bytes);
    }

    /// Evict least-recently-accessed entries until the budget holds.
    ///
    /// Persistent entries leave their spill file behind, so eviction only
    /// costs them a re-read.
    fn evict_until_under_budget(inner: &mut CacheInner, max_bytes: usize) {
        while inner.total_bytes > max_bytes && !inner.entries.is_empty() {
            let victim = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone())
                .expect("non-empty map has a minimum");
            if let Some(entry) = inner.entries.remove(&victim) {
                inner.total_bytes -= entry.value.len();
                inner.stats.evictions += 1;
                tracing::debug!(
                    "evicted cache entry '{victim}' ({} bytes, persistent={})",
                    entry.value.len(),
                    entry.persistent
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bounded(max_bytes: usize) -> CacheManager {
        CacheManager::new(CacheConfig {
            max_bytes,
            spill_dir: None,
        })
    }

    #[test]
    fn test_get_set_roundtrip() {
        let cache = bounded(1024);
        cache.set("k", b"value".to_vec(), false);
        assert_eq!(cache.get("k"), Some(b"value".to_vec()));
    }

    #[test]
    fn test_miss_counts() {
        let cache = bounded(1024);
        assert_eq!(cache.get("absent"), None);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_lru_evicts_least_recently_accessed() {
        // Four 4-byte entries fit; the fifth forces one eviction.
        let cache = bounded(16);
        cache.set("a", b"aaaa".to_vec(), false);
        cache.set("b", b"bbbb".to_vec(), false);
        cache.set("c", b"cccc".to_vec(), false);
        cache.set("d", b"dddd".to_vec(), false);

        // Touch "a" so "b" becomes the least recently accessed.
        assert!(cache.get("a").is_some());

        cache.set("e", b"eeee".to_vec(), false);

        assert!(cache.get("b").is_none(), "b should have been evicted");
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.get("d").is_some());
        assert!(cache.get("e").is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_replaces_size_accounting() {
        let cache = bounded(8);
        cache.set("k", b"aaaa".to_vec(), false);
        cache.set("k", b"bbbbbbbb".to_vec(), false);
        assert_eq!(cache.get("k"), Some(b"bbbbbbbb".to_vec()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_invalidate() {
        let cache = bounded(1024);
        cache.set("k", b"v".to_vec(), false);
        cache.invalidate("k");
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_clear() {
        let cache = bounded(1024);
        cache.set("a", b"1".to_vec(), false);
        cache.set("b", b"2".to_vec(), false);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let cache = bounded(1024);
        cache.set_json("nums", &vec![1u32, 2, 3], false);
        assert_eq!(cache.get_json::<Vec<u32>>("nums"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_persistent_entry_survives_eviction_via_spill() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = CacheManager::new(CacheConfig {
            max_bytes: 4,
            spill_dir: Some(dir.path().to_path_buf()),
        });

        cache.set("keep", b"data".to_vec(), true);
        // Evicts "keep" from memory; the spill file remains.
        cache.set("next", b"more".to_vec(), false);
        assert_eq!(cache.stats().evictions, 1);

        assert_eq!(cache.get("keep"), Some(b"data".to_vec()));
    }

    #[test]
    fn test_spillover_shared_between_managers() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CacheConfig {
            max_bytes: 1024,
            spill_dir: Some(dir.path().to_path_buf()),
        };

        let first = CacheManager::new(config.clone());
        first.set("shared", b"payload".to_vec(), true);

        let second = CacheManager::new(config);
        assert_eq!(second.get("shared"), Some(b"payload".to_vec()));
    }

    #[test]
    fn test_spill_disabled_without_dir() {
        let cache = bounded(4);
        cache.set("keep", b"data".to_vec(), true);
        cache.set("next", b"more".to_vec(), false);
        // No spill dir: the evicted persistent entry is simply gone.
        assert_eq!(cache.get("keep"), None);
    }
}
