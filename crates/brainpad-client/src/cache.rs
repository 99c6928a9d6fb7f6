//! Keyed client-side query cache.
//!
//! Each entry holds the last fetched value and a freshness flag. Invalidating
//! an entry keeps the value (so callers may still show it) but forces the
//! next fresh read to miss.
//!
//! Every key also carries a generation that moves forward on each
//! invalidation or patch. A fetch records the generation before it starts
//! and stores its result with [`QueryCache::set_if_current`], so a response
//! that raced a mutation never lands as fresh.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    fresh: bool,
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

/// Keyed cache of query results.
#[derive(Clone)]
pub struct QueryCache<T> {
    inner: Arc<RwLock<CacheInner<T>>>,
}

struct CacheInner<T> {
    entries: HashMap<String, Entry<T>>,
    generations: HashMap<String, u64>,
    stats: CacheStats,
}

impl<T> CacheInner<T> {
    fn bump(&mut self, key: &str) {
        *self.generations.entry(key.to_string()).or_default() += 1;
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner {
                entries: HashMap::new(),
                generations: HashMap::new(),
                stats: CacheStats::default(),
            })),
        }
    }
}

impl<T: Clone + Send + Sync> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value for `key` if present and not invalidated.
    pub async fn get_fresh(&self, key: &str) -> Option<T> {
        let mut inner = self.inner.write().await;
        let hit = inner
            .entries
            .get(key)
            .filter(|e| e.fresh)
            .map(|e| e.value.clone());
        if hit.is_some() {
            inner.stats.hits += 1;
        } else {
            inner.stats.misses += 1;
        }
        debug!(
            subsystem = "client",
            component = "query_cache",
            cache_key = key,
            hit = hit.is_some(),
            "Cache lookup"
        );
        hit
    }

    /// The cached value for `key`, fresh or stale.
    pub async fn peek(&self, key: &str) -> Option<T> {
        self.inner
            .read()
            .await
            .entries
            .get(key)
            .map(|e| e.value.clone())
    }

    pub async fn is_fresh(&self, key: &str) -> bool {
        self.inner
            .read()
            .await
            .entries
            .get(key)
            .is_some_and(|e| e.fresh)
    }

    /// Store a freshly fetched value.
    pub async fn set(&self, key: &str, value: T) {
        self.inner
            .write()
            .await
            .entries
            .insert(key.to_string(), Entry { value, fresh: true });
    }

    /// Current generation of `key`. Take it before fetching.
    pub async fn generation(&self, key: &str) -> u64 {
        self.inner
            .read()
            .await
            .generations
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Store a value fetched when `key` was at `generation`. Skipped, and
    /// false returned, if the key was invalidated or patched since.
    pub async fn set_if_current(&self, key: &str, value: T, generation: u64) -> bool {
        let mut inner = self.inner.write().await;
        let current = inner.generations.get(key).copied().unwrap_or(0);
        if current != generation {
            debug!(
                subsystem = "client",
                component = "query_cache",
                cache_key = key,
                fetched_at = generation,
                current,
                "Discarding result of outdated fetch"
            );
            return false;
        }
        inner
            .entries
            .insert(key.to_string(), Entry { value, fresh: true });
        true
    }

    /// Mark `key` stale. Fetches already in flight for it will not be stored.
    pub async fn invalidate(&self, key: &str) {
        let mut inner = self.inner.write().await;
        inner.bump(key);
        if let Some(entry) = inner.entries.get_mut(key) {
            entry.fresh = false;
            inner.stats.invalidations += 1;
            debug!(
                subsystem = "client",
                component = "query_cache",
                cache_key = key,
                "Cache invalidated"
            );
        }
    }

    /// Patch the cached value in place. Returns false when nothing is cached.
    /// Freshness is unchanged.
    pub async fn update(&self, key: &str, patch: impl FnOnce(&mut T)) -> bool {
        let mut inner = self.inner.write().await;
        inner.bump(key);
        match inner.entries.get_mut(key) {
            Some(entry) => {
                patch(&mut entry.value);
                true
            }
            None => false,
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats
    }
}
