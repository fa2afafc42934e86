//! In-memory memoization for view computations.
//!
//! Each dashboard view is a pure function of the loaded datasets and the
//! selection inputs, so its result can be cached under a key built from those
//! inputs. A hit returns exactly what a recomputation would have produced.

use lru::LruCache;
use std::{
    hash::Hash,
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard},
};
use tracing::debug;

/// Selection inputs that identify one view computation.
pub trait CacheKey: Hash + Eq + Clone {
    /// Human-readable label used in logs.
    fn label(&self) -> String;
}

/// LRU cache of computed views.
pub struct ViewCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    entries: Mutex<LruCache<K, V>>,
    capacity: usize,
}

impl<K, V> ViewCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    /// Create a cache holding at most `capacity` views (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get a cached view.
    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().get(key).cloned()
    }

    /// Store a computed view.
    pub fn put(&self, key: K, value: V) {
        self.lock().put(key, value);
    }

    /// Return the cached view for `key`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get(&key) {
            debug!("view cache hit: {}", key.label());
            return hit;
        }
        debug!("view cache miss: {}", key.label());
        let value = compute();
        self.put(key, value.clone());
        value
    }

    /// Fallible variant of [`ViewCache::get_or_compute`]; errors are not cached.
    pub fn try_get_or_compute<F, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(&key) {
            debug!("view cache hit: {}", key.label());
            return Ok(hit);
        }
        debug!("view cache miss: {}", key.label());
        let value = compute()?;
        self.put(key, value.clone());
        Ok(value)
    }

    /// (entries, capacity)
    pub fn stats(&self) -> (usize, usize) {
        (self.lock().len(), self.capacity)
    }
}
