//! Cache Context Module
//!
//! Shared, lock-guarded handle over one `QueryCache` with an explicit
//! create/destroy lifecycle. Operations on a destroyed context fail with
//! `CacheError::InvalidContext` instead of touching freed state.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::cache::{CacheStats, QueryCache};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache Context ==
/// Cloneable handle to a cache instance.
///
/// All clones refer to the same cache; every operation holds the lock for
/// its whole duration, so calls through one context are serialized.
pub struct CacheContext<C = SystemClock> {
    inner: Arc<Mutex<Option<QueryCache<C>>>>,
}

impl<C> Clone for CacheContext<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Creates a context with the default configuration.
pub fn create_context() -> CacheContext {
    let context = CacheContext::with_cache(QueryCache::with_defaults());
    info!("query cache context created with default configuration");
    context
}

/// Releases the cache behind `context` and every entry it holds.
///
/// Returns the number of entries released.
pub fn destroy_context<C: Clock>(context: &CacheContext<C>) -> Result<usize> {
    context.destroy()
}

impl CacheContext<SystemClock> {
    /// Creates a context from a configuration, validating it first.
    pub fn from_config(config: CacheConfig) -> Result<Self> {
        let cache = QueryCache::new(config)?;
        info!(
            max_entries = cache.config().max_entries,
            max_size = cache.config().max_size,
            default_ttl_secs = cache.config().default_ttl.as_secs(),
            duplicate_keys = %cache.config().duplicate_keys,
            "query cache context created"
        );
        Ok(Self::with_cache(cache))
    }
}

impl<C: Clock> CacheContext<C> {
    /// Wraps an existing cache.
    pub fn with_cache(cache: QueryCache<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(cache))),
        }
    }

    // == Get ==
    /// Looks up `query`, returning a copy of the cached result.
    pub fn get(&self, query: &[u8]) -> Result<Option<Vec<u8>>> {
        self.with_cache_mut(|cache| cache.get(query).map(<[u8]>::to_vec))
    }

    // == Put ==
    /// Stores `result` for `query`; see `QueryCache::put`.
    pub fn put(&self, query: &[u8], result: &[u8]) -> Result<()> {
        self.with_cache_mut(|cache| cache.put(query, result))?
    }

    // == Invalidate ==
    /// Removes entries whose query text contains `table`; returns how many.
    pub fn invalidate(&self, table: &[u8]) -> Result<usize> {
        self.with_cache_mut(|cache| cache.invalidate(table))
    }

    // == Remove ==
    /// Removes every entry stored under exactly `query`.
    pub fn remove(&self, query: &[u8]) -> Result<usize> {
        self.with_cache_mut(|cache| cache.remove(query))
    }

    // == Clear ==
    /// Empties the cache, returning how many entries were released.
    pub fn clear(&self) -> Result<usize> {
        self.with_cache_mut(QueryCache::clear)
    }

    // == Purge Expired ==
    /// Removes entries that have outlived the TTL.
    pub fn purge_expired(&self) -> Result<usize> {
        self.with_cache_mut(QueryCache::purge_expired)
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> Result<CacheStats> {
        self.with_cache_mut(|cache| cache.stats())
    }

    // == Length ==
    /// Returns the number of entries, expired ones included until discovered.
    pub fn len(&self) -> Result<usize> {
        self.with_cache_mut(|cache| cache.len())
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> Result<bool> {
        self.with_cache_mut(|cache| cache.is_empty())
    }

    // == Destroy ==
    /// Drops the cache. Every clone of this context becomes invalid.
    ///
    /// Destroying twice fails with `InvalidContext`.
    pub fn destroy(&self) -> Result<usize> {
        let cache = self.inner.lock().take().ok_or(CacheError::InvalidContext)?;
        let released = cache.len();
        drop(cache);
        info!(released, "query cache context destroyed");
        Ok(released)
    }

    fn with_cache_mut<R>(&self, f: impl FnOnce(&mut QueryCache<C>) -> R) -> Result<R> {
        let mut guard = self.inner.lock();
        let cache = guard.as_mut().ok_or(CacheError::InvalidContext)?;
        Ok(f(cache))
    }
}
