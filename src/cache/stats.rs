//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and removals by cause.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that returned a result
    pub hits: u64,
    /// Number of lookups that found no live entry
    pub misses: u64,
    /// Number of entries stored by `put`
    pub inserts: u64,
    /// Number of entries evicted by capacity pressure
    pub evictions: u64,
    /// Number of entries removed after outliving the TTL
    pub expirations: u64,
    /// Number of entries removed by table invalidation
    pub invalidations: u64,
    /// Number of `put` calls refused as too large
    pub rejections: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current aggregate footprint in bytes
    pub current_size: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Records a lookup that returned a result.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Records a lookup that found no live entry.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Insert ==
    /// Records an entry stored by `put`.
    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    // == Record Eviction ==
    /// Records an entry evicted to make room.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expirations ==
    /// Records `count` entries removed after outliving the TTL.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Record Invalidations ==
    /// Records `count` entries removed by table invalidation.
    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    // == Record Rejection ==
    /// Records a `put` refused because the entry alone exceeds `max_size`.
    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Update Gauges ==
    /// Updates the entry count and footprint gauges.
    pub fn set_occupancy(&mut self, total_entries: usize, current_size: usize) {
        self.total_entries = total_entries;
        self.current_size = current_size;
    }
}
