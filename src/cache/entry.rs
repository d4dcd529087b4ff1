//! Cache Entry Module
//!
//! Defines the structure for individual cached query results with TTL support.

use std::mem;
use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached query result with access metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Exact query text the result belongs to
    pub key: Vec<u8>,
    /// The stored result payload
    pub value: Vec<u8>,
    /// Insertion instant
    pub created_at: Instant,
    /// Instant of the most recent hit (insertion counts as an access)
    pub last_access_at: Instant,
    /// Number of accesses, starting at 1 on insert
    pub access_count: u64,
}

/// Fixed bookkeeping overhead charged to every entry.
pub const ENTRY_OVERHEAD: usize = mem::size_of::<CacheEntry>();

/// Returns the footprint an entry with these lengths is charged.
pub fn entry_footprint(key_len: usize, value_len: usize) -> usize {
    key_len
        .saturating_add(value_len)
        .saturating_add(ENTRY_OVERHEAD)
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped at `now`.
    pub fn new(key: Vec<u8>, value: Vec<u8>, now: Instant) -> Self {
        Self {
            key,
            value,
            created_at: now,
            last_access_at: now,
            access_count: 1,
        }
    }

    // == Footprint ==
    /// Bytes this entry counts against the size limit.
    pub fn footprint(&self) -> usize {
        entry_footprint(self.key.len(), self.value.len())
    }

    // == Age ==
    /// Time elapsed since insertion, zero if `now` is earlier.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is already expired.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }

    // == Touch ==
    /// Records a hit at `now`.
    pub fn touch(&mut self, now: Instant) {
        self.last_access_at = now;
        self.access_count += 1;
    }

    // == Contains ==
    /// Whether the query text contains `needle` as a literal byte substring.
    ///
    /// An empty needle matches every entry.
    pub fn key_contains(&self, needle: &[u8]) -> bool {
        needle.is_empty() || self.key.windows(needle.len()).any(|window| window == needle)
    }
}
