//! Query Cache Store Module
//!
//! Main cache engine combining an exact-match index with LRU ordering,
//! footprint accounting and lazy TTL expiration.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::cache::lru::{Handle, LruList};
use crate::cache::{entry_footprint, CacheEntry, CacheStats};
use crate::clock::{Clock, SystemClock};
use crate::config::{CacheConfig, DuplicateKeyPolicy};
use crate::error::{CacheError, Result};

/// Stale handles tolerated in the expiry queue beyond twice the live count.
const EXPIRY_QUEUE_SLACK: usize = 64;

// == Query Cache ==
/// Result cache keyed by exact query bytes.
///
/// Entries are kept in recency order (head = most recently used). Every
/// mutating operation takes `&mut self`; callers sharing one instance must
/// serialize access themselves (see `CacheContext`).
///
/// Repeated `put` of the same query keeps independent entries under the
/// default `DuplicateKeyPolicy::Retain`; lookups return the one nearest the
/// head.
#[derive(Debug)]
pub struct QueryCache<C = SystemClock> {
    /// Entries in recency order
    entries: LruList<CacheEntry>,
    /// Query bytes -> live handles, last = nearest the head
    index: HashMap<Vec<u8>, Vec<Handle>>,
    /// Handles in creation order; may hold stale handles
    expiry: VecDeque<Handle>,
    /// Sum of live entry footprints
    current_size: usize,
    /// Performance statistics
    stats: CacheStats,
    config: CacheConfig,
    clock: C,
}

impl QueryCache<SystemClock> {
    // == Constructor ==
    /// Creates a new QueryCache using the system clock.
    ///
    /// Fails with `InvalidConfig` if the limits do not validate.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a cache with 1000 entries, 64 MiB and a one hour TTL.
    pub fn with_defaults() -> Self {
        Self::build(CacheConfig::default(), SystemClock)
    }
}

impl<C: Clock> QueryCache<C> {
    /// Creates a cache with a custom clock (useful for testing).
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: LruList::new(),
            index: HashMap::new(),
            expiry: VecDeque::new(),
            current_size: 0,
            stats: CacheStats::new(),
            config,
            clock,
        }
    }

    // == Get ==
    /// Looks up the cached result for `query`.
    ///
    /// Expired entries are removed first, wherever they sit. On a hit the
    /// entry's access metadata is updated and it becomes most recently used.
    pub fn get(&mut self, query: &[u8]) -> Option<&[u8]> {
        let now = self.clock.now();
        self.purge_expired_at(now);

        let handle = match self.index.get(query).and_then(|bucket| bucket.last()) {
            Some(handle) => *handle,
            None => {
                self.stats.record_miss();
                trace!(query_len = query.len(), "query cache miss");
                return None;
            }
        };

        self.stats.record_hit();
        self.entries.move_to_front(handle);
        let entry = self.entries.get_mut(handle)?;
        entry.touch(now);
        trace!(
            query_len = query.len(),
            access_count = entry.access_count,
            "query cache hit"
        );
        Some(entry.value.as_slice())
    }

    // == Put ==
    /// Stores `result` as the answer to `query`.
    ///
    /// Least recently used entries are evicted until both the entry-count
    /// and footprint limits admit the new entry. An entry whose footprint
    /// alone exceeds `max_size` is refused with `TooLarge` and nothing is
    /// evicted. Allocation failure leaves the cache unchanged.
    pub fn put(&mut self, query: &[u8], result: &[u8]) -> Result<()> {
        let incoming = entry_footprint(query.len(), result.len());
        if incoming > self.config.max_size {
            self.stats.record_rejection();
            warn!(
                size = incoming,
                max_size = self.config.max_size,
                "refusing to cache oversized result"
            );
            return Err(CacheError::TooLarge {
                size: incoming,
                max_size: self.config.max_size,
            });
        }

        // Reserve everything up front so a failure leaves no trace
        let key = copy_bytes(query)?;
        let index_key = copy_bytes(query)?;
        let value = copy_bytes(result)?;
        let mut fresh_bucket = Vec::new();
        fresh_bucket.try_reserve_exact(1)?;
        if let Some(bucket) = self.index.get_mut(query) {
            bucket.try_reserve(1)?;
        }
        self.index.try_reserve(1)?;
        self.entries.try_reserve(1)?;
        self.compact_expiry_queue();
        self.expiry.try_reserve(1)?;

        let now = self.clock.now();
        self.purge_expired_at(now);

        if self.config.duplicate_keys == DuplicateKeyPolicy::Replace {
            let replaced = self.remove(query);
            if replaced > 0 {
                trace!(replaced, "replaced cached result for repeated query");
            }
        }

        while self.entries.len() >= self.config.max_entries
            || self.current_size.saturating_add(incoming) > self.config.max_size
        {
            if !self.evict_lru() {
                break;
            }
        }

        let handle = self.entries.push_front(CacheEntry::new(key, value, now));
        self.current_size += incoming;
        self.expiry.push_back(handle);
        match self.index.entry(index_key) {
            Entry::Occupied(mut bucket) => bucket.get_mut().push(handle),
            Entry::Vacant(slot) => {
                fresh_bucket.push(handle);
                slot.insert(fresh_bucket);
            }
        }

        self.stats.record_insert();
        trace!(
            size = incoming,
            entries = self.entries.len(),
            current_size = self.current_size,
            "cached query result"
        );
        Ok(())
    }

    // == Invalidate ==
    /// Removes every entry whose query text contains `table` as a byte substring.
    ///
    /// No SQL awareness: matches inside literals or column names count, and
    /// an empty `table` matches everything. Returns the number removed.
    pub fn invalidate(&mut self, table: &[u8]) -> usize {
        let doomed: Vec<Handle> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.key_contains(table))
            .map(|(handle, _)| handle)
            .collect();

        let removed = doomed
            .into_iter()
            .filter_map(|handle| self.remove_entry(handle))
            .count();

        if removed > 0 {
            self.stats.record_invalidations(removed);
        }
        debug!(
            table = %String::from_utf8_lossy(table),
            removed,
            "invalidated cached queries"
        );
        removed
    }

    // == Remove ==
    /// Removes every entry stored under exactly `query`.
    ///
    /// Returns the number of entries removed.
    pub fn remove(&mut self, query: &[u8]) -> usize {
        let bucket = match self.index.remove(query) {
            Some(bucket) => bucket,
            None => return 0,
        };

        let mut removed = 0;
        for handle in bucket {
            if let Some(entry) = self.entries.remove(handle) {
                self.current_size -= entry.footprint();
                removed += 1;
            }
        }
        removed
    }

    // == Clear ==
    /// Removes all entries. Returns how many were released.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.index.clear();
        self.expiry.clear();
        self.current_size = 0;
        debug!(removed, "cleared query cache");
        removed
    }

    // == Purge Expired ==
    /// Removes all entries that have outlived the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.purge_expired_at(now)
    }

    // == Peek ==
    /// Returns the entry a `get` would hit, without promoting it or counting stats.
    pub fn peek(&self, query: &[u8]) -> Option<&CacheEntry> {
        let handle = *self.index.get(query)?.last()?;
        let entry = self.entries.get(handle)?;
        if entry.is_expired(self.clock.now(), self.config.default_ttl) {
            return None;
        }
        Some(entry)
    }

    // == Contains ==
    /// Checks for a live entry without affecting recency.
    pub fn contains(&self, query: &[u8]) -> bool {
        self.peek(query).is_some()
    }

    // == Keys ==
    /// Iterates cached queries from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|(_, entry)| entry.key.as_slice())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.entries.len(), self.current_size);
        stats
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included until discovered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Current Size ==
    /// Returns the aggregate footprint of all entries in bytes.
    pub fn current_size(&self) -> usize {
        self.current_size
    }

    // == Config ==
    /// Returns the configuration the cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn purge_expired_at(&mut self, now: Instant) -> usize {
        let ttl = self.config.default_ttl;
        let mut expired = 0;

        while let Some(&handle) = self.expiry.front() {
            let is_expired = self
                .entries
                .get(handle)
                .map(|entry| entry.is_expired(now, ttl));
            match is_expired {
                // Already removed some other way
                None => {
                    self.expiry.pop_front();
                }
                Some(true) => {
                    self.expiry.pop_front();
                    self.remove_entry(handle);
                    expired += 1;
                }
                Some(false) => break,
            }
        }

        if expired > 0 {
            self.stats.record_expirations(expired);
            debug!(expired, "removed expired query results");
        }
        expired
    }

    fn evict_lru(&mut self) -> bool {
        let handle = match self.entries.back() {
            Some(handle) => handle,
            None => return false,
        };
        if let Some(entry) = self.remove_entry(handle) {
            self.stats.record_eviction();
            debug!(
                freed = entry.footprint(),
                access_count = entry.access_count,
                "evicted least recently used query result"
            );
        }
        true
    }

    fn remove_entry(&mut self, handle: Handle) -> Option<CacheEntry> {
        let entry = self.entries.remove(handle)?;
        self.current_size -= entry.footprint();

        let key = entry.key.as_slice();
        if let Some(bucket) = self.index.get_mut(key) {
            bucket.retain(|candidate| *candidate != handle);
            if bucket.is_empty() {
                self.index.remove(key);
            }
        }
        Some(entry)
    }

    fn compact_expiry_queue(&mut self) {
        if self.expiry.len() > self.entries.len() * 2 + EXPIRY_QUEUE_SLACK {
            let entries = &self.entries;
            self.expiry.retain(|handle| entries.contains(*handle));
        }
    }

    /// Panics if bookkeeping has drifted from the entries actually stored.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let live: Vec<(Handle, &CacheEntry)> = self.entries.iter().collect();
        assert_eq!(live.len(), self.entries.len(), "list length drifted");

        let footprint: usize = live.iter().map(|(_, entry)| entry.footprint()).sum();
        assert_eq!(footprint, self.current_size, "current_size drifted");

        let indexed: usize = self.index.values().map(Vec::len).sum();
        assert_eq!(indexed, live.len(), "index size drifted");
        for (key, bucket) in &self.index {
            assert!(!bucket.is_empty(), "empty index bucket left behind");
            for handle in bucket {
                let entry = self.entries.get(*handle).expect("index holds stale handle");
                assert_eq!(&entry.key, key, "index bucket under wrong key");
            }
        }

        let queued = self
            .expiry
            .iter()
            .filter(|handle| self.entries.contains(**handle))
            .count();
        assert_eq!(queued, live.len(), "expiry queue lost a live entry");

        assert!(self.entries.len() <= self.config.max_entries);
        assert!(self.current_size <= self.config.max_size);
    }
}

/// Copies `src`, reporting allocation failure instead of aborting.
fn copy_bytes(src: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())?;
    buf.extend_from_slice(src);
    Ok(buf)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration;

    fn cache_with(config: CacheConfig) -> (QueryCache<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache = QueryCache::with_clock(config, clock.clone()).unwrap();
        (cache, clock)
    }

    fn small_cache(max_entries: usize) -> QueryCache<ManualClock> {
        cache_with(CacheConfig::default().with_max_entries(max_entries)).0
    }

    #[test]
    fn test_store_new() {
        let cache = QueryCache::with_defaults();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
        assert_eq!(cache.config(), &CacheConfig::default());
    }

    #[test]
    fn test_store_new_rejects_invalid_config() {
        let result = QueryCache::new(CacheConfig::default().with_max_entries(0));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_store_put_and_get() {
        let mut cache = small_cache(10);

        cache.put(b"SELECT 1", b"1").unwrap();

        assert_eq!(cache.get(b"SELECT 1"), Some(&b"1"[..]));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.current_size(), entry_footprint(8, 1));
        cache.assert_consistent();
    }

    #[test]
    fn test_store_get_miss() {
        let mut cache = small_cache(10);
        cache.put(b"SELECT 1", b"1").unwrap();

        assert_eq!(cache.get(b"SELECT 2"), None);
        // Exact match only, no normalization
        assert_eq!(cache.get(b"select 1"), None);
        assert_eq!(cache.get(b"SELECT 1 "), None);
    }

    #[test]
    fn test_store_get_updates_access_metadata() {
        let (mut cache, clock) = cache_with(CacheConfig::default());
        cache.put(b"q", b"r").unwrap();
        let created = cache.peek(b"q").unwrap().created_at;

        clock.advance(Duration::from_secs(5));
        cache.get(b"q").unwrap();
        cache.get(b"q").unwrap();

        let entry = cache.peek(b"q").unwrap();
        assert_eq!(entry.access_count, 3);
        assert_eq!(entry.created_at, created);
        assert_eq!(entry.last_access_at, created + Duration::from_secs(5));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut cache = small_cache(2);

        cache.put(b"A", b"a").unwrap();
        cache.put(b"B", b"b").unwrap();
        cache.put(b"C", b"c").unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(b"A"), None);
        assert!(cache.get(b"B").is_some());
        assert!(cache.get(b"C").is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut cache = small_cache(2);

        cache.put(b"A", b"a").unwrap();
        cache.put(b"B", b"b").unwrap();

        // Access A to make it most recently used
        cache.get(b"A").unwrap();
        cache.put(b"C", b"c").unwrap();

        assert!(cache.get(b"A").is_some());
        assert_eq!(cache.get(b"B"), None);
        assert!(cache.get(b"C").is_some());
    }

    #[test]
    fn test_store_size_eviction() {
        let unit = entry_footprint(2, 8);
        let (mut cache, _) = cache_with(CacheConfig::default().with_max_size(unit * 2 + unit / 2));

        cache.put(b"k1", b"value001").unwrap();
        cache.put(b"k2", b"value002").unwrap();
        cache.put(b"k3", b"value003").unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.current_size(), unit * 2);
        assert!(!cache.contains(b"k1"));
        assert!(cache.contains(b"k2"));
        assert!(cache.contains(b"k3"));
        cache.assert_consistent();
    }

    #[test]
    fn test_store_large_entry_evicts_several() {
        let unit = entry_footprint(2, 2);
        let (mut cache, _) = cache_with(CacheConfig::default().with_max_size(unit * 3));

        cache.put(b"k1", b"v1").unwrap();
        cache.put(b"k2", b"v2").unwrap();
        cache.put(b"k3", b"v3").unwrap();

        // Needs the room of two small entries
        let big_value = vec![b'x'; unit + 2];
        cache.put(b"k4", &big_value).unwrap();

        assert_eq!(cache.keys().collect::<Vec<_>>(), vec![&b"k4"[..], &b"k3"[..]]);
        assert_eq!(cache.stats().evictions, 2);
        cache.assert_consistent();
    }

    #[test]
    fn test_store_too_large_leaves_cache_untouched() {
        let max_size = entry_footprint(1, 100);
        let (mut cache, _) = cache_with(CacheConfig::default().with_max_size(max_size));
        cache.put(b"a", b"small").unwrap();

        let huge = vec![0u8; 101];
        let result = cache.put(b"b", &huge);

        assert!(matches!(result, Err(CacheError::TooLarge { .. })));
        assert!(cache.contains(b"a"));
        assert!(!cache.contains(b"b"));
        assert_eq!(cache.stats().rejections, 1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_store_entry_exactly_max_size_fits() {
        let (mut cache, _) = cache_with(CacheConfig::default().with_max_size(entry_footprint(1, 1)));

        cache.put(b"a", b"1").unwrap();
        assert!(cache.contains(b"a"));

        cache.put(b"b", b"2").unwrap();
        assert!(!cache.contains(b"a"));
        assert_eq!(cache.get(b"b"), Some(&b"2"[..]));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let (mut cache, clock) = cache_with(CacheConfig::default().with_ttl(Duration::from_secs(10)));

        cache.put(b"q", b"r").unwrap();

        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.get(b"q"), Some(&b"r"[..]));

        // Hits do not extend the lifetime
        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get(b"q"), None);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_store_lazy_expiry_removes_unrelated_entries() {
        let (mut cache, clock) = cache_with(CacheConfig::default().with_ttl(Duration::from_secs(10)));

        cache.put(b"old", b"1").unwrap();
        clock.advance(Duration::from_secs(5));
        cache.put(b"new", b"2").unwrap();
        // Promote "old" so it is not at the tail
        cache.get(b"old").unwrap();
        clock.advance(Duration::from_secs(6));

        // Nothing is removed until an operation discovers it
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(b"old"));

        assert_eq!(cache.get(b"new"), Some(&b"2"[..]));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().expirations, 1);
        cache.assert_consistent();
    }

    #[test]
    fn test_store_put_reclaims_expired_before_evicting() {
        let (mut cache, clock) = cache_with(
            CacheConfig::default()
                .with_max_entries(2)
                .with_ttl(Duration::from_secs(10)),
        );

        cache.put(b"A", b"a").unwrap();
        clock.advance(Duration::from_secs(5));
        cache.put(b"B", b"b").unwrap();
        cache.get(b"A").unwrap();
        clock.advance(Duration::from_secs(6));

        // A expired; B is the tail but must survive
        cache.put(b"C", b"c").unwrap();

        assert!(cache.contains(b"B"));
        assert!(cache.contains(b"C"));
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_store_invalidate_substring() {
        let mut cache = small_cache(10);

        cache.put(b"SELECT * FROM orders", b"o").unwrap();
        cache.put(b"SELECT * FROM users", b"u").unwrap();

        assert_eq!(cache.invalidate(b"orders"), 1);

        assert_eq!(cache.get(b"SELECT * FROM orders"), None);
        assert_eq!(cache.get(b"SELECT * FROM users"), Some(&b"u"[..]));
        assert_eq!(cache.stats().invalidations, 1);
        cache.assert_consistent();
    }

    #[test]
    fn test_store_invalidate_is_naive() {
        let mut cache = small_cache(10);

        cache.put(b"SELECT * FROM users WHERE note = 'orders'", b"1").unwrap();
        cache.put(b"SELECT * FROM o", b"2").unwrap();

        // Literal text matches, aliases do not
        assert_eq!(cache.invalidate(b"orders"), 1);
        assert!(cache.contains(b"SELECT * FROM o"));
    }

    #[test]
    fn test_store_invalidate_empty_matches_all() {
        let mut cache = small_cache(10);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"2").unwrap();

        assert_eq!(cache.invalidate(b""), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
    }

    #[test]
    fn test_store_clear_idempotent() {
        let mut cache = small_cache(10);
        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"2").unwrap();

        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.get(b"a"), None);
        assert_eq!(cache.clear(), 0);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.current_size(), 0);
        cache.assert_consistent();
    }

    #[test]
    fn test_store_duplicate_keys_retained() {
        let mut cache = small_cache(10);

        cache.put(b"q", b"first").unwrap();
        cache.put(b"q", b"second").unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(b"q"), Some(&b"second"[..]));
        cache.assert_consistent();

        assert_eq!(cache.remove(b"q"), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_duplicate_survives_eviction_of_older_copy() {
        let mut cache = small_cache(2);

        cache.put(b"q", b"first").unwrap();
        cache.put(b"q", b"second").unwrap();
        cache.put(b"z", b"third").unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(b"q"), Some(&b"second"[..]));
        cache.assert_consistent();
    }

    #[test]
    fn test_store_duplicate_keys_replace() {
        let (mut cache, _) = cache_with(
            CacheConfig::default().with_duplicate_keys(DuplicateKeyPolicy::Replace),
        );

        cache.put(b"q", b"first").unwrap();
        cache.put(b"q", b"second").unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.current_size(), entry_footprint(1, 6));
        assert_eq!(cache.get(b"q"), Some(&b"second"[..]));
        cache.assert_consistent();
    }

    #[test]
    fn test_store_remove() {
        let mut cache = small_cache(10);
        cache.put(b"a", b"1").unwrap();

        assert_eq!(cache.remove(b"a"), 1);
        assert_eq!(cache.remove(b"a"), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_purge_expired() {
        let (mut cache, clock) = cache_with(CacheConfig::default().with_ttl(Duration::from_secs(10)));

        cache.put(b"a", b"1").unwrap();
        clock.advance(Duration::from_secs(8));
        cache.put(b"b", b"2").unwrap();
        clock.advance(Duration::from_secs(3));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(b"b"));
        assert_eq!(cache.purge_expired(), 0);
    }

    #[test]
    fn test_store_contains_does_not_promote() {
        let mut cache = small_cache(2);

        cache.put(b"A", b"a").unwrap();
        cache.put(b"B", b"b").unwrap();
        assert!(cache.contains(b"A"));
        cache.put(b"C", b"c").unwrap();

        assert!(!cache.contains(b"A"));
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_store_keys_in_recency_order() {
        let mut cache = small_cache(10);

        cache.put(b"a", b"1").unwrap();
        cache.put(b"b", b"2").unwrap();
        cache.put(b"c", b"3").unwrap();
        cache.get(b"a").unwrap();

        let keys: Vec<&[u8]> = cache.keys().collect();
        assert_eq!(keys, vec![&b"a"[..], &b"c"[..], &b"b"[..]]);
    }

    #[test]
    fn test_store_stats() {
        let mut cache = small_cache(10);

        cache.put(b"a", b"1").unwrap();
        cache.get(b"a").unwrap(); // hit
        let _ = cache.get(b"missing"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.current_size, entry_footprint(1, 1));
    }

    #[test]
    fn test_store_binary_keys() {
        let mut cache = small_cache(10);
        let query = [0xff, 0x00, b'x', 0xfe];

        cache.put(&query, &[0, 0, 0]).unwrap();

        assert_eq!(cache.get(&query), Some(&[0u8, 0, 0][..]));
        assert_eq!(cache.invalidate(&[0x00, b'x']), 1);
    }

    #[test]
    fn test_store_expiry_queue_stays_bounded() {
        let mut cache = small_cache(1);

        for i in 0..1000 {
            cache.put(format!("SELECT {}", i).as_bytes(), b"r").unwrap();
        }

        assert_eq!(cache.len(), 1);
        assert!(cache.expiry.len() <= 2 + EXPIRY_QUEUE_SLACK + 1);
        cache.assert_consistent();
    }
}
