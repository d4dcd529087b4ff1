//! Cache Module
//!
//! Provides the in-memory query result cache with LRU eviction, size limits
//! and TTL expiration.

mod entry;
pub mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{entry_footprint, CacheEntry, ENTRY_OVERHEAD};
pub use lru::{Handle, LruList};
pub use stats::CacheStats;
pub use store::QueryCache;
