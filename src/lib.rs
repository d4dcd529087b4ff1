//! Query Cache - An in-process query result cache
//!
//! Stores results keyed by verbatim query text with LRU ordering, entry-count
//! and byte-size limits, lazy TTL expiration and substring-based table
//! invalidation.

pub mod cache;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod shell;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, QueryCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, DuplicateKeyPolicy};
pub use context::{create_context, destroy_context, CacheContext};
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
