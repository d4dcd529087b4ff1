//! Background Tasks Module
//!
//! Contains background tasks that may run alongside the cache.
//!
//! # Tasks
//! - TTL Cleanup: Purges expired cache entries at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
