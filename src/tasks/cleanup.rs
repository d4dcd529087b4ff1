//! TTL Cleanup Task
//!
//! Optional background task that periodically purges expired query results.
//! Without it, expired entries are still removed lazily by lookups and inserts.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::context::CacheContext;
use crate::error::CacheError;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task sleeps for `interval` between runs and holds the context lock
/// only while purging. It exits on its own once the context is destroyed.
///
/// # Arguments
/// * `context` - Handle to the cache to sweep
/// * `interval` - Time between purge runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let context = create_context();
/// let cleanup_handle = spawn_cleanup_task(context.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<C>(context: CacheContext<C>, interval: Duration) -> JoinHandle<()>
where
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "starting TTL cleanup task"
        );

        loop {
            tokio::time::sleep(interval).await;

            match context.purge_expired() {
                Ok(removed) if removed > 0 => {
                    info!("TTL cleanup: removed {} expired entries", removed);
                }
                Ok(_) => {
                    debug!("TTL cleanup: no expired entries found");
                }
                Err(CacheError::InvalidContext) => {
                    info!("TTL cleanup: cache context destroyed, stopping");
                    break;
                }
                Err(err) => {
                    warn!("TTL cleanup failed: {}", err);
                }
            }
        }
    })
}
