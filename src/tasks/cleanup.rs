//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Lazy expiry on read keeps the cache correct on its own; the sweeper only
//! bounds the memory held by cold entries nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Cache, EstimateSize};

/// Spawns a background task that periodically cleans up expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Each sweep is one short critical section on the store.
///
/// # Arguments
/// * `cache` - Shared cache handle to sweep
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
pub fn spawn_cleanup_task<V>(cache: Cache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + EstimateSize + Send + 'static,
{
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
