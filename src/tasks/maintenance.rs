//! Maintenance Task
//!
//! Background task that periodically sweeps expired cache entries and
//! evicts model instances that have sat idle past the configured threshold.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;
use crate::resource::ResourceManager;

/// Spawns the periodic maintenance task.
///
/// Each tick acquires a write lock on the cache just long enough to sweep
/// expired entries, then asks the resource manager to evict idle instances.
/// Active holders are never touched by either step.
///
/// # Arguments
/// * `cache` - Shared response cache
/// * `resources` - Shared resource manager
/// * `interval_secs` - Seconds between maintenance runs
/// * `idle_threshold` - Minimum idle time before a loaded resource is evicted
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_maintenance_task<T: Send + Sync + 'static>(
    cache: Arc<RwLock<ResponseCache>>,
    resources: ResourceManager<T>,
    interval_secs: u64,
    idle_threshold: Duration,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            interval_secs,
            idle_threshold_secs = idle_threshold.as_secs(),
            "starting maintenance task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let expired = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            let evicted = resources.evict_idle(idle_threshold);

            if expired > 0 || evicted > 0 {
                info!(expired, evicted, "maintenance sweep");
            } else {
                debug!("maintenance sweep found nothing to do");
            }
        }
    })
}
