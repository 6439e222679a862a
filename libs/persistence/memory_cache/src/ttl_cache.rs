use moka::future::Cache;
use tokio::{task::JoinHandle, time::interval};
use tracing::debug;

use crate::config::CacheConfig;

/// In-process cache whose entries expire a fixed time after insertion.
///
/// Expiry is lazy: a read of an expired key misses even if the entry has
/// not been reclaimed yet. Reclaiming happens on [`TtlCache::sweep`], which
/// the task started by [`TtlCache::spawn_sweeper`] runs on its own schedule.
/// Clones share the same storage.
#[derive(Clone)]
pub struct TtlCache<V> {
    memory: Cache<String, V>,
    config: CacheConfig,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(config: CacheConfig) -> Self {
        let memory = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.ttl)
            .build();
        Self { memory, config }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.memory.get(key).await
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.memory.insert(key.into(), value).await;
    }

    /// Approximate number of live entries, exact right after a sweep.
    pub fn entry_count(&self) -> u64 { self.memory.entry_count() }

    /// Reclaims expired entries now.
    pub async fn sweep(&self) { self.memory.run_pending_tasks().await; }

    /// Starts a background task sweeping every `sweep_interval`. The task
    /// stops when the returned handle is dropped.
    pub fn spawn_sweeper(&self, name: &'static str) -> SweepHandle {
        let cache = self.clone();
        let handle = tokio::spawn(async move {
            let mut sweep_interval = interval(cache.config.sweep_interval);
            sweep_interval.tick().await; // first tick fires immediately

            loop {
                sweep_interval.tick().await;
                cache.sweep().await;
                debug!(
                    cache = name,
                    entries = cache.entry_count(),
                    "Swept expired cache entries"
                );
            }
        });
        SweepHandle(handle)
    }
}

/// Aborts the sweeper task on drop.
pub struct SweepHandle(JoinHandle<()>);

impl Drop for SweepHandle {
    fn drop(&mut self) { self.0.abort(); }
}
