use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub capacity: u64,
    /// Entries read as absent once this much time has passed since insert.
    pub ttl: Duration,
    /// How often the background sweeper reclaims expired entries.
    pub sweep_interval: Duration,
}

impl CacheConfig {
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            capacity: default_capacity(),
            ttl,
            sweep_interval,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(default_ttl(), default_sweep_interval())
    }
}

fn default_capacity() -> u64 { 100_000 }
fn default_ttl() -> Duration { Duration::from_secs(600) }
fn default_sweep_interval() -> Duration { Duration::from_secs(900) }
