pub mod config;
mod ttl_cache;

pub use config::CacheConfig;
pub use ttl_cache::{SweepHandle, TtlCache};
