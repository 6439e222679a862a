use enrichment_errors::ResolveError;
use memory_cache::{CacheConfig, SweepHandle, TtlCache};

/// Namespace of a negative cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySpace {
    City,
    Venue,
    Artist,
}

impl KeySpace {
    fn prefix(self) -> &'static str {
        match self {
            Self::City => "city:",
            Self::Venue => "venue:",
            Self::Artist => "artist:",
        }
    }
}

/// Errors of failed authority calls, shared by all resolvers. An entry
/// suppresses the next call for its key until it expires, so every key
/// gets at most one authority attempt per TTL window.
#[derive(Clone)]
pub struct NegativeCache {
    errors: TtlCache<ResolveError>,
}

impl NegativeCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            errors: TtlCache::new(config),
        }
    }

    pub async fn get(&self, space: KeySpace, key: &str) -> Option<ResolveError> {
        self.errors.get(&Self::scoped(space, key)).await
    }

    pub async fn insert(&self, space: KeySpace, key: &str, error: ResolveError) {
        self.errors.insert(Self::scoped(space, key), error).await;
    }

    pub fn spawn_sweeper(&self) -> SweepHandle {
        self.errors.spawn_sweeper("negative")
    }

    fn scoped(space: KeySpace, key: &str) -> String {
        format!("{}{key}", space.prefix())
    }
}
