use std::time::Duration;

use memory_cache::CacheConfig;

/// Tuning shared by the resolvers and the batch enricher.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Failed authority lookups, keyed per [`KeySpace`](crate::KeySpace).
    pub negative_cache: CacheConfig,
    /// Artist genre answers.
    pub genre_cache: CacheConfig,
    /// Whether unknown artists are looked up at the music authority.
    pub lookup_artist_genres: bool,
    /// Subtracted from the token lifetime the authority reports.
    pub token_expiry_margin: Duration,
    /// Events enriched at the same time by [`EventEnricher::enrich_batch`](crate::EventEnricher::enrich_batch).
    pub enrichment_concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            negative_cache: CacheConfig::default(),
            genre_cache: CacheConfig::default(),
            lookup_artist_genres: false,
            token_expiry_margin: Duration::from_secs(10),
            enrichment_concurrency: 8,
        }
    }
}
