use std::{path::PathBuf, time::Duration};

use authority_clients::{
    NominatimConfig, SpotifyConfig,
    config::{NOMINATIM_SEARCH_URL, SPOTIFY_API_URL, SPOTIFY_TOKEN_URL},
};
use clap::Parser;
use document_store::PostgresDbConfig;
use enrichment_resolvers::ResolverConfig;
use memory_cache::CacheConfig;

/// Settings read from the environment (and `.env`), overridable on the
/// command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "event-enricher", about = "Geocoding and genre enrichment for events")]
pub struct Config {
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Without it resolved data only lives as long as the process.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "DATABASE_MAX_CONN", default_value_t = 16)]
    pub database_max_conn: usize,
    #[arg(long, env = "STORE_TIMEOUT_SECS", default_value_t = 10)]
    pub store_timeout_secs: u64,

    #[arg(long, env = "NOMINATIM_URL", default_value = NOMINATIM_SEARCH_URL)]
    pub nominatim_url: String,
    /// Nominatim's usage policy asks for an identifying agent.
    #[arg(long, env = "GEOCODER_USER_AGENT")]
    pub geocoder_user_agent: Option<String>,

    #[arg(long, env = "LOOKUP_SPOTIFY_GENRE", default_value_t = false)]
    pub lookup_spotify_genre: bool,
    #[arg(long, env = "SPOTIFY_CLIENT_ID", default_value = "")]
    pub spotify_client_id: String,
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    pub spotify_client_secret: String,
    #[arg(long, env = "SPOTIFY_TOKEN_URL", default_value = SPOTIFY_TOKEN_URL)]
    pub spotify_token_url: String,
    #[arg(long, env = "SPOTIFY_API_URL", default_value = SPOTIFY_API_URL)]
    pub spotify_api_url: String,

    #[arg(long, env = "AUTHORITY_TIMEOUT_SECS", default_value_t = 10)]
    pub authority_timeout_secs: u64,

    #[arg(long, env = "GENRE_VOCABULARY_PATH", default_value = "genre-data/genres.txt")]
    pub genre_vocabulary_path: PathBuf,

    #[arg(long, env = "NEGATIVE_CACHE_TTL_SECS", default_value_t = 600)]
    pub negative_cache_ttl_secs: u64,
    #[arg(long, env = "GENRE_CACHE_TTL_SECS", default_value_t = 600)]
    pub genre_cache_ttl_secs: u64,
    #[arg(long, env = "CACHE_SWEEP_INTERVAL_SECS", default_value_t = 900)]
    pub cache_sweep_interval_secs: u64,

    #[arg(long, env = "ENRICHMENT_CONCURRENCY", default_value_t = 8)]
    pub enrichment_concurrency: usize,
}

impl Config {
    pub fn postgres(&self) -> Option<PostgresDbConfig> {
        self.database_url.as_ref().map(|uri| PostgresDbConfig {
            uri: uri.clone(),
            max_conn: self.database_max_conn,
        })
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn nominatim(&self) -> NominatimConfig {
        let defaults = NominatimConfig::default();
        NominatimConfig {
            search_url: self.nominatim_url.clone(),
            user_agent: self
                .geocoder_user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
            timeout: Duration::from_secs(self.authority_timeout_secs),
            accept_language: defaults.accept_language,
        }
    }

    pub fn spotify(&self) -> SpotifyConfig {
        SpotifyConfig {
            token_url: self.spotify_token_url.clone(),
            api_url: self.spotify_api_url.clone(),
            timeout: Duration::from_secs(self.authority_timeout_secs),
            ..SpotifyConfig::new(
                self.spotify_client_id.clone(),
                self.spotify_client_secret.clone(),
            )
        }
    }

    pub fn resolver(&self) -> ResolverConfig {
        let sweep = Duration::from_secs(self.cache_sweep_interval_secs);
        ResolverConfig {
            negative_cache: CacheConfig::new(
                Duration::from_secs(self.negative_cache_ttl_secs),
                sweep,
            ),
            genre_cache: CacheConfig::new(
                Duration::from_secs(self.genre_cache_ttl_secs),
                sweep,
            ),
            lookup_artist_genres: self.lookup_spotify_genre,
            enrichment_concurrency: self.enrichment_concurrency,
            ..Default::default()
        }
    }
}
