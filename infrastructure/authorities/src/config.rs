use std::time::Duration;

pub const NOMINATIM_SEARCH_URL: &str =
    "https://nominatim.openstreetmap.org/search";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Upper bound on a single authority round trip.
pub const DEFAULT_AUTHORITY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub search_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            search_url: NOMINATIM_SEARCH_URL.into(),
            user_agent: concat!(
                "event-enricher/",
                env!("CARGO_PKG_VERSION"),
                " (uses Nominatim for geocoding)"
            )
            .into(),
            accept_language: "en-US".into(),
            timeout: DEFAULT_AUTHORITY_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl SpotifyConfig {
    pub fn new(
        client_id: impl Into<String>, client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: SPOTIFY_TOKEN_URL.into(),
            api_url: SPOTIFY_API_URL.into(),
            timeout: DEFAULT_AUTHORITY_TIMEOUT,
        }
    }
}
