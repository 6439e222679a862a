use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{config::SpotifyConfig, error::AuthorityError};

/// Client-credentials token as issued by the token endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Reported lifetime in seconds.
    pub expires_in: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArtistItem {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ArtistSearchResponse {
    artists: ArtistPage,
}

#[derive(Debug, Deserialize)]
struct ArtistPage {
    #[serde(default)]
    items: Vec<ArtistItem>,
}

#[async_trait]
pub trait MusicService: Send + Sync {
    async fn request_token(&self) -> Result<AccessToken, AuthorityError>;

    /// Artist search. `bearer` is a token obtained from
    /// [`MusicService::request_token`].
    async fn search_artists(
        &self, bearer: &str, artist: &str,
    ) -> Result<Vec<ArtistItem>, AuthorityError>;
}

#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Result<Self, AuthorityError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn token_request(&self) -> Result<RequestBuilder, AuthorityError> {
        if self.config.client_id.is_empty()
            || self.config.client_secret.is_empty()
        {
            return Err(AuthorityError::MissingCredentials(
                "client id and client secret must be set",
            ));
        }
        Ok(self.http.post(&self.config.token_url).form(&[
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ]))
    }

    fn search_request(&self, bearer: &str, artist: &str) -> RequestBuilder {
        let query = artist.to_lowercase();
        self.http
            .get(format!("{}/search", self.config.api_url))
            .query(&[("q", query.as_str()), ("type", "artist")])
            .bearer_auth(bearer)
    }
}

async fn decode<T: DeserializeOwned>(
    response: Response,
) -> Result<T, AuthorityError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthorityError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl MusicService for SpotifyClient {
    #[instrument(skip(self))]
    async fn request_token(&self) -> Result<AccessToken, AuthorityError> {
        let response = self.token_request()?.send().await?;
        let token: AccessToken = decode(response).await?;
        debug!("Obtained access token valid for {}s", token.expires_in);
        Ok(token)
    }

    #[instrument(skip(self, bearer))]
    async fn search_artists(
        &self, bearer: &str, artist: &str,
    ) -> Result<Vec<ArtistItem>, AuthorityError> {
        let response = self.search_request(bearer, artist).send().await?;
        let found: ArtistSearchResponse = decode(response).await?;
        Ok(found.artists.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str, secret: &str) -> SpotifyClient {
        SpotifyClient::new(SpotifyConfig {
            api_url: "http://music.test/v1".into(),
            ..SpotifyConfig::new(id, secret)
        })
        .unwrap()
    }

    #[test]
    fn test_token_request_requires_credentials() {
        let result = client("", "secret").token_request();
        assert!(matches!(result, Err(AuthorityError::MissingCredentials(_))));
    }

    #[test]
    fn test_search_request_lowercases_artist_and_sets_bearer() {
        let request = client("id", "secret")
            .search_request("token-123", "Acid Mammoth")
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://music.test/v1/search?q=acid+mammoth&type=artist"
        );
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer token-123"
        );
    }

    #[test]
    fn test_artist_search_response_decodes_nested_items() {
        let body = r#"{
            "artists": {
                "href": "https://api.spotify.com/v1/search?q=dopelord",
                "limit": 20,
                "total": 2,
                "items": [
                    {"name": "Dopelord", "genres": ["doom metal", "stoner metal"], "popularity": 40},
                    {"name": "Dopelord Tribute", "genres": []}
                ]
            }
        }"#;
        let parsed: ArtistSearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.artists.items.len(), 2);
        assert_eq!(parsed.artists.items[0].genres.len(), 2);
    }
}
