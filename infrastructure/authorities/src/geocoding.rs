use async_trait::async_trait;
use enrichment_models::GeoPoint;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{config::NominatimConfig, error::AuthorityError};

/// One search candidate as returned by a `format=jsonv2` geocoding query.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub importance: Option<f64>,
    #[serde(default, rename = "addresstype")]
    pub address_type: String,
    /// Subtype within the category, e.g. `music_venue` for an amenity.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub address: Option<PlaceAddress>,
}

/// Structured address, only present with `addressdetails=1`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,
}

impl Place {
    pub fn importance(&self) -> f64 { self.importance.unwrap_or_default() }

    /// Last comma-separated token of the display name, which the geocoder
    /// fills with the country.
    pub fn country_suffix(&self) -> &str {
        self.display_name.rsplit(',').next().unwrap_or_default().trim()
    }

    /// Coordinates as a point. The authority sends them as strings.
    pub fn point(&self) -> Result<GeoPoint, AuthorityError> {
        let lon = parse_coordinate("lon", &self.lon)?;
        let lat = parse_coordinate("lat", &self.lat)?;
        Ok(GeoPoint::new(lon, lat))
    }
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64, AuthorityError> {
    raw.trim().parse::<f64>().map_err(|e| {
        AuthorityError::Decode(format!("invalid {field} {raw:?}: {e}"))
    })
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Ranked locality candidates for `city`, optionally within `country`.
    async fn search_city(
        &self, city: &str, country: &str,
    ) -> Result<Vec<Place>, AuthorityError>;

    /// Ranked amenity candidates named `location` within `city`, with
    /// structured addresses.
    async fn search_venue(
        &self, location: &str, city: &str, country: &str,
    ) -> Result<Vec<Place>, AuthorityError>;
}

#[derive(Clone)]
pub struct NominatimGeocoder {
    http: Client,
    config: NominatimConfig,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, AuthorityError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    fn city_request(&self, city: &str, country: &str) -> RequestBuilder {
        let mut params = vec![("city", city), ("format", "jsonv2")];
        if !country.is_empty() {
            params.push(("country", country));
        }
        self.search(&params)
    }

    fn venue_request(
        &self, location: &str, city: &str, country: &str,
    ) -> RequestBuilder {
        let mut params = vec![
            ("amenity", location),
            ("city", city),
            ("addressdetails", "1"),
            ("format", "jsonv2"),
        ];
        if !country.is_empty() {
            params.push(("country", country));
        }
        self.search(&params)
    }

    fn search(&self, params: &[(&str, &str)]) -> RequestBuilder {
        self.http
            .get(&self.config.search_url)
            .query(params)
            .header("accept-language", &self.config.accept_language)
    }
}

async fn decode_places(response: Response) -> Result<Vec<Place>, AuthorityError> {
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
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn search_city(
        &self, city: &str, country: &str,
    ) -> Result<Vec<Place>, AuthorityError> {
        let response = self.city_request(city, country).send().await?;
        let places = decode_places(response).await?;
        debug!("Geocoder returned {} city candidates", places.len());
        Ok(places)
    }

    #[instrument(skip(self))]
    async fn search_venue(
        &self, location: &str, city: &str, country: &str,
    ) -> Result<Vec<Place>, AuthorityError> {
        let response =
            self.venue_request(location, city, country).send().await?;
        let places = decode_places(response).await?;
        debug!("Geocoder returned {} venue candidates", places.len());
        Ok(places)
    }
}
