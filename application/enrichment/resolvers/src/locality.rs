use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use authority_clients::{Geocoder, Place};
use document_store::{DocumentStore, StoreError};
use enrichment_errors::{Authority, ResolveError, ResolveResult};
use enrichment_models::{City, GeoPoint};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    keys::city_key,
    negative::{KeySpace, NegativeCache},
};

/// Only the best ranked candidates take part in disambiguation.
const MAX_CITY_CANDIDATES: usize = 2;
const MIN_IMPORTANCE: f64 = 0.4;
const LOCALITY_TYPES: [&str; 4] = ["city", "town", "village", "county"];

#[derive(Clone)]
pub struct LocalityResolver {
    store: Arc<dyn DocumentStore>,
    geocoder: Arc<dyn Geocoder>,
    negative: NegativeCache,
    cities: Arc<RwLock<HashMap<String, GeoPoint>>>,
}

impl LocalityResolver {
    pub fn new(
        store: Arc<dyn DocumentStore>, geocoder: Arc<dyn Geocoder>,
        negative: NegativeCache,
    ) -> Self {
        Self {
            store,
            geocoder,
            negative,
            cities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Coordinates of `city`, optionally restricted to `country`.
    #[instrument(skip(self))]
    pub async fn resolve_city(
        &self, city: &str, country: &str,
    ) -> ResolveResult<GeoPoint> {
        if city.trim().is_empty() {
            return Err(ResolveError::validation(
                "city must be provided for locality lookup",
            ));
        }
        let city = city.to_lowercase();
        let country = country.to_lowercase();
        let key = city_key(&city, &country);

        if let Some(point) = self.cities.read().await.get(&key).copied() {
            debug!("Memory cache hit for city {key}");
            return Ok(point);
        }

        match self.store.find_city(&city, &country).await {
            Ok(stored) => {
                debug!("Store hit for city {key}");
                self.remember(key, stored.geolocation).await;
                return Ok(stored.geolocation);
            }
            Err(StoreError::NotFound) => debug!("Store miss for city {key}"),
            Err(e) => warn!("City lookup in store failed, treating as miss: {e}"),
        }

        if let Some(err) = self.negative.get(KeySpace::City, &key).await {
            debug!("Negative cache hit for city {key}");
            return Err(err);
        }

        match self.query_authority(&city, &country).await {
            Ok(point) => {
                self.remember(key, point).await;
                let resolved = City {
                    name: city,
                    country,
                    geolocation: point,
                };
                if let Err(e) = self.store.insert_city(&resolved).await {
                    warn!("Failed to persist city {}: {e}", resolved.name);
                }
                Ok(point)
            }
            Err(err) => {
                warn!("City lookup for {key} failed: {err}");
                self.negative.insert(KeySpace::City, &key, err.clone()).await;
                Err(err)
            }
        }
    }

    /// Every stored city with this name, within `country` if it is not
    /// empty. Reads the store directly; no cache is consulted or filled.
    #[instrument(skip(self))]
    pub async fn resolve_all_city_candidates(
        &self, city: &str, country: &str,
    ) -> ResolveResult<Vec<GeoPoint>> {
        let city = city.to_lowercase();
        let country = country.to_lowercase();
        let country = (!country.is_empty()).then_some(country.as_str());

        let cities = self
            .store
            .find_cities(&city, country)
            .await
            .map_err(ResolveError::storage)?;
        Ok(cities.into_iter().map(|c| c.geolocation).collect())
    }

    async fn remember(&self, key: String, point: GeoPoint) {
        self.cities.write().await.insert(key, point);
    }

    async fn query_authority(
        &self, city: &str, country: &str,
    ) -> ResolveResult<GeoPoint> {
        info!("Querying geocoder for city {city:?} in {country:?}");
        let places = self
            .geocoder
            .search_city(city, country)
            .await
            .map_err(|e| e.into_resolve_error(Authority::Geocoder))?;

        let query = if country.is_empty() {
            city.to_string()
        }
        else {
            format!("{city}, {country}")
        };
        select_locality(&query, &places)
    }
}

/// Picks the coordinates of a locality from ranked geocoder candidates.
///
/// Of the top two candidates only localities count. A locality is accepted
/// when its importance exceeds the threshold or when the geocoder returned
/// nothing else. Accepted candidates from more than one country are an
/// ambiguity, not a guess.
fn select_locality(query: &str, places: &[Place]) -> ResolveResult<GeoPoint> {
    let sole_answer = places.len().min(MAX_CITY_CANDIDATES) == 1;
    let accepted: Vec<&Place> = places
        .iter()
        .take(MAX_CITY_CANDIDATES)
        .filter(|p| LOCALITY_TYPES.contains(&p.address_type.as_str()))
        .filter(|p| p.importance() > MIN_IMPORTANCE || sole_answer)
        .collect();

    let Some(first) = accepted.first()
    else {
        return Err(ResolveError::unresolved(query));
    };

    let countries: BTreeSet<&str> =
        accepted.iter().map(|p| p.country_suffix()).collect();
    if countries.len() > 1 {
        return Err(ResolveError::Ambiguous {
            query: query.to_string(),
            candidates: countries.into_iter().map(str::to_string).collect(),
        });
    }

    first
        .point()
        .map_err(|e| e.into_resolve_error(Authority::Geocoder))
}
