use std::collections::HashMap;

use async_trait::async_trait;
use enrichment_models::{City, GenreRecord, Venue};
use tokio::sync::RwLock;

use crate::{
    error::{StoreError, StoreResult},
    store::DocumentStore,
};

/// Process-local store. Used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    cities: RwLock<Vec<City>>,
    venues: RwLock<Vec<Venue>>,
    genre_records: RwLock<HashMap<String, GenreRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub async fn city_count(&self) -> usize { self.cities.read().await.len() }

    pub async fn venue_count(&self) -> usize { self.venues.read().await.len() }

    pub async fn genre_record_count(&self) -> usize {
        self.genre_records.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_city(&self, name: &str, country: &str) -> StoreResult<City> {
        self.cities
            .read()
            .await
            .iter()
            .find(|city| city.name == name && city.country == country)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_cities(
        &self, name: &str, country: Option<&str>,
    ) -> StoreResult<Vec<City>> {
        let cities = self.cities.read().await;
        Ok(cities
            .iter()
            .filter(|city| city.name == name)
            .filter(|city| country.is_none_or(|c| city.country == c))
            .cloned()
            .collect())
    }

    async fn insert_city(&self, city: &City) -> StoreResult<()> {
        self.cities.write().await.push(city.clone());
        Ok(())
    }

    async fn find_venue(
        &self, name: &str, locality: &str, country: Option<&str>,
    ) -> StoreResult<Venue> {
        self.venues
            .read()
            .await
            .iter()
            .find(|venue| {
                venue.name == name
                    && venue.address.locality == locality
                    && country.is_none_or(|c| venue.address.country == c)
            })
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_venue(&self, venue: &Venue) -> StoreResult<()> {
        self.venues.write().await.push(venue.clone());
        Ok(())
    }

    async fn find_genre_record(
        &self, artist_key: &str,
    ) -> StoreResult<GenreRecord> {
        self.genre_records
            .read()
            .await
            .get(artist_key)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_genre_record(
        &self, record: &GenreRecord,
    ) -> StoreResult<()> {
        self.genre_records
            .write()
            .await
            .entry(record.artist_key.clone())
            .or_insert_with(|| record.clone());
        Ok(())
    }
}
