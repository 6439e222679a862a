use std::{future::Future, time::Duration};

use async_trait::async_trait;
use enrichment_models::{City, GenreRecord, Venue};

use crate::{
    error::{StoreError, StoreResult},
    store::DocumentStore,
};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounds every call on the wrapped store by a fixed wall-clock timeout.
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self { Self { inner, timeout } }

    async fn bounded<T>(
        &self, call: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for TimeoutStore<S> {
    async fn find_city(&self, name: &str, country: &str) -> StoreResult<City> {
        self.bounded(self.inner.find_city(name, country)).await
    }

    async fn find_cities(
        &self, name: &str, country: Option<&str>,
    ) -> StoreResult<Vec<City>> {
        self.bounded(self.inner.find_cities(name, country)).await
    }

    async fn insert_city(&self, city: &City) -> StoreResult<()> {
        self.bounded(self.inner.insert_city(city)).await
    }

    async fn find_venue(
        &self, name: &str, locality: &str, country: Option<&str>,
    ) -> StoreResult<Venue> {
        self.bounded(self.inner.find_venue(name, locality, country))
            .await
    }

    async fn insert_venue(&self, venue: &Venue) -> StoreResult<()> {
        self.bounded(self.inner.insert_venue(venue)).await
    }

    async fn find_genre_record(
        &self, artist_key: &str,
    ) -> StoreResult<GenreRecord> {
        self.bounded(self.inner.find_genre_record(artist_key)).await
    }

    async fn insert_genre_record(
        &self, record: &GenreRecord,
    ) -> StoreResult<()> {
        self.bounded(self.inner.insert_genre_record(record)).await
    }
}
