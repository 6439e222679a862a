use async_trait::async_trait;
use enrichment_models::{City, GenreRecord, Venue};

use crate::error::StoreResult;

/// Collections: `cities`, `venues` and `genre_records`.
///
/// `find_*` methods returning a single document yield
/// [`StoreError::NotFound`](crate::StoreError::NotFound) on a miss. Inserts
/// are insert-style and safe to repeat.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Exact match on lowercased `name` and `country`.
    async fn find_city(&self, name: &str, country: &str) -> StoreResult<City>;

    /// Every stored city called `name`, restricted to `country` if given.
    async fn find_cities(
        &self, name: &str, country: Option<&str>,
    ) -> StoreResult<Vec<City>>;

    async fn insert_city(&self, city: &City) -> StoreResult<()>;

    /// Match on venue `name` and `address.locality`, plus
    /// `address.country` if given.
    async fn find_venue(
        &self, name: &str, locality: &str, country: Option<&str>,
    ) -> StoreResult<Venue>;

    async fn insert_venue(&self, venue: &Venue) -> StoreResult<()>;

    async fn find_genre_record(
        &self, artist_key: &str,
    ) -> StoreResult<GenreRecord>;

    /// Keeps the existing record if one is already stored for the artist.
    async fn insert_genre_record(
        &self, record: &GenreRecord,
    ) -> StoreResult<()>;
}
