use async_trait::async_trait;
use deadpool_postgres::Pool;
use enrichment_models::{Address, City, GenreRecord, GeoPoint, Venue};
use tokio_postgres::{Row, types::Json};
use tracing::instrument;

use crate::{
    config::{PostgresDbConfig, connect_postgres_db},
    error::{StoreError, StoreResult},
    store::DocumentStore,
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cities (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    country TEXT NOT NULL,
    geolocation JSONB NOT NULL
);
CREATE INDEX IF NOT EXISTS cities_name_country_idx ON cities (name, country);

CREATE TABLE IF NOT EXISTS venues (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    address JSONB NOT NULL
);
CREATE INDEX IF NOT EXISTS venues_name_locality_idx
    ON venues (name, (address->>'locality'));

CREATE TABLE IF NOT EXISTS genre_records (
    title TEXT PRIMARY KEY,
    genres JSONB NOT NULL
);
";

/// Postgres-backed document store. Nested documents (geolocation, address,
/// genre lists) are kept as JSONB.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    pub async fn connect(config: &PostgresDbConfig) -> StoreResult<Self> {
        Ok(Self::new(connect_postgres_db(config).await?))
    }

    /// Creates the collections if they do not exist yet.
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> StoreResult<()> {
        let client = self.pool.get().await?;
        client.batch_execute(SCHEMA).await?;
        Ok(())
    }

    fn map_city(row: &Row) -> StoreResult<City> {
        let geolocation: Json<GeoPoint> = row.try_get(2)?;
        Ok(City {
            name: row.try_get(0)?,
            country: row.try_get(1)?,
            geolocation: geolocation.0,
        })
    }

    fn map_venue(row: &Row) -> StoreResult<Venue> {
        let address: Json<Address> = row.try_get(2)?;
        Ok(Venue {
            name: row.try_get(0)?,
            kind: row.try_get(1)?,
            address: address.0,
        })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    #[instrument(skip(self))]
    async fn find_city(&self, name: &str, country: &str) -> StoreResult<City> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "SELECT name, country, geolocation FROM cities WHERE name = \
                 $1 AND country = $2 ORDER BY id LIMIT 1",
            )
            .await?;
        let row = client
            .query_opt(&stmt, &[&name, &country])
            .await?
            .ok_or(StoreError::NotFound)?;

        Self::map_city(&row)
    }

    #[instrument(skip(self))]
    async fn find_cities(
        &self, name: &str, country: Option<&str>,
    ) -> StoreResult<Vec<City>> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "SELECT name, country, geolocation FROM cities WHERE name = \
                 $1 AND ($2::TEXT IS NULL OR country = $2) ORDER BY id",
            )
            .await?;
        let rows = client.query(&stmt, &[&name, &country]).await?;

        rows.iter().map(Self::map_city).collect()
    }

    #[instrument(skip_all, fields(name = %city.name))]
    async fn insert_city(&self, city: &City) -> StoreResult<()> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "INSERT INTO cities (name, country, geolocation) VALUES ($1, \
                 $2, $3)",
            )
            .await?;
        client
            .execute(
                &stmt,
                &[&city.name, &city.country, &Json(&city.geolocation)],
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_venue(
        &self, name: &str, locality: &str, country: Option<&str>,
    ) -> StoreResult<Venue> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "SELECT name, type, address FROM venues WHERE name = $1 AND \
                 address->>'locality' = $2 AND ($3::TEXT IS NULL OR \
                 address->>'country' = $3) ORDER BY id LIMIT 1",
            )
            .await?;
        let row = client
            .query_opt(&stmt, &[&name, &locality, &country])
            .await?
            .ok_or(StoreError::NotFound)?;

        Self::map_venue(&row)
    }

    #[instrument(skip_all, fields(name = %venue.name))]
    async fn insert_venue(&self, venue: &Venue) -> StoreResult<()> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "INSERT INTO venues (name, type, address) VALUES ($1, $2, $3)",
            )
            .await?;
        client
            .execute(&stmt, &[&venue.name, &venue.kind, &Json(&venue.address)])
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_genre_record(
        &self, artist_key: &str,
    ) -> StoreResult<GenreRecord> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "SELECT title, genres FROM genre_records WHERE title = $1",
            )
            .await?;
        let row = client
            .query_opt(&stmt, &[&artist_key])
            .await?
            .ok_or(StoreError::NotFound)?;

        let genres: Json<_> = row.try_get(1)?;
        Ok(GenreRecord {
            artist_key: row.try_get(0)?,
            genres: genres.0,
        })
    }

    #[instrument(skip_all, fields(artist = %record.artist_key))]
    async fn insert_genre_record(
        &self, record: &GenreRecord,
    ) -> StoreResult<()> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "INSERT INTO genre_records (title, genres) VALUES ($1, $2) ON \
                 CONFLICT (title) DO NOTHING",
            )
            .await?;
        client
            .execute(&stmt, &[&record.artist_key, &Json(&record.genres)])
            .await?;
        Ok(())
    }
}
