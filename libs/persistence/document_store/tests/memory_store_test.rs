use std::{collections::BTreeSet, time::Duration};

use async_trait::async_trait;
use document_store::{
    DocumentStore, MemoryStore, StoreError, StoreResult, TimeoutStore,
};
use enrichment_models::{Address, City, GenreRecord, GeoPoint, Venue};

fn city(name: &str, country: &str, lon: f64, lat: f64) -> City {
    City {
        name: name.into(),
        country: country.into(),
        geolocation: GeoPoint::new(lon, lat),
    }
}

fn venue(name: &str, locality: &str, country: &str) -> Venue {
    Venue {
        name: name.into(),
        kind: "music_venue".into(),
        address: Address::builder()
            .locality(locality)
            .country(country)
            .geolocation(GeoPoint::new(8.54, 47.37))
            .build(),
    }
}

#[tokio::test]
async fn test_find_city_exact_match() {
    let store = MemoryStore::new();
    store.insert_city(&city("zurich", "ch", 8.54, 47.37)).await.unwrap();

    let found = store.find_city("zurich", "ch").await.unwrap();
    assert_eq!(found.geolocation, GeoPoint::new(8.54, 47.37));

    let missing = store.find_city("zurich", "").await;
    assert!(matches!(missing, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_find_cities_filters_by_optional_country() {
    let store = MemoryStore::new();
    store
        .insert_city(&city("springfield", "united states", -89.6, 39.8))
        .await
        .unwrap();
    store
        .insert_city(&city("springfield", "canada", -63.9, 46.2))
        .await
        .unwrap();

    let all = store.find_cities("springfield", None).await.unwrap();
    assert_eq!(all.len(), 2);

    let canadian =
        store.find_cities("springfield", Some("canada")).await.unwrap();
    assert_eq!(canadian.len(), 1);
    assert_eq!(canadian[0].country, "canada");

    let none = store.find_cities("shelbyville", None).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_find_venue_matches_locality_and_country() {
    let store = MemoryStore::new();
    store
        .insert_venue(&venue("Rote Fabrik", "Zürich", "Switzerland"))
        .await
        .unwrap();

    assert!(store.find_venue("Rote Fabrik", "Zürich", None).await.is_ok());
    assert!(
        store
            .find_venue("Rote Fabrik", "Zürich", Some("Switzerland"))
            .await
            .is_ok()
    );
    assert!(
        store
            .find_venue("Rote Fabrik", "Zürich", Some("Germany"))
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        store
            .find_venue("Rote Fabrik", "Bern", None)
            .await
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
async fn test_genre_record_empty_set_is_stored() {
    let store = MemoryStore::new();
    assert!(
        store
            .find_genre_record("unknown band")
            .await
            .unwrap_err()
            .is_not_found()
    );

    store
        .insert_genre_record(&GenreRecord::new("Unknown Band", BTreeSet::new()))
        .await
        .unwrap();

    let record = store.find_genre_record("unknown band").await.unwrap();
    assert!(record.genres.is_empty());
}

#[tokio::test]
async fn test_genre_record_insert_keeps_first_answer() {
    let store = MemoryStore::new();
    let first = GenreRecord::new("dopelord", ["doom metal".to_string()].into());
    let second = GenreRecord::new("dopelord", BTreeSet::new());

    store.insert_genre_record(&first).await.unwrap();
    store.insert_genre_record(&second).await.unwrap();

    assert_eq!(store.genre_record_count().await, 1);
    assert_eq!(store.find_genre_record("dopelord").await.unwrap(), first);
}

struct StalledStore;

#[async_trait]
impl DocumentStore for StalledStore {
    async fn find_city(&self, _: &str, _: &str) -> StoreResult<City> {
        std::future::pending().await
    }

    async fn find_cities(
        &self, _: &str, _: Option<&str>,
    ) -> StoreResult<Vec<City>> {
        std::future::pending().await
    }

    async fn insert_city(&self, _: &City) -> StoreResult<()> {
        std::future::pending().await
    }

    async fn find_venue(
        &self, _: &str, _: &str, _: Option<&str>,
    ) -> StoreResult<Venue> {
        std::future::pending().await
    }

    async fn insert_venue(&self, _: &Venue) -> StoreResult<()> {
        std::future::pending().await
    }

    async fn find_genre_record(&self, _: &str) -> StoreResult<GenreRecord> {
        std::future::pending().await
    }

    async fn insert_genre_record(&self, _: &GenreRecord) -> StoreResult<()> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeout_store_bounds_stalled_calls() {
    let store = TimeoutStore::new(StalledStore, Duration::from_secs(10));

    let result = store.find_city("zurich", "ch").await;

    match result {
        Err(StoreError::Timeout(after)) => {
            assert_eq!(after, Duration::from_secs(10))
        }
        other => panic!("Expected Timeout error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_store_passes_results_through() {
    let store =
        TimeoutStore::new(MemoryStore::new(), Duration::from_secs(10));
    store.insert_city(&city("bern", "ch", 7.45, 46.95)).await.unwrap();

    let found = store.find_city("bern", "ch").await.unwrap();
    assert_eq!(found.name, "bern");
}
