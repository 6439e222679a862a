use std::{sync::Arc, time::Duration};

use document_store::{DocumentStore, MemoryStore};
use enrichment_errors::ResolveError;
use enrichment_models::{Address, GeoPoint, Venue};
use enrichment_resolvers::{LocalityResolver, NegativeCache, VenueResolver};
use memory_cache::CacheConfig;
use test_utils::{FakeGeocoder, Reply, city_place, place_address, venue_place};

fn setup_resolver() -> (VenueResolver, Arc<MemoryStore>, Arc<FakeGeocoder>) {
    let store = Arc::new(MemoryStore::new());
    let geocoder = Arc::new(FakeGeocoder::new());
    let negative = NegativeCache::new(CacheConfig::new(
        Duration::from_secs(600),
        Duration::from_secs(900),
    ));
    let resolver = VenueResolver::new(store.clone(), geocoder.clone(), negative);
    (resolver, store, geocoder)
}

#[tokio::test]
async fn test_empty_input_is_rejected_before_io() {
    let (resolver, _store, geocoder) = setup_resolver();

    let no_location = resolver.resolve_venue("", "Zürich", "").await.unwrap_err();
    let no_city = resolver.resolve_venue("Rote Fabrik", "", "").await.unwrap_err();

    assert!(matches!(no_location, ResolveError::Validation { .. }));
    assert!(matches!(no_city, ResolveError::Validation { .. }));
    assert_eq!(geocoder.venue_calls(), 0);
}

#[tokio::test]
async fn test_first_allowed_amenity_wins() {
    let (resolver, store, geocoder) = setup_resolver();
    geocoder.set_venue_reply(Reply::places(vec![
        venue_place("Rote Fabrik Parking", "parking", place_address(Some("Zürich"), "Schweiz"), 8.0, 47.0),
        venue_place("Rote Fabrik", "arts_centre", place_address(Some("Zürich"), "Schweiz"), 8.5303, 47.3436),
        venue_place("Rote Fabrik Bar", "bar", place_address(Some("Zürich"), "Schweiz"), 8.6, 47.5),
    ]));

    let address = resolver
        .resolve_venue("Rote Fabrik", "Zürich", "")
        .await
        .unwrap();

    assert_eq!(address.locality, "Zürich");
    assert_eq!(address.street, "Seestrasse");
    assert_eq!(address.geolocation, GeoPoint::new(8.5303, 47.3436));

    let stored = store.find_venue("Rote Fabrik", "Zürich", None).await.unwrap();
    assert_eq!(stored.kind, "arts_centre");
    assert_eq!(stored.name, "Rote Fabrik");

    resolver.resolve_venue("Rote Fabrik", "Zürich", "").await.unwrap();
    assert_eq!(geocoder.venue_calls(), 1);
}

#[tokio::test]
async fn test_missing_locality_falls_back_to_requested_city() {
    let (resolver, _store, geocoder) = setup_resolver();
    geocoder.set_venue_reply(Reply::places(vec![venue_place(
        "Dachstock",
        "nightclub",
        place_address(None, "Schweiz"),
        7.44,
        46.95,
    )]));

    let address = resolver
        .resolve_venue("Dachstock", "Bern", "Switzerland")
        .await
        .unwrap();

    assert_eq!(address.locality, "Bern");
    assert_eq!(address.country, "Schweiz");
}

#[tokio::test]
async fn test_no_allowed_amenity_is_negatively_cached() {
    let (resolver, store, geocoder) = setup_resolver();
    geocoder.set_venue_reply(Reply::places(vec![venue_place(
        "Kiosk",
        "vending_machine",
        place_address(Some("Basel"), "Schweiz"),
        7.58,
        47.55,
    )]));

    let first = resolver.resolve_venue("Kiosk", "Basel", "").await.unwrap_err();
    let second = resolver.resolve_venue("Kiosk", "Basel", "").await.unwrap_err();

    assert!(matches!(first, ResolveError::Unresolved { .. }));
    assert_eq!(first, second);
    assert_eq!(geocoder.venue_calls(), 1);
    assert_eq!(store.venue_count().await, 0);
}

#[tokio::test]
async fn test_seeded_store_needs_no_authority() {
    let (resolver, store, geocoder) = setup_resolver();
    let address = Address::builder()
        .locality("Zürich")
        .country("Schweiz")
        .street("Limmatstrasse")
        .house_number("118")
        .geolocation(GeoPoint::new(8.5283, 47.3856))
        .build();
    store
        .insert_venue(&Venue {
            name: "Bogen F".into(),
            kind: "bar".into(),
            address: address.clone(),
        })
        .await
        .unwrap();

    let resolved = resolver.resolve_venue("Bogen F", "Zürich", "").await.unwrap();
    let with_country = resolver
        .resolve_venue("Bogen F", "Zürich", "Schweiz")
        .await
        .unwrap();

    assert_eq!(resolved, address);
    assert_eq!(with_country, address);
    assert_eq!(geocoder.venue_calls(), 0);
}

#[tokio::test]
async fn test_venue_and_city_failures_do_not_share_keys() {
    let store = Arc::new(MemoryStore::new());
    let geocoder = Arc::new(FakeGeocoder::new().with_venue_reply(Reply::unavailable()));
    let negative = NegativeCache::new(CacheConfig::default());
    let venues = VenueResolver::new(store.clone(), geocoder.clone(), negative.clone());
    let localities = LocalityResolver::new(store, geocoder.clone(), negative);

    // "basel+schweiz" is both the venue key and the city key
    venues.resolve_venue("Basel", "Schweiz", "").await.unwrap_err();
    geocoder.set_city_reply(Reply::places(vec![city_place(
        "Basel, Basel-Stadt, Schweiz",
        "city",
        0.72,
        7.5886,
        47.5596,
    )]));

    let point = localities.resolve_city("Basel", "Schweiz").await.unwrap();
    assert_eq!(point.lon(), 7.5886);
}

#[tokio::test]
async fn test_authority_spelling_of_locality_misses_store_after_restart() {
    let (resolver, store, geocoder) = setup_resolver();
    geocoder.set_venue_reply(Reply::places(vec![venue_place(
        "Rote Fabrik",
        "arts_centre",
        place_address(Some("Zürich"), "Schweiz"),
        8.5303,
        47.3436,
    )]));

    let first = resolver.resolve_venue("Rote Fabrik", "Zurich", "").await.unwrap();
    assert_eq!(first.locality, "Zürich");

    let restarted = VenueResolver::new(
        store.clone(),
        geocoder.clone(),
        NegativeCache::new(CacheConfig::default()),
    );
    let second = restarted
        .resolve_venue("Rote Fabrik", "Zurich", "")
        .await
        .unwrap();

    assert_eq!(second, first);
    assert_eq!(geocoder.venue_calls(), 2);
    assert_eq!(store.venue_count().await, 2);
    assert!(store.find_venue("Rote Fabrik", "Zurich", None).await.is_err());
}
