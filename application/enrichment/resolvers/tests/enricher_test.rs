use std::{collections::BTreeSet, sync::Arc};

use authority_clients::MusicService;
use document_store::MemoryStore;
use enrichment_errors::ResolveError;
use enrichment_models::GeoPoint;
use enrichment_resolvers::{
    ArtistGenreResolver, EnrichmentStage, EventEnricher, LocalityResolver,
    NegativeCache, ResolverConfig, VenueResolver,
};
use genre_extractor::Vocabulary;
use test_utils::{
    FakeGeocoder, FakeMusicService, Reply, TEST_GENRES, city_place,
    place_address, test_event, venue_place,
};

fn setup_enricher(
    geocoder: Arc<FakeGeocoder>, music: Arc<FakeMusicService>,
) -> EventEnricher {
    let config = ResolverConfig {
        lookup_artist_genres: true,
        enrichment_concurrency: 3,
        ..Default::default()
    };
    let store = Arc::new(MemoryStore::new());
    let negative = NegativeCache::new(config.negative_cache.clone());

    let localities =
        LocalityResolver::new(store.clone(), geocoder.clone(), negative.clone());
    let venues = VenueResolver::new(store.clone(), geocoder, negative.clone());
    let genres = ArtistGenreResolver::new(
        &config,
        Arc::new(Vocabulary::new(TEST_GENRES)),
        store,
        Some(music as Arc<dyn MusicService>),
        negative,
    );
    EventEnricher::new(localities, venues, genres, config.enrichment_concurrency)
}

fn zurich() -> Reply {
    Reply::places(vec![city_place(
        "Zürich, Bezirk Zürich, Zürich, Schweiz",
        "city",
        0.77,
        8.5417,
        47.3769,
    )])
}

#[tokio::test]
async fn test_batch_reports_failures_per_event() {
    let geocoder = Arc::new(
        FakeGeocoder::new()
            .with_city_reply(zurich())
            .with_venue_reply(Reply::places(vec![venue_place(
                "Rote Fabrik",
                "arts_centre",
                place_address(Some("Zürich"), "Schweiz"),
                8.5303,
                47.3436,
            )])),
    );
    let music = Arc::new(
        FakeMusicService::new()
            .with_artist("Moby", &["electronica"])
            .failing_for("broken artist"),
    );
    let enricher = setup_enricher(geocoder.clone(), music);

    let mut at_venue = test_event("Moby", "Zürich");
    at_venue.location = "Rote Fabrik".into();
    let in_city = test_event("Broken Artist", "Zürich");
    let nowhere = test_event("Moby", "");
    let mut complete = test_event("Already Done", "Bern");
    complete.geolocation = Some(GeoPoint::new(7.44, 46.95));
    complete.genres = BTreeSet::from(["jazz".to_string()]);

    let report = enricher
        .enrich_batch(vec![at_venue, in_city, nowhere, complete.clone()])
        .await;

    let titles: Vec<&str> = report.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Moby", "Broken Artist", "Already Done"]);

    let venue_event = &report.events[0];
    assert_eq!(venue_event.geolocation, Some(GeoPoint::new(8.5303, 47.3436)));
    assert_eq!(
        venue_event.address.as_ref().map(|a| a.street.as_str()),
        Some("Seestrasse")
    );
    assert_eq!(venue_event.genres, BTreeSet::from(["electronica".to_string()]));

    let city_event = &report.events[1];
    assert_eq!(city_event.geolocation, Some(GeoPoint::new(8.5417, 47.3769)));
    assert!(city_event.address.is_none());
    assert!(city_event.genres.is_empty());

    assert_eq!(report.events[2], complete);

    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(report.failures[0].stage, EnrichmentStage::Genres);
    assert_eq!(report.failures[1].index, 2);
    assert_eq!(report.failures[1].stage, EnrichmentStage::Geolocation);
    assert!(matches!(
        report.failures[1].error,
        ResolveError::Validation { .. }
    ));
    assert_eq!(geocoder.venue_calls(), 1);
}

#[tokio::test]
async fn test_unknown_venue_falls_back_to_city() {
    let geocoder = Arc::new(
        FakeGeocoder::new()
            .with_city_reply(zurich())
            .with_venue_reply(Reply::unavailable()),
    );
    let enricher = setup_enricher(geocoder.clone(), Arc::new(FakeMusicService::new()));

    let mut event = test_event("Kokoroko", "Zürich");
    event.location = "Somewhere Secret".into();
    event.description_text = "Jazz Fusion".into();

    let report = enricher.enrich_batch(vec![event]).await;

    assert!(report.failures.is_empty());
    let enriched = &report.events[0];
    assert_eq!(enriched.geolocation, Some(GeoPoint::new(8.5417, 47.3769)));
    assert!(enriched.address.is_none());
    assert_eq!(enriched.genres, BTreeSet::from(["jazz fusion".to_string()]));
    assert_eq!(geocoder.venue_calls(), 1);
    assert_eq!(geocoder.city_calls(), 1);
}

#[tokio::test]
async fn test_empty_batch() {
    let enricher = setup_enricher(
        Arc::new(FakeGeocoder::new()),
        Arc::new(FakeMusicService::new()),
    );

    let report = enricher.enrich_batch(Vec::new()).await;

    assert!(report.events.is_empty());
    assert!(report.failures.is_empty());
}
