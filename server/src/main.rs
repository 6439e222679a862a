mod config;

use std::{net::SocketAddr, sync::Arc};

use authority_clients::{MusicService, NominatimGeocoder, SpotifyClient};
use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use clap::Parser;
use document_store::{DocumentStore, MemoryStore, PgStore, TimeoutStore};
use enrichment_http::{EnrichmentHandlers, EnrichmentServices};
use enrichment_resolvers::{
    ArtistGenreResolver, EventEnricher, LocalityResolver, NegativeCache,
    VenueResolver,
};
use genre_extractor::Vocabulary;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    let store: Arc<dyn DocumentStore> = match config.postgres() {
        Some(db_config) => {
            let pg = PgStore::connect(&db_config).await?;
            pg.migrate().await?;
            info!("PostgreSQL document store ready");
            Arc::new(TimeoutStore::new(pg, config.store_timeout()))
        }
        None => {
            warn!(
                "DATABASE_URL not set, resolved data will not survive a \
                 restart"
            );
            Arc::new(TimeoutStore::new(
                MemoryStore::new(),
                config.store_timeout(),
            ))
        }
    };

    let vocabulary = match Vocabulary::load(&config.genre_vocabulary_path) {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            warn!(
                "Failed to load genre vocabulary from {}: {e}. Genres will \
                 not be extracted from event texts.",
                config.genre_vocabulary_path.display()
            );
            Vocabulary::default()
        }
    };

    let geocoder = Arc::new(NominatimGeocoder::new(config.nominatim())?);
    let music: Option<Arc<dyn MusicService>> = if config.lookup_spotify_genre {
        let client: Arc<dyn MusicService> =
            Arc::new(SpotifyClient::new(config.spotify())?);
        Some(client)
    }
    else {
        None
    };

    let resolver_config = config.resolver();
    let negative = NegativeCache::new(resolver_config.negative_cache.clone());
    let genres = ArtistGenreResolver::new(
        &resolver_config,
        Arc::new(vocabulary),
        store.clone(),
        music,
        negative.clone(),
    );

    // Dropping the handles stops the sweepers.
    let _negative_sweeper = negative.spawn_sweeper();
    let _genre_sweeper = genres.spawn_sweeper();
    info!("Cache sweepers started");

    let enricher = EventEnricher::new(
        LocalityResolver::new(store.clone(), geocoder.clone(), negative.clone()),
        VenueResolver::new(store, geocoder, negative),
        genres,
        resolver_config.enrichment_concurrency,
    );

    let api_routes = Router::new()
        .nest("/api", EnrichmentHandlers::routes())
        .with_state(EnrichmentServices::new(enricher));

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Event enricher listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        enrichment_http::enrich_events,
        enrichment_http::city_candidates,
    ),
    components(
        schemas(
            enrichment_models::Event,
            enrichment_models::Address,
            enrichment_models::GeoPoint,
            enrichment_http::EnrichmentResponse,
            enrichment_http::EnrichmentFailureResponse,
            enrichment_http::CityCandidatesResponse,
            common_errors::ApiErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "enrichment", description = "Event enrichment endpoints"),
        (name = "cities", description = "Stored locality endpoints")
    ),
    info(
        title = "Event Enricher API",
        description = "Geocoding and genre enrichment for user-submitted events",
        version = "1.0.0"
    )
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = "health"
)]
async fn health_check() -> impl IntoResponse { (StatusCode::OK, "OK") }
