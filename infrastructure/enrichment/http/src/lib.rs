mod responses;

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
};
use common_errors::AppError;
use enrichment_models::Event;
use enrichment_resolvers::EventEnricher;
use tracing::instrument;

pub use crate::responses::{
    CandidatesParams, CityCandidatesResponse, EnrichmentFailureResponse,
    EnrichmentResponse,
};

#[derive(Clone)]
pub struct EnrichmentServices {
    pub enricher: EventEnricher,
}

impl EnrichmentServices {
    pub fn new(enricher: EventEnricher) -> Self { Self { enricher } }
}

pub struct EnrichmentHandlers;

impl EnrichmentHandlers {
    pub fn routes() -> Router<EnrichmentServices> {
        Router::new()
            .route("/events/enrich", post(enrich_events))
            .route("/cities/{name}/candidates", get(city_candidates))
    }
}

#[utoipa::path(
    post,
    path = "/api/events/enrich",
    request_body = Vec<Event>,
    responses(
        (status = 200, description = "Enriched events and per-event failures", body = EnrichmentResponse),
        (status = 400, description = "Invalid request data", body = common_errors::ApiErrorResponse),
        (status = 422, description = "Malformed event", body = common_errors::ApiErrorResponse)
    ),
    tag = "enrichment"
)]
#[instrument(skip_all)]
pub async fn enrich_events(
    State(services): State<EnrichmentServices>,
    Json(events): Json<Vec<Event>>,
) -> Result<Json<EnrichmentResponse>, AppError> {
    let report = services.enricher.enrich_batch(events).await;
    Ok(Json(report.into()))
}

#[utoipa::path(
    get,
    path = "/api/cities/{name}/candidates",
    params(
        ("name" = String, Path, description = "City name"),
        CandidatesParams
    ),
    responses(
        (status = 200, description = "Every stored location of this city", body = CityCandidatesResponse),
        (status = 500, description = "Store unavailable", body = common_errors::ApiErrorResponse)
    ),
    tag = "cities"
)]
#[instrument(skip_all)]
pub async fn city_candidates(
    State(services): State<EnrichmentServices>, Path(name): Path<String>,
    Query(params): Query<CandidatesParams>,
) -> Result<Json<CityCandidatesResponse>, AppError> {
    let country = params.country.filter(|c| !c.trim().is_empty());
    let candidates = services
        .enricher
        .localities()
        .resolve_all_city_candidates(&name, country.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(CityCandidatesResponse {
        city: name,
        country,
        candidates,
    }))
}
