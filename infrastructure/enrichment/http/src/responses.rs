use common_errors::AppError;
use enrichment_models::{Event, GeoPoint};
use enrichment_resolvers::{EnrichmentFailure, EnrichmentReport};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrichmentResponse {
    pub events: Vec<Event>,
    pub failures: Vec<EnrichmentFailureResponse>,
}

/// One enrichment step that failed for the event at `index` of the
/// request body.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrichmentFailureResponse {
    pub index: usize,
    pub title: String,
    /// `geolocation` drops the event, `genres` keeps it without genres.
    pub stage: String,
    pub code: String,
    pub message: String,
}

impl From<EnrichmentFailure> for EnrichmentFailureResponse {
    fn from(failure: EnrichmentFailure) -> Self {
        let message = failure.error.to_string();
        let code = AppError::from(failure.error).code().to_string();
        Self {
            index: failure.index,
            title: failure.title,
            stage: failure.stage.to_string(),
            code,
            message,
        }
    }
}

impl From<EnrichmentReport> for EnrichmentResponse {
    fn from(report: EnrichmentReport) -> Self {
        Self {
            events: report.events,
            failures: report.failures.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CandidatesParams {
    /// Restricts the candidates to one country.
    pub country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CityCandidatesResponse {
    pub city: String,
    pub country: Option<String>,
    pub candidates: Vec<GeoPoint>,
}
