use std::fmt;

use enrichment_errors::{ResolveError, ResolveResult};
use enrichment_models::Event;
use futures::{StreamExt, stream};
use tracing::{debug, info, instrument, warn};

use crate::{
    genres::ArtistGenreResolver, locality::LocalityResolver,
    venue::VenueResolver,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentStage {
    Geolocation,
    Genres,
}

impl fmt::Display for EnrichmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geolocation => write!(f, "geolocation"),
            Self::Genres => write!(f, "genres"),
        }
    }
}

/// One failed enrichment step. `index` is the position of the event in the
/// submitted batch.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentFailure {
    pub index: usize,
    pub title: String,
    pub stage: EnrichmentStage,
    pub error: ResolveError,
}

#[derive(Debug, Default)]
pub struct EnrichmentReport {
    /// Enriched events in submission order. Events without a resolvable
    /// location are left out.
    pub events: Vec<Event>,
    pub failures: Vec<EnrichmentFailure>,
}

struct Outcome {
    title: String,
    event: Option<Event>,
    failures: Vec<(EnrichmentStage, ResolveError)>,
}

/// Fills in the location and genres of submitted events.
#[derive(Clone)]
pub struct EventEnricher {
    localities: LocalityResolver,
    venues: VenueResolver,
    genres: ArtistGenreResolver,
    concurrency: usize,
}

impl EventEnricher {
    pub fn new(
        localities: LocalityResolver, venues: VenueResolver,
        genres: ArtistGenreResolver, concurrency: usize,
    ) -> Self {
        Self {
            localities,
            venues,
            genres,
            concurrency: concurrency.max(1),
        }
    }

    pub fn localities(&self) -> &LocalityResolver { &self.localities }

    /// Enriches every event, a bounded number at a time. A failure is
    /// reported for its event only and never stops the batch.
    #[instrument(skip_all, fields(events = events.len()))]
    pub async fn enrich_batch(&self, events: Vec<Event>) -> EnrichmentReport {
        let outcomes: Vec<Outcome> = stream::iter(events)
            .map(|event| self.enrich(event))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut report = EnrichmentReport::default();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            report.failures.extend(outcome.failures.into_iter().map(
                |(stage, error)| EnrichmentFailure {
                    index,
                    title: outcome.title.clone(),
                    stage,
                    error,
                },
            ));
            report.events.extend(outcome.event);
        }

        info!(
            "Enriched {} events with {} failures",
            report.events.len(),
            report.failures.len()
        );
        report
    }

    async fn enrich(&self, mut event: Event) -> Outcome {
        let title = event.title.clone();
        let mut failures = Vec::new();

        if let Err(err) = self.geolocate(&mut event).await {
            warn!("Dropping event {title:?}: {err}");
            failures.push((EnrichmentStage::Geolocation, err));
            return Outcome {
                title,
                event: None,
                failures,
            };
        }

        if event.genres.is_empty() {
            match self.genres.resolve_genres(&event).await {
                Ok(genres) => event.genres = genres,
                Err(err) => failures.push((EnrichmentStage::Genres, err)),
            }
        }

        Outcome {
            title,
            event: Some(event),
            failures,
        }
    }

    /// Venue first, then the city as a coarser fallback.
    async fn geolocate(&self, event: &mut Event) -> ResolveResult<()> {
        if event.geolocation.is_some() {
            return Ok(());
        }

        if !event.location.trim().is_empty() {
            match self
                .venues
                .resolve_venue(&event.location, &event.city, &event.country)
                .await
            {
                Ok(address) => {
                    event.geolocation = Some(address.geolocation);
                    event.address = Some(address);
                    return Ok(());
                }
                Err(err) => {
                    debug!("Venue unknown, falling back to city: {err}")
                }
            }
        }

        let point = self
            .localities
            .resolve_city(&event.city, &event.country)
            .await?;
        event.geolocation = Some(point);
        Ok(())
    }
}
