//! Three-tier resolution of event attributes: in-memory cache, then the
//! document store, then the external authority. Failed authority calls are
//! remembered in a shared negative cache so a known-bad query is not
//! repeated until its entry expires.
//!
//! Concurrent misses on the same key are not coalesced. Both callers may
//! reach the authority and both write the same document; store writes are
//! insert-style so the duplication is harmless.

pub mod config;
mod enricher;
mod genres;
pub mod keys;
mod locality;
mod negative;
mod venue;

pub use config::ResolverConfig;
pub use enricher::{
    EnrichmentFailure, EnrichmentReport, EnrichmentStage, EventEnricher,
};
pub use genres::ArtistGenreResolver;
pub use locality::LocalityResolver;
pub use negative::{KeySpace, NegativeCache};
pub use venue::VenueResolver;
