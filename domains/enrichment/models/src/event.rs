use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;

use crate::geo::{Address, GeoPoint};

/// User-submitted event record. `geolocation`, `address` and `genres` are
/// the attributes filled in by enrichment when the submitter left them out.
#[derive(
    Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[builder(setter(into))]
    pub title: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub location: String,
    #[builder(setter(into))]
    pub city: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub country: String,
    #[builder(default = Utc::now())]
    pub date: DateTime<Utc>,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub url: String,
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[builder(default, setter(into))]
    #[serde(default, rename = "type")]
    pub event_type: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub source_url: String,
    /// Free text that may mention genres, e.g. a tag line scraped with the
    /// event.
    #[builder(default, setter(into))]
    #[serde(default, alias = "genresText")]
    pub description_text: String,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<GeoPoint>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[builder(default)]
    #[serde(default)]
    pub genres: BTreeSet<String>,
}
