use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Durable answer of the music authority for one artist.
///
/// A record with an empty `genres` set means the authority was asked and
/// knew nothing. That is different from having no record at all, which
/// means the artist was never looked up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenreRecord {
    #[serde(rename = "title")]
    pub artist_key: String,
    pub genres: BTreeSet<String>,
}

impl GenreRecord {
    pub fn new(artist: &str, genres: BTreeSet<String>) -> Self {
        Self {
            artist_key: artist.to_lowercase(),
            genres,
        }
    }
}
