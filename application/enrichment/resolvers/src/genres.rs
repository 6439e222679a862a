use std::{collections::BTreeSet, sync::Arc, time::Duration};

use authority_clients::MusicService;
use document_store::{DocumentStore, StoreError};
use enrichment_errors::{Authority, ResolveResult};
use enrichment_models::{Event, GenreRecord};
use genre_extractor::{
    Vocabulary, extract_artists_from_title, extract_genres_from_text,
};
use memory_cache::{SweepHandle, TtlCache};
use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::ResolverConfig,
    negative::{KeySpace, NegativeCache},
};

struct BearerToken {
    value: String,
    expires_at: Instant,
}

impl BearerToken {
    fn is_usable(&self, now: Instant) -> bool {
        !self.value.is_empty() && now < self.expires_at
    }
}

/// Resolves the genres of an event from its description, falling back to
/// a per-artist lookup of the names found in its title.
#[derive(Clone)]
pub struct ArtistGenreResolver {
    vocabulary: Arc<Vocabulary>,
    store: Arc<dyn DocumentStore>,
    music: Option<Arc<dyn MusicService>>,
    cache: TtlCache<BTreeSet<String>>,
    negative: NegativeCache,
    token: Arc<Mutex<Option<BearerToken>>>,
    token_expiry_margin: Duration,
}

impl ArtistGenreResolver {
    /// `music` is only consulted when `config.lookup_artist_genres` is set.
    /// Without it unknown artists resolve to no genres and nothing is
    /// written to the store.
    pub fn new(
        config: &ResolverConfig, vocabulary: Arc<Vocabulary>,
        store: Arc<dyn DocumentStore>, music: Option<Arc<dyn MusicService>>,
        negative: NegativeCache,
    ) -> Self {
        let music = music.filter(|_| config.lookup_artist_genres);
        Self {
            vocabulary,
            store,
            music,
            cache: TtlCache::new(config.genre_cache.clone()),
            negative,
            token: Arc::new(Mutex::new(None)),
            token_expiry_margin: config.token_expiry_margin,
        }
    }

    pub fn spawn_sweeper(&self) -> SweepHandle {
        self.cache.spawn_sweeper("artist-genres")
    }

    #[instrument(skip_all, fields(title = %event.title))]
    pub async fn resolve_genres(
        &self, event: &Event,
    ) -> ResolveResult<BTreeSet<String>> {
        let extracted =
            extract_genres_from_text(&self.vocabulary, &event.description_text);
        if !extracted.is_empty() {
            debug!("Genres taken from description: {extracted:?}");
            return Ok(extracted);
        }

        let mut genres = BTreeSet::new();
        let mut first_failure = None;
        for artist in extract_artists_from_title(&event.title) {
            match self.resolve_artist(&artist).await {
                Ok(found) => genres.extend(found),
                Err(err) => {
                    warn!("Genre lookup for artist {artist:?} failed: {err}");
                    first_failure.get_or_insert(err);
                }
            }
        }

        match first_failure {
            Some(err) if genres.is_empty() => Err(err),
            _ => Ok(genres),
        }
    }

    async fn resolve_artist(
        &self, artist: &str,
    ) -> ResolveResult<BTreeSet<String>> {
        if let Some(genres) = self.cache.get(artist).await {
            debug!("Memory cache hit for artist {artist:?}");
            return Ok(genres);
        }

        // An empty stored record means the authority was already asked.
        match self.store.find_genre_record(artist).await {
            Ok(record) => {
                debug!("Store hit for artist {artist:?}");
                self.cache.insert(artist, record.genres.clone()).await;
                return Ok(record.genres);
            }
            Err(StoreError::NotFound) => {}
            Err(e) => {
                warn!("Genre record lookup failed, treating as miss: {e}")
            }
        }

        let Some(music) = self.music.as_deref()
        else {
            return Ok(BTreeSet::new());
        };

        if let Some(err) = self.negative.get(KeySpace::Artist, artist).await {
            debug!("Negative cache hit for artist {artist:?}");
            return Err(err);
        }

        match self.query_authority(music, artist).await {
            Ok(genres) => {
                self.cache.insert(artist, genres.clone()).await;
                let record = GenreRecord::new(artist, genres.clone());
                if let Err(e) = self.store.insert_genre_record(&record).await {
                    warn!("Failed to persist genres of {artist:?}: {e}");
                }
                Ok(genres)
            }
            Err(err) => {
                self.negative
                    .insert(KeySpace::Artist, artist, err.clone())
                    .await;
                Err(err)
            }
        }
    }

    async fn query_authority(
        &self, music: &dyn MusicService, artist: &str,
    ) -> ResolveResult<BTreeSet<String>> {
        let bearer = self.bearer(music).await?;
        info!("Searching music metadata for artist {artist:?}");
        let items = music
            .search_artists(&bearer, artist)
            .await
            .map_err(|e| e.into_resolve_error(Authority::MusicMetadata))?;

        let wanted = artist.to_lowercase();
        Ok(items
            .into_iter()
            .find(|item| item.name.to_lowercase() == wanted)
            .map(|item| item.genres.into_iter().collect())
            .unwrap_or_default())
    }

    /// Current access token, renewed once now is no longer strictly before
    /// its expiry. The lock is held across renewal so concurrent lookups
    /// share one token request.
    async fn bearer(&self, music: &dyn MusicService) -> ResolveResult<String> {
        let mut token = self.token.lock().await;
        let now = Instant::now();
        if let Some(current) = token.as_ref().filter(|t| t.is_usable(now)) {
            return Ok(current.value.clone());
        }

        info!("Requesting music metadata access token");
        let fresh = music
            .request_token()
            .await
            .map_err(|e| e.into_resolve_error(Authority::MusicMetadata))?;
        let lifetime = Duration::from_secs(fresh.expires_in.max(0) as u64)
            .saturating_sub(self.token_expiry_margin);

        let value = fresh.access_token;
        *token = Some(BearerToken {
            value: value.clone(),
            expires_at: now + lifetime,
        });
        Ok(value)
    }
}
