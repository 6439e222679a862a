use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use authority_clients::{
    AccessToken, ArtistItem, AuthorityError, Geocoder, MusicService, Place,
};

/// Scripted answer of a fake authority.
#[derive(Debug, Clone)]
pub enum Reply {
    Places(Vec<Place>),
    Fail { status: u16, body: String },
}

impl Reply {
    pub fn places(places: Vec<Place>) -> Self { Self::Places(places) }

    pub fn unavailable() -> Self {
        Self::Fail {
            status: 503,
            body: "service unavailable".into(),
        }
    }

    fn to_result(&self) -> Result<Vec<Place>, AuthorityError> {
        match self {
            Self::Places(places) => Ok(places.clone()),
            Self::Fail { status, body } => Err(AuthorityError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Geocoder returning fixed replies and counting calls.
pub struct FakeGeocoder {
    city_reply: Mutex<Reply>,
    venue_reply: Mutex<Reply>,
    latency: Duration,
    city_calls: AtomicUsize,
    venue_calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self {
            city_reply: Mutex::new(Reply::Places(Vec::new())),
            venue_reply: Mutex::new(Reply::Places(Vec::new())),
            latency: Duration::ZERO,
            city_calls: AtomicUsize::new(0),
            venue_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_city_reply(self, reply: Reply) -> Self {
        self.set_city_reply(reply);
        self
    }

    pub fn with_venue_reply(self, reply: Reply) -> Self {
        self.set_venue_reply(reply);
        self
    }

    /// Every call sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_city_reply(&self, reply: Reply) {
        *self.city_reply.lock().unwrap() = reply;
    }

    pub fn set_venue_reply(&self, reply: Reply) {
        *self.venue_reply.lock().unwrap() = reply;
    }

    pub fn city_calls(&self) -> usize { self.city_calls.load(Ordering::SeqCst) }

    pub fn venue_calls(&self) -> usize {
        self.venue_calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeGeocoder {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search_city(
        &self, _city: &str, _country: &str,
    ) -> Result<Vec<Place>, AuthorityError> {
        self.city_calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let reply = self.city_reply.lock().unwrap().clone();
        reply.to_result()
    }

    async fn search_venue(
        &self, _location: &str, _city: &str, _country: &str,
    ) -> Result<Vec<Place>, AuthorityError> {
        self.venue_calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let reply = self.venue_reply.lock().unwrap().clone();
        reply.to_result()
    }
}

/// Music service backed by a fixed artist catalogue.
///
/// Searches are matched on the lowercased query and return every catalogue
/// entry whose name contains it, like a real fuzzy search would.
pub struct FakeMusicService {
    catalogue: Vec<ArtistItem>,
    failing: HashSet<String>,
    token_lifetime_secs: i64,
    token_calls: AtomicUsize,
    search_calls: AtomicUsize,
    searches: Mutex<HashMap<String, usize>>,
    bearers: Mutex<Vec<String>>,
}

impl FakeMusicService {
    pub fn new() -> Self {
        Self {
            catalogue: Vec::new(),
            failing: HashSet::new(),
            token_lifetime_secs: 3600,
            token_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            searches: Mutex::new(HashMap::new()),
            bearers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_artist(mut self, name: &str, genres: &[&str]) -> Self {
        self.catalogue.push(ArtistItem {
            name: name.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        });
        self
    }

    /// Searches for this artist answer with a server error.
    pub fn failing_for(mut self, artist: &str) -> Self {
        self.failing.insert(artist.to_lowercase());
        self
    }

    pub fn with_token_lifetime(mut self, secs: i64) -> Self {
        self.token_lifetime_secs = secs;
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn searches_for(&self, artist: &str) -> usize {
        self.searches
            .lock()
            .unwrap()
            .get(&artist.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    pub fn bearers(&self) -> Vec<String> { self.bearers.lock().unwrap().clone() }
}

impl Default for FakeMusicService {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl MusicService for FakeMusicService {
    async fn request_token(&self) -> Result<AccessToken, AuthorityError> {
        let n = self.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(AccessToken {
            access_token: format!("token-{n}"),
            token_type: "Bearer".into(),
            expires_in: self.token_lifetime_secs,
        })
    }

    async fn search_artists(
        &self, bearer: &str, artist: &str,
    ) -> Result<Vec<ArtistItem>, AuthorityError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let query = artist.to_lowercase();
        *self.searches.lock().unwrap().entry(query.clone()).or_default() += 1;
        self.bearers.lock().unwrap().push(bearer.to_string());

        if self.failing.contains(&query) {
            return Err(AuthorityError::Status {
                status: 500,
                body: "internal error".into(),
            });
        }
        Ok(self
            .catalogue
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }
}
