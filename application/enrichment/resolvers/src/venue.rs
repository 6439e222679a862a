use std::{collections::HashMap, sync::Arc};

use authority_clients::{Geocoder, Place};
use document_store::{DocumentStore, StoreError};
use enrichment_errors::{Authority, ResolveError, ResolveResult};
use enrichment_models::{Address, Venue};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    keys::venue_key,
    negative::{KeySpace, NegativeCache},
};

/// Amenity subtypes that can host an event.
const VENUE_AMENITIES: [&str; 17] = [
    "arts_centre",
    "bar",
    "cafe",
    "community_centre",
    "concert_hall",
    "events_centre",
    "events_venue",
    "mobility_hub",
    "music_school",
    "music_venue",
    "nightclub",
    "place_of_worship",
    "pub",
    "restaurant",
    "social_centre",
    "theatre",
    "university",
];

#[derive(Clone)]
pub struct VenueResolver {
    store: Arc<dyn DocumentStore>,
    geocoder: Arc<dyn Geocoder>,
    negative: NegativeCache,
    venues: Arc<RwLock<HashMap<String, Venue>>>,
}

impl VenueResolver {
    pub fn new(
        store: Arc<dyn DocumentStore>, geocoder: Arc<dyn Geocoder>,
        negative: NegativeCache,
    ) -> Self {
        Self {
            store,
            geocoder,
            negative,
            venues: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Address of the venue called `location` in `city`.
    #[instrument(skip(self))]
    pub async fn resolve_venue(
        &self, location: &str, city: &str, country: &str,
    ) -> ResolveResult<Address> {
        if location.trim().is_empty() || city.trim().is_empty() {
            return Err(ResolveError::validation(
                "location and city must be provided for venue lookup",
            ));
        }
        let key = venue_key(location, city, country);

        if let Some(venue) = self.venues.read().await.get(&key) {
            debug!("Memory cache hit for venue {key}");
            return Ok(venue.address.clone());
        }

        let country_filter = (!country.is_empty()).then_some(country);
        match self.store.find_venue(location, city, country_filter).await {
            Ok(stored) => {
                debug!("Store hit for venue {key}");
                let address = stored.address.clone();
                self.venues.write().await.insert(key, stored);
                return Ok(address);
            }
            Err(StoreError::NotFound) => debug!("Store miss for venue {key}"),
            Err(e) => {
                warn!("Venue lookup in store failed, treating as miss: {e}")
            }
        }

        if let Some(err) = self.negative.get(KeySpace::Venue, &key).await {
            debug!("Negative cache hit for venue {key}");
            return Err(err);
        }

        match self.query_authority(location, city, country).await {
            Ok(venue) => {
                let address = venue.address.clone();
                self.venues.write().await.insert(key, venue.clone());
                if let Err(e) = self.store.insert_venue(&venue).await {
                    warn!("Failed to persist venue {}: {e}", venue.name);
                }
                Ok(address)
            }
            Err(err) => {
                warn!("Venue lookup for {key} failed: {err}");
                self.negative.insert(KeySpace::Venue, &key, err.clone()).await;
                Err(err)
            }
        }
    }

    async fn query_authority(
        &self, location: &str, city: &str, country: &str,
    ) -> ResolveResult<Venue> {
        info!("Querying geocoder for venue {location:?} in {city:?}");
        let places = self
            .geocoder
            .search_venue(location, city, country)
            .await
            .map_err(|e| e.into_resolve_error(Authority::Geocoder))?;

        let Some(place) = places.iter().find(|p| is_venue(p))
        else {
            return Err(ResolveError::unresolved(format!(
                "venue {location} in {city}"
            )));
        };
        debug!(
            "Found venue {} of type {} for {location:?}",
            place.name, place.kind
        );
        build_venue(location, city, place)
    }
}

fn is_venue(place: &Place) -> bool {
    place.address_type == "amenity"
        && VENUE_AMENITIES.contains(&place.kind.as_str())
}

/// The venue keeps the caller's name. A geocoder match confirms that the
/// place exists; its label does not replace the one the event came with.
fn build_venue(location: &str, city: &str, place: &Place) -> ResolveResult<Venue> {
    let geolocation = place
        .point()
        .map_err(|e| e.into_resolve_error(Authority::Geocoder))?;
    let details = place.address.clone().unwrap_or_default();

    let locality = details
        .city
        .or(details.town)
        .or(details.village)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| city.to_string());

    let address = Address::builder()
        .locality(locality)
        .country(details.country.unwrap_or_default())
        .region(details.state.unwrap_or_default())
        .postal_code(details.postcode.unwrap_or_default())
        .street(details.road.unwrap_or_default())
        .house_number(details.house_number.unwrap_or_default())
        .geolocation(geolocation)
        .build();

    Ok(Venue {
        name: location.to_string(),
        kind: place.kind.clone(),
        address,
    })
}
