//! Boundaries to the external authorities: a Nominatim-style geocoder and a
//! Spotify-style music metadata service. Both sit behind traits so the
//! resolvers can be driven by scripted fakes.

pub mod config;
mod error;
pub mod geocoding;
pub mod music;

pub use config::{NominatimConfig, SpotifyConfig};
pub use error::AuthorityError;
pub use geocoding::{Geocoder, NominatimGeocoder, Place, PlaceAddress};
pub use music::{AccessToken, ArtistItem, MusicService, SpotifyClient};
