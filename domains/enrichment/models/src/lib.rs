pub mod event;
pub mod genre;
pub mod geo;

pub use event::Event;
pub use genre::GenreRecord;
pub use geo::{Address, City, GeoJsonType, GeoPoint, Venue};
