use authority_clients::{Place, PlaceAddress};
use enrichment_models::Event;

/// The genre labels used across the extraction and resolver tests.
pub const TEST_GENRES: &[&str] = &[
    "elektro",
    "house",
    "tech house",
    "techno",
    "jazz",
    "jazz fusion",
    "disco",
    "deep house",
];

/// Locality candidate as the geocoder reports it.
pub fn city_place(
    display_name: &str, address_type: &str, importance: f64, lon: f64,
    lat: f64,
) -> Place {
    Place {
        lat: lat.to_string(),
        lon: lon.to_string(),
        display_name: display_name.to_string(),
        name: display_name
            .split(',')
            .next()
            .unwrap_or_default()
            .to_string(),
        importance: Some(importance),
        address_type: address_type.to_string(),
        kind: "administrative".to_string(),
        address: None,
    }
}

/// Amenity candidate with structured address details.
pub fn venue_place(
    name: &str, amenity: &str, address: PlaceAddress, lon: f64, lat: f64,
) -> Place {
    Place {
        lat: lat.to_string(),
        lon: lon.to_string(),
        display_name: name.to_string(),
        name: name.to_string(),
        importance: Some(0.2),
        address_type: "amenity".to_string(),
        kind: amenity.to_string(),
        address: Some(address),
    }
}

pub fn place_address(city: Option<&str>, country: &str) -> PlaceAddress {
    PlaceAddress {
        house_number: Some("395".into()),
        road: Some("Seestrasse".into()),
        city: city.map(str::to_string),
        town: None,
        village: None,
        state: Some("Zürich".into()),
        country: Some(country.into()),
        postcode: Some("8038".into()),
    }
}

pub fn test_event(title: &str, city: &str) -> Event {
    Event::builder()
        .title(title)
        .city(city)
        .url("https://example.org/event")
        .source_url("https://example.org")
        .event_type("concert")
        .build()
}
