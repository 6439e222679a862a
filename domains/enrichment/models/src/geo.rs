use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
pub enum GeoJsonType {
    #[default]
    Point,
}

/// GeoJSON point. Coordinates are stored as `[lon, lat]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    kind: GeoJsonType,
    #[schema(value_type = Vec<f64>)]
    coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            kind: GeoJsonType::Point,
            coordinates: [lon, lat],
        }
    }

    pub fn lon(&self) -> f64 { self.coordinates[0] }

    pub fn lat(&self) -> f64 { self.coordinates[1] }

    pub fn coordinates(&self) -> [f64; 2] { self.coordinates }
}

/// City-level record in the `cities` collection. `name` and `country` are
/// stored lowercased.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct City {
    pub name: String,
    pub country: String,
    pub geolocation: GeoPoint,
}

#[derive(
    Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[builder(setter(into))]
    pub locality: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub country: String,
    #[builder(default, setter(into))]
    #[serde(default, alias = "state")]
    pub region: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub postal_code: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub street: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub house_number: String,
    pub geolocation: GeoPoint,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Venue {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: Address,
}
