//! Endpoint and station types.

use serde::{Deserialize, Serialize};

/// A named point on the map, as supplied by the caller.
///
/// Coordinates are WGS84 degrees. Two locations with identical
/// coordinates are legal (a zero-length trip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    /// Returns true if both coordinates are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A transit boarding point returned by the nearby-station search.
///
/// Uses the provider's x/y convention: `x` is longitude, `y` is latitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Provider-assigned identifier
    pub id: String,
    /// Station name (e.g., "강남역 2호선")
    pub name: String,
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
    /// Provider category (e.g., "SW8" for subway stations)
    #[serde(rename = "type")]
    pub station_type: String,
}

impl Station {
    /// Returns the station as a route endpoint.
    pub fn to_location(&self) -> Location {
        Location::new(self.name.clone(), self.y, self.x)
    }
}
