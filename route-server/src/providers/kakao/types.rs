//! Kakao Mobility and Kakao Local API types.

use serde::{Deserialize, Deserializer, Serialize};

/// Response of `GET /v1/directions`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// One route of a directions response.
///
/// `result_code` 0 means success; anything else means no route and the
/// summary is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    pub result_code: i32,
    #[serde(default)]
    pub result_msg: Option<String>,
    #[serde(default)]
    pub summary: Option<DirectionsSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsSummary {
    /// Metres
    pub distance: u32,
    /// Seconds
    pub duration: u32,
    #[serde(default)]
    pub fare: Option<DirectionsFare>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsFare {
    #[serde(default)]
    pub taxi: Option<u32>,
    #[serde(default)]
    pub toll: Option<u32>,
}

/// A keyed point in a multi-point request.
#[derive(Debug, Clone, Serialize)]
pub struct KeyedPoint {
    pub key: String,
    pub x: f64,
    pub y: f64,
}

/// The fixed end of a multi-point request.
#[derive(Debug, Clone, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Body of `POST /v1/destinations/directions`.
#[derive(Debug, Clone, Serialize)]
pub struct DestinationsRequest {
    pub origin: Point,
    pub destinations: Vec<KeyedPoint>,
    pub radius: u32,
    pub priority: &'static str,
}

/// Body of `POST /v1/origins/directions`.
#[derive(Debug, Clone, Serialize)]
pub struct OriginsRequest {
    pub origins: Vec<KeyedPoint>,
    pub destination: Point,
    pub radius: u32,
    pub priority: &'static str,
}

/// Response of both multi-point endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MultiDirectionsResponse {
    #[serde(default)]
    pub routes: Vec<MultiRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultiRoute {
    pub result_code: i32,
    /// Echo of the request point key
    pub key: String,
    #[serde(default)]
    pub summary: Option<MultiSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultiSummary {
    pub distance: u32,
    pub duration: u32,
}

/// Response of `GET /v2/local/search/keyword.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSearchResponse {
    #[serde(default)]
    pub documents: Vec<Place>,
}

/// One place document. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub id: String,
    pub place_name: String,
    #[serde(default)]
    pub category_group_code: String,
    #[serde(deserialize_with = "string_f64")]
    pub x: f64,
    #[serde(deserialize_with = "string_f64")]
    pub y: f64,
}

fn string_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Str(String),
        Num(f64),
    }

    match StrOrNum::deserialize(deserializer)? {
        StrOrNum::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
        StrOrNum::Num(n) => Ok(n),
    }
}
