//! TMAP public-transit API response types.
//!
//! These mirror the JSON the transit route endpoint returns. Only the
//! fields the planner needs are modelled; everything else is ignored.

use serde::{Deserialize, Serialize};

/// Request body for `POST /transit/routes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRouteRequest {
    /// Origin longitude, as a string
    pub start_x: String,
    /// Origin latitude, as a string
    pub start_y: String,
    pub end_x: String,
    pub end_y: String,
    /// Maximum itineraries to return
    pub count: u32,
    /// 0 = Korean
    pub lang: u32,
    pub format: &'static str,
}

/// Top-level response. Exactly one of `meta_data` and `result` is present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRouteResponse {
    #[serde(default)]
    pub meta_data: Option<MetaData>,
    /// Present instead of `meta_data` when no route exists
    #[serde(default)]
    pub result: Option<ResultStatus>,
}

/// Status block returned when the search produced nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultStatus {
    pub status: i32,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaData {
    pub plan: Plan,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub itineraries: Vec<TmapItinerary>,
}

/// One itinerary as TMAP reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmapItinerary {
    /// Total time in seconds
    pub total_time: u32,
    #[serde(default)]
    pub transfer_count: u32,
    #[serde(default)]
    pub total_walk_distance: u32,
    #[serde(default)]
    pub path_type: u32,
    #[serde(default)]
    pub fare: Option<Fare>,
    #[serde(default)]
    pub legs: Vec<TmapLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fare {
    #[serde(default)]
    pub regular: Option<RegularFare>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularFare {
    pub total_fare: u32,
}

/// One leg of a TMAP itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmapLeg {
    /// "WALK", "BUS", "SUBWAY", "EXPRESSBUS", "TRAIN", ...
    pub mode: String,
    /// Section time in seconds
    #[serde(default)]
    pub section_time: u32,
    #[serde(default)]
    pub distance: u32,
    pub start: Place,
    pub end: Place,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub route_id: Option<String>,
    #[serde(default)]
    pub route_color: Option<String>,
    #[serde(default)]
    pub pass_stop_list: Option<PassStopList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassStopList {
    #[serde(default)]
    pub station_list: Vec<serde_json::Value>,
}
