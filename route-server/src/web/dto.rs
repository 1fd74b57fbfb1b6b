//! Data transfer objects for the web API.
//!
//! Inbound fields are optional at the serde level so that a missing field
//! produces a precise 400 message instead of a generic parse error.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::{Constraints, Location};
use crate::planner::RouteRequest;

/// Endpoint as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationInput {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Request body for `POST /api/routes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRouteRequest {
    pub origin: Option<LocationInput>,
    pub destination: Option<LocationInput>,
    pub max_time_min: Option<u32>,
    pub max_walk_min: Option<u32>,
    #[serde(default)]
    pub require_taxi: Option<bool>,
    #[serde(default)]
    pub taxi_max_segments: Option<u32>,
    /// RFC 3339 timestamp; defaults to now
    #[serde(default)]
    pub departure_time: Option<String>,
}

/// Validation failure for a plan request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("missing required field: {0}")]
    Missing(&'static str),

    #[error("{0} coordinates are out of range")]
    OutOfRange(&'static str),

    #[error("invalid departureTime {0:?}: expected an RFC 3339 timestamp")]
    DepartureTime(String),
}

impl LocationInput {
    fn into_location(
        self,
        field: &'static str,
        default_name: &str,
    ) -> Result<Location, RequestError> {
        let lat = self.lat.ok_or(RequestError::Missing(match field {
            "origin" => "origin.lat",
            _ => "destination.lat",
        }))?;
        let lng = self.lng.ok_or(RequestError::Missing(match field {
            "origin" => "origin.lng",
            _ => "destination.lng",
        }))?;

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| default_name.to_string());

        let location = Location::new(name, lat, lng);
        if !location.is_valid() {
            return Err(RequestError::OutOfRange(field));
        }
        Ok(location)
    }
}

impl PlanRouteRequest {
    /// Validate and convert into a planner request.
    ///
    /// `now` is used when no departure time was supplied.
    pub fn into_route_request(
        self,
        now: DateTime<FixedOffset>,
    ) -> Result<RouteRequest, RequestError> {
        let origin = self
            .origin
            .ok_or(RequestError::Missing("origin"))?
            .into_location("origin", "Origin")?;
        let destination = self
            .destination
            .ok_or(RequestError::Missing("destination"))?
            .into_location("destination", "Destination")?;
        let max_time_min = self
            .max_time_min
            .ok_or(RequestError::Missing("maxTimeMin"))?;
        let max_walk_min = self
            .max_walk_min
            .ok_or(RequestError::Missing("maxWalkMin"))?;

        let departure_time = match self.departure_time {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map_err(|_| RequestError::DepartureTime(raw.clone()))?,
            None => now,
        };

        let mut constraints = Constraints::new(max_time_min, max_walk_min);
        if let Some(require_taxi) = self.require_taxi {
            constraints.require_taxi = require_taxi;
        }
        if let Some(segments) = self.taxi_max_segments {
            constraints.taxi_max_segments = segments;
        }

        Ok(RouteRequest::new(
            origin,
            destination,
            constraints,
            departure_time,
        ))
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
