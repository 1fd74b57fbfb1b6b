//! Kakao Mobility driving directions client.

use tracing::{debug, instrument, warn};

use crate::domain::{BatchEta, DrivingEta, Station};
use crate::planner::MAX_BATCH_POINTS;
use crate::providers::error::ProviderError;
use crate::providers::http::{JsonTransport, ProviderConfig};

use super::types::{
    DestinationsRequest, DirectionsResponse, KeyedPoint, MultiDirectionsResponse, MultiRoute,
    OriginsRequest, Point,
};

/// Default base URL for Kakao Mobility.
pub const DEFAULT_BASE_URL: &str = "https://apis-navi.kakaomobility.com";

/// Search radius for multi-point requests, in metres (the API maximum).
const MULTI_RADIUS_M: u32 = 10_000;

/// Kakao Mobility directions client.
#[derive(Debug, Clone)]
pub struct KakaoMobilityClient {
    transport: JsonTransport,
}

impl KakaoMobilityClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let auth = format!("KakaoAK {}", config.api_key);
        let transport =
            JsonTransport::new("Kakao Mobility", &config, DEFAULT_BASE_URL, "authorization", &auth)?;

        Ok(Self { transport })
    }

    /// Point-to-point driving estimate.
    ///
    /// Returns `Ok(None)` when Kakao reports no drivable route.
    #[instrument(skip(self), level = "debug")]
    pub async fn directions(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        dest_lng: f64,
        dest_lat: f64,
    ) -> Result<Option<DrivingEta>, ProviderError> {
        let response: DirectionsResponse = self
            .transport
            .get(
                "/v1/directions",
                &[
                    ("origin", format!("{origin_lng},{origin_lat}")),
                    ("destination", format!("{dest_lng},{dest_lat}")),
                    ("summary", "true".to_string()),
                ],
            )
            .await?;

        Ok(convert_directions(response))
    }

    /// One-to-many driving estimates.
    ///
    /// Output is aligned with `destinations`; at most [`MAX_BATCH_POINTS`]
    /// are routed and the rest are `None`.
    #[instrument(skip(self, destinations), fields(count = destinations.len()), level = "debug")]
    pub async fn destinations(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        destinations: &[Station],
    ) -> Result<Vec<Option<BatchEta>>, ProviderError> {
        let body = DestinationsRequest {
            origin: Point {
                x: origin_lng,
                y: origin_lat,
            },
            destinations: keyed_points(destinations),
            radius: MULTI_RADIUS_M,
            priority: "TIME",
        };

        let response: MultiDirectionsResponse = self
            .transport
            .post("/v1/destinations/directions", &body)
            .await?;

        Ok(align_by_key(response.routes, destinations.len()))
    }

    /// Many-to-one driving estimates.
    #[instrument(skip(self, origins), fields(count = origins.len()), level = "debug")]
    pub async fn origins(
        &self,
        origins: &[Station],
        dest_lng: f64,
        dest_lat: f64,
    ) -> Result<Vec<Option<BatchEta>>, ProviderError> {
        let body = OriginsRequest {
            origins: keyed_points(origins),
            destination: Point {
                x: dest_lng,
                y: dest_lat,
            },
            radius: MULTI_RADIUS_M,
            priority: "TIME",
        };

        let response: MultiDirectionsResponse = self
            .transport
            .post("/v1/origins/directions", &body)
            .await?;

        Ok(align_by_key(response.routes, origins.len()))
    }
}

/// Key each station by its input index, truncating to the batch limit.
fn keyed_points(stations: &[Station]) -> Vec<KeyedPoint> {
    if stations.len() > MAX_BATCH_POINTS {
        warn!(
            requested = stations.len(),
            limit = MAX_BATCH_POINTS,
            "Truncating batch ETA request"
        );
    }

    stations
        .iter()
        .take(MAX_BATCH_POINTS)
        .enumerate()
        .map(|(i, s)| KeyedPoint {
            key: i.to_string(),
            x: s.x,
            y: s.y,
        })
        .collect()
}

/// Place each routed result at the index its key names.
///
/// Kakao returns results in its own order, so alignment is by key.
fn align_by_key(routes: Vec<MultiRoute>, len: usize) -> Vec<Option<BatchEta>> {
    let mut aligned = vec![None; len];

    for route in routes {
        let Ok(index) = route.key.parse::<usize>() else {
            debug!(key = %route.key, "Ignoring route with unknown key");
            continue;
        };
        if route.result_code != 0 || index >= len {
            continue;
        }
        if let Some(summary) = route.summary {
            aligned[index] = Some(BatchEta {
                duration_sec: summary.duration,
                distance_m: summary.distance,
            });
        }
    }

    aligned
}

fn convert_directions(response: DirectionsResponse) -> Option<DrivingEta> {
    let route = response.routes.into_iter().next()?;
    if route.result_code != 0 {
        debug!(
            code = route.result_code,
            message = route.result_msg.as_deref().unwrap_or(""),
            "No driving route"
        );
        return None;
    }

    let summary = route.summary?;
    let (taxi, toll) = summary.fare.map_or((None, None), |f| (f.taxi, f.toll));

    Some(DrivingEta {
        duration_sec: summary.duration,
        distance_m: summary.distance,
        taxi_fare_krw: taxi,
        toll_fare_krw: toll,
    })
}
