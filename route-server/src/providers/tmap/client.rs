//! TMAP public-transit HTTP client.

use tracing::instrument;

use crate::domain::Itinerary;
use crate::providers::error::ProviderError;
use crate::providers::http::{JsonTransport, ProviderConfig};

use super::convert::convert_response;
use super::types::{TransitRouteRequest, TransitRouteResponse};

/// Default base URL for the TMAP open API.
pub const DEFAULT_BASE_URL: &str = "https://apis.openapi.sk.com";

/// Itineraries requested per search.
const DEFAULT_ROUTE_COUNT: u32 = 10;

/// TMAP transit route client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TmapTransitClient {
    transport: JsonTransport,
    route_count: u32,
}

impl TmapTransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let transport =
            JsonTransport::new("TMAP", &config, DEFAULT_BASE_URL, "appkey", &config.api_key)?;

        Ok(Self {
            transport,
            route_count: DEFAULT_ROUTE_COUNT,
        })
    }

    /// Search transit itineraries between two points.
    ///
    /// Coordinates use the provider's x (longitude) / y (latitude) order.
    /// Returns an empty list when TMAP reports that no route exists.
    #[instrument(skip(self), level = "debug")]
    pub async fn transit_routes(
        &self,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> Result<Vec<Itinerary>, ProviderError> {
        let body = TransitRouteRequest {
            start_x: start_x.to_string(),
            start_y: start_y.to_string(),
            end_x: end_x.to_string(),
            end_y: end_y.to_string(),
            count: self.route_count,
            lang: 0,
            format: "json",
        };

        let response: TransitRouteResponse = self.transport.post("/transit/routes", &body).await?;
        Ok(convert_response(response))
    }
}
