//! Live providers backed by the vendor HTTP clients.

use tracing::warn;

use crate::domain::{BatchEta, DrivingEta, Itinerary, Station};
use crate::planner::RouteProviders;

use super::error::ProviderError;
use super::http::ProviderConfig;
use super::kakao::{KakaoLocalClient, KakaoMobilityClient};
use super::tmap::TmapTransitClient;

/// TMAP for transit, Kakao for driving and station search.
///
/// Client errors are logged here and turned into empty results, so a
/// vendor outage removes candidates instead of failing the request.
#[derive(Debug, Clone)]
pub struct LiveProviders {
    transit: TmapTransitClient,
    mobility: KakaoMobilityClient,
    local: KakaoLocalClient,
}

impl LiveProviders {
    /// Build all three clients from their configurations.
    pub fn new(tmap: ProviderConfig, kakao: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            transit: TmapTransitClient::new(tmap)?,
            mobility: KakaoMobilityClient::new(kakao.clone())?,
            local: KakaoLocalClient::new(kakao)?,
        })
    }
}

impl RouteProviders for LiveProviders {
    async fn fetch_transit_itineraries(
        &self,
        origin_x: f64,
        origin_y: f64,
        dest_x: f64,
        dest_y: f64,
    ) -> Option<Vec<Itinerary>> {
        self.transit
            .transit_routes(origin_x, origin_y, dest_x, dest_y)
            .await
            .inspect_err(|e| warn!(provider = "TMAP", error = %e, "Transit search failed"))
            .ok()
    }

    async fn fetch_driving_eta(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        dest_lng: f64,
        dest_lat: f64,
    ) -> Option<DrivingEta> {
        self.mobility
            .directions(origin_lng, origin_lat, dest_lng, dest_lat)
            .await
            .inspect_err(|e| warn!(provider = "Kakao Mobility", error = %e, "Directions failed"))
            .ok()
            .flatten()
    }

    async fn fetch_batch_eta_to_destinations(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        destinations: &[Station],
    ) -> Option<Vec<Option<BatchEta>>> {
        self.mobility
            .destinations(origin_lng, origin_lat, destinations)
            .await
            .inspect_err(|e| {
                warn!(provider = "Kakao Mobility", error = %e, "Multi-destination ETA failed")
            })
            .ok()
    }

    async fn fetch_batch_eta_from_origins(
        &self,
        origins: &[Station],
        dest_lng: f64,
        dest_lat: f64,
    ) -> Option<Vec<Option<BatchEta>>> {
        self.mobility
            .origins(origins, dest_lng, dest_lat)
            .await
            .inspect_err(|e| warn!(provider = "Kakao Mobility", error = %e, "Multi-origin ETA failed"))
            .ok()
    }

    async fn fetch_nearby_stations(&self, x: f64, y: f64, radius_m: u32) -> Vec<Station> {
        self.local
            .nearby_stations(x, y, radius_m)
            .await
            .inspect_err(|e| warn!(provider = "Kakao Local", error = %e, "Station search failed"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nothing listens on port 9 (discard), so every request fails fast.
    fn unreachable() -> ProviderConfig {
        ProviderConfig::new("test-key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2)
    }

    #[test]
    fn builds_from_configs() {
        assert!(LiveProviders::new(unreachable(), unreachable()).is_ok());
    }

    #[tokio::test]
    async fn transport_errors_become_empty_results() {
        let providers = LiveProviders::new(unreachable(), unreachable()).unwrap();

        assert!(
            providers
                .fetch_transit_itineraries(127.0, 37.5, 127.1, 37.6)
                .await
                .is_none()
        );
        assert!(
            providers
                .fetch_driving_eta(127.0, 37.5, 127.1, 37.6)
                .await
                .is_none()
        );
        assert!(
            providers
                .fetch_batch_eta_to_destinations(127.0, 37.5, &[])
                .await
                .is_none()
        );
        assert!(providers.fetch_nearby_stations(127.0, 37.5, 1000).await.is_empty());
    }
}
