//! Runtime choice between live vendors and a recorded scenario.

use crate::domain::{BatchEta, DrivingEta, Itinerary, Station};
use crate::planner::RouteProviders;

use super::fixture::FixtureProviders;
use super::live::LiveProviders;

/// The provider set the server runs against.
#[derive(Debug, Clone)]
pub enum Backend {
    Live(LiveProviders),
    Fixture(FixtureProviders),
}

impl Backend {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Live(_) => "live",
            Backend::Fixture(_) => "fixture",
        }
    }
}

impl From<LiveProviders> for Backend {
    fn from(p: LiveProviders) -> Self {
        Backend::Live(p)
    }
}

impl From<FixtureProviders> for Backend {
    fn from(p: FixtureProviders) -> Self {
        Backend::Fixture(p)
    }
}

impl RouteProviders for Backend {
    async fn fetch_transit_itineraries(
        &self,
        origin_x: f64,
        origin_y: f64,
        dest_x: f64,
        dest_y: f64,
    ) -> Option<Vec<Itinerary>> {
        match self {
            Backend::Live(p) => {
                p.fetch_transit_itineraries(origin_x, origin_y, dest_x, dest_y)
                    .await
            }
            Backend::Fixture(p) => {
                p.fetch_transit_itineraries(origin_x, origin_y, dest_x, dest_y)
                    .await
            }
        }
    }

    async fn fetch_driving_eta(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        dest_lng: f64,
        dest_lat: f64,
    ) -> Option<DrivingEta> {
        match self {
            Backend::Live(p) => {
                p.fetch_driving_eta(origin_lng, origin_lat, dest_lng, dest_lat)
                    .await
            }
            Backend::Fixture(p) => {
                p.fetch_driving_eta(origin_lng, origin_lat, dest_lng, dest_lat)
                    .await
            }
        }
    }

    async fn fetch_batch_eta_to_destinations(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        destinations: &[Station],
    ) -> Option<Vec<Option<BatchEta>>> {
        match self {
            Backend::Live(p) => {
                p.fetch_batch_eta_to_destinations(origin_lng, origin_lat, destinations)
                    .await
            }
            Backend::Fixture(p) => {
                p.fetch_batch_eta_to_destinations(origin_lng, origin_lat, destinations)
                    .await
            }
        }
    }

    async fn fetch_batch_eta_from_origins(
        &self,
        origins: &[Station],
        dest_lng: f64,
        dest_lat: f64,
    ) -> Option<Vec<Option<BatchEta>>> {
        match self {
            Backend::Live(p) => {
                p.fetch_batch_eta_from_origins(origins, dest_lng, dest_lat)
                    .await
            }
            Backend::Fixture(p) => {
                p.fetch_batch_eta_from_origins(origins, dest_lng, dest_lat)
                    .await
            }
        }
    }

    async fn fetch_nearby_stations(&self, x: f64, y: f64, radius_m: u32) -> Vec<Station> {
        match self {
            Backend::Live(p) => p.fetch_nearby_stations(x, y, radius_m).await,
            Backend::Fixture(p) => p.fetch_nearby_stations(x, y, radius_m).await,
        }
    }
}
