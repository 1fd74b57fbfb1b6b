//! The planner's view of its external data sources.
//!
//! Every method returns a null-object on failure (`None` or an empty list)
//! rather than an error: a provider that is down simply contributes nothing
//! to the candidate set. Implementations are expected to log the underlying
//! error before discarding it.

use std::future::Future;

use crate::domain::{BatchEta, DrivingEta, Itinerary, Station};

/// Maximum points in one batch ETA request.
pub const MAX_BATCH_POINTS: usize = 30;

/// Maximum radius accepted by the nearby-station search, in metres.
pub const MAX_STATION_RADIUS_M: u32 = 20_000;

/// Trait for providing transit, driving and station data.
///
/// This abstraction allows the planner to be tested with mock data and
/// lets concrete vendors be swapped without touching the planner.
pub trait RouteProviders: Send + Sync {
    /// Public-transit itineraries between two points, provider-ranked.
    ///
    /// `None` means the provider could not be reached or answered with
    /// garbage; `Some(vec![])` means it answered with no routes.
    fn fetch_transit_itineraries(
        &self,
        origin_x: f64,
        origin_y: f64,
        dest_x: f64,
        dest_y: f64,
    ) -> impl Future<Output = Option<Vec<Itinerary>>> + Send;

    /// Point-to-point driving estimate.
    fn fetch_driving_eta(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        dest_lng: f64,
        dest_lat: f64,
    ) -> impl Future<Output = Option<DrivingEta>> + Send;

    /// One-to-many driving estimates from a single origin.
    ///
    /// At most [`MAX_BATCH_POINTS`] destinations are routed. The result is
    /// positionally aligned with `destinations`; unroutable entries are `None`.
    fn fetch_batch_eta_to_destinations(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        destinations: &[Station],
    ) -> impl Future<Output = Option<Vec<Option<BatchEta>>>> + Send;

    /// Many-to-one driving estimates into a single destination.
    ///
    /// Mirror of [`RouteProviders::fetch_batch_eta_to_destinations`].
    fn fetch_batch_eta_from_origins(
        &self,
        origins: &[Station],
        dest_lng: f64,
        dest_lat: f64,
    ) -> impl Future<Output = Option<Vec<Option<BatchEta>>>> + Send;

    /// Transit stations within `radius_m` of a point.
    ///
    /// The radius is clamped to [`MAX_STATION_RADIUS_M`].
    fn fetch_nearby_stations(
        &self,
        x: f64,
        y: f64,
        radius_m: u32,
    ) -> impl Future<Output = Vec<Station>> + Send;
}
