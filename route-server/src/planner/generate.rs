//! Candidate generation.
//!
//! Builds every comparable way of making the trip: walk-only for very
//! short trips, otherwise transit-only, taxi-only, and (when allowed) a
//! taxi ride to a screened station followed by transit, or transit to a
//! screened station followed by a taxi ride.
//!
//! The four branches run concurrently. Each branch returns its own
//! candidates and statistics, which are merged in a fixed order so the
//! output is deterministic for fixed provider responses.

use chrono::{DateTime, FixedOffset};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    Constraints, DomainError, DrivingEta, Itinerary, Location, RouteCandidate, RouteLeg, RouteType,
    Station, TaxiDetails, TransitMode,
};
use crate::geo::{distance_meters, poi_search_radius, walk_minutes, walk_time_min};

use super::config::PlannerConfig;
use super::provider::{MAX_BATCH_POINTS, RouteProviders};
use super::screen::screen_stations;
use super::select::{RouteResponse, best_slack, build_response};

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Invalid planning request
    #[error("invalid route request: {0}")]
    InvalidRequest(String),

    /// Neither the transit nor the driving provider answered
    #[error("no route provider could be reached")]
    ProvidersUnavailable,
}

/// Request for route planning.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub origin: Location,
    pub destination: Location,
    pub constraints: Constraints,
    /// When the trip starts; used to stamp arrival times.
    pub departure_time: DateTime<FixedOffset>,
}

impl RouteRequest {
    /// Create a new route request.
    pub fn new(
        origin: Location,
        destination: Location,
        constraints: Constraints,
        departure_time: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            origin,
            destination,
            constraints,
            departure_time,
        }
    }

    /// Validate the route request.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.origin.is_valid() {
            return Err(PlanError::InvalidRequest(
                "origin coordinates are out of range".to_string(),
            ));
        }

        if !self.destination.is_valid() {
            return Err(PlanError::InvalidRequest(
                "destination coordinates are out of range".to_string(),
            ));
        }

        Ok(())
    }
}

/// Counters collected while generating candidates.
///
/// Reported in the optional debug block of a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub short_walk: bool,
    /// Requests made to the provider set, including ones answered from cache.
    pub provider_calls: usize,
    pub provider_failures: usize,
    pub transit_unavailable: bool,
    pub taxi_unavailable: bool,
    pub transit_itineraries: usize,
    pub origin_stations: usize,
    pub origin_screened: usize,
    pub origin_expanded_window: bool,
    pub destination_stations: usize,
    pub destination_screened: usize,
    pub destination_expanded_window: bool,
    pub stations_skipped: usize,
    pub mixed_kept: usize,
    pub mixed_discarded: usize,
}

impl GenerationStats {
    /// Fold another branch's counters into this one.
    pub fn merge(&mut self, other: &GenerationStats) {
        self.short_walk |= other.short_walk;
        self.provider_calls += other.provider_calls;
        self.provider_failures += other.provider_failures;
        self.transit_unavailable |= other.transit_unavailable;
        self.taxi_unavailable |= other.taxi_unavailable;
        self.transit_itineraries += other.transit_itineraries;
        self.origin_stations += other.origin_stations;
        self.origin_screened += other.origin_screened;
        self.origin_expanded_window |= other.origin_expanded_window;
        self.destination_stations += other.destination_stations;
        self.destination_screened += other.destination_screened;
        self.destination_expanded_window |= other.destination_expanded_window;
        self.stations_skipped += other.stations_skipped;
        self.mixed_kept += other.mixed_kept;
        self.mixed_discarded += other.mixed_discarded;
    }

    fn call(&mut self) {
        self.provider_calls += 1;
    }

    fn failed(&mut self) {
        self.provider_failures += 1;
    }
}

/// Candidates and counters produced by one generation run (or one branch of it).
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub candidates: Vec<RouteCandidate>,
    pub stats: GenerationStats,
}

impl Generation {
    fn absorb(&mut self, other: Generation) {
        self.candidates.extend(other.candidates);
        self.stats.merge(&other.stats);
    }

    fn push(&mut self, candidate: Result<RouteCandidate, DomainError>) {
        match candidate {
            Ok(c) => self.candidates.push(c),
            Err(e) => warn!(error = %e, "Dropping malformed route candidate"),
        }
    }
}

/// Walking time for the transit part of a route.
fn itinerary_walk_time(itinerary: &Itinerary) -> Result<u32, DomainError> {
    let walk_m = itinerary
        .walk_distance_m()
        .ok_or(DomainError::TotalOverflow {
            total: "walk distance",
        })?;
    Ok(walk_time_min(
        f64::from(walk_m),
        itinerary.count_mode(TransitMode::Subway),
        itinerary.count_mode(TransitMode::Bus),
    ))
}

/// Route planner over a set of providers.
pub struct Planner<'a, P: RouteProviders> {
    providers: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, P: RouteProviders> Planner<'a, P> {
    /// Create a new planner.
    pub fn new(providers: &'a P, config: &'a PlannerConfig) -> Self {
        Self { providers, config }
    }

    /// Plan a trip: generate candidates, then select and package them.
    pub async fn plan(&self, request: &RouteRequest) -> Result<RouteResponse, PlanError> {
        request.validate()?;

        let generation = self.generate(request).await;
        let stats = generation.stats;

        if generation.candidates.is_empty() && stats.transit_unavailable && stats.taxi_unavailable
        {
            warn!(
                calls = stats.provider_calls,
                failures = stats.provider_failures,
                "No provider answered"
            );
            return Err(PlanError::ProvidersUnavailable);
        }

        let response = build_response(
            generation.candidates,
            &request.constraints,
            request.departure_time,
            self.config,
            stats,
        );

        info!(
            routes = response.count,
            no_feasible_route = response.no_feasible_route,
            best_slack = ?best_slack(&response.routes),
            "Planned route"
        );

        Ok(response)
    }

    /// Generate every candidate for the request, feasible or not.
    pub async fn generate(&self, request: &RouteRequest) -> Generation {
        let distance = distance_meters(&request.origin, &request.destination);

        if distance < self.config.short_walk_threshold_m {
            debug!(distance_m = distance, "Short trip, offering walk only");
            return self.walk_only(request, distance);
        }

        let allows_mixed = request.constraints.allows_mixed();

        let (transit, taxi, taxi_transit, transit_taxi) = tokio::join!(
            self.transit_only(request),
            self.taxi_only(request),
            async {
                if allows_mixed {
                    self.taxi_then_transit(request).await
                } else {
                    Generation::default()
                }
            },
            async {
                if allows_mixed {
                    self.transit_then_taxi(request).await
                } else {
                    Generation::default()
                }
            },
        );

        let mut generation = Generation::default();
        generation.absorb(transit);
        generation.absorb(taxi);
        generation.absorb(taxi_transit);
        generation.absorb(transit_taxi);

        debug!(
            candidates = generation.candidates.len(),
            stats = ?generation.stats,
            "Generated candidates"
        );

        generation
    }

    fn walk_only(&self, request: &RouteRequest, distance_m: f64) -> Generation {
        let minutes = walk_minutes(distance_m);
        let leg = RouteLeg::walk(
            request.origin.clone(),
            request.destination.clone(),
            distance_m.round() as u32,
            minutes,
        );

        let mut generation = Generation::default();
        generation.stats.short_walk = true;
        generation.push(RouteCandidate::new(
            RouteType::WalkOnly.as_str(),
            RouteType::WalkOnly,
            vec![leg],
            minutes,
            &request.constraints,
        ));
        generation
    }

    async fn transit_only(&self, request: &RouteRequest) -> Generation {
        let (origin, dest) = (&request.origin, &request.destination);
        let mut generation = Generation::default();

        generation.stats.call();
        let Some(itineraries) = self
            .providers
            .fetch_transit_itineraries(origin.lng, origin.lat, dest.lng, dest.lat)
            .await
        else {
            generation.stats.failed();
            generation.stats.transit_unavailable = true;
            return generation;
        };

        generation.stats.transit_itineraries += itineraries.len();

        for (i, itinerary) in itineraries
            .iter()
            .take(self.config.max_transit_itineraries)
            .enumerate()
        {
            let leg = RouteLeg::transit(origin.clone(), dest.clone(), itinerary);
            generation.push(itinerary_walk_time(itinerary).and_then(|walk| {
                RouteCandidate::new(
                    format!("transit-only-{i}-{}", itinerary.path_type),
                    RouteType::TransitOnly,
                    vec![leg],
                    walk,
                    &request.constraints,
                )
            }));
        }

        generation
    }

    async fn taxi_only(&self, request: &RouteRequest) -> Generation {
        let (origin, dest) = (&request.origin, &request.destination);
        let mut generation = Generation::default();

        generation.stats.call();
        let Some(eta) = self
            .providers
            .fetch_driving_eta(origin.lng, origin.lat, dest.lng, dest.lat)
            .await
        else {
            generation.stats.failed();
            generation.stats.taxi_unavailable = true;
            return generation;
        };

        let leg = self.taxi_leg(origin.clone(), dest.clone(), &eta);
        generation.push(RouteCandidate::new(
            RouteType::TaxiOnly.as_str(),
            RouteType::TaxiOnly,
            vec![leg],
            0,
            &request.constraints,
        ));
        generation
    }

    /// Taxi from the origin to a nearby station, then transit onward.
    async fn taxi_then_transit(&self, request: &RouteRequest) -> Generation {
        let origin = &request.origin;
        let mut generation = Generation::default();

        let radius = poi_search_radius(request.constraints.max_walk_min);
        generation.stats.call();
        let mut stations = self
            .providers
            .fetch_nearby_stations(origin.lng, origin.lat, radius)
            .await;
        stations.truncate(MAX_BATCH_POINTS);
        generation.stats.origin_stations = stations.len();

        if stations.is_empty() {
            return generation;
        }

        generation.stats.call();
        let Some(etas) = self
            .providers
            .fetch_batch_eta_to_destinations(origin.lng, origin.lat, &stations)
            .await
        else {
            generation.stats.failed();
            return generation;
        };

        let screening = screen_stations(&stations, &etas, self.config);
        generation.stats.origin_screened = screening.stations.len();
        generation.stats.origin_expanded_window = screening.used_expanded;

        let per_station: Vec<Generation> = stream::iter(screening.stations)
            .map(|station| self.taxi_then_transit_via(request, station))
            .buffered(self.config.station_fanout.max(1))
            .collect()
            .await;

        for outcome in per_station {
            generation.absorb(outcome);
        }
        generation
    }

    async fn taxi_then_transit_via(&self, request: &RouteRequest, station: Station) -> Generation {
        let (origin, dest) = (&request.origin, &request.destination);
        let mut generation = Generation::default();

        generation.stats.call();
        let Some(eta) = self
            .providers
            .fetch_driving_eta(origin.lng, origin.lat, station.x, station.y)
            .await
        else {
            generation.stats.failed();
            generation.stats.stations_skipped += 1;
            return generation;
        };

        generation.stats.call();
        let itineraries = match self
            .providers
            .fetch_transit_itineraries(station.x, station.y, dest.lng, dest.lat)
            .await
        {
            Some(its) if !its.is_empty() => its,
            Some(_) => {
                generation.stats.stations_skipped += 1;
                return generation;
            }
            None => {
                generation.stats.failed();
                generation.stats.stations_skipped += 1;
                return generation;
            }
        };

        let stop = station.to_location();
        for (i, itinerary) in itineraries
            .iter()
            .take(self.config.max_mixed_itineraries)
            .enumerate()
        {
            let legs = vec![
                self.taxi_leg(origin.clone(), stop.clone(), &eta),
                RouteLeg::transit(stop.clone(), dest.clone(), itinerary),
            ];
            let id = format!("taxi-transit-{}-{}-{i}", station.id, itinerary.path_type);
            let candidate = itinerary_walk_time(itinerary).and_then(|walk| {
                let walk = walk + self.config.platform_buffer_min;
                RouteCandidate::new(id, RouteType::TaxiTransit, legs, walk, &request.constraints)
            });

            self.keep_if_feasible(&mut generation, candidate);
        }

        generation
    }

    /// Transit from the origin to a station near the destination, then a taxi.
    async fn transit_then_taxi(&self, request: &RouteRequest) -> Generation {
        let dest = &request.destination;
        let mut generation = Generation::default();

        let radius = poi_search_radius(request.constraints.max_walk_min);
        generation.stats.call();
        let mut stations = self
            .providers
            .fetch_nearby_stations(dest.lng, dest.lat, radius)
            .await;
        stations.truncate(MAX_BATCH_POINTS);
        generation.stats.destination_stations = stations.len();

        if stations.is_empty() {
            return generation;
        }

        generation.stats.call();
        let Some(etas) = self
            .providers
            .fetch_batch_eta_from_origins(&stations, dest.lng, dest.lat)
            .await
        else {
            generation.stats.failed();
            return generation;
        };

        let screening = screen_stations(&stations, &etas, self.config);
        generation.stats.destination_screened = screening.stations.len();
        generation.stats.destination_expanded_window = screening.used_expanded;

        let per_station: Vec<Generation> = stream::iter(screening.stations)
            .map(|station| self.transit_then_taxi_via(request, station))
            .buffered(self.config.station_fanout.max(1))
            .collect()
            .await;

        for outcome in per_station {
            generation.absorb(outcome);
        }
        generation
    }

    async fn transit_then_taxi_via(&self, request: &RouteRequest, station: Station) -> Generation {
        let (origin, dest) = (&request.origin, &request.destination);
        let mut generation = Generation::default();

        generation.stats.call();
        let itineraries = match self
            .providers
            .fetch_transit_itineraries(origin.lng, origin.lat, station.x, station.y)
            .await
        {
            Some(its) if !its.is_empty() => its,
            Some(_) => {
                generation.stats.stations_skipped += 1;
                return generation;
            }
            None => {
                generation.stats.failed();
                generation.stats.stations_skipped += 1;
                return generation;
            }
        };

        generation.stats.call();
        let Some(eta) = self
            .providers
            .fetch_driving_eta(station.x, station.y, dest.lng, dest.lat)
            .await
        else {
            generation.stats.failed();
            generation.stats.stations_skipped += 1;
            return generation;
        };

        let stop = station.to_location();
        for (i, itinerary) in itineraries
            .iter()
            .take(self.config.max_mixed_itineraries)
            .enumerate()
        {
            let legs = vec![
                RouteLeg::transit(origin.clone(), stop.clone(), itinerary),
                self.taxi_leg(stop.clone(), dest.clone(), &eta),
            ];
            let id = format!("transit-taxi-{}-{}-{i}", station.id, itinerary.path_type);
            let candidate = itinerary_walk_time(itinerary).and_then(|walk| {
                let walk = walk + self.config.platform_buffer_min;
                RouteCandidate::new(id, RouteType::TransitTaxi, legs, walk, &request.constraints)
            });

            self.keep_if_feasible(&mut generation, candidate);
        }

        generation
    }

    /// Mixed candidates are only worth returning when they fit the budget.
    fn keep_if_feasible(
        &self,
        generation: &mut Generation,
        candidate: Result<RouteCandidate, DomainError>,
    ) {
        match candidate {
            Ok(c) if c.is_feasible() => {
                generation.stats.mixed_kept += 1;
                generation.candidates.push(c);
            }
            Ok(_) => generation.stats.mixed_discarded += 1,
            Err(e) => warn!(error = %e, "Dropping malformed route candidate"),
        }
    }

    /// Build a taxi leg, estimating the fare when the provider gave none.
    fn taxi_leg(&self, from: Location, to: Location, eta: &DrivingEta) -> RouteLeg {
        let (fare_krw, fare_estimated) = match eta.taxi_fare_krw.filter(|&f| f > 0) {
            Some(fare) => (fare, false),
            None => (self.config.fallback_taxi_fare(eta.distance_m), true),
        };

        RouteLeg::taxi(
            from,
            to,
            eta.duration_sec.div_ceil(60) + self.config.taxi_pickup_buffer_min,
            TaxiDetails {
                distance_m: eta.distance_m,
                duration_sec: eta.duration_sec,
                fare_krw,
                toll_krw: eta.toll_fare_krw.unwrap_or(0),
                fare_estimated,
            },
        )
    }
}
