//! Route candidates.
//!
//! A `RouteCandidate` is one complete, comparable way of getting from the
//! origin to the destination.
//!
//! # Invariants
//!
//! - At least one leg
//! - Consecutive legs connect (`legs[i].to == legs[i + 1].from`)
//! - `total_time_min` and `total_cost_krw` are the sums over the legs
//! - `slack_min == max_time_min - total_time_min`

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::error::DomainError;
use super::leg::RouteLeg;
use crate::geo::arrival_times;

/// The shape of a candidate route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteType {
    TransitOnly,
    TaxiOnly,
    TaxiTransit,
    TransitTaxi,
    WalkOnly,
}

impl RouteType {
    /// Stable string form, used in candidate ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::TransitOnly => "transit-only",
            RouteType::TaxiOnly => "taxi-only",
            RouteType::TaxiTransit => "taxi-transit",
            RouteType::TransitTaxi => "transit-taxi",
            RouteType::WalkOnly => "walk-only",
        }
    }
}

/// The caller's time and walking budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    pub max_time_min: u32,
    pub max_walk_min: u32,
    pub require_taxi: bool,
    /// Any value of 1 or more enables taxi+transit combinations.
    /// Routes never contain more than one taxi leg regardless.
    pub taxi_max_segments: u32,
}

impl Constraints {
    /// Create constraints with no taxi requirement and one taxi segment allowed.
    pub fn new(max_time_min: u32, max_walk_min: u32) -> Self {
        Self {
            max_time_min,
            max_walk_min,
            require_taxi: false,
            taxi_max_segments: 1,
        }
    }

    /// Returns true if mixed taxi/transit candidates should be generated.
    pub fn allows_mixed(&self) -> bool {
        self.taxi_max_segments >= 1
    }

    /// Returns true if a route with these totals fits both budgets.
    pub fn admits(&self, total_time_min: u32, walk_time_min: u32) -> bool {
        total_time_min <= self.max_time_min && walk_time_min <= self.max_walk_min
    }
}

/// A complete candidate route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCandidate {
    id: String,
    #[serde(rename = "type")]
    route_type: RouteType,
    total_time_min: u32,
    total_cost_krw: u32,
    walk_time_min: u32,
    has_taxi: bool,
    legs: Vec<RouteLeg>,
    slack_min: i64,
    is_feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    departure_time: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arrival_time: Option<DateTime<FixedOffset>>,
}

impl RouteCandidate {
    /// Assemble a candidate from its legs.
    ///
    /// Totals, slack and feasibility are derived here. `walk_time_min` is
    /// supplied by the caller because it includes penalties the legs
    /// don't carry (in-station transfers, platform buffers).
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty, consecutive legs don't connect, or
    /// a time or cost total overflows.
    pub fn new(
        id: impl Into<String>,
        route_type: RouteType,
        legs: Vec<RouteLeg>,
        walk_time_min: u32,
        constraints: &Constraints,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        for (index, pair) in legs.windows(2).enumerate() {
            if pair[0].to() != pair[1].from() {
                return Err(DomainError::LegsNotConnected {
                    index,
                    to: pair[0].to().name.clone(),
                    from: pair[1].from().name.clone(),
                });
            }
        }

        let total_time_min = checked_total(legs.iter().map(RouteLeg::duration_min))
            .ok_or(DomainError::TotalOverflow { total: "time" })?;
        let total_cost_krw = checked_total(legs.iter().map(RouteLeg::cost_krw))
            .ok_or(DomainError::TotalOverflow { total: "cost" })?;
        let has_taxi = legs.iter().any(RouteLeg::is_taxi);

        Ok(Self {
            id: id.into(),
            route_type,
            total_time_min,
            total_cost_krw,
            walk_time_min,
            has_taxi,
            legs,
            slack_min: i64::from(constraints.max_time_min) - i64::from(total_time_min),
            is_feasible: constraints.admits(total_time_min, walk_time_min),
            departure_time: None,
            arrival_time: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn route_type(&self) -> RouteType {
        self.route_type
    }

    pub fn total_time_min(&self) -> u32 {
        self.total_time_min
    }

    pub fn total_cost_krw(&self) -> u32 {
        self.total_cost_krw
    }

    pub fn walk_time_min(&self) -> u32 {
        self.walk_time_min
    }

    pub fn has_taxi(&self) -> bool {
        self.has_taxi
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    pub fn slack_min(&self) -> i64 {
        self.slack_min
    }

    pub fn is_feasible(&self) -> bool {
        self.is_feasible
    }

    pub fn departure_time(&self) -> Option<DateTime<FixedOffset>> {
        self.departure_time
    }

    pub fn arrival_time(&self) -> Option<DateTime<FixedOffset>> {
        self.arrival_time
    }

    /// Stamp each leg with its arrival time, starting from `departure`.
    ///
    /// The candidate's arrival time is the last leg's arrival time.
    pub fn propagate_arrival_times(&mut self, departure: DateTime<FixedOffset>) {
        let arrivals = arrival_times(departure, self.legs.iter().map(RouteLeg::duration_min));
        for (leg, at) in self.legs.iter_mut().zip(&arrivals) {
            leg.set_arrival_time(*at);
        }
        self.departure_time = Some(departure);
        self.arrival_time = arrivals.last().copied();
    }
}

fn checked_total(mut values: impl Iterator<Item = u32>) -> Option<u32> {
    values.try_fold(0u32, u32::checked_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Itinerary, Location, TaxiDetails};
    use chrono::TimeZone;

    fn loc(name: &str, lat: f64, lng: f64) -> Location {
        Location::new(name, lat, lng)
    }

    fn taxi(from: Location, to: Location, mins: u32, fare: u32) -> RouteLeg {
        RouteLeg::taxi(
            from,
            to,
            mins,
            TaxiDetails {
                distance_m: 2500,
                duration_sec: (mins - 2) * 60,
                fare_krw: fare,
                toll_krw: 0,
                fare_estimated: false,
            },
        )
    }

    fn transit(from: Location, to: Location, mins: u32, fare: u32) -> RouteLeg {
        let itinerary = Itinerary {
            total_time_sec: mins * 60,
            total_fare_krw: Some(fare),
            transfer_count: 0,
            path_type: 1,
            legs: vec![],
        };
        RouteLeg::transit(from, to, &itinerary)
    }

    #[test]
    fn totals_are_sums_of_legs() {
        let origin = loc("Home", 37.51, 127.10);
        let station = loc("Jamsil", 37.5133, 127.1001);
        let dest = loc("City Hall", 37.5663, 126.9779);
        let constraints = Constraints::new(60, 15);

        let candidate = RouteCandidate::new(
            "taxi-transit-1-1-0",
            RouteType::TaxiTransit,
            vec![
                taxi(origin, station.clone(), 8, 5600),
                transit(station, dest, 35, 1400),
            ],
            6,
            &constraints,
        )
        .unwrap();

        assert_eq!(candidate.total_time_min(), 43);
        assert_eq!(candidate.total_cost_krw(), 7000);
        assert_eq!(candidate.slack_min(), 17);
        assert!(candidate.has_taxi());
        assert!(candidate.is_feasible());
    }

    #[test]
    fn slack_can_be_negative() {
        let constraints = Constraints::new(20, 15);
        let candidate = RouteCandidate::new(
            "transit-only-0",
            RouteType::TransitOnly,
            vec![transit(loc("A", 37.5, 127.0), loc("B", 37.6, 127.1), 45, 1400)],
            5,
            &constraints,
        )
        .unwrap();

        assert_eq!(candidate.slack_min(), -25);
        assert!(!candidate.is_feasible());
    }

    #[test]
    fn walk_budget_controls_feasibility() {
        let constraints = Constraints::new(60, 4);
        let candidate = RouteCandidate::new(
            "transit-only-0",
            RouteType::TransitOnly,
            vec![transit(loc("A", 37.5, 127.0), loc("B", 37.6, 127.1), 30, 1400)],
            5,
            &constraints,
        )
        .unwrap();

        assert!(!candidate.is_feasible());
    }

    #[test]
    fn overflowing_cost_rejected() {
        let station = loc("Jamsil", 37.5133, 127.1001);
        let result = RouteCandidate::new(
            "taxi-transit-1-1-0",
            RouteType::TaxiTransit,
            vec![
                taxi(loc("Home", 37.51, 127.10), station.clone(), 9, 5600),
                transit(station, loc("City Hall", 37.5663, 126.9779), 20, u32::MAX - 100),
            ],
            4,
            &Constraints::new(60, 15),
        );

        assert_eq!(result, Err(DomainError::TotalOverflow { total: "cost" }));
    }

    #[test]
    fn empty_legs_rejected() {
        let constraints = Constraints::new(60, 15);
        let result = RouteCandidate::new("x", RouteType::WalkOnly, vec![], 0, &constraints);
        assert_eq!(result, Err(DomainError::EmptyRoute));
    }

    #[test]
    fn disconnected_legs_rejected() {
        let constraints = Constraints::new(60, 15);
        let result = RouteCandidate::new(
            "x",
            RouteType::TaxiTransit,
            vec![
                taxi(loc("A", 37.5, 127.0), loc("B", 37.51, 127.01), 8, 5000),
                transit(loc("C", 37.52, 127.02), loc("D", 37.6, 127.1), 20, 1400),
            ],
            3,
            &constraints,
        );

        assert!(matches!(
            result,
            Err(DomainError::LegsNotConnected { index: 0, .. })
        ));
    }

    #[test]
    fn propagation_stamps_every_leg() {
        let origin = loc("Home", 37.51, 127.10);
        let station = loc("Jamsil", 37.5133, 127.1001);
        let dest = loc("City Hall", 37.5663, 126.9779);
        let constraints = Constraints::new(60, 15);

        let mut candidate = RouteCandidate::new(
            "taxi-transit",
            RouteType::TaxiTransit,
            vec![
                taxi(origin, station.clone(), 8, 5600),
                transit(station, dest, 35, 1400),
            ],
            6,
            &constraints,
        )
        .unwrap();

        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        let departure = kst.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        candidate.propagate_arrival_times(departure);

        let legs = candidate.legs();
        assert_eq!(
            legs[0].arrival_time(),
            Some(kst.with_ymd_and_hms(2024, 5, 1, 8, 38, 0).unwrap())
        );
        assert_eq!(
            legs[1].arrival_time(),
            Some(kst.with_ymd_and_hms(2024, 5, 1, 9, 13, 0).unwrap())
        );
        assert_eq!(candidate.departure_time(), Some(departure));
        assert_eq!(candidate.arrival_time(), legs[1].arrival_time());
    }

    #[test]
    fn serializes_route_type_kebab_case() {
        let constraints = Constraints::new(60, 15);
        let candidate = RouteCandidate::new(
            "walk-only",
            RouteType::WalkOnly,
            vec![RouteLeg::walk(
                loc("A", 37.5, 127.0),
                loc("B", 37.5, 127.0),
                0,
                0,
            )],
            0,
            &constraints,
        )
        .unwrap();

        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["type"], "walk-only");
        assert_eq!(json["isFeasible"], true);
        assert_eq!(json["slackMin"], 60);
    }
}
