//! Route legs.
//!
//! A `RouteLeg` is one atomic movement within a route candidate. The
//! mode-specific payload lives in [`LegDetails`]; the leg kind is derived
//! from the payload at construction so the two can never disagree.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::itinerary::{Itinerary, ItineraryLeg, TransitMode};
use super::location::Location;

/// The kind of movement a leg represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    Walk,
    Taxi,
    Transit,
}

/// Payload for a walking leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkDetails {
    pub distance_m: u32,
}

/// Payload for a taxi leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxiDetails {
    pub distance_m: u32,
    pub duration_sec: u32,
    pub fare_krw: u32,
    pub toll_krw: u32,
    /// True when the fare came from the fallback formula rather than the provider
    pub fare_estimated: bool,
}

/// One ride or walk inside a transit leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitStep {
    pub mode: TransitMode,
    pub from: String,
    pub to: String,
    pub duration_min: u32,
    pub distance_m: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_count: Option<u32>,
}

impl From<&ItineraryLeg> for TransitStep {
    fn from(leg: &ItineraryLeg) -> Self {
        Self {
            mode: leg.mode,
            from: leg.from_name.clone(),
            to: leg.to_name.clone(),
            duration_min: leg.section_time_sec.div_ceil(60),
            distance_m: leg.distance_m,
            route: leg.route.clone(),
            route_id: leg.route_id.clone(),
            route_color: leg.route_color.clone(),
            stop_count: leg.stop_count,
        }
    }
}

/// Payload for a public-transit leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitDetails {
    /// Summed walking distance across WALK steps, in metres
    pub walk_distance_m: u32,
    pub bus_transfers: u32,
    pub subway_transfers: u32,
    pub path_type: u32,
    pub steps: Vec<TransitStep>,
}

impl TransitDetails {
    /// Summarise a provider itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            // Saturates; such itineraries never become candidates
            walk_distance_m: itinerary.walk_distance_m().unwrap_or(u32::MAX),
            bus_transfers: itinerary.count_mode(TransitMode::Bus),
            subway_transfers: itinerary.count_mode(TransitMode::Subway),
            path_type: itinerary.path_type,
            steps: itinerary.legs.iter().map(TransitStep::from).collect(),
        }
    }
}

/// Mode-specific leg payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LegDetails {
    Walk(WalkDetails),
    Taxi(TaxiDetails),
    Transit(TransitDetails),
}

impl LegDetails {
    /// Returns the leg kind for this payload.
    pub fn kind(&self) -> LegKind {
        match self {
            LegDetails::Walk(_) => LegKind::Walk,
            LegDetails::Taxi(_) => LegKind::Taxi,
            LegDetails::Transit(_) => LegKind::Transit,
        }
    }
}

/// One atomic movement within a route candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    #[serde(rename = "type")]
    kind: LegKind,
    from: Location,
    to: Location,
    duration_min: u32,
    cost_krw: u32,
    details: LegDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    arrival_time: Option<DateTime<FixedOffset>>,
}

impl RouteLeg {
    fn new(from: Location, to: Location, duration_min: u32, cost_krw: u32, details: LegDetails) -> Self {
        Self {
            kind: details.kind(),
            from,
            to,
            duration_min,
            cost_krw,
            details,
            arrival_time: None,
        }
    }

    /// A free walking leg.
    pub fn walk(from: Location, to: Location, distance_m: u32, duration_min: u32) -> Self {
        Self::new(
            from,
            to,
            duration_min,
            0,
            LegDetails::Walk(WalkDetails { distance_m }),
        )
    }

    /// A taxi leg. Cost is fare plus toll.
    pub fn taxi(from: Location, to: Location, duration_min: u32, details: TaxiDetails) -> Self {
        let cost = details.fare_krw.saturating_add(details.toll_krw);
        Self::new(from, to, duration_min, cost, LegDetails::Taxi(details))
    }

    /// A public-transit leg covering a whole provider itinerary.
    ///
    /// Duration is the itinerary's total time rounded up to minutes; cost is
    /// the itinerary fare, or zero when the provider omitted it.
    pub fn transit(from: Location, to: Location, itinerary: &Itinerary) -> Self {
        Self::new(
            from,
            to,
            itinerary.total_time_min(),
            itinerary.total_fare_krw.unwrap_or(0),
            LegDetails::Transit(TransitDetails::from_itinerary(itinerary)),
        )
    }

    pub fn kind(&self) -> LegKind {
        self.kind
    }

    pub fn from(&self) -> &Location {
        &self.from
    }

    pub fn to(&self) -> &Location {
        &self.to
    }

    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }

    pub fn cost_krw(&self) -> u32 {
        self.cost_krw
    }

    pub fn details(&self) -> &LegDetails {
        &self.details
    }

    pub fn arrival_time(&self) -> Option<DateTime<FixedOffset>> {
        self.arrival_time
    }

    pub(crate) fn set_arrival_time(&mut self, at: DateTime<FixedOffset>) {
        self.arrival_time = Some(at);
    }

    /// Returns true if this is a taxi leg.
    pub fn is_taxi(&self) -> bool {
        self.kind == LegKind::Taxi
    }
}
