//! Provider-neutral results from transit and driving providers.
//!
//! Concrete adapters convert their vendor DTOs into these types, so the
//! planner never sees a vendor payload.

use serde::{Deserialize, Serialize};

/// Mode of one itinerary leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransitMode {
    Walk,
    Bus,
    Subway,
    /// Any other vehicle the provider reports (train, ferry, express bus...)
    Other,
}

impl TransitMode {
    /// Parse a provider mode string. Unknown modes map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "WALK" => TransitMode::Walk,
            "BUS" => TransitMode::Bus,
            "SUBWAY" => TransitMode::Subway,
            _ => TransitMode::Other,
        }
    }
}

/// One leg of a transit itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryLeg {
    pub mode: TransitMode,
    pub from_name: String,
    pub from_x: f64,
    pub from_y: f64,
    pub to_name: String,
    pub to_x: f64,
    pub to_y: f64,
    /// Section time in seconds
    pub section_time_sec: u32,
    /// Distance in metres
    pub distance_m: u32,
    /// Route display name (e.g., "지하철 2호선", "간선:146")
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub route_id: Option<String>,
    #[serde(default)]
    pub route_color: Option<String>,
    #[serde(default)]
    pub stop_count: Option<u32>,
}

/// One complete public-transit route proposed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Total time in seconds
    pub total_time_sec: u32,
    /// Total fare in KRW, if the provider reported one
    #[serde(default)]
    pub total_fare_krw: Option<u32>,
    pub transfer_count: u32,
    /// Provider path type (1 = subway, 2 = bus, 3 = mixed, ...)
    pub path_type: u32,
    pub legs: Vec<ItineraryLeg>,
}

impl Itinerary {
    /// Sum of WALK leg distances in metres, or `None` on overflow.
    pub fn walk_distance_m(&self) -> Option<u32> {
        self.legs
            .iter()
            .filter(|l| l.mode == TransitMode::Walk)
            .try_fold(0u32, |acc, l| acc.checked_add(l.distance_m))
    }

    /// Number of legs ridden in the given mode.
    pub fn count_mode(&self, mode: TransitMode) -> u32 {
        self.legs.iter().filter(|l| l.mode == mode).count() as u32
    }

    /// Total time rounded up to whole minutes.
    pub fn total_time_min(&self) -> u32 {
        self.total_time_sec.div_ceil(60)
    }
}

/// Point-to-point driving estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivingEta {
    pub duration_sec: u32,
    pub distance_m: u32,
    #[serde(default)]
    pub taxi_fare_krw: Option<u32>,
    #[serde(default)]
    pub toll_fare_krw: Option<u32>,
}

/// One entry of a batch (one-to-many / many-to-one) driving estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEta {
    pub duration_sec: u32,
    #[serde(default)]
    pub distance_m: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(mode: TransitMode, distance_m: u32) -> ItineraryLeg {
        ItineraryLeg {
            mode,
            from_name: "A".into(),
            from_x: 127.0,
            from_y: 37.5,
            to_name: "B".into(),
            to_x: 127.01,
            to_y: 37.51,
            section_time_sec: 300,
            distance_m,
            route: None,
            route_id: None,
            route_color: None,
            stop_count: None,
        }
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(TransitMode::parse("WALK"), TransitMode::Walk);
        assert_eq!(TransitMode::parse("bus"), TransitMode::Bus);
        assert_eq!(TransitMode::parse("SUBWAY"), TransitMode::Subway);
        assert_eq!(TransitMode::parse("EXPRESSBUS"), TransitMode::Other);
    }

    #[test]
    fn itinerary_aggregates() {
        let itinerary = Itinerary {
            total_time_sec: 1801,
            total_fare_krw: Some(1400),
            transfer_count: 1,
            path_type: 3,
            legs: vec![
                leg(TransitMode::Walk, 300),
                leg(TransitMode::Subway, 5000),
                leg(TransitMode::Walk, 120),
                leg(TransitMode::Bus, 2500),
                leg(TransitMode::Walk, 80),
            ],
        };

        assert_eq!(itinerary.walk_distance_m(), Some(500));
        assert_eq!(itinerary.count_mode(TransitMode::Subway), 1);
        assert_eq!(itinerary.count_mode(TransitMode::Bus), 1);
        assert_eq!(itinerary.total_time_min(), 31);
    }

    #[test]
    fn overflowing_walk_distance_is_none() {
        let itinerary = Itinerary {
            total_time_sec: 600,
            total_fare_krw: None,
            transfer_count: 0,
            path_type: 1,
            legs: vec![leg(TransitMode::Walk, u32::MAX), leg(TransitMode::Walk, 10)],
        };

        assert_eq!(itinerary.walk_distance_m(), None);
    }
}
