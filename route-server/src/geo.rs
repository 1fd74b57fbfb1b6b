//! Geographic and timing helpers.
//!
//! Distances use the haversine formula with a fixed Earth radius so results
//! are reproducible across runs. Walking estimates add fixed per-ride
//! penalties because transit providers report street walking only, not
//! in-station transfer walking.

use chrono::{DateTime, Duration, FixedOffset};

use crate::domain::Location;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Assumed walking speed in metres per minute.
pub const WALK_SPEED_M_PER_MIN: f64 = 70.0;

/// Minutes added per subway ride for in-station walking.
pub const SUBWAY_TRANSFER_PENALTY_MIN: u32 = 3;

/// Minutes added per bus ride.
pub const BUS_TRANSFER_PENALTY_MIN: u32 = 1;

/// Slack factor applied to straight-line walking reach.
const POI_RADIUS_SLACK: f64 = 1.2;

/// Smallest nearby-station search radius, in metres.
pub const MIN_POI_RADIUS_M: u32 = 800;

/// Largest nearby-station search radius, in metres.
pub const MAX_POI_RADIUS_M: u32 = 3000;

/// Coordinate resolution for lookup keys, in degrees (about one metre).
pub const COORD_QUANTUM_DEG: f64 = 1e-5;

/// Great-circle distance between two locations, in metres.
pub fn distance_meters(a: &Location, b: &Location) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Minutes needed to walk `distance_m` metres, rounded up.
pub fn walk_minutes(distance_m: f64) -> u32 {
    if distance_m <= 0.0 {
        return 0;
    }
    (distance_m / WALK_SPEED_M_PER_MIN).ceil() as u32
}

/// Estimated total walking time for a transit itinerary.
///
/// `ceil(walk / 70) + 3 × subway rides + 1 × bus ride`.
pub fn walk_time_min(total_walk_m: f64, subway_transfers: u32, bus_transfers: u32) -> u32 {
    walk_minutes(total_walk_m)
        + subway_transfers * SUBWAY_TRANSFER_PENALTY_MIN
        + bus_transfers * BUS_TRANSFER_PENALTY_MIN
}

/// Radius for the nearby-station search, in metres.
///
/// How far one could walk within the budget, with 20% slack for
/// non-straight paths, clamped to `[800, 3000]`.
pub fn poi_search_radius(max_walk_min: u32) -> u32 {
    let reach = f64::from(max_walk_min) * WALK_SPEED_M_PER_MIN * POI_RADIUS_SLACK;
    reach.clamp(f64::from(MIN_POI_RADIUS_M), f64::from(MAX_POI_RADIUS_M)) as u32
}

/// Arrival time after each of a sequence of durations (in minutes).
///
/// Output has one entry per input duration and is non-decreasing.
pub fn arrival_times(
    departure: DateTime<FixedOffset>,
    durations_min: impl IntoIterator<Item = u32>,
) -> Vec<DateTime<FixedOffset>> {
    durations_min
        .into_iter()
        .scan(departure, |at, mins| {
            *at += Duration::minutes(i64::from(mins));
            Some(*at)
        })
        .collect()
}

/// Snap a coordinate to the key grid.
///
/// Two coordinates that differ by less than half a quantum map to the same
/// key, so float noise in provider echoes doesn't miss a cache entry.
pub fn quantize(deg: f64) -> i64 {
    (deg / COORD_QUANTUM_DEG).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn seoul_station() -> Location {
        Location::new("Seoul Station", 37.5547, 126.9707)
    }

    fn gangnam() -> Location {
        Location::new("Gangnam", 37.4979, 127.0276)
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_meters(&gangnam(), &gangnam()), 0.0);
    }

    #[test]
    fn distance_is_symmetric_and_plausible() {
        let d1 = distance_meters(&seoul_station(), &gangnam());
        let d2 = distance_meters(&gangnam(), &seoul_station());

        assert!((d1 - d2).abs() < 1e-6);
        // Seoul Station to Gangnam is roughly 8 km as the crow flies
        assert!(d1 > 7_500.0 && d1 < 8_500.0, "got {d1}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Location::new("a", 0.0, 0.0);
        let b = Location::new("b", 1.0, 0.0);
        let d = distance_meters(&a, &b);
        // 2πR / 360
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");
    }

    #[test]
    fn short_walk_minutes() {
        assert_eq!(walk_minutes(650.0), 10);
        assert_eq!(walk_minutes(70.0), 1);
        assert_eq!(walk_minutes(71.0), 2);
        assert_eq!(walk_minutes(0.0), 0);
    }

    #[test]
    fn walk_time_with_transfer_penalties() {
        assert_eq!(walk_time_min(1000.0, 1, 2), 20);
        assert_eq!(walk_time_min(0.0, 0, 0), 0);
        assert_eq!(walk_time_min(0.0, 2, 0), 6);
    }

    #[test]
    fn poi_radius_clamps() {
        assert_eq!(poi_search_radius(15), 1260);
        assert_eq!(poi_search_radius(2), 800);
        assert_eq!(poi_search_radius(60), 3000);
        assert_eq!(poi_search_radius(0), 800);
    }

    #[test]
    fn arrival_times_accumulate() {
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        let dep = kst.with_ymd_and_hms(2024, 5, 1, 23, 50, 0).unwrap();

        let times = arrival_times(dep, [5, 0, 20]);

        assert_eq!(times.len(), 3);
        assert_eq!(times[0], kst.with_ymd_and_hms(2024, 5, 1, 23, 55, 0).unwrap());
        assert_eq!(times[1], times[0]);
        // Crosses midnight
        assert_eq!(times[2], kst.with_ymd_and_hms(2024, 5, 2, 0, 15, 0).unwrap());
    }

    #[test]
    fn quantize_snaps_to_grid() {
        assert_eq!(quantize(127.02760), 12_702_760);
        assert_eq!(quantize(127.027601), quantize(127.02760));
        assert_eq!(quantize(-0.000004), 0);
        assert_ne!(quantize(37.49790), quantize(37.49791));
    }

    #[test]
    fn arrival_times_empty() {
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        let dep = kst.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert!(arrival_times(dep, []).is_empty());
    }
}
