//! Planner configuration.

/// An inclusive window of taxi minutes used for station screening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaWindow {
    pub low_min: f64,
    pub high_min: f64,
}

impl EtaWindow {
    /// Create a new window.
    pub const fn new(low_min: f64, high_min: f64) -> Self {
        Self { low_min, high_min }
    }

    /// Returns true if `minutes` falls inside the window (inclusive).
    pub fn contains(&self, minutes: f64) -> bool {
        minutes >= self.low_min && minutes <= self.high_min
    }
}

/// Tunable parameters for candidate generation and selection.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Below this straight-line distance (metres) only a walk is offered.
    pub short_walk_threshold_m: f64,

    /// Transit itineraries considered for transit-only candidates.
    pub max_transit_itineraries: usize,

    /// Transit itineraries considered per station for mixed candidates.
    pub max_mixed_itineraries: usize,

    /// Minutes added to every taxi ride for waiting on pickup.
    pub taxi_pickup_buffer_min: u32,

    /// Minutes of walking added between taxi drop-off and the platform.
    pub platform_buffer_min: u32,

    /// Base fare used when the driving provider returns no fare (KRW).
    pub taxi_base_fare_krw: u32,

    /// Per-kilometre fare used when the driving provider returns no fare (KRW).
    pub taxi_fare_per_km_krw: u32,

    /// Preferred taxi-to-station window.
    pub primary_window: EtaWindow,

    /// Wider window used when too few stations pass the primary one.
    pub expanded_window: EtaWindow,

    /// Stations that must pass the primary window to avoid the fallback.
    pub min_screened_stations: usize,

    /// Maximum stations explored per mixed variant.
    pub max_screened_stations: usize,

    /// Per-station work items run concurrently.
    pub station_fanout: usize,

    /// Routes returned when feasible routes exist.
    pub max_feasible_results: usize,

    /// Routes returned for the closest-achievable fallback.
    pub max_fallback_results: usize,

    /// Include generation statistics in responses.
    pub include_debug: bool,
}

impl PlannerConfig {
    /// Fare estimate for a taxi ride of `distance_m` metres.
    pub fn fallback_taxi_fare(&self, distance_m: u32) -> u32 {
        let per_km = f64::from(self.taxi_fare_per_km_krw);
        (f64::from(self.taxi_base_fare_krw) + f64::from(distance_m) / 1000.0 * per_km).ceil()
            as u32
    }

    /// Enable or disable the debug block.
    pub fn with_debug(mut self, include_debug: bool) -> Self {
        self.include_debug = include_debug;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            short_walk_threshold_m: 700.0,
            max_transit_itineraries: 5,
            max_mixed_itineraries: 3,
            taxi_pickup_buffer_min: 2,
            platform_buffer_min: 1,
            taxi_base_fare_krw: 4800,
            taxi_fare_per_km_krw: 1000,
            primary_window: EtaWindow::new(6.0, 9.0),
            expanded_window: EtaWindow::new(5.0, 12.0),
            min_screened_stations: 5,
            max_screened_stations: 15,
            station_fanout: 5,
            max_feasible_results: 10,
            max_fallback_results: 5,
            include_debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.short_walk_threshold_m, 700.0);
        assert_eq!(config.max_transit_itineraries, 5);
        assert_eq!(config.max_mixed_itineraries, 3);
        assert_eq!(config.taxi_pickup_buffer_min, 2);
        assert_eq!(config.platform_buffer_min, 1);
        assert_eq!(config.primary_window, EtaWindow::new(6.0, 9.0));
        assert_eq!(config.expanded_window, EtaWindow::new(5.0, 12.0));
        assert_eq!(config.min_screened_stations, 5);
        assert_eq!(config.max_screened_stations, 15);
        assert_eq!(config.max_feasible_results, 10);
        assert_eq!(config.max_fallback_results, 5);
        assert!(!config.include_debug);
    }

    #[test]
    fn fallback_fare() {
        let config = PlannerConfig::default();

        assert_eq!(config.fallback_taxi_fare(8000), 12800);
        assert_eq!(config.fallback_taxi_fare(0), 4800);
        assert_eq!(config.fallback_taxi_fare(1250), 6050);
    }

    #[test]
    fn window_is_inclusive() {
        let window = EtaWindow::new(6.0, 9.0);

        assert!(window.contains(6.0));
        assert!(window.contains(9.0));
        assert!(window.contains(7.5));
        assert!(!window.contains(5.99));
        assert!(!window.contains(9.01));
    }

    #[test]
    fn with_debug() {
        let config = PlannerConfig::default().with_debug(true);
        assert!(config.include_debug);
    }
}
