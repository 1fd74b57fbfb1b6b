//! Station screening by taxi ETA.
//!
//! A taxi ride to a boarding point is only worth taking when it is short
//! enough to beat walking yet long enough to be worth paying for. Stations
//! are kept when their batch ETA falls inside a window of minutes; if too
//! few pass the preferred window, a wider one is applied to the same input
//! and its result replaces the first.

use tracing::debug;

use crate::domain::{BatchEta, Station};

use super::config::{EtaWindow, PlannerConfig};

/// Result of screening one station list.
#[derive(Debug, Clone, PartialEq)]
pub struct Screening {
    /// Surviving stations, in input order, truncated to the configured cap.
    pub stations: Vec<Station>,
    /// Stations that passed the primary window.
    pub primary_count: usize,
    /// Whether the expanded window was used.
    pub used_expanded: bool,
}

/// Keep stations whose ETA lies within `window`.
///
/// Stations are paired positionally with `etas`. A station with no ETA
/// entry (missing or `None`) is dropped.
pub fn screen_stations_by_eta(
    stations: &[Station],
    etas: &[Option<BatchEta>],
    window: EtaWindow,
) -> Vec<Station> {
    stations
        .iter()
        .zip(etas)
        .filter_map(|(station, eta)| {
            let minutes = f64::from(eta.as_ref()?.duration_sec) / 60.0;
            window.contains(minutes).then(|| station.clone())
        })
        .collect()
}

/// Apply the primary window, fall back to the expanded one, then cap.
pub fn screen_stations(
    stations: &[Station],
    etas: &[Option<BatchEta>],
    config: &PlannerConfig,
) -> Screening {
    let primary = screen_stations_by_eta(stations, etas, config.primary_window);
    let primary_count = primary.len();

    let (mut selected, used_expanded) = if primary_count < config.min_screened_stations {
        (
            screen_stations_by_eta(stations, etas, config.expanded_window),
            true,
        )
    } else {
        (primary, false)
    };

    selected.truncate(config.max_screened_stations);

    debug!(
        input = stations.len(),
        primary = primary_count,
        selected = selected.len(),
        used_expanded,
        "Screened stations by taxi ETA"
    );

    Screening {
        stations: selected,
        primary_count,
        used_expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str) -> Station {
        Station {
            id: id.to_string(),
            name: format!("Station {id}"),
            x: 127.0,
            y: 37.5,
            station_type: "SW8".to_string(),
        }
    }

    fn eta_min(mins: u32) -> Option<BatchEta> {
        Some(BatchEta {
            duration_sec: mins * 60,
            distance_m: mins * 400,
        })
    }

    fn ids(stations: &[Station]) -> Vec<&str> {
        stations.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn primary_window_filter() {
        let stations: Vec<_> = ["a", "b", "c", "d", "e"].into_iter().map(station).collect();
        let etas = vec![eta_min(5), eta_min(6), eta_min(7), eta_min(10), eta_min(13)];

        let passed = screen_stations_by_eta(&stations, &etas, EtaWindow::new(6.0, 9.0));
        assert_eq!(ids(&passed), vec!["b", "c"]);
    }

    #[test]
    fn falls_back_to_expanded_window() {
        let stations: Vec<_> = ["a", "b", "c", "d", "e"].into_iter().map(station).collect();
        let etas = vec![eta_min(5), eta_min(6), eta_min(7), eta_min(10), eta_min(13)];

        let result = screen_stations(&stations, &etas, &PlannerConfig::default());

        assert_eq!(result.primary_count, 2);
        assert!(result.used_expanded);
        assert_eq!(ids(&result.stations), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn keeps_primary_when_enough_pass() {
        let stations: Vec<_> = (0..7).map(|i| station(&i.to_string())).collect();
        let etas = vec![
            eta_min(6),
            eta_min(7),
            eta_min(8),
            eta_min(9),
            eta_min(6),
            eta_min(11),
            eta_min(5),
        ];

        let result = screen_stations(&stations, &etas, &PlannerConfig::default());

        assert!(!result.used_expanded);
        assert_eq!(result.primary_count, 5);
        assert_eq!(ids(&result.stations), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn fallback_replaces_rather_than_unions() {
        // Primary keeps station "p" only; expanded window excludes nothing
        // extra here but is applied to the whole input, not added to "p".
        let stations: Vec<_> = ["p", "q"].into_iter().map(station).collect();
        let etas = vec![eta_min(7), eta_min(12)];

        let result = screen_stations(&stations, &etas, &PlannerConfig::default());

        assert!(result.used_expanded);
        assert_eq!(ids(&result.stations), vec!["p", "q"]);
    }

    #[test]
    fn truncates_to_cap() {
        let stations: Vec<_> = (0..20).map(|i| station(&i.to_string())).collect();
        let etas: Vec<_> = (0..20).map(|_| eta_min(7)).collect();

        let result = screen_stations(&stations, &etas, &PlannerConfig::default());

        assert_eq!(result.stations.len(), 15);
        assert_eq!(result.stations[0].id, "0");
        assert_eq!(result.stations[14].id, "14");
    }

    #[test]
    fn missing_etas_drop_stations() {
        let stations: Vec<_> = ["a", "b", "c"].into_iter().map(station).collect();
        let etas = vec![None, eta_min(7)];

        let passed = screen_stations_by_eta(&stations, &etas, EtaWindow::new(5.0, 12.0));
        assert_eq!(ids(&passed), vec!["b"]);
    }

    #[test]
    fn fractional_minutes_respect_bounds() {
        let stations: Vec<_> = ["a", "b"].into_iter().map(station).collect();
        let etas = vec![
            Some(BatchEta {
                duration_sec: 359,
                distance_m: 0,
            }),
            Some(BatchEta {
                duration_sec: 540,
                distance_m: 0,
            }),
        ];

        let passed = screen_stations_by_eta(&stations, &etas, EtaWindow::new(6.0, 9.0));
        assert_eq!(ids(&passed), vec!["b"]);
    }
}
