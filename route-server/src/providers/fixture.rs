//! Fixture providers for offline development and testing.
//!
//! Loads a JSON scenario and serves it as if it came from the live
//! vendors. Scenario keys are coordinates: `"x,y"` for a point and
//! `"ox,oy->dx,dy"` for a pair, longitude first. Keys are matched on
//! the same coordinate grid the cache uses.
//!
//! ```json
//! {
//!   "itineraries": { "127.0,37.5->127.1,37.6": [ ... ] },
//!   "driving":     { "127.0,37.5->127.1,37.6": { "durationSec": 1500, "distanceM": 14000 } },
//!   "stations":    { "127.0,37.5": [ { "id": "S1", "name": "강변역", "x": 127.09, "y": 37.53, "type": "SW8" } ] }
//! }
//! ```
//!
//! Batch ETAs are derived from the `driving` table. Pairs missing from the
//! scenario answer like a provider that found nothing.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{BatchEta, DrivingEta, Itinerary, Station};
use crate::geo::quantize;
use crate::planner::{MAX_BATCH_POINTS, RouteProviders};

/// Errors loading a fixture scenario.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid fixture key {0:?}")]
    BadKey(String),
}

type PointKey = (i64, i64);
type PairKey = (PointKey, PointKey);

fn point_key(x: f64, y: f64) -> PointKey {
    (quantize(x), quantize(y))
}

fn pair_key(ox: f64, oy: f64, dx: f64, dy: f64) -> PairKey {
    (point_key(ox, oy), point_key(dx, dy))
}

fn parse_point(s: &str) -> Option<PointKey> {
    let (x, y) = s.split_once(',')?;
    Some(point_key(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn parse_pair(s: &str) -> Option<PairKey> {
    let (from, to) = s.split_once("->")?;
    Some((parse_point(from)?, parse_point(to)?))
}

fn rekey<K: Eq + Hash, V>(
    map: HashMap<String, V>,
    parse: impl Fn(&str) -> Option<K>,
) -> Result<HashMap<K, V>, FixtureError> {
    map.into_iter()
        .map(|(k, v)| match parse(&k) {
            Some(key) => Ok((key, v)),
            None => Err(FixtureError::BadKey(k)),
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct Scenario {
    #[serde(default)]
    itineraries: HashMap<String, Vec<Itinerary>>,
    #[serde(default)]
    driving: HashMap<String, DrivingEta>,
    #[serde(default)]
    stations: HashMap<String, Vec<Station>>,
}

/// Providers that serve a pre-recorded scenario.
#[derive(Debug, Clone, Default)]
pub struct FixtureProviders {
    itineraries: HashMap<PairKey, Vec<Itinerary>>,
    driving: HashMap<PairKey, DrivingEta>,
    stations: HashMap<PointKey, Vec<Station>>,
}

impl FixtureProviders {
    /// Load a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let fixture = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            itineraries = fixture.itineraries.len(),
            driving = fixture.driving.len(),
            stations = fixture.stations.len(),
            "Loaded fixture scenario"
        );
        Ok(fixture)
    }

    /// Parse a scenario from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let scenario: Scenario = serde_json::from_str(json)?;

        Ok(Self {
            itineraries: rekey(scenario.itineraries, parse_pair)?,
            driving: rekey(scenario.driving, parse_pair)?,
            stations: rekey(scenario.stations, parse_point)?,
        })
    }

    fn batch_entry(&self, key: PairKey) -> Option<BatchEta> {
        self.driving.get(&key).map(|eta| BatchEta {
            duration_sec: eta.duration_sec,
            distance_m: eta.distance_m,
        })
    }
}

impl RouteProviders for FixtureProviders {
    async fn fetch_transit_itineraries(
        &self,
        origin_x: f64,
        origin_y: f64,
        dest_x: f64,
        dest_y: f64,
    ) -> Option<Vec<Itinerary>> {
        let key = pair_key(origin_x, origin_y, dest_x, dest_y);
        let found = self.itineraries.get(&key).cloned();
        if found.is_none() {
            debug!(?key, "No fixture itineraries");
        }
        Some(found.unwrap_or_default())
    }

    async fn fetch_driving_eta(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        dest_lng: f64,
        dest_lat: f64,
    ) -> Option<DrivingEta> {
        self.driving
            .get(&pair_key(origin_lng, origin_lat, dest_lng, dest_lat))
            .copied()
    }

    async fn fetch_batch_eta_to_destinations(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        destinations: &[Station],
    ) -> Option<Vec<Option<BatchEta>>> {
        let origin = point_key(origin_lng, origin_lat);
        Some(
            destinations
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    (i < MAX_BATCH_POINTS)
                        .then(|| self.batch_entry((origin, point_key(s.x, s.y))))
                        .flatten()
                })
                .collect(),
        )
    }

    async fn fetch_batch_eta_from_origins(
        &self,
        origins: &[Station],
        dest_lng: f64,
        dest_lat: f64,
    ) -> Option<Vec<Option<BatchEta>>> {
        let dest = point_key(dest_lng, dest_lat);
        Some(
            origins
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    (i < MAX_BATCH_POINTS)
                        .then(|| self.batch_entry((point_key(s.x, s.y), dest)))
                        .flatten()
                })
                .collect(),
        )
    }

    async fn fetch_nearby_stations(&self, x: f64, y: f64, _radius_m: u32) -> Vec<Station> {
        self.stations
            .get(&point_key(x, y))
            .cloned()
            .unwrap_or_default()
    }
}
