//! Taxi and transit route planner.
//!
//! This module answers: "I need to get from here to there within this many
//! minutes and without walking more than this much; what is the cheapest
//! way?"
//!
//! Planning runs in two stages. Generation asks the providers for transit
//! itineraries and driving estimates and assembles every candidate route,
//! including taxi rides to or from stations picked by taxi ETA screening.
//! Selection then ranks the feasible candidates by cost, or falls back to
//! the fastest ones when nothing fits.

mod config;
mod generate;
mod provider;
mod screen;
mod select;


pub use config::{EtaWindow, PlannerConfig};
pub use generate::{Generation, GenerationStats, PlanError, Planner, RouteRequest};
pub use provider::{MAX_BATCH_POINTS, MAX_STATION_RADIUS_M, RouteProviders};
pub use screen::{Screening, screen_stations, screen_stations_by_eta};
pub use select::{RouteResponse, build_response, rank_by_time, rank_feasible};
