//! Route selection and response assembly.
//!
//! Feasible routes are ranked cheapest first, ties broken by time. When
//! nothing fits the budget the fastest routes are returned instead, along
//! with the best achievable time and walk so the caller can relax the
//! constraints.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::debug;

use crate::domain::{Constraints, RouteCandidate};

use super::config::PlannerConfig;
use super::generate::GenerationStats;

/// The planner's answer to one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub success: bool,
    /// Best first.
    pub routes: Vec<RouteCandidate>,
    pub count: usize,
    pub no_feasible_route: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_possible_time_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_possible_walk_min: Option<u32>,
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<GenerationStats>,
}

/// Order candidates by cost, then time, keeping at most `limit`.
///
/// The sort is stable, so equal candidates keep generation order.
pub fn rank_feasible(mut candidates: Vec<RouteCandidate>, limit: usize) -> Vec<RouteCandidate> {
    candidates.sort_by_key(|c| (c.total_cost_krw(), c.total_time_min()));
    candidates.truncate(limit);
    candidates
}

/// Order candidates by time alone, keeping at most `limit`.
pub fn rank_by_time(mut candidates: Vec<RouteCandidate>, limit: usize) -> Vec<RouteCandidate> {
    candidates.sort_by_key(RouteCandidate::total_time_min);
    candidates.truncate(limit);
    candidates
}

/// Returns true if the candidate satisfies the caller's budget and taxi requirement.
fn is_acceptable(candidate: &RouteCandidate, constraints: &Constraints) -> bool {
    candidate.is_feasible() && (!constraints.require_taxi || candidate.has_taxi())
}

/// Stamp times on every candidate, pick the winners and package them.
pub fn build_response(
    mut candidates: Vec<RouteCandidate>,
    constraints: &Constraints,
    departure: DateTime<FixedOffset>,
    config: &PlannerConfig,
    stats: GenerationStats,
) -> RouteResponse {
    for candidate in &mut candidates {
        candidate.propagate_arrival_times(departure);
    }

    let total = candidates.len();
    let (feasible, infeasible): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|c| is_acceptable(c, constraints));

    let (routes, no_feasible_route, min_time, min_walk) = if !feasible.is_empty() {
        (
            rank_feasible(feasible, config.max_feasible_results),
            false,
            None,
            None,
        )
    } else {
        let routes = rank_by_time(infeasible, config.max_fallback_results);
        let fastest = routes.first();
        let min_time = fastest.map(RouteCandidate::total_time_min);
        let min_walk = fastest.map(RouteCandidate::walk_time_min);
        (routes, true, min_time, min_walk)
    };

    debug!(
        generated = total,
        returned = routes.len(),
        no_feasible_route,
        "Selected routes"
    );

    RouteResponse {
        success: true,
        count: routes.len(),
        routes,
        no_feasible_route,
        min_possible_time_min: min_time,
        min_possible_walk_min: min_walk,
        constraints: constraints.clone(),
        debug: config.include_debug.then_some(stats),
    }
}

/// Largest slack among the given routes; used in request logs.
pub fn best_slack(routes: &[RouteCandidate]) -> Option<i64> {
    routes
        .iter()
        .map(RouteCandidate::slack_min)
        .max()
}
