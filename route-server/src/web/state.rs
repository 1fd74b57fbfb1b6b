//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedProviders};
use crate::planner::PlannerConfig;
use crate::providers::Backend;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached route providers
    pub providers: Arc<CachedProviders<Backend>>,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(backend: Backend, cache_config: &CacheConfig, config: PlannerConfig) -> Self {
        Self {
            providers: Arc::new(CachedProviders::new(backend, cache_config)),
            config: Arc::new(config),
        }
    }
}
