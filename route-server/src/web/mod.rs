//! Web layer for the route planner.
//!
//! Exposes a health check and the JSON route planning endpoint.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
