//! Domain types for the route planner.
//!
//! Everything here is created fresh for one planning request and dropped
//! once the response is built. Candidates derive their totals from their
//! legs at construction, so code holding a `RouteCandidate` can trust that
//! the aggregate numbers match the leg sequence.

mod candidate;
mod error;
mod itinerary;
mod leg;
mod location;

pub use candidate::{Constraints, RouteCandidate, RouteType};
pub use error::DomainError;
pub use itinerary::{BatchEta, DrivingEta, Itinerary, ItineraryLeg, TransitMode};
pub use leg::{LegDetails, LegKind, RouteLeg, TaxiDetails, TransitDetails, TransitStep, WalkDetails};
pub use location::{Location, Station};
