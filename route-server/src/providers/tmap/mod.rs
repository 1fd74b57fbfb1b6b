//! TMAP public-transit route search.
//!
//! One POST per origin/destination pair returns up to ten itineraries,
//! each a sequence of WALK, BUS and SUBWAY legs with section times, fares
//! and coordinates. When no route exists TMAP answers 200 with a `result`
//! status block instead of `metaData`.

mod client;
mod convert;
mod types;

pub use client::{DEFAULT_BASE_URL, TmapTransitClient};
pub use convert::{convert_itinerary, convert_response};
pub use types::{TmapItinerary, TmapLeg, TransitRouteResponse};
