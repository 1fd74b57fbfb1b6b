//! Route data providers.
//!
//! Concrete sources behind the planner's [`RouteProviders`] trait:
//!
//! - [`tmap`]: public-transit itineraries
//! - [`kakao`]: driving estimates and nearby station search
//! - [`LiveProviders`]: the two vendors combined
//! - [`FixtureProviders`]: a recorded scenario for offline work
//! - [`Backend`]: whichever of the last two the server was started with
//!
//! Vendor clients return `Result<_, ProviderError>`. The conversion to the
//! planner's empty-on-failure contract happens at the `RouteProviders`
//! implementations, where failures are logged.
//!
//! [`RouteProviders`]: crate::planner::RouteProviders

mod backend;
mod error;
mod fixture;
mod http;
pub mod kakao;
mod live;
pub mod tmap;

pub use backend::Backend;
pub use error::ProviderError;
pub use fixture::{FixtureError, FixtureProviders};
pub use http::ProviderConfig;
pub use live::LiveProviders;
