//! Kakao driving directions and place search.
//!
//! Both APIs authenticate with `Authorization: KakaoAK {key}`.
//! Kakao Mobility answers point-to-point and multi-point driving
//! estimates; Kakao Local answers keyword searches around a point.

mod local;
mod mobility;
mod types;

pub use local::{DEFAULT_KEYWORD, KakaoLocalClient};
pub use mobility::KakaoMobilityClient;
