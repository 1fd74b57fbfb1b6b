//! Kakao Local keyword search client, used to find nearby stations.

use tracing::instrument;

use crate::domain::Station;
use crate::planner::MAX_STATION_RADIUS_M;
use crate::providers::error::ProviderError;
use crate::providers::http::{JsonTransport, ProviderConfig};

use super::types::{KeywordSearchResponse, Place};

/// Default base URL for Kakao Local.
pub const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com";

/// Keyword matched against place names ("station").
pub const DEFAULT_KEYWORD: &str = "역";

/// Results per page; the API maximum.
const PAGE_SIZE: u32 = 15;

/// Kakao Local search client.
#[derive(Debug, Clone)]
pub struct KakaoLocalClient {
    transport: JsonTransport,
    keyword: String,
}

impl KakaoLocalClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let auth = format!("KakaoAK {}", config.api_key);
        let transport =
            JsonTransport::new("Kakao Local", &config, DEFAULT_BASE_URL, "authorization", &auth)?;

        Ok(Self {
            transport,
            keyword: DEFAULT_KEYWORD.to_string(),
        })
    }

    /// Stations matching the keyword within `radius_m` of (x, y), nearest first.
    #[instrument(skip(self), level = "debug")]
    pub async fn nearby_stations(
        &self,
        x: f64,
        y: f64,
        radius_m: u32,
    ) -> Result<Vec<Station>, ProviderError> {
        let response: KeywordSearchResponse = self
            .transport
            .get(
                "/v2/local/search/keyword.json",
                &[
                    ("query", self.keyword.clone()),
                    ("x", x.to_string()),
                    ("y", y.to_string()),
                    ("radius", clamp_radius(radius_m).to_string()),
                    ("size", PAGE_SIZE.to_string()),
                    ("sort", "distance".to_string()),
                ],
            )
            .await?;

        Ok(response.documents.into_iter().map(to_station).collect())
    }
}

fn clamp_radius(radius_m: u32) -> u32 {
    radius_m.min(MAX_STATION_RADIUS_M)
}

fn to_station(place: Place) -> Station {
    Station {
        id: place.id,
        name: place.place_name,
        x: place.x,
        y: place.y,
        station_type: place.category_group_code,
    }
}
