//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::planner::PlannerConfig;
use crate::providers::ProviderConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CACHE_TTL_SECS: u64 = 120;

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set (set ROUTE_FIXTURE_PATH to run without API keys)")]
    MissingKey(&'static str),

    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where route data comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderSource {
    /// Vendor APIs.
    Live {
        tmap: ProviderConfig,
        kakao: ProviderConfig,
    },
    /// A recorded scenario file.
    Fixture(PathBuf),
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub source: ProviderSource,
    pub cache: CacheConfig,
    pub planner: PlannerConfig,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let source = match get("ROUTE_FIXTURE_PATH") {
            Some(path) => ProviderSource::Fixture(PathBuf::from(path)),
            None => {
                let tmap_key =
                    get("TMAP_APP_KEY").ok_or(ConfigError::MissingKey("TMAP_APP_KEY"))?;
                let kakao_key = get("KAKAO_REST_API_KEY")
                    .ok_or(ConfigError::MissingKey("KAKAO_REST_API_KEY"))?;
                let timeout: Option<u64> = parse_number(&get, "PROVIDER_TIMEOUT_SECS")?;
                let max_concurrent: Option<usize> =
                    parse_number(&get, "PROVIDER_MAX_CONCURRENT")?;

                let limits = |mut config: ProviderConfig| {
                    if let Some(secs) = timeout {
                        config = config.with_timeout(secs);
                    }
                    if let Some(n) = max_concurrent {
                        config = config.with_max_concurrent(n);
                    }
                    config
                };
                ProviderSource::Live {
                    tmap: limits(ProviderConfig::new(tmap_key)),
                    kakao: limits(ProviderConfig::new(kakao_key)),
                }
            }
        };

        let ttl_secs = parse_number(&get, "PROVIDER_CACHE_TTL_SECS")?
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        let debug = match get("ROUTE_DEBUG") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                name: "ROUTE_DEBUG",
                value: raw,
            })?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            source,
            cache: CacheConfig::with_ttl(Duration::from_secs(ttl_secs)),
            planner: PlannerConfig::default().with_debug(debug),
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    get: impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    get(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value: raw })
        })
        .transpose()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
