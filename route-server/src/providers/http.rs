//! Shared HTTP plumbing for the provider clients.
//!
//! Every vendor speaks JSON over HTTPS with a key in a header. The
//! transport owns the `reqwest` client, the base URL and a semaphore that
//! caps in-flight requests, and maps status codes onto [`ProviderError`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use super::error::ProviderError;

/// Default maximum concurrent requests per client.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Characters of an unparseable body kept for the error message.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for a provider client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL override (defaults to the vendor's production endpoint)
    pub base_url: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// A rate-limited JSON client bound to one vendor.
#[derive(Debug, Clone)]
pub(crate) struct JsonTransport {
    vendor: &'static str,
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl JsonTransport {
    /// Build a transport that sends `auth_value` in `auth_header` on every request.
    pub(crate) fn new(
        vendor: &'static str,
        config: &ProviderConfig,
        default_base_url: &str,
        auth_header: &'static str,
        auth_value: &str,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(auth_value)
            .map_err(|_| ProviderError::Config(format!("invalid {vendor} API key format")))?;
        headers.insert(HeaderName::from_static(auth_header), value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(default_base_url)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            vendor,
            http,
            base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` with query parameters and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(request).await
    }

    /// POST a JSON body to `path` and decode the JSON response.
    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ProviderError> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::Unauthorized(self.vendor));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited(self.vendor));
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body.chars().take(BODY_SNIPPET_CHARS).collect(),
            });
        }

        decode(&body)
    }
}

/// Decode a JSON body, keeping a snippet of it on failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ProviderConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = ProviderConfig::new("test-key");

        assert_eq!(config.base_url, None);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn base_url_override_and_trailing_slash() {
        let config = ProviderConfig::new("k").with_base_url("http://localhost:9000/");
        let transport =
            JsonTransport::new("test", &config, "https://example.com", "appkey", "k").unwrap();

        assert_eq!(transport.url("/v1/x"), "http://localhost:9000/v1/x");
    }

    #[test]
    fn default_base_url_used() {
        let config = ProviderConfig::new("k");
        let transport =
            JsonTransport::new("test", &config, "https://example.com", "appkey", "k").unwrap();

        assert_eq!(transport.url("/a"), "https://example.com/a");
    }

    #[test]
    fn rejects_unprintable_key() {
        let config = ProviderConfig::new("bad\nkey");
        let result = JsonTransport::new("test", &config, "https://example.com", "appkey", "bad\nkey");

        assert!(matches!(result, Err(ProviderError::Config(_))));
    }

    #[test]
    fn decode_error_keeps_body_snippet() {
        let err = decode::<serde_json::Value>("not json").unwrap_err();
        match err {
            ProviderError::Json { body, .. } => assert_eq!(body.as_deref(), Some("not json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
