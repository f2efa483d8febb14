//! Outbound HTTP for provider APIs.
//!
//! ### Transport
//! - One shared connection pool for every provider (rustls, gzip/brotli/deflate)
//! - Default timeout 10s, overridable per call
//! - Max body bytes: 10MB (configurable)
//!
//! ### Retries
//! - Connect errors, timeouts and send failures are retried with exponential
//!   backoff (default: 2 retries, 200ms base)
//! - Non-2xx statuses and undecodable bodies fail immediately

pub mod ip;
pub mod url;

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::{Client, header};
use serde_json::Value;

pub use ip::{is_private_or_reserved, resolve_client_ip};
pub use url::{UrlError, canonicalize, split_query};

use minbar_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "minbar/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 10MB)
    pub max_bytes: usize,

    /// Request timeout (default: 10s)
    pub timeout: Duration,

    /// Retries after the first attempt for transient failures (default: 2)
    pub max_retries: u32,

    /// Delay before the first retry, doubled for each further retry (default: 200ms)
    pub retry_backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff(),
        }
    }
}

/// Source of JSON documents from provider URLs.
///
/// [`FetchClient`] is the HTTP implementation; the gateway only depends on
/// this trait.
#[async_trait::async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` with the given query parameters and decode the body as JSON.
    ///
    /// `timeout` overrides the fetcher's default for this call only.
    async fn fetch_json(
        &self, url: &::url::Url, params: &BTreeMap<String, String>, timeout: Option<Duration>,
    ) -> Result<Value, Error>;
}

/// HTTP fetch client with bounded retries.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::TransientTransport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Fetch `url` and decode the body as JSON, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - `Error::ProviderError` for a non-2xx status (not retried)
    /// - `Error::MalformedResponse` for a body that is too large or not JSON
    /// - `Error::TransientTransport` once every attempt has failed to connect or timed out
    pub async fn fetch(
        &self, url: &::url::Url, params: &BTreeMap<String, String>, timeout: Option<Duration>,
    ) -> Result<Value, Error> {
        let attempts = self.config.max_retries.saturating_add(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.attempt(url, params, timeout).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() => {
                    tracing::warn!(attempt, attempts, %url, error = %err, "transient fetch failure");
                    last_error = Some(err);
                    if attempt < attempts {
                        self.sleep_with_backoff(attempt).await;
                    }
                }
                Err(err) => {
                    tracing::warn!(attempt, %url, error = %err, "provider request failed");
                    return Err(err);
                }
            }
        }

        let reason = last_error.map(|e| e.to_string()).unwrap_or_default();
        Err(Error::TransientTransport(format!("{attempts} attempts failed for {url}: {reason}")))
    }

    async fn attempt(
        &self, url: &::url::Url, params: &BTreeMap<String, String>, timeout: Option<Duration>,
    ) -> Result<Value, Error> {
        let start = Instant::now();

        let mut request = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "application/json");
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let mut response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ProviderError { status: status.as_u16() });
        }

        if let Some(len) = response.content_length()
            && len > self.config.max_bytes as u64
        {
            return Err(Error::MalformedResponse(format!(
                "{len} bytes exceeds {}",
                self.config.max_bytes
            )));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
            if body.len() + chunk.len() > self.config.max_bytes {
                return Err(Error::MalformedResponse(format!(
                    "body exceeds {} bytes",
                    self.config.max_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        let value: Value = serde_json::from_slice(&body)?;

        tracing::debug!(
            %url,
            status = status.as_u16(),
            bytes = body.len(),
            fetch_ms = start.elapsed().as_millis() as u64,
            "fetched provider document"
        );

        Ok(value)
    }

    fn backoff_delay(&self, retry_number: u32) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8);
        self.config.retry_backoff.saturating_mul(1u32 << shift)
    }

    async fn sleep_with_backoff(&self, retry_number: u32) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl JsonFetcher for FetchClient {
    async fn fetch_json(
        &self, url: &::url::Url, params: &BTreeMap<String, String>, timeout: Option<Duration>,
    ) -> Result<Value, Error> {
        self.fetch(url, params, timeout).await
    }
}

/// Every reqwest failure at this layer is a transport problem: the status
/// line has not been seen yet, or the connection dropped mid-body.
fn transport_error(err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_body() || err.is_decode() {
        "body"
    } else {
        "request"
    };
    Error::TransientTransport(format!("{kind}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{header as header_matcher, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_client() -> FetchClient {
        FetchClient::new(FetchConfig {
            retry_backoff: Duration::from_millis(10),
            max_retries: 2,
            ..Default::default()
        })
        .unwrap()
    }

    fn parse(raw: &str) -> ::url::Url {
        ::url::Url::parse(raw).unwrap()
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "minbar/0.1");
        assert_eq!(config.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_backoff, Duration::from_millis(200));
    }

    #[test]
    fn test_backoff_doubles() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        assert_eq!(client.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(client.backoff_delay(2), Duration::from_millis(400));
        assert_eq!(client.backoff_delay(3), Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_fetch_returns_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/surah/1"))
            .and(header_matcher("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": {"number": 1}})))
            .expect(1)
            .mount(&server)
            .await;

        let url = parse(&format!("{}/v1/surah/1", server.uri()));
        let value = fast_client().fetch(&url, &BTreeMap::new(), None).await.unwrap();
        assert_eq!(value["data"]["number"], 1);
    }

    #[tokio::test]
    async fn test_fetch_sends_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/timings"))
            .and(query_param("latitude", "21.4"))
            .and(query_param("method", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200})))
            .expect(1)
            .mount(&server)
            .await;

        let url = parse(&format!("{}/v1/timings", server.uri()));
        let params = BTreeMap::from([
            ("latitude".to_string(), "21.4".to_string()),
            ("method".to_string(), "4".to_string()),
        ]);
        assert!(fast_client().fetch(&url, &params, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let url = parse(&server.uri());
        let result = fast_client().fetch(&url, &BTreeMap::new(), None).await;
        assert!(matches!(result, Err(Error::ProviderError { status: 503 })));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = parse(&server.uri());
        let result = fast_client().fetch(&url, &BTreeMap::new(), None).await;
        assert!(matches!(result, Err(Error::ProviderError { status: 404 })));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = parse(&server.uri());
        let result = fast_client().fetch(&url, &BTreeMap::new(), None).await;
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_oversized_body_is_malformed() {
        let server = MockServer::start().await;
        let big = format!("[\"{}\"]", "x".repeat(4096));
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(big))
            .mount(&server)
            .await;

        let client = FetchClient::new(FetchConfig { max_bytes: 1024, ..Default::default() }).unwrap();
        let url = parse(&server.uri());
        let result = client.fetch(&url, &BTreeMap::new(), None).await;
        assert!(matches!(result, Err(Error::MalformedResponse(msg)) if msg.contains("1024")));
    }

    #[tokio::test]
    async fn test_timeout_override_retries_then_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true}))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let url = parse(&server.uri());
        let result = fast_client()
            .fetch(&url, &BTreeMap::new(), Some(Duration::from_millis(100)))
            .await;
        assert!(matches!(result, Err(Error::TransientTransport(_))));
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transient() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = parse(&format!("http://{addr}/v1/surah/1"));
        let result = fast_client().fetch(&url, &BTreeMap::new(), None).await;
        match result {
            Err(Error::TransientTransport(msg)) => assert!(msg.contains("3 attempts")),
            other => panic!("expected transient transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_json_fetcher_delegates_to_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let fetcher: Box<dyn JsonFetcher> = Box::new(fast_client());
        let url = parse(&server.uri());
        let value = fetcher.fetch_json(&url, &BTreeMap::new(), None).await.unwrap();
        assert_eq!(value["success"], true);
    }
}
