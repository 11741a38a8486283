//! # HTTP Client Utilities
//!
//! Shared HTTP client for the lookup clients.
//!
//! This module provides a reusable HTTP client wrapper with:
//! - A bounded per-request timeout
//! - A cap on in-flight requests to one downstream
//! - JSON deserialization
//! - Mapping of transport failures and status codes onto [`LookupError`]
//!
//! # Examples
//!
//! ```ignore
//! use vehicle_catalog::infrastructure::lookups::http_client::HttpClient;
//!
//! let client = HttpClient::new(2000, 32)?;
//! let response: MyResponse = client
//!     .get_with_params("http://localhost:8082/services/price", &[("vehicleId", 2)])
//!     .await?;
//! ```

use crate::infrastructure::lookups::error::{LookupError, LookupResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// HTTP client wrapper for lookup clients.
///
/// Cloning is cheap and clones share both the connection pool and the
/// in-flight limit.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
    /// Permits for concurrent requests to this downstream.
    in_flight: Arc<Semaphore>,
    /// Configured in-flight limit.
    max_in_flight: usize,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `timeout_ms` - Request timeout in milliseconds, covering connect,
    ///   send and body read.
    /// * `max_in_flight` - Maximum concurrent requests; also caps the idle
    ///   connections kept per host.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Unreachable` if the client cannot be created.
    pub fn new(timeout_ms: u64, max_in_flight: usize) -> LookupResult<Self> {
        let max_in_flight = max_in_flight.max(1);
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .connect_timeout(Duration::from_millis(timeout_ms))
            .pool_max_idle_per_host(max_in_flight)
            .build()
            .map_err(|e| LookupError::unreachable(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_ms,
            in_flight: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the configured in-flight limit.
    #[inline]
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// Waits for an in-flight permit first; callers bound the wait with
    /// their own deadline.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Timeout` or `LookupError::Unreachable` if the
    /// request fails, `LookupError::Remote` on a non-2xx status and
    /// `LookupError::InvalidResponse` if the body cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> LookupResult<T> {
        let _permit = self
            .in_flight
            .acquire()
            .await
            .map_err(|_| LookupError::unreachable("HTTP client is shut down"))?;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> LookupResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                if e.is_decode() {
                    LookupError::invalid_response(format!("failed to parse response: {e}"))
                } else {
                    self.map_reqwest_error(e)
                }
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(LookupError::remote(status.as_u16(), truncate_body(&body)))
        }
    }

    /// Maps a reqwest error to a LookupError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> LookupError {
        if error.is_timeout() {
            LookupError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            LookupError::unreachable(format!("connection failed: {error}"))
        } else if error.is_decode() {
            LookupError::invalid_response(format!("failed to decode response: {error}"))
        } else {
            LookupError::unreachable(format!("HTTP request failed: {error}"))
        }
    }
}

/// Longest error body, in bytes, kept from a non-success response.
pub const MAX_ERROR_BODY_BYTES: usize = 512;

fn truncate_body(body: &str) -> String {
    body.char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= MAX_ERROR_BODY_BYTES)
        .map(|(_, c)| c)
        .collect()
}

/// Joins a base URL and a path with exactly one slash between them.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::infrastructure::lookups::error::FailureKind;
    use serde::Deserialize;
    use std::time::Instant;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Echo {
        value: u32,
    }

    #[test]
    fn new_client() {
        let client = HttpClient::new(5000, 8).unwrap();
        assert_eq!(client.timeout_ms(), 5000);
        assert_eq!(client.max_in_flight(), 8);
    }

    #[test]
    fn zero_in_flight_is_clamped() {
        let client = HttpClient::new(5000, 0).unwrap();
        assert_eq!(client.max_in_flight(), 1);
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://a/", "/b"), "http://a/b");
        assert_eq!(join_url("http://a", "b"), "http://a/b");
    }

    #[tokio::test]
    async fn get_with_params_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/echo"))
            .and(query_param("n", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 7})))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000, 4).unwrap();
        let echo: Echo = client
            .get_with_params(&join_url(&server.uri(), "echo"), &[("n", 7)])
            .await
            .unwrap();
        assert_eq!(echo.value, 7);
    }

    #[tokio::test]
    async fn non_success_status_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000, 4).unwrap();
        let err = client
            .get_with_params::<Echo, _>(&server.uri(), &[("n", 1)])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::RemoteError);
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("maintenance"));
    }

    #[tokio::test]
    async fn long_error_body_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("é".repeat(4096)))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000, 4).unwrap();
        let err = client
            .get_with_params::<Echo, _>(&server.uri(), &[("n", 1)])
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        if let LookupError::Remote { message, .. } = &err {
            assert_eq!(message.len(), MAX_ERROR_BODY_BYTES);
            assert!(message.chars().all(|c| c == 'é'));
        }
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("maintenance"), "maintenance");
        assert_eq!(truncate_body(&"x".repeat(600)).len(), MAX_ERROR_BODY_BYTES);
    }

    #[tokio::test]
    async fn garbled_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000, 4).unwrap();
        let err = client
            .get_with_params::<Echo, _>(&server.uri(), &[("n", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"value": 1}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(100, 4).unwrap();
        let err = client
            .get_with_params::<Echo, _>(&server.uri(), &[("n", 1)])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Timeout);
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new(1000, 4).unwrap();
        let err = client
            .get_with_params::<Echo, _>(&format!("http://{addr}/echo"), &[("n", 1)])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unreachable);
    }

    #[tokio::test]
    async fn in_flight_limit_serializes_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"value": 1}))
                    .set_delay(Duration::from_millis(150)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(2000, 1).unwrap();
        let url = server.uri();
        let started = Instant::now();
        let (a, b) = tokio::join!(
            client.get_with_params::<Echo, _>(&url, &[("n", 1)]),
            client.get_with_params::<Echo, _>(&url, &[("n", 2)]),
        );
        assert!(a.is_ok() && b.is_ok());
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
