//! # Maps Client
//!
//! HTTP implementation of [`LocationResolver`] against the maps service.
//!
//! Wire contract: `GET {base}/maps?lat=..&lon=..` answers
//! `{"address": "...", "city": "...", "state": "...", "zip": "..."}`, where
//! only `address` is required.

use crate::domain::entities::ResolvedLocation;
use crate::domain::value_objects::GeoCoordinate;
use crate::infrastructure::lookups::error::{LookupError, LookupResult};
use crate::infrastructure::lookups::http_client::{HttpClient, join_url};
use crate::infrastructure::lookups::traits::LocationResolver;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Path of the address endpoint relative to the service base URL.
pub const MAPS_PATH: &str = "maps";

#[derive(Debug, Deserialize)]
struct AddressResponse {
    address: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    zip: Option<String>,
}

/// Client for the maps service.
#[derive(Debug, Clone)]
pub struct HttpLocationResolverClient {
    http: HttpClient,
    endpoint: String,
}

impl HttpLocationResolverClient {
    /// Creates a client for the maps service at `base_url`.
    #[must_use]
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            endpoint: join_url(base_url, MAPS_PATH),
        }
    }

    /// Returns the full address endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LocationResolver for HttpLocationResolverClient {
    fn name(&self) -> &'static str {
        "maps"
    }

    async fn resolve(&self, coordinate: GeoCoordinate) -> LookupResult<ResolvedLocation> {
        let (lat, lon) = coordinate.for_lookup();
        debug!(lat, lon, endpoint = %self.endpoint, "resolving address");

        let response: AddressResponse = self
            .http
            .get_with_params(&self.endpoint, &[("lat", lat), ("lon", lon)])
            .await?;

        let mut location = ResolvedLocation::new(response.address, coordinate)
            .map_err(|e| LookupError::invalid_response(e.to_string()))?;
        if let Some(city) = response.city {
            location = location.with_city(city);
        }
        if let Some(state) = response.state {
            location = location.with_state(state);
        }
        if let Some(zip) = response.zip {
            location = location.with_zip(zip);
        }
        Ok(location)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::lookups::error::FailureKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpLocationResolverClient {
        HttpLocationResolverClient::new(HttpClient::new(1000, 4).unwrap(), &server.uri())
    }

    #[tokio::test]
    async fn resolve_sends_rounded_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps"))
            .and(query_param("lat", "40.730611"))
            .and(query_param("lon", "-73.935242"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": "777 Brockton Avenue",
                "city": "Abington",
                "state": "MA",
                "zip": "2351"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let coord = GeoCoordinate::new(40.730_610_8, -73.935_242_1).unwrap();
        let location = client_for(&server).resolve(coord).await.unwrap();
        assert_eq!(location.address(), "777 Brockton Avenue");
        assert_eq!(location.city(), Some("Abington"));
        assert_eq!(location.state(), Some("MA"));
        assert_eq!(location.zip(), Some("2351"));
        assert_eq!(location.coordinate(), coord);
    }

    #[tokio::test]
    async fn optional_fields_may_be_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"address": "1 Main St"})),
            )
            .mount(&server)
            .await;

        let coord = GeoCoordinate::new(1.0, 2.0).unwrap();
        let location = client_for(&server).resolve(coord).await.unwrap();
        assert_eq!(location.address(), "1 Main St");
        assert!(location.city().is_none());
    }

    #[tokio::test]
    async fn blank_address_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"address": "  "})),
            )
            .mount(&server)
            .await;

        let coord = GeoCoordinate::new(1.0, 2.0).unwrap();
        let err = client_for(&server).resolve(coord).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::RemoteError);
    }

    #[tokio::test]
    async fn missing_address_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"city": "Nowhere"})),
            )
            .mount(&server)
            .await;

        let coord = GeoCoordinate::new(1.0, 2.0).unwrap();
        let err = client_for(&server).resolve(coord).await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidResponse { .. }));
    }
}
