//! # Pricing Client
//!
//! HTTP implementation of [`PriceLookup`] against the pricing service.
//!
//! Wire contract: `GET {base}/services/price?vehicleId=N` answers
//! `{"currency": "USD", "price": 12917.30, "vehicleId": N}`.
//!
//! The price travels as a JSON number, which drops trailing zeros, so the
//! amount is rescaled to [`PRICE_SCALE`] decimal places on receipt.

use crate::domain::entities::PriceQuote;
use crate::domain::value_objects::VehicleId;
use crate::infrastructure::lookups::error::{LookupError, LookupResult};
use crate::infrastructure::lookups::http_client::{HttpClient, join_url};
use crate::infrastructure::lookups::traits::PriceLookup;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

/// Path of the price endpoint relative to the service base URL.
pub const PRICE_PATH: &str = "services/price";

/// Decimal places of a quoted amount.
pub const PRICE_SCALE: u32 = 2;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceResponse {
    currency: String,
    price: Decimal,
    vehicle_id: i64,
}

/// Client for the pricing service.
#[derive(Debug, Clone)]
pub struct HttpPriceLookupClient {
    http: HttpClient,
    endpoint: String,
}

impl HttpPriceLookupClient {
    /// Creates a client for the pricing service at `base_url`.
    #[must_use]
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            endpoint: join_url(base_url, PRICE_PATH),
        }
    }

    /// Returns the full price endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PriceLookup for HttpPriceLookupClient {
    fn name(&self) -> &'static str {
        "pricing"
    }

    async fn quote(&self, vehicle_id: VehicleId) -> LookupResult<PriceQuote> {
        debug!(vehicle_id = %vehicle_id, endpoint = %self.endpoint, "requesting price");

        let response: PriceResponse = self
            .http
            .get_with_params(&self.endpoint, &[("vehicleId", vehicle_id.get())])
            .await?;

        if response.vehicle_id != vehicle_id.get() {
            return Err(LookupError::invalid_response(format!(
                "price is for vehicle {} but {} was requested",
                response.vehicle_id, vehicle_id
            )));
        }

        let mut amount = response.price.round_dp(PRICE_SCALE);
        amount.rescale(PRICE_SCALE);

        PriceQuote::new(vehicle_id, response.currency, amount)
            .map_err(|e| LookupError::invalid_response(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::lookups::error::FailureKind;
    use std::str::FromStr;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpPriceLookupClient {
        HttpPriceLookupClient::new(HttpClient::new(1000, 4).unwrap(), &server.uri())
    }

    #[tokio::test]
    async fn quote_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/price"))
            .and(query_param("vehicleId", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "currency": "USD",
                "price": 12917.30,
                "vehicleId": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let quote = client_for(&server).quote(VehicleId::new(2)).await.unwrap();
        assert_eq!(quote.vehicle_id(), VehicleId::new(2));
        assert_eq!(quote.currency(), "USD");
        assert_eq!(quote.amount(), Decimal::from_str("12917.30").unwrap());
        assert_eq!(quote.amount().to_string(), "12917.30");
    }

    #[tokio::test]
    async fn quote_amount_is_rescaled_to_cents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "currency": "USD",
                "price": 15000,
                "vehicleId": 3
            })))
            .mount(&server)
            .await;

        let quote = client_for(&server).quote(VehicleId::new(3)).await.unwrap();
        assert_eq!(quote.amount().to_string(), "15000.00");
        assert_eq!(quote.amount().scale(), PRICE_SCALE);
    }

    #[tokio::test]
    async fn quote_for_other_vehicle_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "currency": "USD",
                "price": 100.0,
                "vehicleId": 3
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).quote(VehicleId::new(2)).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::RemoteError);
    }

    #[tokio::test]
    async fn invalid_currency_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "currency": "dollars",
                "price": 100.0,
                "vehicleId": 2
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).quote(VehicleId::new(2)).await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn unknown_vehicle_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("Cannot find price for Vehicle 99"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).quote(VehicleId::new(99)).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), FailureKind::RemoteError);
    }

    #[test]
    fn endpoint_is_joined() {
        let client = HttpPriceLookupClient::new(
            HttpClient::new(1000, 1).unwrap(),
            "http://localhost:8082/",
        );
        assert_eq!(client.endpoint(), "http://localhost:8082/services/price");
    }
}
