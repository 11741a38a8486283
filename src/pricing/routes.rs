//! # Pricing Routes
//!
//! `GET /services/price?vehicleId=N` answers
//! `{"currency": "USD", "price": 12917.30, "vehicleId": N}`.

use crate::api::rest::handlers::ErrorResponse;
use crate::domain::entities::PriceQuote;
use crate::domain::value_objects::VehicleId;
use crate::pricing::table::PriceTable;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Query parameters of the price endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceParams {
    /// Vehicle to price.
    pub vehicle_id: i64,
}

/// Price body on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    /// ISO 4217 code.
    pub currency: String,
    /// Amount as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Vehicle the price belongs to.
    pub vehicle_id: i64,
}

impl From<&PriceQuote> for PriceResponse {
    fn from(quote: &PriceQuote) -> Self {
        Self {
            currency: quote.currency().to_string(),
            price: quote.amount(),
            vehicle_id: quote.vehicle_id().get(),
        }
    }
}

fn error(status: StatusCode, kind: &str, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: kind.to_string(),
            message,
        }),
    )
        .into_response()
}

/// `GET /services/price`
pub async fn get_price(
    State(table): State<Arc<PriceTable>>,
    params: Result<Query<PriceParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return error(StatusCode::BAD_REQUEST, "bad_request", rejection.body_text());
        }
    };

    let id = VehicleId::new(params.vehicle_id);
    match table.lookup(id) {
        Some(quote) => {
            debug!(vehicle_id = %id, price = %quote, "price served");
            Json(PriceResponse::from(quote)).into_response()
        }
        None => error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Cannot find price for Vehicle {id}"),
        ),
    }
}

/// Creates the pricing router.
pub fn create_pricing_router(table: Arc<PriceTable>) -> Router {
    Router::new()
        .route("/services/price", get(get_price))
        .layer(TraceLayer::new_for_http())
        .with_state(table)
}
