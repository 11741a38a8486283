//! # REST Routes
//!
//! Router wiring for the catalog API.

use crate::api::rest::handlers::{
    AppState, create_car, delete_car, get_car, health, list_cars, update_car,
};
use axum::Router;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Creates the catalog router.
///
/// - `GET /cars`, `POST /cars`
/// - `GET /cars/{id}`, `PUT /cars/{id}`, `DELETE /cars/{id}`
/// - `GET /health`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route(
            "/cars/{id}",
            get(get_car).put(update_car).delete(delete_car),
        )
        .route("/health", get(health))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
