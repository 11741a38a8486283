//! # REST API
//!
//! HTTP surface of the vehicle catalog, rendering HAL JSON.
//!
//! # Endpoints
//!
//! - `GET /cars` - All cars, enriched, ordered by ID
//! - `GET /cars/{id}` - One car, enriched
//! - `POST /cars` - Store a car (201 with `Location`)
//! - `PUT /cars/{id}` - Replace a car's attributes
//! - `DELETE /cars/{id}` - Remove a car (204)
//! - `GET /health` - Liveness plus lookup outcome counters
//!
//! # Usage
//!
//! ```ignore
//! use vehicle_catalog::api::rest::{create_router, AppState, LinkBuilder};
//!
//! let state = AppState::new(service, LinkBuilder::new("http://localhost:8080"));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod hal;
pub mod handlers;
pub mod routes;

pub use hal::{CarCollection, CarResource, LinkBuilder};
pub use handlers::{ApiError, AppState, CarRequest, ErrorResponse, HealthResponse};
pub use routes::create_router;
