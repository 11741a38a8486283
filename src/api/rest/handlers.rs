//! # REST Handlers
//!
//! Request handlers for the `/cars` resource and the health endpoint.
//!
//! Handlers only translate between HTTP and [`VehicleEnrichmentService`];
//! enrichment policy lives in the service.

use crate::api::rest::hal::{CarCollection, CarResource, LinkBuilder};
use crate::application::error::ApplicationError;
use crate::application::services::{EnrichmentMetrics, VehicleEnrichmentService};
use crate::domain::entities::{EnrichedVehicleView, VehicleDraft};
use crate::domain::value_objects::{Condition, VehicleId};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog service.
    pub service: Arc<VehicleEnrichmentService>,
    /// Link builder for HAL output.
    pub links: LinkBuilder,
}

impl AppState {
    /// Creates handler state.
    #[must_use]
    pub fn new(service: Arc<VehicleEnrichmentService>, links: LinkBuilder) -> Self {
        Self { service, links }
    }
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Errors produced by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service rejected the operation.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// The request could not be parsed.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            Self::Application(ApplicationError::NotFound { id }) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Car {id} not found"),
            ),
            Self::Application(ApplicationError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, "validation_error", e.to_string())
            }
            Self::Application(ApplicationError::Repository(e)) => {
                error!(error = %e, "vehicle store failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "vehicle store unavailable".to_string(),
                )
            }
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, "bad_request", message),
        };

        (
            status,
            Json(ErrorResponse {
                error: kind.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

/// Manufacturer as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManufacturerRequest {
    /// Manufacturer code.
    pub code: Option<i32>,
    /// Manufacturer name.
    pub name: Option<String>,
}

/// Details as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsRequest {
    /// Manufacturer.
    pub manufacturer: Option<ManufacturerRequest>,
    /// Model name.
    pub model: Option<String>,
    /// Model year.
    pub model_year: Option<i32>,
    /// Production year.
    pub production_year: Option<i32>,
    /// Body style.
    pub body: Option<String>,
    /// Engine description.
    pub engine: Option<String>,
    /// Fuel type.
    pub fuel_type: Option<String>,
    /// Mileage.
    pub mileage: Option<u32>,
    /// Exterior color.
    pub external_color: Option<String>,
    /// Number of doors.
    pub number_of_doors: Option<u8>,
}

/// Coordinate as submitted.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LocationRequest {
    /// Latitude.
    pub lat: Option<f64>,
    /// Longitude.
    pub lon: Option<f64>,
}

/// Body of `POST /cars` and `PUT /cars/{id}`.
///
/// Read-only fields of a rendered resource (`id`, `price`, `address`,
/// `_links`, timestamps) are ignored, so a fetched resource can be sent back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarRequest {
    /// New or used.
    pub condition: Option<Condition>,
    /// Descriptive attributes.
    pub details: Option<DetailsRequest>,
    /// Coordinate.
    pub location: Option<LocationRequest>,
}

impl From<CarRequest> for VehicleDraft {
    fn from(request: CarRequest) -> Self {
        let details = request.details.unwrap_or_default();
        let manufacturer = details.manufacturer.unwrap_or_default();
        let location = request.location.unwrap_or_default();
        Self {
            manufacturer_code: manufacturer.code,
            manufacturer_name: manufacturer.name,
            model: details.model,
            condition: request.condition,
            latitude: location.lat,
            longitude: location.lon,
            model_year: details.model_year,
            production_year: details.production_year,
            body: details.body,
            engine: details.engine,
            fuel_type: details.fuel_type,
            mileage: details.mileage,
            exterior_color: details.external_color,
            door_count: details.number_of_doors,
        }
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the process serves requests.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Lookup outcome counters.
    pub enrichment: EnrichmentMetrics,
}

/// `GET /cars`
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<CarCollection>, ApiError> {
    let views = state.service.list().await?;
    Ok(Json(CarCollection::from_views(&views, &state.links)))
}

/// `GET /cars/{id}`
///
/// # Errors
///
/// Returns 404 for an unknown ID, 400 for a malformed one, 500 if the store fails.
pub async fn get_car(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CarResource>, ApiError> {
    let Path(id) = id?;
    let view = state.service.get(VehicleId::new(id)).await?;
    Ok(Json(CarResource::from_view(&view, &state.links)))
}

/// `POST /cars`
///
/// Responds 201 with the stored resource and a `Location` header.
///
/// # Errors
///
/// Returns 400 for malformed or invalid input, 500 if the store fails.
pub async fn create_car(
    State(state): State<AppState>,
    body: Result<Json<CarRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let record = state.service.create(request.into()).await?;
    let resource = CarResource::from_view(&EnrichedVehicleView::bare(record), &state.links);

    let mut response = (StatusCode::CREATED, Json(&resource)).into_response();
    if let Ok(location) = HeaderValue::from_str(resource.self_href()) {
        response.headers_mut().insert(header::LOCATION, location);
    }
    Ok(response)
}

/// `PUT /cars/{id}`
///
/// The ID is taken from the path; any `id` in the body is ignored.
///
/// # Errors
///
/// Returns 404 for an unknown ID, 400 for malformed or invalid input,
/// 500 if the store fails.
pub async fn update_car(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CarRequest>, JsonRejection>,
) -> Result<Json<CarResource>, ApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    let record = state
        .service
        .update(VehicleId::new(id), request.into())
        .await?;
    Ok(Json(CarResource::from_view(
        &EnrichedVehicleView::bare(record),
        &state.links,
    )))
}

/// `DELETE /cars/{id}`
///
/// # Errors
///
/// Returns 404 for an unknown ID, 500 if the store fails.
pub async fn delete_car(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.service.delete(VehicleId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        enrichment: state.service.metrics(),
    })
}
