//! # Vehicle Catalog
//!
//! A vehicle catalog whose reads are enriched with a live price and a
//! resolved street address.
//!
//! Stored vehicles come from a [`VehicleRepository`]. On every read the
//! [`VehicleEnrichmentService`] asks the pricing service and the maps service
//! concurrently, each under its own deadline, and merges what comes back.
//! A failed or slow lookup leaves its field empty rather than failing the
//! request.
//!
//! # Layout
//!
//! - [`domain`]: vehicles, prices, locations, and their validation
//! - [`application`]: the enrichment service and its errors
//! - [`infrastructure`]: lookup clients, repositories, configuration
//! - [`api`]: the `/cars` REST surface rendering HAL JSON
//! - [`pricing`]: the standalone pricing service
//!
//! [`VehicleRepository`]: infrastructure::persistence::VehicleRepository
//! [`VehicleEnrichmentService`]: application::services::VehicleEnrichmentService

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod pricing;
