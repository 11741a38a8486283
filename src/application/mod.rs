//! # Application Layer
//!
//! Use-case orchestration on top of the domain and infrastructure layers.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::VehicleEnrichmentService;
