//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`VehicleEnrichmentService`]: catalog operations with concurrent price
//!   and address enrichment

pub mod vehicle_enrichment;

pub use vehicle_enrichment::{
    EnrichmentConfig, EnrichmentMetrics, LookupKind, LookupOutcome, OutcomeCounts,
    VehicleEnrichmentService,
};
