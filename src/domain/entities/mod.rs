//! # Domain Entities
//!
//! ## Aggregates
//!
//! - [`VehicleRecord`]: Stored vehicle with identity and attributes
//!
//! ## Transient Values
//!
//! - [`PriceQuote`]: Live price from the pricing service
//! - [`ResolvedLocation`]: Address from the maps service
//! - [`EnrichedVehicleView`]: Record plus optional enrichment

pub mod enriched_view;
pub mod location;
pub mod price_quote;
pub mod vehicle;

pub use enriched_view::EnrichedVehicleView;
pub use location::ResolvedLocation;
pub use price_quote::PriceQuote;
pub use vehicle::{Manufacturer, VehicleAttributes, VehicleDraft, VehicleRecord};
