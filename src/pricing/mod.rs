//! # Pricing Service
//!
//! Standalone HTTP service quoting a price per vehicle ID, served by the
//! `pricing-service` binary and consumed by
//! [`HttpPriceLookupClient`](crate::infrastructure::lookups::HttpPriceLookupClient).

pub mod routes;
pub mod table;

pub use routes::{PriceResponse, create_pricing_router};
pub use table::PriceTable;
