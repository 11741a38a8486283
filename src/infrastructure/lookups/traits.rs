//! # Lookup Traits
//!
//! Port definitions for the remote services that enrich a vehicle.
//!
//! Implementations must be stateless with respect to a single call and safe
//! to share across tasks. The enrichment service holds them as
//! `Arc<dyn PriceLookup>` / `Arc<dyn LocationResolver>`, so tests can swap in
//! fakes.
//!
//! # Examples
//!
//! ```ignore
//! use vehicle_catalog::infrastructure::lookups::traits::PriceLookup;
//!
//! #[derive(Debug)]
//! struct FixedPrice;
//!
//! #[async_trait::async_trait]
//! impl PriceLookup for FixedPrice {
//!     fn name(&self) -> &'static str { "fixed" }
//!     async fn quote(&self, vehicle_id: VehicleId) -> LookupResult<PriceQuote> { /* ... */ }
//! }
//! ```

use crate::domain::entities::{PriceQuote, ResolvedLocation};
use crate::domain::value_objects::{GeoCoordinate, VehicleId};
use crate::infrastructure::lookups::error::LookupResult;
use async_trait::async_trait;
use std::fmt;

/// Source of live vehicle prices.
#[async_trait]
pub trait PriceLookup: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches the current price for a vehicle.
    ///
    /// # Errors
    ///
    /// Returns a `LookupError` classified as timeout, remote error or
    /// unreachable.
    async fn quote(&self, vehicle_id: VehicleId) -> LookupResult<PriceQuote>;
}

/// Source of human-readable addresses for coordinates.
#[async_trait]
pub trait LocationResolver: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Resolves a coordinate to an address.
    ///
    /// # Errors
    ///
    /// Returns a `LookupError` classified as timeout, remote error or
    /// unreachable.
    async fn resolve(&self, coordinate: GeoCoordinate) -> LookupResult<ResolvedLocation>;
}
