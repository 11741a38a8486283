//! # Enriched Vehicle View
//!
//! Composite returned to callers: the stored record plus whatever live data
//! could be fetched for it.

use crate::domain::entities::location::ResolvedLocation;
use crate::domain::entities::price_quote::PriceQuote;
use crate::domain::entities::vehicle::VehicleRecord;
use crate::domain::value_objects::VehicleId;
use serde::Serialize;

/// A vehicle record with optional price and location enrichment.
///
/// The record is always present and authoritative. Each enrichment field is
/// either a complete, validated value or `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedVehicleView {
    record: VehicleRecord,
    price: Option<PriceQuote>,
    location: Option<ResolvedLocation>,
}

impl EnrichedVehicleView {
    /// Creates a view.
    #[must_use]
    pub fn new(
        record: VehicleRecord,
        price: Option<PriceQuote>,
        location: Option<ResolvedLocation>,
    ) -> Self {
        Self {
            record,
            price,
            location,
        }
    }

    /// Creates a view with no enrichment.
    #[must_use]
    pub fn bare(record: VehicleRecord) -> Self {
        Self::new(record, None, None)
    }

    /// Returns the vehicle ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> VehicleId {
        self.record.id()
    }

    /// Returns the stored record.
    #[inline]
    #[must_use]
    pub fn record(&self) -> &VehicleRecord {
        &self.record
    }

    /// Returns the price quote, if one was fetched.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Option<&PriceQuote> {
        self.price.as_ref()
    }

    /// Returns the resolved location, if one was fetched.
    #[inline]
    #[must_use]
    pub fn location(&self) -> Option<&ResolvedLocation> {
        self.location.as_ref()
    }

    /// Returns true if both enrichment fields are present.
    #[inline]
    #[must_use]
    pub fn is_fully_enriched(&self) -> bool {
        self.price.is_some() && self.location.is_some()
    }
}
