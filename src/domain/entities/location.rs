//! # Resolved Location
//!
//! Human-readable address for a geocoordinate, fetched per request.

use crate::domain::errors::{ValidationError, ValidationResult};
use crate::domain::value_objects::GeoCoordinate;
use serde::Serialize;

/// Address resolved by the maps service for a coordinate.
///
/// # Examples
///
/// ```
/// use vehicle_catalog::domain::entities::ResolvedLocation;
/// use vehicle_catalog::domain::value_objects::GeoCoordinate;
///
/// let coord = GeoCoordinate::new(40.730610, -73.935242).unwrap();
/// let location = ResolvedLocation::new("777 Brockton Avenue", coord)
///     .unwrap()
///     .with_city("Abington")
///     .with_state("MA")
///     .with_zip("2351");
///
/// assert_eq!(location.address(), "777 Brockton Avenue");
/// assert_eq!(location.city(), Some("Abington"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    address: String,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
    coordinate: GeoCoordinate,
}

impl ResolvedLocation {
    /// Creates a resolved location.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if the address is blank.
    pub fn new(address: impl Into<String>, coordinate: GeoCoordinate) -> ValidationResult<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ValidationError::invalid("address", "must not be blank"));
        }
        Ok(Self {
            address,
            city: None,
            state: None,
            zip: None,
            coordinate,
        })
    }

    /// Sets the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the state or region.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }

    /// Returns the street address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Returns the state or region.
    #[inline]
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Returns the postal code.
    #[inline]
    #[must_use]
    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    /// Returns the coordinate that was resolved.
    #[inline]
    #[must_use]
    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }
}
