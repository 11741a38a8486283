//! # Geocoordinate Value Object
//!
//! A validated latitude/longitude pair in decimal degrees.
//!
//! Downstream services accept at most [`LOOKUP_DECIMALS`] decimal places, so
//! coordinates are rounded with [`GeoCoordinate::for_lookup`] before being
//! sent over the wire. The stored coordinate keeps its original precision.
//!
//! # Examples
//!
//! ```
//! use vehicle_catalog::domain::value_objects::GeoCoordinate;
//!
//! let coord = GeoCoordinate::new(40.730610, -73.935242).unwrap();
//! assert_eq!(coord.latitude(), 40.730610);
//!
//! assert!(GeoCoordinate::new(91.0, 0.0).is_err());
//! ```

use crate::domain::errors::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places kept when a coordinate is sent to a downstream service.
pub const LOOKUP_DECIMALS: i32 = 6;

/// A point on the earth's surface.
///
/// # Invariants
///
/// - Latitude is finite and within `[-90, 90]`
/// - Longitude is finite and within `[-180, 180]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoCoordinate {
    /// Creates a coordinate, validating both components.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if either component is not
    /// finite or is out of range.
    pub fn new(latitude: f64, longitude: f64) -> ValidationResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::invalid(
                "latitude",
                format!("{latitude} is outside [-90, 90]"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::invalid(
                "longitude",
                format!("{longitude} is outside [-180, 180]"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in decimal degrees.
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    #[inline]
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns `(latitude, longitude)` rounded to [`LOOKUP_DECIMALS`] places.
    #[must_use]
    pub fn for_lookup(&self) -> (f64, f64) {
        (round_degrees(self.latitude), round_degrees(self.longitude))
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lat, lon) = self.for_lookup();
        write!(f, "({lat:.6}, {lon:.6})")
    }
}

fn round_degrees(value: f64) -> f64 {
    let scale = 10f64.powi(LOOKUP_DECIMALS);
    (value * scale).round() / scale
}
