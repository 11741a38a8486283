//! # Identifiers
//!
//! Identity types for catalog entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored vehicle.
///
/// Assigned by the repository when a vehicle is created and never changed
/// afterwards.
///
/// # Examples
///
/// ```
/// use vehicle_catalog::domain::value_objects::VehicleId;
///
/// let id = VehicleId::new(2);
/// assert_eq!(id.get(), 2);
/// assert_eq!(id.to_string(), "2");
/// assert_eq!("2".parse::<VehicleId>().unwrap(), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(i64);

impl VehicleId {
    /// Creates a vehicle ID from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VehicleId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for VehicleId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}
