//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`VehicleId`]: Repository-assigned vehicle identifier
//! - [`GeoCoordinate`]: Validated latitude/longitude pair
//! - [`Condition`]: New or used
//! - [`Timestamp`]: UTC point in time

pub mod enums;
pub mod geo;
pub mod ids;
pub mod timestamp;

pub use enums::{Condition, ParseEnumError};
pub use geo::{GeoCoordinate, LOOKUP_DECIMALS};
pub use ids::VehicleId;
pub use timestamp::Timestamp;
