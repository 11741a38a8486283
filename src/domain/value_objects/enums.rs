//! # Domain Enums
//!
//! Enumeration types for catalog concepts.
//!
//! - [`Condition`] - Whether a vehicle is new or used
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Condition of a vehicle.
///
/// # Examples
///
/// ```
/// use vehicle_catalog::domain::value_objects::enums::Condition;
///
/// let used: Condition = "used".parse().unwrap();
/// assert_eq!(used, Condition::Used);
/// assert_eq!(used.to_string(), "USED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    /// Never registered to an owner.
    New,
    /// Previously owned.
    Used,
}

impl Condition {
    /// Returns the canonical upper-case name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Used => "USED",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "USED" => Ok(Self::Used),
            _ => Err(ParseEnumError::InvalidValue("Condition", s.to_string())),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseEnumError {
    /// The value is not a member of the named enum.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("NEW".parse::<Condition>().unwrap(), Condition::New);
        assert_eq!(" Used ".parse::<Condition>().unwrap(), Condition::Used);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "salvage".parse::<Condition>().unwrap_err();
        assert!(err.to_string().contains("Condition"));
        assert!(err.to_string().contains("salvage"));
    }

    #[test]
    fn serde_uses_upper_case() {
        assert_eq!(serde_json::to_string(&Condition::Used).unwrap(), "\"USED\"");
        let parsed: Condition = serde_json::from_str("\"NEW\"").unwrap();
        assert_eq!(parsed, Condition::New);
    }
}
