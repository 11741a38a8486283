//! # Domain Errors
//!
//! Validation failures raised while building domain values from caller input.
//!
//! # Examples
//!
//! ```
//! use vehicle_catalog::domain::errors::ValidationError;
//!
//! let err = ValidationError::missing("model");
//! assert_eq!(err.field(), "model");
//! assert!(err.to_string().contains("model"));
//! ```

use thiserror::Error;

/// Error raised when caller-supplied attributes are missing or invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required attribute was not supplied.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// An attribute was supplied with an unacceptable value.
    #[error("invalid {field}: {message}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with the value.
        message: String,
    },
}

impl ValidationError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Returns the name of the field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => field,
        }
    }
}

/// Result type for domain validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
