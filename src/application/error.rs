//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Only two things fail a catalog operation outright: a missing vehicle and
//! a storage failure. Invalid input is rejected before storage is touched.
//! Lookup failures never appear here; they degrade the view instead.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── NotFound { id }              - No vehicle with this ID
//! ├── Validation(ValidationError)  - Rejected attributes
//! └── Repository(RepositoryError)  - Storage failure
//! ```
//!
//! # Examples
//!
//! ```
//! use vehicle_catalog::application::error::ApplicationError;
//! use vehicle_catalog::domain::value_objects::VehicleId;
//! use vehicle_catalog::infrastructure::persistence::RepositoryError;
//!
//! let err: ApplicationError = RepositoryError::vehicle_not_found(VehicleId::new(3)).into();
//! assert!(err.is_not_found());
//! ```

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::VehicleId;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// No vehicle has the requested ID.
    #[error("vehicle not found: {id}")]
    NotFound {
        /// Requested vehicle ID.
        id: VehicleId,
    },

    /// Submitted attributes were rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store failed.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl ApplicationError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(id: VehicleId) -> Self {
        Self::NotFound { id }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the store failed.
    #[must_use]
    pub fn is_repository(&self) -> bool {
        matches!(self, Self::Repository(_))
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { ref id, .. } => match id.parse::<VehicleId>() {
                Ok(id) => Self::NotFound { id },
                Err(_) => Self::Repository(err),
            },
            other => Self::Repository(other),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_not_found_maps_to_not_found() {
        let err: ApplicationError = RepositoryError::vehicle_not_found(VehicleId::new(8)).into();
        assert!(err.is_not_found());
        assert!(matches!(err, ApplicationError::NotFound { id } if id == VehicleId::new(8)));
    }

    #[test]
    fn other_repository_errors_stay_repository() {
        let err: ApplicationError = RepositoryError::connection("refused").into();
        assert!(err.is_repository());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn validation_error_converts() {
        let err: ApplicationError = ValidationError::missing("model").into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn not_found_display() {
        let err = ApplicationError::not_found(VehicleId::new(12));
        assert_eq!(err.to_string(), "vehicle not found: 12");
    }
}
