//! # Repository Traits
//!
//! Port definition for vehicle persistence.
//!
//! The repository is a pure persistence boundary: it assigns IDs, stores and
//! returns [`VehicleRecord`]s, and knows nothing about enrichment.
//!
//! # Examples
//!
//! ```ignore
//! use vehicle_catalog::infrastructure::persistence::traits::VehicleRepository;
//!
//! async fn count(repo: &dyn VehicleRepository) -> usize {
//!     repo.list_all().await.map(|all| all.len()).unwrap_or(0)
//! }
//! ```

use crate::domain::entities::{VehicleAttributes, VehicleRecord};
use crate::domain::value_objects::VehicleId;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Stored data could not be mapped back to a domain value.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a not found error for a vehicle.
    #[must_use]
    pub fn vehicle_not_found(id: VehicleId) -> Self {
        Self::not_found("Vehicle", id.to_string())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for vehicle records.
#[async_trait]
pub trait VehicleRepository: Send + Sync + fmt::Debug {
    /// Stores a new vehicle and returns it with its assigned ID.
    async fn create(&self, attributes: VehicleAttributes) -> RepositoryResult<VehicleRecord>;

    /// Gets a vehicle by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no vehicle has this ID.
    async fn find_by_id(&self, id: VehicleId) -> RepositoryResult<VehicleRecord>;

    /// Replaces the attributes of an existing vehicle.
    ///
    /// The ID and creation time are preserved; the modification time advances.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no vehicle has this ID.
    async fn update(
        &self,
        id: VehicleId,
        attributes: VehicleAttributes,
    ) -> RepositoryResult<VehicleRecord>;

    /// Deletes a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no vehicle has this ID.
    async fn delete(&self, id: VehicleId) -> RepositoryResult<()>;

    /// Lists all vehicles ordered by ID.
    async fn list_all(&self) -> RepositoryResult<Vec<VehicleRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error() {
        let err = RepositoryError::vehicle_not_found(VehicleId::new(42));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("Vehicle"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn connection_error() {
        let err = RepositoryError::connection("Connection refused");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("Connection"));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn query_error() {
        let err = RepositoryError::query("Invalid SQL");
        assert!(err.to_string().contains("Query"));
        assert!(err.to_string().contains("Invalid SQL"));
    }

    #[test]
    fn serialization_error() {
        let err = RepositoryError::serialization("bad condition");
        assert!(err.to_string().contains("Serialization"));
    }
}
