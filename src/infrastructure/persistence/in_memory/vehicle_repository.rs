//! # In-Memory Vehicle Repository
//!
//! In-memory implementation of [`VehicleRepository`].
//!
//! Used when no database is configured and throughout the tests. IDs are
//! assigned from a monotonically increasing counter starting at 1 and are
//! never reused, even after a delete.

use crate::domain::entities::{VehicleAttributes, VehicleRecord};
use crate::domain::value_objects::{Timestamp, VehicleId};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, VehicleRepository,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    vehicles: BTreeMap<VehicleId, VehicleRecord>,
}

/// In-memory implementation of [`VehicleRepository`].
///
/// Uses a `BTreeMap` behind a tokio `RwLock`, so listing is ordered by ID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVehicleRepository {
    storage: Arc<RwLock<Store>>,
}

impl InMemoryVehicleRepository {
    /// Creates a new empty in-memory vehicle repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vehicles in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.vehicles.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all vehicles. The ID counter is not reset.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.vehicles.clear();
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, attributes: VehicleAttributes) -> RepositoryResult<VehicleRecord> {
        let mut storage = self.storage.write().await;
        storage.next_id = storage
            .next_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::internal("vehicle id space exhausted"))?;
        let id = VehicleId::new(storage.next_id);
        let record = VehicleRecord::new(id, attributes, Timestamp::now());
        storage.vehicles.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: VehicleId) -> RepositoryResult<VehicleRecord> {
        let storage = self.storage.read().await;
        storage
            .vehicles
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::vehicle_not_found(id))
    }

    async fn update(
        &self,
        id: VehicleId,
        attributes: VehicleAttributes,
    ) -> RepositoryResult<VehicleRecord> {
        let mut storage = self.storage.write().await;
        let entry = storage
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::vehicle_not_found(id))?;
        *entry = entry.replace_attributes(attributes, Timestamp::now());
        Ok(entry.clone())
    }

    async fn delete(&self, id: VehicleId) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage
            .vehicles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::vehicle_not_found(id))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<VehicleRecord>> {
        let storage = self.storage.read().await;
        Ok(storage.vehicles.values().cloned().collect())
    }
}
