//! # Vehicle Enrichment Service
//!
//! Catalog operations over the vehicle store, with reads enriched by a live
//! price and a resolved address.
//!
//! For every vehicle read, the price lookup and the location lookup are
//! spawned as separate tasks, each under its own deadline, and then joined.
//! A lookup that fails or runs out of time leaves its field empty in the
//! [`EnrichedVehicleView`]; the read itself still succeeds. Only the store
//! can fail a read.

use crate::application::error::ApplicationResult;
use crate::domain::entities::{
    EnrichedVehicleView, PriceQuote, ResolvedLocation, VehicleDraft, VehicleRecord,
};
use crate::domain::value_objects::VehicleId;
use crate::infrastructure::lookups::{FailureKind, LocationResolver, LookupError, PriceLookup};
use crate::infrastructure::persistence::VehicleRepository;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Configuration for enrichment.
///
/// Deserializes from the `[enrichment]` configuration section; missing keys
/// take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Deadline for each lookup in milliseconds, including queueing.
    pub lookup_timeout_ms: u64,
    /// Vehicles enriched concurrently by [`VehicleEnrichmentService::list`].
    pub list_concurrency: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 3000,
            list_concurrency: 8,
        }
    }
}

impl EnrichmentConfig {
    /// Creates a configuration with the given per-lookup deadline.
    #[must_use]
    pub fn with_lookup_timeout(timeout_ms: u64) -> Self {
        Self {
            lookup_timeout_ms: timeout_ms,
            ..Default::default()
        }
    }

    /// Sets the list concurrency. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_list_concurrency(mut self, concurrency: usize) -> Self {
        self.list_concurrency = concurrency.max(1);
        self
    }

    fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

/// Which remote lookup an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Price by vehicle ID.
    Price,
    /// Address by coordinate.
    Location,
}

impl LookupKind {
    /// Returns the name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result classification of one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The field was populated.
    Success,
    /// The deadline elapsed.
    Timeout,
    /// The remote answered with an error or unusable data.
    RemoteError,
    /// The remote could not be reached.
    Unreachable,
}

impl LookupOutcome {
    /// Returns the snake_case name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Timeout => "timeout",
            Self::RemoteError => "remote_error",
            Self::Unreachable => "unreachable",
        }
    }

    /// Returns true if the field was populated.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<FailureKind> for LookupOutcome {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Timeout => Self::Timeout,
            FailureKind::RemoteError => Self::RemoteError,
            FailureKind::Unreachable => Self::Unreachable,
        }
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
struct OutcomeCounters {
    success: AtomicU64,
    timeout: AtomicU64,
    remote_error: AtomicU64,
    unreachable: AtomicU64,
}

impl OutcomeCounters {
    fn record(&self, outcome: LookupOutcome) {
        let counter = match outcome {
            LookupOutcome::Success => &self.success,
            LookupOutcome::Timeout => &self.timeout,
            LookupOutcome::RemoteError => &self.remote_error,
            LookupOutcome::Unreachable => &self.unreachable,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> OutcomeCounts {
        OutcomeCounts {
            success: self.success.load(Ordering::Relaxed),
            timeout: self.timeout.load(Ordering::Relaxed),
            remote_error: self.remote_error.load(Ordering::Relaxed),
            unreachable: self.unreachable.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time outcome counts for one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OutcomeCounts {
    /// Lookups that populated the field.
    pub success: u64,
    /// Lookups that ran out of time.
    pub timeout: u64,
    /// Lookups answered with an error or unusable data.
    pub remote_error: u64,
    /// Lookups whose remote could not be reached.
    pub unreachable: u64,
}

impl OutcomeCounts {
    /// Returns the number of lookups that left the field empty.
    #[must_use]
    pub fn degraded(&self) -> u64 {
        self.timeout + self.remote_error + self.unreachable
    }
}

/// Point-in-time enrichment metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EnrichmentMetrics {
    /// Price lookup outcomes.
    pub price: OutcomeCounts,
    /// Location lookup outcomes.
    pub location: OutcomeCounts,
}

#[derive(Debug, Default)]
struct MetricsRecorder {
    price: OutcomeCounters,
    location: OutcomeCounters,
}

impl MetricsRecorder {
    fn record(&self, kind: LookupKind, outcome: LookupOutcome) {
        match kind {
            LookupKind::Price => self.price.record(outcome),
            LookupKind::Location => self.location.record(outcome),
        }
    }

    fn snapshot(&self) -> EnrichmentMetrics {
        EnrichmentMetrics {
            price: self.price.snapshot(),
            location: self.location.snapshot(),
        }
    }
}

/// Catalog service that merges stored vehicles with remote lookups.
#[derive(Debug)]
pub struct VehicleEnrichmentService {
    repository: Arc<dyn VehicleRepository>,
    price_client: Arc<dyn PriceLookup>,
    location_client: Arc<dyn LocationResolver>,
    config: EnrichmentConfig,
    metrics: MetricsRecorder,
}

impl VehicleEnrichmentService {
    /// Creates a new service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn VehicleRepository>,
        price_client: Arc<dyn PriceLookup>,
        location_client: Arc<dyn LocationResolver>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            repository,
            price_client,
            location_client,
            config,
            metrics: MetricsRecorder::default(),
        }
    }

    /// Creates a new service with default configuration.
    #[must_use]
    pub fn with_defaults(
        repository: Arc<dyn VehicleRepository>,
        price_client: Arc<dyn PriceLookup>,
        location_client: Arc<dyn LocationResolver>,
    ) -> Self {
        Self::new(
            repository,
            price_client,
            location_client,
            EnrichmentConfig::default(),
        )
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Returns a snapshot of the lookup outcome counters.
    #[must_use]
    pub fn metrics(&self) -> EnrichmentMetrics {
        self.metrics.snapshot()
    }

    /// Gets one vehicle with its price and address.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the vehicle does not exist and
    /// `ApplicationError::Repository` if the store fails. Lookup failures
    /// are not errors.
    pub async fn get(&self, id: VehicleId) -> ApplicationResult<EnrichedVehicleView> {
        let record = self.repository.find_by_id(id).await?;
        Ok(self.enrich(record).await)
    }

    /// Lists all vehicles ordered by ID, each enriched independently.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if the store fails.
    pub async fn list(&self) -> ApplicationResult<Vec<EnrichedVehicleView>> {
        let records = self.repository.list_all().await?;
        debug!(count = records.len(), "enriching vehicle list");

        let views = stream::iter(records)
            .map(|record| self.enrich(record))
            .buffered(self.config.list_concurrency.max(1))
            .collect::<Vec<_>>()
            .await;
        Ok(views)
    }

    /// Validates and stores a new vehicle. No lookups are made.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` if the draft is incomplete or
    /// out of range, and `ApplicationError::Repository` if the store fails.
    pub async fn create(&self, draft: VehicleDraft) -> ApplicationResult<VehicleRecord> {
        let attributes = draft.validate()?;
        let record = self.repository.create(attributes).await?;
        info!(vehicle_id = %record.id(), "vehicle created");
        Ok(record)
    }

    /// Replaces all attributes of an existing vehicle.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` if the draft is rejected,
    /// `ApplicationError::NotFound` if the vehicle does not exist, and
    /// `ApplicationError::Repository` if the store fails.
    pub async fn update(
        &self,
        id: VehicleId,
        draft: VehicleDraft,
    ) -> ApplicationResult<VehicleRecord> {
        let attributes = draft.validate()?;
        let record = self.repository.update(id, attributes).await?;
        info!(vehicle_id = %id, "vehicle updated");
        Ok(record)
    }

    /// Deletes a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the vehicle does not exist and
    /// `ApplicationError::Repository` if the store fails.
    pub async fn delete(&self, id: VehicleId) -> ApplicationResult<()> {
        self.repository.delete(id).await?;
        info!(vehicle_id = %id, "vehicle deleted");
        Ok(())
    }

    async fn enrich(&self, record: VehicleRecord) -> EnrichedVehicleView {
        let id = record.id();
        let coordinate = record.location();
        let budget = self.config.lookup_timeout();
        let budget_ms = self.config.lookup_timeout_ms;

        let price_client = Arc::clone(&self.price_client);
        let price_task = tokio::spawn(async move {
            match timeout(budget, price_client.quote(id)).await {
                Ok(result) => result,
                Err(_) => Err(LookupError::timeout_with_duration(
                    "price lookup deadline elapsed",
                    budget_ms,
                )),
            }
        });

        let location_client = Arc::clone(&self.location_client);
        let location_task = tokio::spawn(async move {
            match timeout(budget, location_client.resolve(coordinate)).await {
                Ok(result) => result,
                Err(_) => Err(LookupError::timeout_with_duration(
                    "location lookup deadline elapsed",
                    budget_ms,
                )),
            }
        });

        let (price, location) = tokio::join!(price_task, location_task);
        let price: Option<PriceQuote> = self.settle(LookupKind::Price, id, price);
        let location: Option<ResolvedLocation> = self.settle(LookupKind::Location, id, location);

        EnrichedVehicleView::new(record, price, location)
    }

    fn settle<T>(
        &self,
        kind: LookupKind,
        id: VehicleId,
        joined: Result<Result<T, LookupError>, JoinError>,
    ) -> Option<T> {
        let (value, outcome) = match joined {
            Ok(Ok(value)) => (Some(value), LookupOutcome::Success),
            Ok(Err(err)) => {
                let outcome = LookupOutcome::from(err.kind());
                warn!(
                    lookup = kind.as_str(),
                    vehicle_id = %id,
                    outcome = outcome.as_str(),
                    error = %err,
                    "enrichment degraded"
                );
                (None, outcome)
            }
            Err(err) => {
                warn!(
                    lookup = kind.as_str(),
                    vehicle_id = %id,
                    outcome = LookupOutcome::RemoteError.as_str(),
                    error = %err,
                    "lookup task failed"
                );
                (None, LookupOutcome::RemoteError)
            }
        };
        if outcome.is_success() {
            debug!(lookup = kind.as_str(), vehicle_id = %id, "lookup succeeded");
        }
        self.metrics.record(kind, outcome);
        value
    }
}
