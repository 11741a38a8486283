//! # Persistence Layer
//!
//! Vehicle storage behind the [`VehicleRepository`] port.
//!
//! ## Implementations
//!
//! - `in_memory`: process-local storage, used by default and in tests
//! - `postgres`: PostgreSQL storage via sqlx, selected by `storage.database_url`

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{RepositoryError, RepositoryResult, VehicleRepository};
