//! # In-Memory Repositories
//!
//! In-memory implementations for running without a database.
//!
//! ## Thread Safety
//!
//! Storage sits behind `Arc<RwLock<..>>`, so clones share the same data.

pub mod vehicle_repository;

pub use vehicle_repository::InMemoryVehicleRepository;
