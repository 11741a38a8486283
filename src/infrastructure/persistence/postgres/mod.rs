//! # PostgreSQL Persistence
//!
//! sqlx-backed repository used when a database URL is configured.

pub mod vehicle_repository;

pub use vehicle_repository::PostgresVehicleRepository;
