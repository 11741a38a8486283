//! # Infrastructure Layer
//!
//! Adapters around the domain: remote lookup clients, persistence, and
//! configuration.

pub mod config;
pub mod lookups;
pub mod persistence;
