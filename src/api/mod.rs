//! # API Layer
//!
//! Inbound HTTP adapters.

pub mod rest;
