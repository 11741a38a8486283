//! # Remote Lookups
//!
//! Clients for the services that enrich a vehicle record.
//!
//! - [`PriceLookup`] / [`HttpPriceLookupClient`]: live price per vehicle ID
//! - [`LocationResolver`] / [`HttpLocationResolverClient`]: address per coordinate
//! - [`HttpClient`]: shared reqwest wrapper with timeout and in-flight cap

pub mod error;
pub mod http_client;
pub mod maps;
pub mod pricing;
pub mod traits;

pub use error::{FailureKind, LookupError, LookupResult};
pub use http_client::HttpClient;
pub use maps::HttpLocationResolverClient;
pub use pricing::HttpPriceLookupClient;
pub use traits::{LocationResolver, PriceLookup};
