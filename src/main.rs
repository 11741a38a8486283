//! Vehicle catalog API server.

use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use vehicle_catalog::api::rest::{AppState, LinkBuilder, create_router};
use vehicle_catalog::application::services::VehicleEnrichmentService;
use vehicle_catalog::infrastructure::config::AppConfig;
use vehicle_catalog::infrastructure::lookups::{
    HttpClient, HttpLocationResolverClient, HttpPriceLookupClient, LocationResolver, PriceLookup,
};
use vehicle_catalog::infrastructure::persistence::VehicleRepository;
use vehicle_catalog::infrastructure::persistence::in_memory::InMemoryVehicleRepository;
use vehicle_catalog::infrastructure::persistence::postgres::PostgresVehicleRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.logging.init()?;

    let repository: Arc<dyn VehicleRepository> = match &config.storage.database_url {
        Some(url) => {
            let repo = PostgresVehicleRepository::connect(url, config.storage.max_connections)
                .await
                .context("connecting to PostgreSQL")?;
            repo.migrate().await.context("migrating vehicle schema")?;
            info!("using PostgreSQL vehicle store");
            Arc::new(repo)
        }
        None => {
            info!("no database configured, using in-memory vehicle store");
            Arc::new(InMemoryVehicleRepository::new())
        }
    };

    let pricing_http = HttpClient::new(config.pricing.timeout_ms, config.pricing.max_in_flight)
        .context("building pricing client")?;
    let price_client: Arc<dyn PriceLookup> = Arc::new(HttpPriceLookupClient::new(
        pricing_http,
        &config.pricing.base_url,
    ));

    let maps_http = HttpClient::new(config.maps.timeout_ms, config.maps.max_in_flight)
        .context("building maps client")?;
    let location_client: Arc<dyn LocationResolver> = Arc::new(HttpLocationResolverClient::new(
        maps_http,
        &config.maps.base_url,
    ));

    info!(
        pricing = price_client.name(),
        pricing_url = %config.pricing.base_url,
        maps = location_client.name(),
        maps_url = %config.maps.base_url,
        lookup_timeout_ms = config.enrichment.lookup_timeout_ms,
        "lookup clients ready"
    );

    let service = Arc::new(VehicleEnrichmentService::new(
        repository,
        price_client,
        location_client,
        config.enrichment.clone(),
    ));
    let state = AppState::new(service, LinkBuilder::new(config.server.base_url()));

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, "vehicles API listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("vehicles API stopped");
    Ok(())
}

async fn shutdown_signal() {
    // An error here means no handler could be installed; serve until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
