//! Pricing service server.

use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use vehicle_catalog::infrastructure::config::PricingServiceConfig;
use vehicle_catalog::pricing::{PriceTable, create_pricing_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PricingServiceConfig::load().context("loading configuration")?;
    config.logging.init()?;

    let table = PriceTable::generate(config.seed);
    info!(vehicles = table.len(), seeded = config.seed.is_some(), "price table generated");

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, "pricing service listening");

    axum::serve(listener, create_pricing_router(Arc::new(table)))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await
        .context("serving HTTP")?;

    info!("pricing service stopped");
    Ok(())
}
