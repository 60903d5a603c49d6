//! Credmart dev server: serves the marketplace API over the simulated
//! chain. Connect a wallet, hit the faucet, and trade against a local
//! constant-product pool with no external dependencies.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chain_gateway::SimChain;
use credmart_api::{start_server, AppState};
use credmart_core::AppConfig;
use market::MarketplaceClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::default();
    tracing::info!(network = %config.network, "starting credmart over the simulated chain");

    let gateway = Arc::new(SimChain::new());
    let client = Arc::new(MarketplaceClient::new(gateway, config.market.clone()));
    let state = AppState::new(client);

    start_server(state, config.api_port).await?;
    Ok(())
}
