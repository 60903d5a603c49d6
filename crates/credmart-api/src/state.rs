//! Application state shared across API handlers

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::RwLock;

use chain_gateway::Signer;
use credmart_core::Address;
use market::MarketplaceClient;

/// Errors that can occur in the API layer
#[derive(Debug, Error)]
pub enum ApiStateError {
    /// Invalid wallet address format
    #[error("Invalid wallet address: {reason}")]
    InvalidAddress { reason: String },
}

/// State representing a connected wallet session.
#[derive(Clone, Debug)]
pub struct WalletState {
    /// The wallet's account address (0x-prefixed hex)
    pub address: Address,
    /// When the wallet was connected
    pub connected_at: Instant,
}

impl WalletState {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            connected_at: Instant::now(),
        }
    }
}

/// Shared application state.
///
/// Owns the injected marketplace client; connecting a wallet binds the
/// client's signer, disconnecting clears it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    client: Arc<MarketplaceClient>,
    wallet: RwLock<Option<WalletState>>,
}

impl AppState {
    pub fn new(client: Arc<MarketplaceClient>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                client,
                wallet: RwLock::new(None),
            }),
        }
    }

    pub fn client(&self) -> &MarketplaceClient {
        &self.inner.client
    }

    /// Get current wallet session
    pub async fn wallet(&self) -> Option<WalletState> {
        self.inner.wallet.read().await.clone()
    }

    /// Connect a wallet: validate the address and attach it as the
    /// client's signer.
    pub async fn connect_wallet(&self, address: &str) -> Result<WalletState, ApiStateError> {
        let address = Address::parse(address).map_err(|e| ApiStateError::InvalidAddress {
            reason: e.to_string(),
        })?;

        self.inner
            .client
            .set_signer(Signer::new(address.clone()))
            .await;

        let wallet = WalletState::new(address);
        *self.inner.wallet.write().await = Some(wallet.clone());
        Ok(wallet)
    }

    /// Disconnect the wallet and drop the client's signer
    pub async fn disconnect_wallet(&self) {
        self.inner.client.clear_signer().await;
        *self.inner.wallet.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_gateway::SimChain;
    use credmart_core::MarketConfig;

    fn state() -> AppState {
        let client = Arc::new(MarketplaceClient::new(
            Arc::new(SimChain::new()),
            MarketConfig::default(),
        ));
        AppState::new(client)
    }

    #[tokio::test]
    async fn test_connect_validates_address() {
        let state = state();
        let result = state.connect_wallet("not-an-address").await;
        assert!(matches!(result, Err(ApiStateError::InvalidAddress { .. })));
        assert!(state.wallet().await.is_none());
    }

    #[tokio::test]
    async fn test_connect_binds_signer() {
        let state = state();
        let addr = format!("0x{:040x}", 0xbeef);
        state.connect_wallet(&addr).await.unwrap();

        assert!(state.wallet().await.is_some());
        assert_eq!(
            state.client().signer_address().await.map(|a| a.0),
            Some(addr)
        );

        state.disconnect_wallet().await;
        assert!(state.wallet().await.is_none());
        assert!(state.client().signer_address().await.is_none());
    }
}
