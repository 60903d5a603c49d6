//! Configuration types for Credmart

use serde::{Deserialize, Serialize};

use crate::{Address, Network};

/// Addresses of the four deployed marketplace contracts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractAddresses {
    /// Test stablecoin (6 decimals)
    pub stablecoin: Address,
    /// Credential token factory
    pub token_factory: Address,
    /// Constant-product AMM
    pub amm: Address,
    /// Fee collector / reward distributor
    pub fee_collector: Address,
}

/// Chain gateway connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// RPC endpoint URL (e.g., "http://127.0.0.1:8545")
    pub url: String,

    /// Per-request timeout for read calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Marketplace client behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// How long to wait for a write transaction to confirm, in seconds.
    /// On expiry the operation is failed-unconfirmed, not failed: the
    /// transaction may still land later.
    #[serde(default = "default_confirm_timeout_secs")]
    pub confirm_timeout_secs: u64,

    /// Default slippage tolerance in basis points (50 = 0.5%)
    #[serde(default = "default_slippage_bps")]
    pub default_slippage_bps: u32,

    /// Swap deadline window in seconds from submission time
    #[serde(default = "default_deadline_window_secs")]
    pub deadline_window_secs: u64,
}

fn default_confirm_timeout_secs() -> u64 {
    90
}

fn default_slippage_bps() -> u32 {
    50
}

fn default_deadline_window_secs() -> u64 {
    3600
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            confirm_timeout_secs: default_confirm_timeout_secs(),
            default_slippage_bps: default_slippage_bps(),
            deadline_window_secs: default_deadline_window_secs(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gateway connection settings
    pub gateway: GatewayConfig,

    /// Network (mainnet, testnet, or local)
    pub network: Network,

    /// Marketplace client settings
    #[serde(default)]
    pub market: MarketConfig,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_port() -> u16 {
    18545
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            network: Network::Local,
            market: MarketConfig::default(),
            api_port: default_api_port(),
        }
    }
}
