//! Data Transfer Objects for API requests and responses

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// API error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Wallet connect request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConnectRequest {
    pub address: String,
}

/// Wallet session response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletResponse {
    pub connected: bool,
    pub address: Option<String>,
}

/// Stablecoin balance response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub address: String,
    /// Human-readable decimal amount
    pub balance: String,
    /// Raw 6-decimal base units
    pub units: u128,
}

/// Pool snapshot response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolResponse {
    pub credential: String,
    pub token: String,
    pub token_reserves: String,
    pub stable_reserves: String,
    pub total_liquidity: u128,
    pub last_price: f64,
    pub is_active: bool,
}

/// Trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub credential: String,
    pub side: TradeSide,
    /// Input amount as a human-readable decimal (stablecoin for buys,
    /// tokens for sells)
    pub amount_in: String,
}

/// Quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub side: TradeSide,
    pub amount_in: String,
    pub amount_out: String,
    /// Pool fee in stablecoin
    pub fee: String,
    /// Input per output, decimal-adjusted. Estimate pending confirmation.
    pub effective_price: f64,
    pub min_output_suggested: String,
}

/// Token creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTokenRequest {
    pub credential: String,
    pub name: String,
    pub symbol: String,
    /// Tokens per day, human-readable decimal
    pub emission_rate: String,
    pub max_supply: String,
}

/// Token creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTokenResponse {
    pub token: String,
    pub approval_tx: Option<String>,
    pub tx_hash: String,
}

/// Market creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMarketRequest {
    pub credential: String,
    pub token: String,
    pub token_amount: String,
    pub stable_amount: String,
}

/// Market creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMarketResponse {
    pub approvals: Vec<String>,
    pub tx_hash: String,
}

/// Trade request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    pub credential: String,
    pub side: TradeSide,
    pub amount_in: String,
    /// Slippage tolerance in basis points; defaults to the server's
    /// configured tolerance
    #[serde(default)]
    pub slippage_bps: Option<u32>,
}

/// Trade response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeResponse {
    pub tx_hash: String,
    pub approval_tx: Option<String>,
    pub amount_out: String,
    pub min_output: String,
    pub effective_price: f64,
}

/// Liquidity provision request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityRequest {
    pub credential: String,
    pub token_amount: String,
    pub stable_amount: String,
    #[serde(default)]
    pub slippage_bps: Option<u32>,
}

/// Liquidity provision response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityResponse {
    pub tx_hash: String,
    pub approvals: Vec<String>,
    pub min_liquidity: u128,
}

/// Pending rewards response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsResponse {
    pub credential: String,
    pub address: String,
    pub pending: String,
}

/// Reward claim response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub tx_hash: String,
}

/// Faucet mint request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetRequest {
    pub amount: String,
}

/// Generic transaction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxResponse {
    pub tx_hash: String,
    pub block_number: u64,
}
