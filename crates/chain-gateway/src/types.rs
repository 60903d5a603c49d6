//! Gateway boundary types
//!
//! Value types passed across the client/contract boundary, decoded once
//! from contract call results.

use serde::{Deserialize, Serialize};

use credmart_core::{Address, BlockHeight, StableAmount, TokenAmount, TxHash};

/// Write capability: the account a mutating transaction is sent from.
///
/// Read calls never take one; write calls always do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    address: Address,
}

impl Signer {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

/// Confirmation of a mined transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: BlockHeight,
}

/// Parameters for minting a new credential token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    /// Emission rate in token base units per day
    pub emission_rate: TokenAmount,
    /// Maximum supply in token base units
    pub max_supply: TokenAmount,
}

/// Result of a token factory creation call, decoded from the
/// `TokenCreated` event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCreated {
    pub token: Address,
    pub receipt: TxReceipt,
}

/// AMM pool snapshot for one credential token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolState {
    pub token: Address,
    pub token_reserves: TokenAmount,
    pub stable_reserves: StableAmount,
    /// Total liquidity shares outstanding
    pub total_liquidity: u128,
    /// Stablecoin per token, decimal-adjusted, as of the last trade
    pub last_price: f64,
    pub is_active: bool,
}

/// Swap direction through the AMM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Stablecoin in, credential tokens out (buy)
    StableToToken,
    /// Credential tokens in, stablecoin out (sell)
    TokenToStable,
}

/// Result of the AMM's `getAmountOut` call.
///
/// `amount_out` is in the output asset's base units (18-dp tokens for
/// [`SwapDirection::StableToToken`], 6-dp stablecoin for
/// [`SwapDirection::TokenToStable`]). `fee` is always in stablecoin base
/// units; that is the asset the fee collector skims.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmountOut {
    pub amount_out: u128,
    pub fee: u128,
}
