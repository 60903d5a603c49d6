//! Marketplace state types and errors

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chain_gateway::{GatewayError, SwapDirection, TxReceipt};
use credmart_core::{CredentialId, StableAmount, TxHash};

/// Lifecycle of a trade submission.
///
/// Each trade is the two-step sequence approve-then-swap; the phase is
/// reported in logs as the sequence advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradePhase {
    Idle,
    Approving,
    Submitted,
    Confirmed,
    Reverted,
}

impl fmt::Display for TradePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Approving => "approving",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
            Self::Reverted => "reverted",
        };
        write!(f, "{}", s)
    }
}

/// Result of a pricing query for a prospective trade.
///
/// `effective_price` is input per output, decimal-adjusted: stablecoin
/// per token for buys, tokens per stablecoin for sells. The figure is an
/// estimate pending confirmation; the swap's on-chain minimum-output
/// bound is what actually protects the trade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quote {
    pub direction: SwapDirection,
    /// Input amount in its asset's base units
    pub amount_in: u128,
    /// Output amount in its asset's base units
    pub amount_out: u128,
    /// Fee taken by the pool, in stablecoin base units
    pub fee: StableAmount,
    pub effective_price: f64,
    /// Minimum output at the default slippage tolerance
    pub min_output_suggested: u128,
}

/// Outcome of a credential token creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCreation {
    pub token: credmart_core::Address,
    /// Fee approval submitted by this call, if the allowance was not
    /// already in place
    pub approval_tx: Option<TxHash>,
    pub receipt: TxReceipt,
}

/// Outcome of a market (pool) creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketCreation {
    /// Approvals submitted by this call, in submission order
    pub approvals: Vec<TxHash>,
    pub receipt: TxReceipt,
}

/// Outcome of a confirmed swap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub receipt: TxReceipt,
    /// Approval submitted by this call, if one was needed
    pub approval_tx: Option<TxHash>,
    /// The quote the minimum-output bound was derived from
    pub quote: Quote,
    /// The bound that was enforced on-chain
    pub min_output: u128,
}

/// Outcome of a liquidity provision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityReceipt {
    pub receipt: TxReceipt,
    pub approvals: Vec<TxHash>,
    /// Minimum liquidity shares that were demanded (0 when bootstrapping
    /// an empty pool)
    pub min_liquidity: u128,
}

/// Marketplace operation errors
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Signer required: connect a wallet before mutating operations")]
    SignerRequired,

    #[error("No market exists for credential {id}")]
    PoolNotFound { id: CredentialId },

    #[error("Insufficient {asset} balance: need {required}, have {available}")]
    InsufficientBalance {
        asset: &'static str,
        required: String,
        available: String,
    },

    #[error("Insufficient liquidity in the pool")]
    InsufficientLiquidity,

    #[error("Output fell below the slippage bound")]
    SlippageExceeded,

    #[error("Deadline expired before execution")]
    DeadlineExpired,

    /// The approval step of a two-phase operation failed; nothing was
    /// spent and the whole operation can be retried.
    #[error("Approval failed for {op}: {source}")]
    ApprovalFailed {
        op: &'static str,
        source: GatewayError,
    },

    /// The action step failed after its approvals confirmed. Retry the
    /// action without re-approving; the listed approvals are in place.
    #[error("{op} failed after {n} confirmed approval(s): {source}", n = approvals.len())]
    ActionFailed {
        op: &'static str,
        approvals: Vec<TxHash>,
        source: GatewayError,
    },

    /// The chain rejected the transaction for a reason outside the known
    /// vocabulary; carries the raw revert reason.
    #[error("Contract reverted: {reason}")]
    Reverted { reason: String },

    /// The write did not confirm within the configured window. Its
    /// on-chain status is unknown: it may still land. Only a later
    /// balance check confirms the outcome.
    #[error("No confirmation after {after_secs}s; transaction status unknown")]
    Timeout { after_secs: u64 },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Core(#[from] credmart_core::Error),
}

impl From<credmart_core::EncodingError> for MarketError {
    fn from(e: credmart_core::EncodingError) -> Self {
        Self::Core(e.into())
    }
}

impl From<credmart_core::UnitError> for MarketError {
    fn from(e: credmart_core::UnitError) -> Self {
        Self::Core(e.into())
    }
}

/// Result type alias for marketplace operations
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chain_gateway::reasons;

    #[test]
    fn test_action_failed_counts_approvals() {
        let err = MarketError::ActionFailed {
            op: "create_pool",
            approvals: vec![TxHash::new("0x01"), TxHash::new("0x02")],
            source: GatewayError::revert(reasons::POOL_EXISTS),
        };
        let msg = err.to_string();
        assert!(msg.contains("create_pool"));
        assert!(msg.contains("2 confirmed approval(s)"));
    }

    #[test]
    fn test_trade_phase_display() {
        assert_eq!(TradePhase::Approving.to_string(), "approving");
        assert_eq!(TradePhase::Confirmed.to_string(), "confirmed");
    }
}
