//! Gateway error types

use thiserror::Error;

/// Errors crossing the contract boundary.
///
/// Transient transport failures and deterministic contract rejections are
/// separate variants: the former may be retried, the latter must be
/// surfaced to the caller as-is.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// RPC / network failure; the call may not have reached the chain
    #[error("Gateway transport error: {message}")]
    Transport { message: String },

    /// The chain rejected the call; carries the raw revert reason
    #[error("Contract reverted: {reason}")]
    Revert { reason: String },

    /// A contract return value did not match its expected schema
    #[error("Failed to decode contract response: {message}")]
    Decode { message: String },
}

impl GatewayError {
    /// Shorthand for a revert with a known reason string
    pub fn revert(reason: impl Into<String>) -> Self {
        Self::Revert {
            reason: reason.into(),
        }
    }

    /// Whether retrying the same call could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The raw revert reason, if the chain rejected the call
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::Revert { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Revert reason strings produced by the deployed contracts.
pub mod reasons {
    pub const INSUFFICIENT_LIQUIDITY: &str = "INSUFFICIENT_LIQUIDITY";
    pub const SLIPPAGE_EXCEEDED: &str = "SLIPPAGE_EXCEEDED";
    pub const DEADLINE_EXPIRED: &str = "DEADLINE_EXPIRED";
    pub const INSUFFICIENT_BALANCE: &str = "INSUFFICIENT_BALANCE";
    pub const UNAUTHORIZED_MINTER: &str = "UNAUTHORIZED_MINTER";
    pub const INSUFFICIENT_ALLOWANCE: &str = "INSUFFICIENT_ALLOWANCE";
    pub const POOL_EXISTS: &str = "POOL_EXISTS";
    pub const POOL_NOT_FOUND: &str = "POOL_NOT_FOUND";
    pub const TOKEN_EXISTS: &str = "TOKEN_EXISTS";
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let transport = GatewayError::Transport {
            message: "connection refused".into(),
        };
        assert!(transport.is_transient());
        assert!(transport.revert_reason().is_none());

        let revert = GatewayError::revert(reasons::SLIPPAGE_EXCEEDED);
        assert!(!revert.is_transient());
        assert_eq!(revert.revert_reason(), Some("SLIPPAGE_EXCEEDED"));
    }
}
