//! Revert-reason translation
//!
//! Maps the fixed vocabulary of known contract revert reasons to stable
//! human-readable strings. Unrecognized reasons pass through verbatim so
//! nothing the chain said is ever swallowed.

use chain_gateway::{reasons, GatewayError};

use crate::state::MarketError;

/// Translate a raw revert reason. Known reasons map to fixed strings;
/// anything else is returned unchanged.
pub fn translate_reason(reason: &str) -> String {
    match reason {
        reasons::INSUFFICIENT_LIQUIDITY => {
            "The pool does not hold enough liquidity for this trade".to_string()
        }
        reasons::SLIPPAGE_EXCEEDED => {
            "Price moved beyond your slippage tolerance; refresh the quote and retry".to_string()
        }
        reasons::DEADLINE_EXPIRED => {
            "The transaction deadline passed before it was executed".to_string()
        }
        reasons::INSUFFICIENT_BALANCE => {
            "Your balance is too low for this operation".to_string()
        }
        reasons::UNAUTHORIZED_MINTER => {
            "This account is not authorized to mint".to_string()
        }
        other => other.to_string(),
    }
}

/// Human-readable message for any marketplace error, for display layers.
pub fn translate_error(err: &MarketError) -> String {
    match err {
        MarketError::InsufficientLiquidity => translate_reason(reasons::INSUFFICIENT_LIQUIDITY),
        MarketError::SlippageExceeded => translate_reason(reasons::SLIPPAGE_EXCEEDED),
        MarketError::DeadlineExpired => translate_reason(reasons::DEADLINE_EXPIRED),
        MarketError::InsufficientBalance { .. } => {
            translate_reason(reasons::INSUFFICIENT_BALANCE)
        }
        MarketError::Reverted { reason } => translate_reason(reason),
        MarketError::Gateway(GatewayError::Revert { reason }) => translate_reason(reason),
        MarketError::ActionFailed { source, .. } => match source.revert_reason() {
            Some(reason) => translate_reason(reason),
            None => err.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_reasons_map_to_fixed_strings() {
        assert_eq!(
            translate_reason(reasons::INSUFFICIENT_LIQUIDITY),
            "The pool does not hold enough liquidity for this trade"
        );
        assert_eq!(
            translate_reason(reasons::SLIPPAGE_EXCEEDED),
            "Price moved beyond your slippage tolerance; refresh the quote and retry"
        );
        assert_eq!(
            translate_reason(reasons::DEADLINE_EXPIRED),
            "The transaction deadline passed before it was executed"
        );
        assert_eq!(
            translate_reason(reasons::INSUFFICIENT_BALANCE),
            "Your balance is too low for this operation"
        );
        assert_eq!(
            translate_reason(reasons::UNAUTHORIZED_MINTER),
            "This account is not authorized to mint"
        );
    }

    #[test]
    fn test_unknown_reason_passes_through_unchanged() {
        assert_eq!(translate_reason("POOL_EXISTS"), "POOL_EXISTS");
        assert_eq!(
            translate_reason("some novel revert text"),
            "some novel revert text"
        );
    }

    #[test]
    fn test_translate_error_uses_typed_variants() {
        let msg = translate_error(&MarketError::SlippageExceeded);
        assert_eq!(
            msg,
            "Price moved beyond your slippage tolerance; refresh the quote and retry"
        );

        let msg = translate_error(&MarketError::Reverted {
            reason: "WEIRD_REASON".into(),
        });
        assert_eq!(msg, "WEIRD_REASON");
    }

    #[test]
    fn test_translate_error_reaches_into_partial_failures() {
        let err = MarketError::ActionFailed {
            op: "swap",
            approvals: vec![],
            source: GatewayError::revert(reasons::DEADLINE_EXPIRED),
        };
        assert_eq!(
            translate_error(&err),
            "The transaction deadline passed before it was executed"
        );
    }
}
