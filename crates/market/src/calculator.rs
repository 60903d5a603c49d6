//! Trade bounding and labeling helpers.
//!
//! These functions bound (slippage floors, liquidity minimums) and label
//! (effective price, price impact) values the AMM contract computed. They
//! never price a trade themselves; the contract's `getAmountOut` is the
//! only quote path.

use std::time::{SystemTime, UNIX_EPOCH};

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use chain_gateway::PoolState;

use crate::constants::BPS_DENOM;

/// Minimum acceptable output for a quoted amount under a slippage
/// tolerance in basis points: `floor(amount_out * (1 - tolerance))`.
pub fn min_output_after_slippage(amount_out: u128, slippage_bps: u32) -> u128 {
    if slippage_bps as u128 >= BPS_DENOM {
        return 0;
    }
    let result = BigUint::from(amount_out) * BigUint::from(BPS_DENOM - slippage_bps as u128)
        / BigUint::from(BPS_DENOM);
    result.to_u128().unwrap_or(0)
}

/// Execution price as input per output, decimal-adjusted.
pub fn effective_price(amount_in: f64, amount_out: f64) -> f64 {
    if amount_out == 0.0 {
        return 0.0;
    }
    amount_in / amount_out
}

/// Adverse price movement of the execution price against the spot price,
/// as a percentage.
pub fn price_impact(spot_price: f64, execution_price: f64) -> f64 {
    if spot_price == 0.0 {
        return 0.0;
    }
    ((execution_price - spot_price) / spot_price).abs() * 100.0
}

/// Liquidity shares a deposit is expected to mint at current reserves:
/// `min(token_in * L / token_reserves, stable_in * L / stable_reserves)`.
///
/// Returns 0 for an empty pool; the first provision bootstraps the share
/// supply on-chain and carries no minimum bound.
pub fn expected_liquidity_shares(
    token_in: u128,
    stable_in: u128,
    pool: &PoolState,
) -> u128 {
    if pool.total_liquidity == 0
        || pool.token_reserves.is_zero()
        || pool.stable_reserves.is_zero()
    {
        return 0;
    }
    let by_token = BigUint::from(token_in) * BigUint::from(pool.total_liquidity)
        / BigUint::from(pool.token_reserves.units());
    let by_stable = BigUint::from(stable_in) * BigUint::from(pool.total_liquidity)
        / BigUint::from(pool.stable_reserves.units());
    by_token.min(by_stable).to_u128().unwrap_or(0)
}

/// Deadline for a swap: current unix time plus the configured window.
pub fn swap_deadline(window_secs: u64) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    now + window_secs
}
