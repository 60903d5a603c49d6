//! Marketplace protocol constants

use credmart_core::StableAmount;

/// Flat fee for minting a credential token, approved to the fee
/// collector before creation. Mirrors the factory contract's parameter.
pub const MINT_FEE: StableAmount = chain_gateway::MINT_FEE;

/// Default slippage tolerance in basis points (0.5%)
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;

/// Basis-point denominator
pub const BPS_DENOM: u128 = 10_000;

/// Default swap deadline window: one hour from submission
pub const DEADLINE_WINDOW_SECS: u64 = 3600;
