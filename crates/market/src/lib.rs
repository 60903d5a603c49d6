//! Credential marketplace client
//!
//! Single point of contact between callers and the four marketplace
//! contracts: owns unit-converted quoting, slippage-bounded trade
//! submission with honest deadlines, two-phase approve/act sequencing
//! with step-tagged partial failure, and revert-reason translation.

pub mod calculator;
pub mod client;
pub mod constants;
pub mod state;
pub mod translate;

// Re-exports
pub use calculator::{
    effective_price, expected_liquidity_shares, min_output_after_slippage, price_impact,
    swap_deadline,
};
pub use client::MarketplaceClient;
pub use state::{
    LiquidityReceipt, MarketCreation, MarketError, Quote, TokenCreation, TradePhase, TradeReceipt,
};
pub use translate::{translate_error, translate_reason};
