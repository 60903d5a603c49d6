//! chain-gateway: Typed boundary between Credmart and the deployed contracts
//!
//! Four contracts (stablecoin, token factory, AMM, fee collector) are
//! reachable only through the [`ContractGateway`] trait. Every contract
//! return value is decoded into an explicit struct at this boundary, so
//! schema mismatches surface here rather than deep in calling code.
//!
//! The production JSON-RPC transport behind this trait is an external
//! collaborator; this crate ships [`sim::SimChain`], an in-memory
//! implementation of all four contracts used for development and tests.

pub mod error;
pub mod gateway;
pub mod sim;
pub mod types;

pub use error::{reasons, GatewayError, Result};
pub use gateway::ContractGateway;
pub use sim::{SimChain, FEE_DENOM, FEE_NUM, FREE_MINT_MAX, MINT_FEE};
pub use types::{
    AmountOut, PoolState, Signer, SwapDirection, TokenCreated, TokenParams, TxReceipt,
};
