//! Credmart-api: HTTP API layer for Credmart
//!
//! Exposes the marketplace client to a frontend over a RESTful API.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, WalletState};
