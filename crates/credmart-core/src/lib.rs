//! Credmart-core: Shared types, units, errors, and configuration
//!
//! This crate provides the foundational types used across the Credmart workspace.

pub mod config;
pub mod errors;
pub mod types;
pub mod units;

pub use config::*;
pub use errors::*;
pub use types::*;
pub use units::*;
