//! Error types for Credmart

use thiserror::Error;

/// Core errors that can occur in Credmart
#[derive(Debug, Error)]
pub enum Error {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Unit conversion error: {0}")]
    Unit(#[from] UnitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Fixed-width encoding errors for identifiers, addresses, and hashes
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Label is {len} bytes, exceeds fixed-width capacity of {max}")]
    LabelTooLong { len: usize, max: usize },

    #[error("Invalid hex: {message}")]
    InvalidHex { message: String },

    #[error("Invalid length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("Identifier bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Fixed-point decimal conversion errors
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("Not a valid decimal number: {input:?}")]
    InvalidNumber { input: String },

    #[error("Too many decimal places: {decimals} given, at most {max} representable")]
    TooManyDecimals { decimals: usize, max: usize },

    #[error("Amount does not fit in fixed-point range")]
    Overflow,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid address for {name}: {reason}")]
    InvalidAddress { name: String, reason: String },

    #[error("No {name} contract address configured for the active network")]
    MissingContract { name: &'static str },
}

/// Result type alias for Credmart operations
pub type Result<T> = std::result::Result<T, Error>;
