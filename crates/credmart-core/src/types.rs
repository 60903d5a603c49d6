//! Core type definitions for Credmart

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::EncodingError;

/// Contract or account address (20 bytes, 0x-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// Wrap an address string without validation
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Parse and validate an address string
    pub fn parse(addr: &str) -> Result<Self, EncodingError> {
        let hex_part = addr
            .strip_prefix("0x")
            .ok_or_else(|| EncodingError::InvalidHex {
                message: format!("address missing 0x prefix: {}", addr),
            })?;

        if hex_part.len() != 40 {
            return Err(EncodingError::InvalidLength {
                expected: 40,
                found: hex_part.len(),
            });
        }

        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EncodingError::InvalidHex {
                message: format!("address contains non-hex characters: {}", addr),
            });
        }

        Ok(Self(addr.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction hash (32 bytes, 0x-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum label length a credential identifier can hold.
///
/// One byte of the 32 is reserved so a full-width label always keeps at
/// least one zero byte of padding, which is what the decoder strips.
pub const MAX_LABEL_BYTES: usize = 31;

/// Opaque 32-byte credential identifier.
///
/// Built from a UTF-8 label of up to [`MAX_LABEL_BYTES`] bytes, zero-padded
/// to fixed width. The label round-trips losslessly; over-long labels are
/// rejected rather than truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId([u8; 32]);

impl CredentialId {
    /// Encode a label into a fixed-width identifier.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        let bytes = label.as_bytes();
        if bytes.len() > MAX_LABEL_BYTES {
            return Err(EncodingError::LabelTooLong {
                len: bytes.len(),
                max: MAX_LABEL_BYTES,
            });
        }

        let mut raw = [0u8; 32];
        raw[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(raw))
    }

    /// Decode the identifier back to its label, stripping zero padding.
    pub fn label(&self) -> Result<String, EncodingError> {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map(|p| p + 1)
            .unwrap_or(0);
        String::from_utf8(self.0[..end].to_vec()).map_err(|_| EncodingError::InvalidUtf8)
    }

    /// Construct from raw bytes (e.g. decoded from a contract event)
    pub fn from_bytes(raw: [u8; 32]) -> Self {
        Self(raw)
    }

    /// Parse from a hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex_part).map_err(|e| EncodingError::InvalidHex {
            message: e.to_string(),
        })?;
        let raw: [u8; 32] = bytes
            .try_into()
            .map_err(|_| EncodingError::InvalidLength {
                expected: 32,
                found: hex_part.len() / 2,
            })?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for CredentialId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CredentialId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    /// Local development chain (simulated backend)
    Local,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Block height
pub type BlockHeight = u64;
