//! Fixed-point monetary amounts.
//!
//! Stablecoin amounts use 6-decimal fixed point, credential-token amounts
//! use 18-decimal fixed point. Both are stored as raw base units (`u128`)
//! and converted to/from human-readable decimal strings with pure integer
//! math, so `parse(format(x)) == x` holds for every representable value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::UnitError;

/// Decimal places of the stablecoin
pub const STABLE_DECIMALS: u32 = 6;
/// Decimal places of credential tokens
pub const TOKEN_DECIMALS: u32 = 18;

/// Base units per whole stablecoin
pub const STABLE_SCALE: u128 = 1_000_000;
/// Base units per whole credential token
pub const TOKEN_SCALE: u128 = 1_000_000_000_000_000_000;

/// Format raw base units as a decimal string, trimming trailing zeros.
fn format_fixed(raw: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let int = raw / scale;
    let frac = raw % scale;

    if frac == 0 {
        return int.to_string();
    }

    let mut frac_str = format!("{:0width$}", frac, width = decimals as usize);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{}.{}", int, frac_str)
}

/// Parse a non-negative decimal string into raw base units.
fn parse_fixed(s: &str, decimals: u32) -> Result<u128, UnitError> {
    let s = s.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(UnitError::InvalidNumber { input: s.to_string() });
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(UnitError::InvalidNumber { input: s.to_string() });
    }
    if frac_part.len() > decimals as usize {
        return Err(UnitError::TooManyDecimals {
            decimals: frac_part.len(),
            max: decimals as usize,
        });
    }

    let scale = 10u128.pow(decimals);
    let int_val: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| UnitError::Overflow)?
    };

    let frac_val: u128 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_part, width = decimals as usize);
        padded.parse().map_err(|_| UnitError::Overflow)?
    };

    int_val
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_val))
        .ok_or(UnitError::Overflow)
}

/// Stablecoin amount in 6-decimal base units
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StableAmount(u128);

impl StableAmount {
    pub const ZERO: Self = Self(0);

    pub const fn from_units(units: u128) -> Self {
        Self(units)
    }

    pub const fn units(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a human-readable decimal string (e.g. "10.5")
    pub fn parse(s: &str) -> Result<Self, UnitError> {
        parse_fixed(s, STABLE_DECIMALS).map(Self)
    }

    /// Format as a human-readable decimal string
    pub fn format(self) -> String {
        format_fixed(self.0, STABLE_DECIMALS)
    }

    /// Decimal value as f64, for display-side ratios only
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / STABLE_SCALE as f64
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for StableAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// Credential-token amount in 18-decimal base units
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub const fn from_units(units: u128) -> Self {
        Self(units)
    }

    pub const fn units(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a human-readable decimal string (e.g. "1000" or "0.000000000000000001")
    pub fn parse(s: &str) -> Result<Self, UnitError> {
        parse_fixed(s, TOKEN_DECIMALS).map(Self)
    }

    /// Format as a human-readable decimal string
    pub fn format(self) -> String {
        format_fixed(self.0, TOKEN_DECIMALS)
    }

    /// Decimal value as f64, for display-side ratios only
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / TOKEN_SCALE as f64
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_format_basic() {
        assert_eq!(StableAmount::from_units(1_000_000).format(), "1");
        assert_eq!(StableAmount::from_units(1_500_000).format(), "1.5");
        assert_eq!(StableAmount::from_units(1).format(), "0.000001");
        assert_eq!(StableAmount::ZERO.format(), "0");
    }

    #[test]
    fn test_stable_parse_basic() {
        assert_eq!(StableAmount::parse("1").unwrap().units(), 1_000_000);
        assert_eq!(StableAmount::parse("10.5").unwrap().units(), 10_500_000);
        assert_eq!(StableAmount::parse("0.000001").unwrap().units(), 1);
        assert_eq!(StableAmount::parse(".5").unwrap().units(), 500_000);
    }

    #[test]
    fn test_stable_round_trip() {
        for units in [0u128, 1, 999_999, 1_000_000, 1_000_001, 123_456_789, u64::MAX as u128] {
            let amount = StableAmount::from_units(units);
            let parsed = StableAmount::parse(&amount.format()).unwrap();
            assert_eq!(parsed, amount, "round trip failed for {} units", units);
        }
    }

    #[test]
    fn test_token_round_trip() {
        for units in [
            0u128,
            1,
            999_999_999_999_999_999,
            TOKEN_SCALE,
            TOKEN_SCALE + 1,
            1_000_000 * TOKEN_SCALE,
        ] {
            let amount = TokenAmount::from_units(units);
            let parsed = TokenAmount::parse(&amount.format()).unwrap();
            assert_eq!(parsed, amount, "round trip failed for {} units", units);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(StableAmount::parse("").is_err());
        assert!(StableAmount::parse(".").is_err());
        assert!(StableAmount::parse("-1").is_err());
        assert!(StableAmount::parse("1.2.3").is_err());
        assert!(StableAmount::parse("abc").is_err());
        assert!(StableAmount::parse("1e6").is_err());
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        match StableAmount::parse("1.0000001") {
            Err(UnitError::TooManyDecimals { decimals, max }) => {
                assert_eq!(decimals, 7);
                assert_eq!(max, 6);
            }
            other => panic!("expected TooManyDecimals, got {:?}", other),
        }
        // 18 decimals is fine for tokens
        assert_eq!(TokenAmount::parse("0.000000000000000001").unwrap().units(), 1);
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "9".repeat(60);
        assert!(matches!(StableAmount::parse(&huge), Err(UnitError::Overflow)));
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = StableAmount::from_units(100);
        let b = StableAmount::from_units(40);
        assert_eq!(a.checked_add(b).unwrap().units(), 140);
        assert_eq!(a.checked_sub(b).unwrap().units(), 60);
        assert!(b.checked_sub(a).is_none());
        assert!(StableAmount::from_units(u128::MAX).checked_add(a).is_none());
    }
}
