//! # Account Identities and Amounts
//!
//! Every participant in custody (the owner, the custody module itself, a
//! token ledger) is identified by a 20-byte [`Address`]. Token ledgers are
//! addressed the same way, so an [`AssetId`] is just an `Address`.
//!
//! Amounts are plain `u128` values in the asset's smallest unit. Display
//! precision (`decimals`) lives on the ledger and is never used in
//! arithmetic.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::ADDRESS_LENGTH;

/// Amount in the smallest denomination of an asset.
pub type Amount = u128;

/// Identifier of a fungible-token ledger: the ledger's own address.
pub type AssetId = Address;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while parsing an [`Address`] from text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AddressError {
    /// The string is not valid hexadecimal.
    #[error("invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The decoded byte length is not [`ADDRESS_LENGTH`].
    #[error("invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required byte length.
        expected: usize,
        /// Decoded byte length.
        actual: usize,
    },
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account identity, rendered as `0x`-prefixed lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The all-zero address. Never a valid owner or transfer destination.
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Creates an address from raw bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Builds an address whose last eight bytes hold `n` (big-endian).
    ///
    /// Handy for deterministic fixtures: `Address::from_low_u64(1)` is
    /// `0x0000…0001`.
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 8..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Returns `true` for the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// Lowercase hex with a `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Compile-time parser for address constants.
    ///
    /// Accepts exactly 40 hex digits with an optional `0x` prefix. Any other
    /// input panics, which fails the build when used in a `const` item.
    pub const fn from_hex_const(s: &str) -> Self {
        let b = s.as_bytes();
        let start = if b.len() >= 2 && b[0] == b'0' && (b[1] == b'x' || b[1] == b'X') {
            2
        } else {
            0
        };
        assert!(
            b.len() == start + ADDRESS_LENGTH * 2,
            "address constant must hold exactly 40 hex digits"
        );
        let mut out = [0u8; ADDRESS_LENGTH];
        let mut i = 0;
        while i < ADDRESS_LENGTH {
            out[i] = (hex_nibble(b[start + 2 * i]) << 4) | hex_nibble(b[start + 2 * i + 1]);
            i += 1;
        }
        Self(out)
    }

    /// Parses hex with or without a `0x` prefix. Case-insensitive, so
    /// checksummed mixed-case input is accepted (the checksum is not verified).
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

const fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit in address constant"),
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Hex strings on the wire so addresses work as JSON map keys.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Scales a whole-unit quantity into base units: `whole * 10^decimals`.
///
/// Returns `None` on overflow. `units(100, 18)` is 100 tokens of an
/// 18-decimal asset.
pub fn units(whole: u128, decimals: u8) -> Option<Amount> {
    10u128
        .checked_pow(u32::from(decimals))
        .and_then(|scale| whole.checked_mul(scale))
}
