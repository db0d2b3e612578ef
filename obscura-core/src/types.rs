//! Fixed-width value types shared by the registry and the commitment protocol.
//!
//! Every hash-domain value in Obscura (photo hash, commitment, revealed
//! secret) is a [`Word`]: a single 256-bit type with no implicit conversions.
//! Caller identities are [`OwnerId`], an opaque 160-bit identifier supplied
//! by an external identity provider. Serialization to and from hex happens
//! only at boundaries (HTTP DTOs, receipt files); internally values are raw
//! byte arrays.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Size of a [`Word`] in bytes (256 bits).
pub const WORD_BYTES: usize = 32;

/// Size of an [`OwnerId`] in bytes (160 bits).
pub const OWNER_ID_BYTES: usize = 20;

/// Error parsing a hex-encoded value at a boundary.
#[derive(Debug, Error, PartialEq)]
pub enum ParseValueError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("expected {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },
}

/// A 256-bit value: photo hash, commitment, or revealed secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word(pub [u8; WORD_BYTES]);

impl Word {
    /// The all-zero word. Used as the "absent" sentinel in reads.
    pub const ZERO: Word = Word([0u8; WORD_BYTES]);

    pub fn from_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; WORD_BYTES] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; WORD_BYTES]
    }

    /// Parse from hex, with or without a `0x` prefix. Requires exactly 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, ParseValueError> {
        let bytes = decode_hex_exact(s, WORD_BYTES)?;
        let mut out = [0u8; WORD_BYTES];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Lowercase hex without a prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl FromStr for Word {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Opaque 160-bit caller identity.
///
/// The registry treats it as externally authenticated and never decomposes
/// it; the zero identity is the "absent" sentinel for owner lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OwnerId(pub [u8; OWNER_ID_BYTES]);

impl OwnerId {
    /// The zero identity. Returned by owner lookups on absent records.
    pub const ZERO: OwnerId = OwnerId([0u8; OWNER_ID_BYTES]);

    pub fn from_bytes(bytes: [u8; OWNER_ID_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; OWNER_ID_BYTES] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; OWNER_ID_BYTES]
    }

    /// Parse from hex, with or without a `0x` prefix. Requires exactly 20 bytes.
    pub fn from_hex(s: &str) -> Result<Self, ParseValueError> {
        let bytes = decode_hex_exact(s, OWNER_ID_BYTES)?;
        let mut out = [0u8; OWNER_ID_BYTES];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl FromStr for OwnerId {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

fn decode_hex_exact(s: &str, expected: usize) -> Result<Vec<u8>, ParseValueError> {
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let bytes = hex::decode(s)?;
    if bytes.len() != expected {
        return Err(ParseValueError::BadLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}
