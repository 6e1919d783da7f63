//! Seed derivation
//!
//! A 32-byte seed hash is split into four 8-byte words, each read as a
//! big-endian `u64`, and the words are XOR-folded into one 64-bit seed.
//!
//! # Critical Invariants
//!
//! - **Determinism**: the same hash always folds to the same seed
//! - **Byte order**: words are big-endian; a little-endian reading is a
//!   different (non-conformant) seed
//! - **No special cases**: the all-zero hash folds to seed 0, which is valid

use crate::error::ShuffleError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of a seed hash in bytes
pub const HASH_LEN: usize = 32;

const WORD_LEN: usize = 8;

/// A 32-byte hash whose bytes seed the shuffle
///
/// # Example
/// ```
/// use provenance_shuffle_core_rs::HashValue;
///
/// let hash: HashValue = "0x0000000000000000000000000000000000000000000000000000000000000001"
///     .parse()
///     .unwrap();
/// assert_eq!(hash.as_bytes()[31], 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashValue([u8; HASH_LEN]);

impl HashValue {
    pub fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from an untrusted byte slice
    ///
    /// Anything other than exactly 32 bytes is rejected; input is never
    /// truncated or padded.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ShuffleError> {
        let array: [u8; HASH_LEN] = bytes
            .try_into()
            .map_err(|_| ShuffleError::InvalidHashLength {
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }

    /// Decode a hex string, with or without a `0x` prefix
    pub fn from_hex(hex_str: &str) -> Result<Self, ShuffleError> {
        let trimmed = hex_str.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(ShuffleError::InvalidSeedHex("empty seed hash".to_string()));
        }

        let bytes = hex::decode(digits)
            .map_err(|e| ShuffleError::InvalidSeedHex(format!("{}: {}", hex_str, e)))?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HashValue {
    type Err = ShuffleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; HASH_LEN]> for HashValue {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// 64-bit shuffle seed
///
/// Stored unsigned. [`Seed::as_i64`] gives the two's-complement view for
/// generators (and logs) that take a signed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(u64);

impl Seed {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Bit-pattern reinterpretation, not numeric truncation
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// Fold a seed hash into a 64-bit seed
///
/// # Example
/// ```
/// use provenance_shuffle_core_rs::{fold, HashValue};
///
/// let mut bytes = [0u8; 32];
/// bytes[7] = 1;
/// bytes[15] = 2;
/// assert_eq!(fold(&HashValue::new(bytes)).as_u64(), 3);
/// ```
pub fn fold(hash: &HashValue) -> Seed {
    let folded = hash
        .as_bytes()
        .chunks_exact(WORD_LEN)
        .map(|word| {
            let mut buf = [0u8; WORD_LEN];
            buf.copy_from_slice(word);
            u64::from_be_bytes(buf)
        })
        .fold(0u64, |acc, word| acc ^ word);

    Seed(folded)
}

/// Fold an untrusted byte slice, rejecting anything but 32 bytes
pub fn fold_bytes(bytes: &[u8]) -> Result<Seed, ShuffleError> {
    HashValue::from_slice(bytes).map(|hash| fold(&hash))
}
