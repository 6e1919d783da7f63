//! Provenance digests
//!
//! Content hashes over the serialized collection, taken before and after the
//! shuffle, so third parties can check the input against a published digest
//! and reproduce the output digest from the same inputs.

use crate::error::ShuffleError;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Hash function used for provenance digests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// Ethereum-style Keccak-256 (original Keccak padding, not SHA3-256)
    #[default]
    Keccak256,
    Sha256,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Keccak256 => "keccak256",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" | "keccak-256" | "keccak" => Ok(DigestAlgorithm::Keccak256),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            other => Err(format!(
                "unknown digest algorithm '{}' (expected keccak256 or sha256)",
                other
            )),
        }
    }
}

/// A 32-byte content digest tagged with the algorithm that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentDigest {
    pub algorithm: DigestAlgorithm,
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// `0x`-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hash `bytes` with `algorithm`
pub fn digest(algorithm: DigestAlgorithm, bytes: &[u8]) -> ContentDigest {
    let mut out = [0u8; 32];
    match algorithm {
        DigestAlgorithm::Keccak256 => out.copy_from_slice(&Keccak256::digest(bytes)),
        DigestAlgorithm::Sha256 => out.copy_from_slice(&Sha256::digest(bytes)),
    }

    ContentDigest {
        algorithm,
        bytes: out,
    }
}

/// Check `actual` against a published hex digest (`0x` prefix optional,
/// case-insensitive)
pub fn verify_digest(expected_hex: &str, actual: &ContentDigest) -> Result<(), ShuffleError> {
    let trimmed = expected_hex.trim();
    let expected = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .to_ascii_lowercase();

    if expected != hex::encode(actual.bytes) {
        return Err(ShuffleError::ProvenanceMismatch {
            expected: format!("0x{}", expected),
            actual: actual.to_hex(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KECCAK_EMPTY: &str =
        "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";
    const SHA256_EMPTY: &str =
        "0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_keccak_empty_vector() {
        assert_eq!(digest(DigestAlgorithm::Keccak256, b"").to_hex(), KECCAK_EMPTY);
    }

    #[test]
    fn test_keccak_abc_vector() {
        assert_eq!(
            digest(DigestAlgorithm::Keccak256, b"abc").to_hex(),
            "0x4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn test_sha256_empty_vector() {
        assert_eq!(digest(DigestAlgorithm::Sha256, b"").to_hex(), SHA256_EMPTY);
    }

    #[test]
    fn test_verify_digest_accepts_prefix_and_case() {
        let actual = digest(DigestAlgorithm::Keccak256, b"");

        assert!(verify_digest(KECCAK_EMPTY, &actual).is_ok());
        assert!(verify_digest(&KECCAK_EMPTY[2..], &actual).is_ok());
        assert!(verify_digest(&KECCAK_EMPTY.to_ascii_uppercase(), &actual).is_ok());
    }

    #[test]
    fn test_verify_digest_reports_mismatch() {
        let actual = digest(DigestAlgorithm::Keccak256, b"abc");
        let err = verify_digest(KECCAK_EMPTY, &actual).unwrap_err();

        assert_eq!(
            err,
            ShuffleError::ProvenanceMismatch {
                expected: KECCAK_EMPTY.to_string(),
                actual: actual.to_hex(),
            }
        );
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("keccak256".parse::<DigestAlgorithm>(), Ok(DigestAlgorithm::Keccak256));
        assert_eq!("SHA256".parse::<DigestAlgorithm>(), Ok(DigestAlgorithm::Sha256));
        assert!("md5".parse::<DigestAlgorithm>().is_err());
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Keccak256);
    }
}
