//! Orchestrator Engine
//!
//! Composes seed folding, shuffling and provenance hashing into one run:
//!
//! ```text
//! 1. Digest the raw input bytes
//! 2. Verify against the published digest (if configured)
//! 3. Load records and check the record count
//! 4. Fold the seed hash into a seed
//! 5. Shuffle in place with a fresh generator
//! 6. Serialize the shuffled records
//! 7. Digest the output bytes
//! ```
//!
//! Nothing is logged here. Digests and seed details come back in
//! [`ShuffleOutcome`] for the caller to report.
//!
//! # Example
//!
//! ```rust
//! use provenance_shuffle_core_rs::{HashValue, ShuffleConfig, ShuffleOrchestrator};
//!
//! let seed_hash = HashValue::from_hex(&format!("0x{}01", "00".repeat(31))).unwrap();
//! let config = ShuffleConfig::new(seed_hash).with_expected_count(3);
//!
//! let outcome = ShuffleOrchestrator::new(config)
//!     .run(br#"[{"id":1},{"id":2},{"id":3}]"#)
//!     .unwrap();
//!
//! assert_eq!(outcome.seed.as_i64(), 1);
//! assert_eq!(outcome.record_count, 3);
//! ```

use crate::collection::{load_collection, serialize_collection, Record};
use crate::error::ShuffleError;
use crate::provenance::{digest, verify_digest, ContentDigest, DigestAlgorithm};
use crate::seed::{fold, HashValue, Seed};
use crate::shuffle::{Shuffler, DEFAULT_EXPECTED_COUNT};
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Parameters of a shuffle run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleConfig {
    /// Published hash the seed is folded from
    pub seed_hash: HashValue,

    /// Number of records the input must contain
    #[serde(default = "default_expected_count")]
    pub expected_count: usize,

    /// Hash used for the provenance digests
    #[serde(default)]
    pub digest_algorithm: DigestAlgorithm,

    /// Previously published digest of the unshuffled input
    #[serde(default)]
    pub expected_initial_digest: Option<String>,
}

fn default_expected_count() -> usize {
    DEFAULT_EXPECTED_COUNT
}

impl ShuffleConfig {
    pub fn new(seed_hash: HashValue) -> Self {
        Self {
            seed_hash,
            expected_count: DEFAULT_EXPECTED_COUNT,
            digest_algorithm: DigestAlgorithm::default(),
            expected_initial_digest: None,
        }
    }

    pub fn with_expected_count(mut self, expected_count: usize) -> Self {
        self.expected_count = expected_count;
        self
    }

    pub fn with_digest_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.digest_algorithm = algorithm;
        self
    }

    pub fn with_expected_initial_digest(mut self, digest_hex: impl Into<String>) -> Self {
        self.expected_initial_digest = Some(digest_hex.into());
        self
    }

    /// Parse a JSON config; omitted fields take their defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, ShuffleError> {
        serde_json::from_slice(bytes).map_err(|e| {
            ShuffleError::SerializationError(format!("Config deserialization failed: {}", e))
        })
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct ShuffleOutcome {
    pub seed_hash: HashValue,

    /// Seed as the XOR of the four big-endian words
    pub folded: u64,

    pub seed: Seed,

    /// Digest of the input bytes exactly as supplied
    pub initial_digest: ContentDigest,

    /// Digest of `output`
    pub shuffled_digest: ContentDigest,

    pub record_count: usize,

    pub shuffled: Vec<Record>,

    /// Serialized shuffled collection, ready to persist
    pub output: Vec<u8>,
}

impl ShuffleOutcome {
    /// Audit summary of this run
    pub fn report(&self) -> ProvenanceReport {
        ProvenanceReport {
            seed_hash: self.seed_hash,
            folded: format!("{:#x}", self.folded),
            seed: self.seed.as_i64(),
            digest_algorithm: self.initial_digest.algorithm,
            initial_digest: self.initial_digest.to_hex(),
            shuffled_digest: self.shuffled_digest.to_hex(),
            record_count: self.record_count,
        }
    }
}

/// Published record of a run: what was shuffled, with which seed, into what
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceReport {
    pub seed_hash: HashValue,

    /// XOR-folded seed as `0x` hex
    pub folded: String,

    /// Seed in its signed view
    pub seed: i64,

    pub digest_algorithm: DigestAlgorithm,
    pub initial_digest: String,
    pub shuffled_digest: String,
    pub record_count: usize,
}

impl ProvenanceReport {
    /// Pretty JSON
    pub fn to_json(&self) -> Result<Vec<u8>, ShuffleError> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            ShuffleError::SerializationError(format!("Report serialization failed: {}", e))
        })
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Runs a provenance shuffle for one configuration
#[derive(Debug, Clone)]
pub struct ShuffleOrchestrator {
    config: ShuffleConfig,
    shuffler: Shuffler,
}

impl ShuffleOrchestrator {
    pub fn new(config: ShuffleConfig) -> Self {
        let shuffler = Shuffler::new(config.expected_count);
        Self { config, shuffler }
    }

    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Shuffle the serialized collection in `input`
    ///
    /// Fails before any record moves if the input digest or record count is
    /// wrong. No outcome is produced on error.
    pub fn run(&self, input: &[u8]) -> Result<ShuffleOutcome, ShuffleError> {
        let algorithm = self.config.digest_algorithm;

        let initial_digest = digest(algorithm, input);
        if let Some(expected) = &self.config.expected_initial_digest {
            verify_digest(expected, &initial_digest)?;
        }

        let mut records = load_collection(input)?;

        let seed = fold(&self.config.seed_hash);
        self.shuffler.shuffle(&mut records, seed)?;

        let output = serialize_collection(&records)?;
        let shuffled_digest = digest(algorithm, &output);

        Ok(ShuffleOutcome {
            seed_hash: self.config.seed_hash,
            folded: seed.as_u64(),
            seed,
            initial_digest,
            shuffled_digest,
            record_count: records.len(),
            shuffled: records,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_hash_one() -> HashValue {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        HashValue::new(bytes)
    }

    #[test]
    fn test_config_defaults() {
        let config = ShuffleConfig::new(seed_hash_one());

        assert_eq!(config.expected_count, 10_000);
        assert_eq!(config.digest_algorithm, DigestAlgorithm::Keccak256);
        assert!(config.expected_initial_digest.is_none());
    }

    #[test]
    fn test_config_from_json_with_defaults() {
        let json = format!(r#"{{"seed_hash":"{}"}}"#, seed_hash_one());
        let config = ShuffleConfig::from_json(json.as_bytes()).unwrap();

        assert_eq!(config, ShuffleConfig::new(seed_hash_one()));
    }

    #[test]
    fn test_config_from_json_all_fields() {
        let json = format!(
            r#"{{"seed_hash":"{}","expected_count":3,"digest_algorithm":"sha256","expected_initial_digest":"0xabc"}}"#,
            seed_hash_one()
        );
        let config = ShuffleConfig::from_json(json.as_bytes()).unwrap();

        assert_eq!(
            config,
            ShuffleConfig::new(seed_hash_one())
                .with_expected_count(3)
                .with_digest_algorithm(DigestAlgorithm::Sha256)
                .with_expected_initial_digest("0xabc")
        );
    }

    #[test]
    fn test_config_from_json_rejects_bad_seed_hash() {
        let err = ShuffleConfig::from_json(br#"{"seed_hash":"0x12"}"#).unwrap_err();
        assert!(matches!(err, ShuffleError::SerializationError(_)));
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let config = ShuffleConfig::new(seed_hash_one()).with_expected_count(2);
        let outcome = ShuffleOrchestrator::new(config)
            .run(br#"[{"a":1},{"a":2}]"#)
            .unwrap();
        let report = outcome.report();

        assert_eq!(report.folded, "0x1");
        assert_eq!(report.seed, 1);
        assert_eq!(report.initial_digest, outcome.initial_digest.to_hex());

        let back: ProvenanceReport = serde_json::from_slice(&report.to_json().unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_run_rejects_wrong_count() {
        let orchestrator =
            ShuffleOrchestrator::new(ShuffleConfig::new(seed_hash_one()).with_expected_count(4));
        let err = orchestrator.run(br#"[{"a":1},{"a":2}]"#).unwrap_err();

        assert_eq!(
            err,
            ShuffleError::CollectionSizeMismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_run_checks_published_digest_first() {
        let input = br#"[{"a":1},{"a":2}]"#;
        let wrong = digest(DigestAlgorithm::Keccak256, b"something else");
        let config = ShuffleConfig::new(seed_hash_one())
            .with_expected_count(2)
            .with_expected_initial_digest(wrong.to_hex());

        let err = ShuffleOrchestrator::new(config).run(input).unwrap_err();
        assert!(matches!(err, ShuffleError::ProvenanceMismatch { .. }));
    }

    #[test]
    fn test_run_reports_digests_of_input_and_output() {
        let input = br#"[{"a":1},{"a":2},{"a":3}]"#;
        let config = ShuffleConfig::new(seed_hash_one()).with_expected_count(3);
        let outcome = ShuffleOrchestrator::new(config).run(input).unwrap();

        assert_eq!(
            outcome.initial_digest,
            digest(DigestAlgorithm::Keccak256, input)
        );
        assert_eq!(
            outcome.shuffled_digest,
            digest(DigestAlgorithm::Keccak256, &outcome.output)
        );
        assert_eq!(outcome.folded, 1);
    }
}
