//! Provenance Shuffle Core
//!
//! Deterministic, publicly verifiable shuffling of a fixed-size metadata
//! collection, seeded from a hash that is published only after the
//! unshuffled collection has been committed to.
//!
//! # Architecture
//!
//! - **seed**: 32-byte hash → 64-bit seed (big-endian XOR fold)
//! - **rng**: Deterministic random number generation
//! - **shuffle**: Fisher-Yates over opaque records
//! - **provenance**: Keccak-256 / SHA-256 content digests
//! - **collection**: JSON loading and canonical serialization
//! - **orchestrator**: One complete run, digests returned as values
//!
//! # Critical Invariants
//!
//! 1. Same seed hash + same input bytes → same output bytes
//! 2. The shuffle only permutes; records are never dropped, duplicated or edited
//! 3. Precondition failures are reported before any record moves

// Module declarations
pub mod collection;
pub mod error;
pub mod orchestrator;
pub mod provenance;
pub mod rng;
pub mod seed;
pub mod shuffle;

// Re-exports for convenience
pub use collection::{load_collection, serialize_collection, Record};
pub use error::ShuffleError;
pub use orchestrator::{ProvenanceReport, ShuffleConfig, ShuffleOrchestrator, ShuffleOutcome};
pub use provenance::{digest, verify_digest, ContentDigest, DigestAlgorithm};
pub use rng::RngManager;
pub use seed::{fold, fold_bytes, HashValue, Seed, HASH_LEN};
pub use shuffle::{fisher_yates, shuffle_records, Shuffler, DEFAULT_EXPECTED_COUNT};
