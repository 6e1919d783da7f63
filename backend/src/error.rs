//! Error taxonomy
//!
//! Every variant is an unrecoverable precondition failure: callers report it
//! and stop. Nothing is retried and no partial shuffle is ever returned.

use thiserror::Error;

/// Errors that can occur while deriving a seed or shuffling a collection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShuffleError {
    #[error("Seed hash must be exactly 32 bytes, got {actual}")]
    InvalidHashLength { actual: usize },

    #[error("Invalid seed hash hex: {0}")]
    InvalidSeedHex(String),

    #[error("Collection has {actual} records; expecting {expected}")]
    CollectionSizeMismatch { expected: usize, actual: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Initial collection digest {actual} does not match published digest {expected}")]
    ProvenanceMismatch { expected: String, actual: String },
}
