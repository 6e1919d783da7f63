//! Metadata collection (de)serialization
//!
//! The collection is a JSON array of key-value objects. Records are opaque
//! to the shuffle; they are parsed only so they can be moved as units.
//! Numbers keep their original text (`arbitrary_precision`) and are never
//! rounded. Key order and string escapes are normalised.

use crate::error::ShuffleError;
use serde_json::{Map, Value};

/// One metadata record (a JSON object)
pub type Record = Map<String, Value>;

/// Parse a JSON array of objects
pub fn load_collection(bytes: &[u8]) -> Result<Vec<Record>, ShuffleError> {
    serde_json::from_slice(bytes).map_err(|e| {
        ShuffleError::SerializationError(format!("Collection deserialization failed: {}", e))
    })
}

/// Compact JSON for `records`
///
/// Object keys come out sorted, so the bytes (and therefore the digest)
/// depend only on record content and order.
pub fn serialize_collection(records: &[Record]) -> Result<Vec<u8>, ShuffleError> {
    serde_json::to_vec(records).map_err(|e| {
        ShuffleError::SerializationError(format!("Collection serialization failed: {}", e))
    })
}
