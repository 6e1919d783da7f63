//! Deterministic shuffle
//!
//! Fisher-Yates over an opaque slice, driven by a fresh [`RngManager`] built
//! from the seed. Records are only ever swapped; their content is never read.
//!
//! # Critical Invariants
//!
//! - **Permutation**: the multiset of records is preserved exactly
//! - **Reproducibility**: same seed + same input → same output order
//! - **Fail fast**: a size mismatch is reported before any element moves

use crate::error::ShuffleError;
use crate::rng::RngManager;
use crate::seed::Seed;

/// Record count of the reference collection
pub const DEFAULT_EXPECTED_COUNT: usize = 10_000;

/// Shuffle `records` in place with draws from `rng`
///
/// For `i` from `len - 1` down to `1`, swaps `i` with an index drawn
/// uniformly from `[0, i]`. Performs exactly `len - 1` swaps (none for an
/// empty or single-element slice).
pub fn fisher_yates<T>(records: &mut [T], rng: &mut RngManager) {
    for i in (1..records.len()).rev() {
        let j = rng.below(i + 1);
        records.swap(i, j);
    }
}

/// Validate the record count, then shuffle with a generator seeded by `seed`
pub fn shuffle_records<T>(
    records: &mut [T],
    seed: Seed,
    expected_len: usize,
) -> Result<(), ShuffleError> {
    if records.len() != expected_len {
        return Err(ShuffleError::CollectionSizeMismatch {
            expected: expected_len,
            actual: records.len(),
        });
    }

    let mut rng = RngManager::from_seed(seed.as_u64());
    fisher_yates(records, &mut rng);
    Ok(())
}

/// Shuffler bound to an expected collection size
///
/// # Example
/// ```
/// use provenance_shuffle_core_rs::{Seed, Shuffler};
///
/// let shuffler = Shuffler::new(5);
/// let mut records = vec!['a', 'b', 'c', 'd', 'e'];
/// shuffler.shuffle(&mut records, Seed::new(1)).unwrap();
///
/// let mut sorted = records.clone();
/// sorted.sort();
/// assert_eq!(sorted, vec!['a', 'b', 'c', 'd', 'e']);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shuffler {
    expected_len: usize,
}

impl Shuffler {
    pub fn new(expected_len: usize) -> Self {
        Self { expected_len }
    }

    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    pub fn shuffle<T>(&self, records: &mut [T], seed: Seed) -> Result<(), ShuffleError> {
        shuffle_records(records, seed, self.expected_len)
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new(DEFAULT_EXPECTED_COUNT)
    }
}
