//! xorshift64* random number generator
//!
//! # Algorithm
//!
//! xorshift64* keeps 64 bits of state and produces 64-bit output. The initial
//! state is derived from the folded seed with a single SplitMix64 step so that
//! numerically close seeds (0 and 1, say) start from unrelated states.
//!
//! Bounded draws use rejection sampling, never a bare modulo, so every index
//! in `[0, n)` is equally likely.
//!
//! # Determinism
//!
//! Same seed → same sequence of draws → same permutation. Reproducing a
//! shuffle in another implementation requires matching all three pieces:
//! the seeding step, the xorshift64* step and the `below` draw.

const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const XORSHIFT_MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use provenance_shuffle_core_rs::RngManager;
///
/// let mut rng = RngManager::from_seed(1);
/// let index = rng.below(10); // [0, 10)
/// assert!(index < 10);
/// ```
#[derive(Debug, Clone)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG from a raw internal state
    ///
    /// Use this to resume from [`RngManager::get_state`]. Fresh shuffles go
    /// through [`RngManager::from_seed`] instead.
    pub fn new(state: u64) -> Self {
        // Ensure state is never zero (xorshift requirement)
        let state = if state == 0 { 1 } else { state };
        Self { state }
    }

    /// Create a new RNG from a folded seed
    ///
    /// # Example
    /// ```
    /// use provenance_shuffle_core_rs::RngManager;
    ///
    /// let mut a = RngManager::from_seed(0);
    /// let mut b = RngManager::from_seed(1);
    /// assert_ne!(a.next(), b.next());
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        Self::new(splitmix64(seed))
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(XORSHIFT_MULTIPLIER)
    }

    /// Draw an index uniformly from `[0, bound)`
    ///
    /// Values at or above the largest multiple of `bound` that fits in a
    /// `u64` are rejected and redrawn.
    ///
    /// # Panics
    /// Panics if `bound` is zero
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be non-zero");

        let bound = bound as u64;
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let value = self.next();
            if value < zone {
                return (value % bound) as usize;
            }
        }
    }

    /// Get current RNG state (for replaying the remainder of a stream)
    ///
    /// # Example
    /// ```
    /// use provenance_shuffle_core_rs::RngManager;
    ///
    /// let rng = RngManager::from_seed(42);
    /// let state = rng.get_state();
    ///
    /// // Later, can recreate RNG from this state
    /// let rng2 = RngManager::new(state);
    /// assert_eq!(rng2.get_state(), state);
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

/// One SplitMix64 output for `seed`
fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(SPLITMIX_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
