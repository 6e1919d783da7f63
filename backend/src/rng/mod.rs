//! Deterministic random number generation
//!
//! Uses xorshift64* seeded through one SplitMix64 step.
//! CRITICAL: Every swap index drawn by the shuffler MUST come from this module.

mod xorshift;

pub use xorshift::RngManager;
