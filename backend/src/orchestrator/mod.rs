//! Orchestrator - one complete provenance shuffle
//!
//! See `engine.rs` for the pipeline.

pub mod engine;

// Re-export main types for convenience
pub use engine::{ProvenanceReport, ShuffleConfig, ShuffleOrchestrator, ShuffleOutcome};
