//! Cross-source evidence aggregation and credibility scoring.
//!
//! Pure, synchronous, deterministic computation: no I/O, no shared
//! mutable state. Safe to invoke concurrently for independent claims.

pub mod analyzer;
pub mod scoring;
pub mod summary;
pub mod verdict;

pub use analyzer::CrossSourceAnalyzer;
pub use scoring::ScoringEngine;
