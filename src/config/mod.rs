//! Configuration Management
//!
//! This module holds the analyzer configuration and the threshold tables it
//! carries.

pub mod analyzer;
pub mod thresholds;

// Re-export
pub use analyzer::{AnalyzerConfig, MAX_SCORE};
pub use thresholds::{FakeBidConfig, ScoreThresholds, ScoreTier, SignalThresholds, SpoofingConfig};
