//! Order book analytics module
//!
//! This module provides the multi-snapshot analytics built on top of the
//! single-snapshot metrics:
//! - Manipulation detection (fake bids, spoofing)
//! - Composite bullish scoring
//! - Trading signal generation with support/resistance context
//! - Volume profile and full analysis summary

pub mod anomaly;
pub mod profile;
pub mod score;
pub mod signal;
pub mod summary;
pub mod types;

pub use types::*;
