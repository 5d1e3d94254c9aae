//! Order book manipulation detection and signal scoring
//!
//! This module turns a chronological history of order book snapshots into:
//! - Aggregate metrics (totals, ratios, spread, imbalance, zones)
//! - Fake-bid and spoofing detection over a trailing window
//! - A 0-100 bullish score and a discrete trading signal
//!
//! All computation is synchronous and recomputed per call; nothing is cached
//! between calls.

pub mod analytics;
pub mod analyzer;
pub mod metrics;
pub mod types;

pub use types::{
    DepthLevel, Imbalance, MarketDepth, PriceLevel, Ratio, Snapshot, Spread, Zone, ZoneLevel,
};

pub use analyzer::OrderBookAnalyzer;
