//! Analyzer configuration
//!
//! Loaded from an optional JSON file; analysis thresholds are never read from
//! environment variables.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::thresholds::{
    tiers_ordered, FakeBidConfig, ScoreThresholds, SignalThresholds, SpoofingConfig,
};
use crate::error::{AnalyzerError, Result};

/// Maximum composite score
pub const MAX_SCORE: u32 = 100;

/// Complete analyzer configuration
///
/// ## JSON layout
///
/// Every field is optional; missing fields fall back to [`Default`]:
///
/// ```json
/// {
///   "unit_multiplier": 100.0,
///   "min_order_value": 50000000.0,
///   "fake_bid": { "lookback": 10 },
///   "spoofing": { "lookback": 15, "min_lot": 1000 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Shares (or contracts) per lot, applied to every value calculation
    pub unit_multiplier: f64,

    /// Notional value at which a level counts as significant
    pub min_order_value: f64,

    pub fake_bid: FakeBidConfig,

    pub spoofing: SpoofingConfig,

    pub score: ScoreThresholds,

    pub signal: SignalThresholds,

    /// Levels per side bundled with a trading signal
    pub signal_depth: usize,

    /// Levels per support/resistance zone bundled with a trading signal
    pub zone_depth: usize,

    /// Levels per side in an analysis summary
    pub summary_depth: usize,

    /// Levels per key-level zone in an analysis summary
    pub summary_zone_depth: usize,

    /// Trailing window for the volume profile
    pub volume_lookback: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            unit_multiplier: 1.0,
            min_order_value: 50_000_000.0,
            fake_bid: FakeBidConfig::default(),
            spoofing: SpoofingConfig::default(),
            score: ScoreThresholds::default(),
            signal: SignalThresholds::default(),
            signal_depth: 3,
            zone_depth: 2,
            summary_depth: 5,
            summary_zone_depth: 3,
            volume_lookback: 20,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a JSON file and validate it
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or fails
    /// [`validate`](Self::validate)
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;

        tracing::debug!(
            "Loaded analyzer config from {}",
            path.as_ref().display()
        );

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Validation Rules
    /// - `unit_multiplier`: finite and > 0
    /// - `min_order_value`: finite and >= 0
    /// - lookbacks, depths and `min_appearances`: > 0
    /// - "exceeds" tables strictly descending, spread table strictly ascending
    /// - attainable score <= [`MAX_SCORE`]
    /// - signal thresholds descending from `strong_buy` to `caution`
    pub fn validate(&self) -> Result<()> {
        if !self.unit_multiplier.is_finite() || self.unit_multiplier <= 0.0 {
            return Err(invalid(format!(
                "unit_multiplier must be a positive number, got {}",
                self.unit_multiplier
            )));
        }

        if !self.min_order_value.is_finite() || self.min_order_value < 0.0 {
            return Err(invalid(format!(
                "min_order_value must be non-negative, got {}",
                self.min_order_value
            )));
        }

        let min_lots = [
            ("fake_bid.min_lot", self.fake_bid.min_lot),
            ("spoofing.min_lot", self.spoofing.min_lot),
        ];
        if let Some((name, value)) = min_lots
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(invalid(format!("{} must be non-negative, got {}", name, value)));
        }

        let positive = [
            ("fake_bid.lookback", self.fake_bid.lookback),
            ("spoofing.lookback", self.spoofing.lookback),
            ("spoofing.min_appearances", self.spoofing.min_appearances),
            ("signal_depth", self.signal_depth),
            ("zone_depth", self.zone_depth),
            ("summary_depth", self.summary_depth),
            ("summary_zone_depth", self.summary_zone_depth),
            ("volume_lookback", self.volume_lookback),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(invalid(format!("{} must be greater than 0", name)));
        }

        let score = &self.score;
        let descending = [
            ("score.bid_strength", &score.bid_strength),
            ("score.bid_ask_ratio", &score.bid_ask_ratio),
            ("score.volume", &score.volume),
            ("score.lot_imbalance", &score.lot_imbalance),
        ];
        for (name, tiers) in descending {
            if !tiers_ordered(tiers, true) {
                return Err(invalid(format!(
                    "{} thresholds must be finite and strictly descending",
                    name
                )));
            }
        }
        if !tiers_ordered(&score.spread_pct, false) {
            return Err(invalid(
                "score.spread_pct thresholds must be finite and strictly ascending".to_string(),
            ));
        }

        let max_total = score.max_total();
        if max_total > MAX_SCORE {
            return Err(invalid(format!(
                "score tables award up to {} points, limit is {}",
                max_total, MAX_SCORE
            )));
        }

        let s = &self.signal;
        if !(s.strong_buy >= s.buy
            && s.buy >= s.hold_positive
            && s.hold_positive >= s.neutral
            && s.neutral >= s.caution)
        {
            return Err(invalid(
                "signal thresholds must descend from strong_buy to caution".to_string(),
            ));
        }

        Ok(())
    }
}

fn invalid(message: String) -> AnalyzerError {
    AnalyzerError::InvalidConfig(message)
}
