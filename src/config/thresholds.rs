//! Detector and scoring thresholds
//!
//! Heuristic constants grouped per consumer. Every value is overridable through
//! [`AnalyzerConfig`](super::AnalyzerConfig); the defaults reproduce the fixed
//! tables the analyzer was tuned with.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fake-bid persistence thresholds
///
/// A bid level is a candidate when `lot_size >= min_lot` and
/// `order_count <= max_order_count`. Candidates seen in at most
/// `max_appearances` snapshots of the window are flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FakeBidConfig {
    /// Trailing window length (clamped to history length)
    pub lookback: usize,

    /// Minimum resting lots for a level to be tracked
    pub min_lot: f64,

    /// Maximum distinct orders for a level to count as "thin"
    pub max_order_count: u32,

    /// Appearance count at or below which a tracked price is flagged
    pub max_appearances: usize,
}

impl Default for FakeBidConfig {
    fn default() -> Self {
        Self {
            lookback: 10,
            min_lot: 500.0,
            max_order_count: 2,
            max_appearances: 2,
        }
    }
}

/// Spoofing gap-regularity thresholds
///
/// Tracks bid levels with `lot_size >= min_lot` whose notional value is
/// significant. A price seen at least `min_appearances` times, with at least
/// `min_gaps` inter-appearance gaps spanning no more than `max_gap_range`
/// snapshots, is flagged as regular cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SpoofingConfig {
    /// Trailing window length (clamped to history length)
    pub lookback: usize,

    /// Minimum resting lots for a level to be tracked
    pub min_lot: f64,

    /// Minimum appearances before gaps are analysed
    pub min_appearances: usize,

    /// Minimum number of gaps required for a pattern
    pub min_gaps: usize,

    /// Maximum `max(gaps) - min(gaps)` for the gaps to count as regular
    pub max_gap_range: usize,
}

impl Default for SpoofingConfig {
    fn default() -> Self {
        Self {
            lookback: 15,
            min_lot: 1000.0,
            min_appearances: 3,
            min_gaps: 2,
            max_gap_range: 2,
        }
    }
}

/// One step of a step-function score table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreTier {
    pub threshold: f64,
    pub points: u32,
}

impl ScoreTier {
    pub const fn new(threshold: f64, points: u32) -> Self {
        Self { threshold, points }
    }
}

/// Composite score tables
///
/// `bid_strength`, `bid_ask_ratio`, `volume` and `lot_imbalance` award the
/// first tier whose threshold the value strictly exceeds (tiers descending).
/// `spread_pct` awards the first tier the value is at or below (tiers
/// ascending).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoreThresholds {
    pub bid_strength: Vec<ScoreTier>,
    pub bid_ask_ratio: Vec<ScoreTier>,
    pub spread_pct: Vec<ScoreTier>,
    pub volume: Vec<ScoreTier>,
    pub lot_imbalance: Vec<ScoreTier>,
    pub no_fake_bid: u32,
    pub no_spoofing: u32,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            bid_strength: vec![
                ScoreTier::new(0.7, 25),
                ScoreTier::new(0.6, 20),
                ScoreTier::new(0.5, 15),
            ],
            bid_ask_ratio: vec![
                ScoreTier::new(2.0, 20),
                ScoreTier::new(1.5, 15),
                ScoreTier::new(1.0, 10),
            ],
            spread_pct: vec![
                ScoreTier::new(0.5, 15),
                ScoreTier::new(1.0, 10),
                ScoreTier::new(1.5, 5),
            ],
            volume: vec![ScoreTier::new(500_000.0, 10), ScoreTier::new(100_000.0, 5)],
            lot_imbalance: vec![ScoreTier::new(0.2, 10), ScoreTier::new(0.1, 5)],
            no_fake_bid: 10,
            no_spoofing: 10,
        }
    }
}

impl ScoreThresholds {
    /// Highest total the tables can award
    pub fn max_total(&self) -> u32 {
        let top = |tiers: &[ScoreTier]| tiers.iter().map(|t| t.points).max().unwrap_or(0);

        top(&self.bid_strength)
            + top(&self.bid_ask_ratio)
            + top(&self.spread_pct)
            + top(&self.volume)
            + top(&self.lot_imbalance)
            + self.no_fake_bid
            + self.no_spoofing
    }
}

/// Minimum scores for each score-driven signal (evaluated top-down)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SignalThresholds {
    pub strong_buy: u32,
    pub buy: u32,
    pub hold_positive: u32,
    pub neutral: u32,
    pub caution: u32,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            strong_buy: 80,
            buy: 65,
            hold_positive: 50,
            neutral: 40,
            caution: 30,
        }
    }
}

/// Check that a tier table is strictly ordered in the given direction
pub(crate) fn tiers_ordered(tiers: &[ScoreTier], descending: bool) -> bool {
    tiers.windows(2).all(|pair| {
        if descending {
            pair[0].threshold > pair[1].threshold
        } else {
            pair[0].threshold < pair[1].threshold
        }
    }) && tiers.iter().all(|t| t.threshold.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_total_100() {
        assert_eq!(ScoreThresholds::default().max_total(), 100);
    }

    #[test]
    fn test_tiers_ordered() {
        let defaults = ScoreThresholds::default();
        assert!(tiers_ordered(&defaults.bid_strength, true));
        assert!(tiers_ordered(&defaults.spread_pct, false));
        assert!(!tiers_ordered(&defaults.spread_pct, true));

        let bad = vec![ScoreTier::new(f64::NAN, 10)];
        assert!(!tiers_ordered(&bad, true));
    }
}
