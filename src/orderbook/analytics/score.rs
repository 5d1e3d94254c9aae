//! Composite bullish scoring
//!
//! 0-100 score summed (not averaged) from independently capped components:
//! - Bid strength (25 pts)
//! - Bid/ask lot ratio (20 pts)
//! - Spread percentage (15 pts)
//! - Traded volume (10 pts)
//! - Lot imbalance (10 pts)
//! - No fake bid (10 pts)
//! - No spoofing (10 pts)
//!
//! Every table is a step function: a value equal to a threshold falls to the
//! next lower tier for the "exceeds" tables.

use crate::config::{AnalyzerConfig, ScoreTier, MAX_SCORE};
use crate::orderbook::analytics::anomaly::{detect_fake_bid, detect_spoofing};
use crate::orderbook::analytics::types::{
    FakeBidDetection, ScoreComponents, ScoreResult, SpoofingDetection,
};
use crate::orderbook::metrics::{bid_ask_ratio, bid_strength, imbalance, spread_percentage};
use crate::orderbook::types::{Ratio, Snapshot};

/// Score the current snapshot, running both detectors over `history`
///
/// # Arguments
/// * `current` - Snapshot treated as "now" for every book metric
/// * `history` - Chronological snapshots scanned by the manipulation detectors
pub fn calculate_bullish_score(
    current: &Snapshot,
    history: &[Snapshot],
    config: &AnalyzerConfig,
) -> ScoreResult {
    let fake_bid = detect_fake_bid(history, &config.fake_bid);
    let spoofing = detect_spoofing(
        history,
        &config.spoofing,
        config.unit_multiplier,
        config.min_order_value,
    );

    score_with_detections(current, &fake_bid, &spoofing, config)
}

/// Score the current snapshot against precomputed detector results
pub fn score_with_detections(
    current: &Snapshot,
    fake_bid: &FakeBidDetection,
    spoofing: &SpoofingDetection,
    config: &AnalyzerConfig,
) -> ScoreResult {
    let tables = &config.score;

    let components = ScoreComponents {
        bid_strength: points_exceeding(bid_strength(current), &tables.bid_strength),
        bid_ask_ratio: ratio_points(bid_ask_ratio(current), &tables.bid_ask_ratio),
        spread: points_at_most(spread_percentage(current), &tables.spread_pct),
        volume: points_exceeding(current.traded_volume as f64, &tables.volume),
        imbalance: points_exceeding(
            imbalance(current, config.unit_multiplier).lot_imbalance,
            &tables.lot_imbalance,
        ),
        no_fake_bid: if fake_bid.detected { 0 } else { tables.no_fake_bid },
        no_spoofing: if spoofing.detected { 0 } else { tables.no_spoofing },
    };

    let score = components.total().min(MAX_SCORE);

    tracing::debug!(
        "Bullish score {} (strength={} ratio={} spread={} volume={} imb={} fake={} spoof={})",
        score,
        components.bid_strength,
        components.bid_ask_ratio,
        components.spread,
        components.volume,
        components.imbalance,
        fake_bid.detected,
        spoofing.detected
    );

    ScoreResult {
        score,
        percentage: score as f64 / MAX_SCORE as f64 * 100.0,
        components,
        fake_bid_detected: fake_bid.detected,
        spoofing_detected: spoofing.detected,
    }
}

/// Points of the first tier whose threshold `value` strictly exceeds
fn points_exceeding(value: f64, tiers: &[ScoreTier]) -> u32 {
    tiers
        .iter()
        .find(|tier| value > tier.threshold)
        .map_or(0, |tier| tier.points)
}

/// Points of the first tier whose threshold `value` is at or below
fn points_at_most(value: f64, tiers: &[ScoreTier]) -> u32 {
    tiers
        .iter()
        .find(|tier| value <= tier.threshold)
        .map_or(0, |tier| tier.points)
}

fn ratio_points(ratio: Ratio, tiers: &[ScoreTier]) -> u32 {
    tiers
        .iter()
        .find(|tier| ratio.exceeds(tier.threshold))
        .map_or(0, |tier| tier.points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreThresholds;
    use crate::orderbook::types::PriceLevel;

    fn snapshot(bid_lot: f64, ask_lot: f64, bid: i64, ask: i64, volume: u64) -> Snapshot {
        Snapshot::new(
            vec![PriceLevel::new(bid, 5, bid_lot)],
            vec![PriceLevel::new(ask, 5, ask_lot)],
            bid,
            volume,
        )
    }

    #[test]
    fn test_tier_boundaries_are_strict() {
        let tables = ScoreThresholds::default();

        assert_eq!(points_exceeding(0.71, &tables.bid_strength), 25);
        assert_eq!(points_exceeding(0.7, &tables.bid_strength), 20);
        assert_eq!(points_exceeding(0.5, &tables.bid_strength), 0);

        assert_eq!(points_at_most(0.5, &tables.spread_pct), 15);
        assert_eq!(points_at_most(0.51, &tables.spread_pct), 10);
        assert_eq!(points_at_most(1.5, &tables.spread_pct), 5);
        assert_eq!(points_at_most(1.51, &tables.spread_pct), 0);

        assert_eq!(points_exceeding(500_000.0, &tables.volume), 5);
        assert_eq!(points_exceeding(100_000.0, &tables.volume), 0);
    }

    #[test]
    fn test_ratio_points_infinite() {
        let tables = ScoreThresholds::default();
        assert_eq!(ratio_points(Ratio::Infinite, &tables.bid_ask_ratio), 20);
        assert_eq!(ratio_points(Ratio::Finite(1.6), &tables.bid_ask_ratio), 15);
        assert_eq!(ratio_points(Ratio::Finite(1.0), &tables.bid_ask_ratio), 0);
    }

    #[test]
    fn test_full_score() {
        // bid 800 / ask 200, spread 3/1000 = 0.3%, volume 600k
        let current = snapshot(800.0, 200.0, 1000, 1003, 600_000);
        let result =
            calculate_bullish_score(&current, &[current.clone()], &AnalyzerConfig::default());

        assert_eq!(result.score, 100);
        assert_eq!(result.percentage, 100.0);
        assert_eq!(result.components.bid_strength, 25);
        assert_eq!(result.components.bid_ask_ratio, 20);
        assert_eq!(result.components.spread, 15);
        assert_eq!(result.components.volume, 10);
        assert_eq!(result.components.imbalance, 10);
        assert!(!result.fake_bid_detected);
        assert!(!result.spoofing_detected);
    }

    #[test]
    fn test_bearish_book_keeps_clean_points_only() {
        // bid 200 / ask 800, spread 20/1000 = 2%, thin volume
        let current = snapshot(200.0, 800.0, 1000, 1020, 10_000);
        let result =
            calculate_bullish_score(&current, &[current.clone()], &AnalyzerConfig::default());

        assert_eq!(result.score, 20);
        assert_eq!(result.components.no_fake_bid, 10);
        assert_eq!(result.components.no_spoofing, 10);
        assert_eq!(result.components.spread, 0);
    }

    #[test]
    fn test_manipulation_flags_remove_points() {
        let current = snapshot(800.0, 200.0, 1000, 1003, 600_000);
        let fake_bid = FakeBidDetection {
            detected: true,
            fake_prices: vec![1000],
            count: 1,
        };
        let spoofing = SpoofingDetection::default();

        let result =
            score_with_detections(&current, &fake_bid, &spoofing, &AnalyzerConfig::default());
        assert_eq!(result.score, 90);
        assert_eq!(result.components.no_fake_bid, 0);
        assert!(result.fake_bid_detected);
    }

    #[test]
    fn test_empty_book_scores_spread_only() {
        // Empty sides: strength 0, ratio 0, spread% 0 (counts as tight), imbalance 0
        let current = Snapshot::new(vec![], vec![], 0, 0);
        let result = calculate_bullish_score(&current, &[], &AnalyzerConfig::default());

        assert_eq!(result.components.spread, 15);
        assert_eq!(result.score, 35);
        assert!(result.score <= MAX_SCORE);
    }
}
