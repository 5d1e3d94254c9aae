//! Trading signal generation
//!
//! Maps a score and the two manipulation flags to a discrete signal. The
//! manipulation flags are checked first and short-circuit scoring:
//! spoofing, then fake bid, then the score ladder
//! (STRONG_BUY >=80, BUY >=65, HOLD_POSITIVE >=50, NEUTRAL >=40, CAUTION >=30,
//! SELL otherwise).

use crate::config::{AnalyzerConfig, SignalThresholds, MAX_SCORE};
use crate::orderbook::analytics::types::{ScoreResult, SignalKind, TradingSignal};
use crate::orderbook::metrics::{market_depth, spread_summary, strongest_demand, strongest_supply};
use crate::orderbook::types::{MarketDepth, Snapshot, Spread, Zone};

/// Confidence reported with a NEUTRAL signal
const NEUTRAL_CONFIDENCE: u32 = 40;

/// Confidence reported with a CAUTION signal
const CAUTION_CONFIDENCE: u32 = 30;

/// Bonus added to the score for a STRONG_BUY confidence
const STRONG_BUY_BONUS: u32 = 10;

/// Penalty subtracted from the score for a HOLD_POSITIVE confidence
const HOLD_POSITIVE_PENALTY: u32 = 10;

/// Classify a score result into a signal and its confidence
pub fn classify(score: &ScoreResult, thresholds: &SignalThresholds) -> (SignalKind, u32) {
    if score.spoofing_detected {
        return (SignalKind::SpoofingDetected, 0);
    }
    if score.fake_bid_detected {
        return (SignalKind::FakeBidDetected, 0);
    }

    let s = score.score;
    match s {
        s if s >= thresholds.strong_buy => {
            (SignalKind::StrongBuy, (s + STRONG_BUY_BONUS).min(MAX_SCORE))
        }
        s if s >= thresholds.buy => (SignalKind::Buy, s),
        s if s >= thresholds.hold_positive => (
            SignalKind::HoldPositive,
            s.saturating_sub(HOLD_POSITIVE_PENALTY),
        ),
        s if s >= thresholds.neutral => (SignalKind::Neutral, NEUTRAL_CONFIDENCE),
        s if s >= thresholds.caution => (SignalKind::Caution, CAUTION_CONFIDENCE),
        s => (SignalKind::Sell, MAX_SCORE.saturating_sub(s)),
    }
}

/// Base recommendation text for a signal
fn base_recommendation(signal: SignalKind) -> &'static str {
    match signal {
        SignalKind::StrongBuy => {
            "Consider entering long position with tight stop loss below support"
        }
        SignalKind::Buy => "Look for buying opportunities near support levels",
        SignalKind::HoldPositive => "Hold existing positions, consider taking partial profits",
        SignalKind::Neutral => "Wait for clearer signal, avoid new positions",
        SignalKind::Caution => "Consider reducing position size or hedging",
        SignalKind::Sell => "Consider exiting long positions or entering short",
        SignalKind::FakeBidDetected => {
            "Wait for confirmation, avoid trading based on suspected fake bids"
        }
        SignalKind::SpoofingDetected => "High risk of manipulation, avoid trading",
        SignalKind::NoData => "No recommendation available",
    }
}

/// Recommendation text, citing the nearest support for bullish signals and
/// the nearest resistance for bearish ones
pub fn recommendation(signal: SignalKind, demand: &Zone, supply: &Zone) -> String {
    let mut text = base_recommendation(signal).to_string();

    if signal.is_bullish() {
        if let Some(support) = demand.lowest_price() {
            text.push_str(&format!(". Nearest support at {}", support));
        }
    }

    if signal.is_bearish() {
        if let Some(resistance) = supply.highest_price() {
            text.push_str(&format!(". Nearest resistance at {}", resistance));
        }
    }

    text
}

/// Build the full trading signal for the current snapshot
pub fn generate_signal(
    current: &Snapshot,
    score: ScoreResult,
    config: &AnalyzerConfig,
) -> TradingSignal {
    let (signal, confidence) = classify(&score, &config.signal);

    let support_zone = strongest_demand(current, config.zone_depth, config.unit_multiplier);
    let resistance_zone = strongest_supply(current, config.zone_depth, config.unit_multiplier);
    let recommendation = recommendation(signal, &support_zone, &resistance_zone);

    tracing::debug!(
        "Signal {} (confidence={}, score={})",
        signal,
        confidence,
        score.score
    );

    TradingSignal {
        signal,
        confidence,
        score,
        market_depth: market_depth(current, config.signal_depth, config.unit_multiplier),
        support_zone,
        resistance_zone,
        spread: spread_summary(current),
        recommendation,
    }
}

/// Signal for an empty history
pub fn no_data_signal() -> TradingSignal {
    TradingSignal {
        signal: SignalKind::NoData,
        confidence: 0,
        score: ScoreResult::default(),
        market_depth: MarketDepth::default(),
        support_zone: Zone::default(),
        resistance_zone: Zone::default(),
        spread: Spread::default(),
        recommendation: base_recommendation(SignalKind::NoData).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::types::ZoneLevel;

    fn score(points: u32) -> ScoreResult {
        ScoreResult {
            score: points,
            percentage: points as f64,
            ..Default::default()
        }
    }

    fn zone(prices: &[i64]) -> Zone {
        Zone {
            prices: prices.to_vec(),
            levels: prices
                .iter()
                .map(|&price| ZoneLevel {
                    price,
                    lot_size: 100.0,
                    order_count: 1,
                    score: 100.0,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_score_ladder() {
        let t = SignalThresholds::default();

        assert_eq!(classify(&score(100), &t), (SignalKind::StrongBuy, 100));
        assert_eq!(classify(&score(85), &t), (SignalKind::StrongBuy, 95));
        assert_eq!(classify(&score(80), &t), (SignalKind::StrongBuy, 90));
        assert_eq!(classify(&score(79), &t), (SignalKind::Buy, 79));
        assert_eq!(classify(&score(65), &t), (SignalKind::Buy, 65));
        assert_eq!(classify(&score(50), &t), (SignalKind::HoldPositive, 40));
        assert_eq!(classify(&score(45), &t), (SignalKind::Neutral, 40));
        assert_eq!(classify(&score(30), &t), (SignalKind::Caution, 30));
        assert_eq!(classify(&score(20), &t), (SignalKind::Sell, 80));
        assert_eq!(classify(&score(0), &t), (SignalKind::Sell, 100));
    }

    #[test]
    fn test_manipulation_short_circuits() {
        let t = SignalThresholds::default();

        let mut spoofed = score(100);
        spoofed.spoofing_detected = true;
        spoofed.fake_bid_detected = true;
        assert_eq!(classify(&spoofed, &t), (SignalKind::SpoofingDetected, 0));

        let mut faked = score(0);
        faked.fake_bid_detected = true;
        assert_eq!(classify(&faked, &t), (SignalKind::FakeBidDetected, 0));
    }

    #[test]
    fn test_recommendation_price_targets() {
        let demand = zone(&[990, 985]);
        let supply = zone(&[1010, 1020]);

        assert_eq!(
            recommendation(SignalKind::Buy, &demand, &supply),
            "Look for buying opportunities near support levels. Nearest support at 985"
        );
        assert_eq!(
            recommendation(SignalKind::Caution, &demand, &supply),
            "Consider reducing position size or hedging. Nearest resistance at 1020"
        );
        assert_eq!(
            recommendation(SignalKind::HoldPositive, &demand, &supply),
            "Hold existing positions, consider taking partial profits"
        );
    }

    #[test]
    fn test_recommendation_without_zone() {
        let empty = Zone::default();
        assert_eq!(
            recommendation(SignalKind::Sell, &empty, &empty),
            "Consider exiting long positions or entering short"
        );
    }

    #[test]
    fn test_no_data_signal() {
        let signal = no_data_signal();
        assert_eq!(signal.signal, SignalKind::NoData);
        assert_eq!(signal.confidence, 0);
        assert_eq!(signal.score.score, 0);
        assert_eq!(signal.recommendation, "No recommendation available");
    }
}
