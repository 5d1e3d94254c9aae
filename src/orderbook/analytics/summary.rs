//! Full analysis summary and candidate screening

use chrono::Utc;

use crate::config::AnalyzerConfig;
use crate::orderbook::analytics::anomaly::{detect_fake_bid, detect_spoofing};
use crate::orderbook::analytics::profile::volume_profile;
use crate::orderbook::analytics::score::score_with_detections;
use crate::orderbook::analytics::signal::{classify, generate_signal};
use crate::orderbook::analytics::types::{
    AnalysisSummary, KeyLevels, ManipulationReport, OrderBookMetrics, PriceLevels,
};
use crate::orderbook::metrics::{
    bid_ask_ratio, bid_strength, bid_value_ratio, imbalance, market_depth, spread,
    spread_percentage, strongest_demand, strongest_supply, total_lot, total_value,
};
use crate::orderbook::types::Snapshot;

/// Run both detectors over the history
pub fn detect_manipulation(history: &[Snapshot], config: &AnalyzerConfig) -> ManipulationReport {
    ManipulationReport {
        fake_bid: detect_fake_bid(history, &config.fake_bid),
        spoofing: detect_spoofing(
            history,
            &config.spoofing,
            config.unit_multiplier,
            config.min_order_value,
        ),
    }
}

/// Best bid, best ask and mid price of a snapshot
pub fn price_levels(snapshot: &Snapshot) -> PriceLevels {
    let best_bid = snapshot.best_bid().map(|level| level.price);
    let best_ask = snapshot.best_ask().map(|level| level.price);

    let mid_price = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => (bid + ask) as f64 / 2.0,
        _ => 0.0,
    };

    PriceLevels {
        best_bid: best_bid.unwrap_or(0),
        best_ask: best_ask.unwrap_or(0),
        mid_price,
    }
}

pub fn order_book_metrics(snapshot: &Snapshot, unit_multiplier: f64) -> OrderBookMetrics {
    OrderBookMetrics {
        bid_strength: bid_strength(snapshot),
        bid_ask_ratio: bid_ask_ratio(snapshot),
        bid_value_ratio: bid_value_ratio(snapshot, unit_multiplier),
        spread: spread(snapshot),
        spread_percentage: spread_percentage(snapshot),
        total_bid_lot: total_lot(&snapshot.bids),
        total_ask_lot: total_lot(&snapshot.asks),
        total_bid_value: total_value(&snapshot.bids, unit_multiplier),
        total_ask_value: total_value(&snapshot.asks, unit_multiplier),
    }
}

/// Build the complete analysis of a history
///
/// The last snapshot is the current one. Returns `None` for an empty history.
pub fn build_summary(history: &[Snapshot], config: &AnalyzerConfig) -> Option<AnalysisSummary> {
    let current = history.last()?;
    let multiplier = config.unit_multiplier;

    let manipulation = detect_manipulation(history, config);
    let score = score_with_detections(
        current,
        &manipulation.fake_bid,
        &manipulation.spoofing,
        config,
    );
    let trading_signal = generate_signal(current, score, config);

    Some(AnalysisSummary {
        generated_at: Utc::now(),
        current_price_levels: price_levels(current),
        order_book_metrics: order_book_metrics(current, multiplier),
        market_manipulation: manipulation,
        key_levels: KeyLevels {
            strongest_demand: strongest_demand(current, config.summary_zone_depth, multiplier),
            strongest_supply: strongest_supply(current, config.summary_zone_depth, multiplier),
        },
        market_depth: market_depth(current, config.summary_depth, multiplier),
        imbalance: imbalance(current, multiplier),
        volume_analysis: volume_profile(history, config.volume_lookback, multiplier),
        trading_signal,
    })
}

/// Screening rule for watchlists
///
/// A history qualifies when its latest score reaches the HOLD_POSITIVE
/// threshold and neither detector fires.
pub fn is_candidate(history: &[Snapshot], config: &AnalyzerConfig) -> bool {
    let Some(current) = history.last() else {
        return false;
    };

    let manipulation = detect_manipulation(history, config);
    let score = score_with_detections(
        current,
        &manipulation.fake_bid,
        &manipulation.spoofing,
        config,
    );

    let (signal, _) = classify(&score, &config.signal);
    !signal.is_manipulation() && score.score >= config.signal.hold_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::analytics::types::SignalKind;
    use crate::orderbook::types::{PriceLevel, Ratio};

    fn bullish_snapshot() -> Snapshot {
        Snapshot::new(
            vec![PriceLevel::new(1000, 5, 500.0), PriceLevel::new(995, 8, 300.0)],
            vec![PriceLevel::new(1003, 4, 150.0), PriceLevel::new(1005, 2, 50.0)],
            1000,
            600_000,
        )
    }

    #[test]
    fn test_price_levels() {
        let levels = price_levels(&bullish_snapshot());
        assert_eq!(levels.best_bid, 1000);
        assert_eq!(levels.best_ask, 1003);
        assert_eq!(levels.mid_price, 1001.5);

        let one_sided = Snapshot::new(vec![PriceLevel::new(1000, 1, 1.0)], vec![], 0, 0);
        let levels = price_levels(&one_sided);
        assert_eq!(levels.best_bid, 1000);
        assert_eq!(levels.best_ask, 0);
        assert_eq!(levels.mid_price, 0.0);
    }

    #[test]
    fn test_order_book_metrics() {
        let metrics = order_book_metrics(&bullish_snapshot(), 1.0);
        assert_eq!(metrics.total_bid_lot, 800.0);
        assert_eq!(metrics.total_ask_lot, 200.0);
        assert_eq!(metrics.bid_ask_ratio, Ratio::Finite(4.0));
        assert_eq!(metrics.spread, 3);
    }

    #[test]
    fn test_build_summary() {
        let history = vec![bullish_snapshot(); 3];
        let summary = build_summary(&history, &AnalyzerConfig::default()).expect("summary");

        assert_eq!(summary.trading_signal.signal, SignalKind::StrongBuy);
        assert_eq!(summary.market_depth.bids.len(), 2);
        assert_eq!(summary.key_levels.strongest_demand.prices, vec![1000, 995]);
        assert_eq!(summary.volume_analysis.lookback_period, 3);
        assert!(!summary.market_manipulation.fake_bid.detected);

        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["trading_signal"]["signal"], "STRONG_BUY");
        assert_eq!(json["order_book_metrics"]["bid_ask_ratio"], 4.0);
    }

    #[test]
    fn test_build_summary_empty() {
        assert!(build_summary(&[], &AnalyzerConfig::default()).is_none());
    }

    #[test]
    fn test_is_candidate() {
        let config = AnalyzerConfig::default();
        assert!(is_candidate(&[bullish_snapshot()], &config));
        assert!(!is_candidate(&[], &config));

        let mut faked = bullish_snapshot();
        faked.bids.push(PriceLevel::new(990, 1, 900.0));
        assert!(!is_candidate(&[faked], &config));
    }
}
