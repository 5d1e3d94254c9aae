//! Manipulation detection (fake bids, spoofing)
//!
//! Both detectors scan the bid side of a trailing window of snapshots:
//! - Fake bid: large level (>=500 lots) with few orders (<=2) that shows up in
//!   at most 2 snapshots of the window
//! - Spoofing: large (>=1000 lots), significant-value level whose appearances
//!   recur with near-constant gaps (range <=2 snapshots)
//!
//! Appearance tracking is rebuilt on every call; nothing carries over between
//! calls.

use std::collections::BTreeMap;

use crate::config::{FakeBidConfig, SpoofingConfig};
use crate::orderbook::analytics::types::{
    FakeBidDetection, SpoofingDetection, SpoofingPattern, SpoofingPatternKind,
};
use crate::orderbook::metrics::is_significant;
use crate::orderbook::types::{PriceLevel, Snapshot};

/// Trailing `min(lookback, len)` snapshots
pub fn trailing_window(history: &[Snapshot], lookback: usize) -> &[Snapshot] {
    let start = history.len().saturating_sub(lookback);
    &history[start..]
}

/// Window indices per bid price for levels matching `predicate`
fn track_bid_appearances<F>(window: &[Snapshot], predicate: F) -> BTreeMap<i64, Vec<usize>>
where
    F: Fn(&PriceLevel) -> bool,
{
    let mut appearances: BTreeMap<i64, Vec<usize>> = BTreeMap::new();

    for (index, snapshot) in window.iter().enumerate() {
        for level in snapshot.bids.iter().filter(|&level| predicate(level)) {
            appearances.entry(level.price).or_default().push(index);
        }
    }

    appearances
}

/// Detect fake bids (large, thin levels that do not persist)
///
/// # Arguments
/// * `history` - Chronological snapshots; the trailing `config.lookback` are scanned
/// * `config` - Size, order-count and persistence thresholds
///
/// # Returns
/// Flagged prices ascending; `detected` is true when any price is flagged
pub fn detect_fake_bid(history: &[Snapshot], config: &FakeBidConfig) -> FakeBidDetection {
    let window = trailing_window(history, config.lookback);

    let appearances = track_bid_appearances(window, |level| {
        level.lot_size >= config.min_lot && level.order_count <= config.max_order_count
    });

    let fake_prices: Vec<i64> = appearances
        .iter()
        .filter(|(_, seen)| seen.len() <= config.max_appearances)
        .map(|(price, _)| *price)
        .collect();

    if !fake_prices.is_empty() {
        tracing::debug!(
            "Fake bid detected at {} price(s) over {} snapshots: {:?}",
            fake_prices.len(),
            window.len(),
            fake_prices
        );
    }

    FakeBidDetection {
        detected: !fake_prices.is_empty(),
        count: fake_prices.len(),
        fake_prices,
    }
}

/// Detect spoofing (large orders appearing with regular periodicity)
///
/// # Arguments
/// * `history` - Chronological snapshots; the trailing `config.lookback` are scanned
/// * `config` - Size, appearance and gap-regularity thresholds
/// * `unit_multiplier` / `min_order_value` - Significance test for tracked levels
///
/// # Returns
/// One `regular_cancellation` pattern per flagged price, ascending by price
pub fn detect_spoofing(
    history: &[Snapshot],
    config: &SpoofingConfig,
    unit_multiplier: f64,
    min_order_value: f64,
) -> SpoofingDetection {
    let window = trailing_window(history, config.lookback);

    let appearances = track_bid_appearances(window, |level| {
        level.lot_size >= config.min_lot && is_significant(level, unit_multiplier, min_order_value)
    });

    let patterns: Vec<SpoofingPattern> = appearances
        .into_iter()
        .filter(|(_, seen)| seen.len() >= config.min_appearances)
        .filter(|(_, seen)| has_regular_gaps(seen, config))
        .map(|(price, seen)| SpoofingPattern {
            price,
            appearances: seen,
            pattern: SpoofingPatternKind::RegularCancellation,
        })
        .collect();

    if !patterns.is_empty() {
        tracing::debug!(
            "Spoofing detected at {} price(s) over {} snapshots",
            patterns.len(),
            window.len()
        );
    }

    SpoofingDetection {
        detected: !patterns.is_empty(),
        count: patterns.len(),
        patterns,
    }
}

/// Gaps between consecutive appearance indices
fn appearance_gaps(appearances: &[usize]) -> Vec<usize> {
    appearances
        .windows(2)
        .map(|pair| pair[1].saturating_sub(pair[0]))
        .collect()
}

/// Whether there are enough gaps and they span at most `max_gap_range`
fn has_regular_gaps(appearances: &[usize], config: &SpoofingConfig) -> bool {
    let gaps = appearance_gaps(appearances);
    if gaps.len() < config.min_gaps {
        return false;
    }

    match (gaps.iter().max(), gaps.iter().min()) {
        (Some(max), Some(min)) => max - min <= config.max_gap_range,
        _ => false,
    }
}
