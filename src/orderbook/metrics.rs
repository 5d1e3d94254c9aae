//! Order book metrics calculations
//!
//! Pure functions over a single snapshot or a list of price levels:
//! - Lot and value totals
//! - Bid strength, bid/ask lot and value ratios
//! - Spread (absolute and percentage)
//! - Level strength score and significance
//! - Lot and value imbalance
//! - Market depth and strongest support/resistance zones

use crate::orderbook::types::{
    DepthLevel, Imbalance, MarketDepth, PriceLevel, Ratio, Snapshot, Spread, Zone, ZoneLevel,
};
use std::cmp::Ordering;

/// Lot size at which a level keeps its full strength weight
const FULL_WEIGHT_LOT: f64 = 100.0;

/// Weight applied to levels below [`FULL_WEIGHT_LOT`]
const PARTIAL_WEIGHT: f64 = 0.5;

/// Sum of lots across levels
pub fn total_lot(levels: &[PriceLevel]) -> f64 {
    levels.iter().map(|level| level.lot_size).sum()
}

/// Notional value of one level: `lot_size * unit_multiplier * price`
pub fn level_value(level: &PriceLevel, unit_multiplier: f64) -> f64 {
    level.lot_size * unit_multiplier * level.price as f64
}

/// Sum of notional values across levels
pub fn total_value(levels: &[PriceLevel], unit_multiplier: f64) -> f64 {
    levels
        .iter()
        .map(|level| level_value(level, unit_multiplier))
        .sum()
}

/// Share of resting lots on the bid side: `bid / (bid + ask)`
///
/// Returns 0.0 when the book holds no lots.
pub fn bid_strength(snapshot: &Snapshot) -> f64 {
    let bid = total_lot(&snapshot.bids);
    let ask = total_lot(&snapshot.asks);
    let total = bid + ask;

    if total > 0.0 {
        bid / total
    } else {
        0.0
    }
}

/// Bid lots over ask lots (infinite when only the bid side holds lots)
pub fn bid_ask_ratio(snapshot: &Snapshot) -> Ratio {
    Ratio::of(
        total_lot(&snapshot.bids),
        total_lot(&snapshot.asks),
    )
}

/// Bid value over ask value (infinite when only the bid side holds value)
pub fn bid_value_ratio(snapshot: &Snapshot, unit_multiplier: f64) -> Ratio {
    Ratio::of(
        total_value(&snapshot.bids, unit_multiplier),
        total_value(&snapshot.asks, unit_multiplier),
    )
}

/// Best ask price minus best bid price, 0 if either side is empty
pub fn spread(snapshot: &Snapshot) -> i64 {
    match (snapshot.best_bid(), snapshot.best_ask()) {
        (Some(bid), Some(ask)) => ask.price - bid.price,
        _ => 0,
    }
}

/// Spread as a percentage of the best bid
///
/// Formula: `(best_ask - best_bid) / best_bid * 100`. Returns 0.0 if either
/// side is empty or the best bid price is zero.
pub fn spread_percentage(snapshot: &Snapshot) -> f64 {
    match snapshot.best_bid() {
        Some(bid) if bid.price != 0 && snapshot.best_ask().is_some() => {
            spread(snapshot) as f64 / bid.price as f64 * 100.0
        }
        _ => 0.0,
    }
}

pub fn spread_summary(snapshot: &Snapshot) -> Spread {
    Spread {
        absolute: spread(snapshot),
        percentage: spread_percentage(snapshot),
    }
}

/// Significance-weighted level strength: `lot_size * order_count * weight`
///
/// Weight is 1 for levels of at least 100 lots and 0.5 below.
pub fn strength_score(level: &PriceLevel) -> f64 {
    let weight = if level.lot_size >= FULL_WEIGHT_LOT {
        1.0
    } else {
        PARTIAL_WEIGHT
    };

    level.lot_size * level.order_count as f64 * weight
}

/// Whether a level's notional value reaches `min_order_value`
pub fn is_significant(level: &PriceLevel, unit_multiplier: f64, min_order_value: f64) -> bool {
    level_value(level, unit_multiplier) >= min_order_value
}

/// Lot and value imbalance, each `(bid - ask) / (bid + ask)`
pub fn imbalance(snapshot: &Snapshot, unit_multiplier: f64) -> Imbalance {
    let bid_lot = total_lot(&snapshot.bids);
    let ask_lot = total_lot(&snapshot.asks);
    let bid_value = total_value(&snapshot.bids, unit_multiplier);
    let ask_value = total_value(&snapshot.asks, unit_multiplier);

    let total_lot = bid_lot + ask_lot;
    let total_value = bid_value + ask_value;

    let lot_imbalance = if total_lot > 0.0 {
        (bid_lot - ask_lot) / total_lot
    } else {
        0.0
    };

    let value_imbalance = if total_value > 0.0 {
        (bid_value - ask_value) / total_value
    } else {
        0.0
    };

    Imbalance {
        lot_imbalance,
        value_imbalance,
        bid_lot,
        ask_lot,
        bid_value,
        ask_value,
    }
}

/// Top `depth` levels of each side in book order
pub fn market_depth(snapshot: &Snapshot, depth: usize, unit_multiplier: f64) -> MarketDepth {
    let encode = |level: &PriceLevel| DepthLevel {
        price: level.price,
        lot_size: level.lot_size,
        order_count: level.order_count,
        value: level_value(level, unit_multiplier),
    };

    MarketDepth {
        bids: snapshot.bids.iter().take(depth).map(encode).collect(),
        asks: snapshot.asks.iter().take(depth).map(encode).collect(),
    }
}

/// Strongest `depth` levels ranked by strength score, descending
///
/// Ties keep book order.
pub fn strongest_zone(levels: &[PriceLevel], depth: usize, unit_multiplier: f64) -> Zone {
    let mut ranked: Vec<(&PriceLevel, f64)> = levels
        .iter()
        .map(|level| (level, strength_score(level)))
        .collect();

    // Stable sort keeps book order among equal scores
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(depth);

    let total_lot: f64 = ranked.iter().map(|(level, _)| level.lot_size).sum();
    let total_value: f64 = ranked
        .iter()
        .map(|(level, _)| level_value(level, unit_multiplier))
        .sum();
    let weighted_price: f64 = ranked
        .iter()
        .map(|(level, _)| level.price as f64 * level.lot_size)
        .sum();

    let avg_price = if total_lot > 0.0 {
        weighted_price / total_lot
    } else {
        0.0
    };

    Zone {
        prices: ranked.iter().map(|(level, _)| level.price).collect(),
        total_lot,
        total_value,
        avg_price,
        levels: ranked
            .iter()
            .map(|(level, score)| ZoneLevel {
                price: level.price,
                lot_size: level.lot_size,
                order_count: level.order_count,
                score: *score,
            })
            .collect(),
    }
}

/// Support zone built from the bid side
pub fn strongest_demand(snapshot: &Snapshot, depth: usize, unit_multiplier: f64) -> Zone {
    strongest_zone(&snapshot.bids, depth, unit_multiplier)
}

/// Resistance zone built from the ask side
pub fn strongest_supply(snapshot: &Snapshot, depth: usize, unit_multiplier: f64) -> Zone {
    strongest_zone(&snapshot.asks, depth, unit_multiplier)
}
