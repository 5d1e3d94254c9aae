//! Order book data structures and types
//!
//! Snapshot model plus the derived views computed from a single snapshot.

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// One displayed price level
///
/// Immutable once constructed. `order_count` is the number of distinct resting
/// orders aggregated into the level ("freq" in exchange feeds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceLevel {
    /// Price in integer currency units
    pub price: i64,

    /// Distinct resting orders at this price
    #[serde(alias = "freq")]
    pub order_count: u32,

    /// Resting quantity in lots; fractional when the feed reports shares
    /// divided by the lot unit
    #[serde(alias = "lot")]
    pub lot_size: f64,
}

impl PriceLevel {
    pub fn new(price: i64, order_count: u32, lot_size: f64) -> Self {
        Self {
            price,
            order_count,
            lot_size,
        }
    }
}

/// One order book observation for a single instrument
///
/// Bid levels are expected best (highest) first and ask levels best (lowest)
/// first. The ordering is a caller precondition: best-price lookups read the
/// first element of each side and never re-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    /// Bid levels, descending by price
    #[serde(default, alias = "bid")]
    pub bids: Vec<PriceLevel>,

    /// Ask levels, ascending by price
    #[serde(default, alias = "ask", alias = "offer")]
    pub asks: Vec<PriceLevel>,

    /// Last traded price
    #[serde(default, alias = "last_price")]
    pub last_trade_price: i64,

    /// Traded volume for the session
    #[serde(default, alias = "volume")]
    pub traded_volume: u64,

    /// Observation time (milliseconds since Unix epoch); position in the
    /// history stands in when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Snapshot {
    /// Create a snapshot without a timestamp
    pub fn new(
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
        last_trade_price: i64,
        traded_volume: u64,
    ) -> Self {
        Self {
            bids,
            asks,
            last_trade_price,
            traded_volume,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Best bid level (first bid in book order)
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Best ask level (first ask in book order)
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

/// Ratio that is either finite or positive infinity
///
/// Produced when the denominator side of the book can be empty. Infinity
/// compares above every finite threshold, so an empty ask side reads as
/// maximal bid dominance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Finite(f64),
    Infinite,
}

impl Ratio {
    /// `numerator / denominator`; infinity for a positive numerator over zero,
    /// zero when both are zero
    pub fn of(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 {
            Ratio::Finite(numerator / denominator)
        } else if numerator > 0.0 {
            Ratio::Infinite
        } else {
            Ratio::Finite(0.0)
        }
    }

    /// Strict `>` comparison against a finite threshold
    pub fn exceeds(self, threshold: f64) -> bool {
        match self {
            Ratio::Finite(value) => value > threshold,
            Ratio::Infinite => true,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Ratio::Infinite)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Ratio::Finite(value) => value,
            Ratio::Infinite => f64::INFINITY,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Finite(value) => write!(f, "{:.2}", value),
            Ratio::Infinite => write!(f, "inf"),
        }
    }
}

// Infinity is not representable in JSON numbers, so it travels as "inf"
impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Finite(value) => serializer.serialize_f64(*value),
            Ratio::Infinite => serializer.serialize_str("inf"),
        }
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) if value.is_infinite() && value > 0.0 => Ok(Ratio::Infinite),
            Raw::Number(value) => Ok(Ratio::Finite(value)),
            Raw::Text(text) if matches!(text.as_str(), "inf" | "infinity" | "Infinity") => {
                Ok(Ratio::Infinite)
            }
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "expected number or \"inf\", got {:?}",
                text
            ))),
        }
    }
}

impl JsonSchema for Ratio {
    fn schema_name() -> Cow<'static, str> {
        "Ratio".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "oneOf": [
                { "type": "number" },
                { "const": "inf" }
            ]
        })
    }
}

/// Bid/ask imbalance with the raw totals it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Imbalance {
    /// `(bid_lot - ask_lot) / (bid_lot + ask_lot)`, 0 when both are zero
    pub lot_imbalance: f64,

    /// `(bid_value - ask_value) / (bid_value + ask_value)`, 0 when both are zero
    pub value_imbalance: f64,

    pub bid_lot: f64,
    pub ask_lot: f64,
    pub bid_value: f64,
    pub ask_value: f64,
}

/// Absolute and relative spread between best ask and best bid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Spread {
    pub absolute: i64,
    pub percentage: f64,
}

/// Depth entry with notional value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DepthLevel {
    pub price: i64,
    pub lot_size: f64,
    pub order_count: u32,
    pub value: f64,
}

/// Top-N levels of each side in book order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MarketDepth {
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
}

/// Level ranked inside a support or resistance zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZoneLevel {
    pub price: i64,
    pub lot_size: f64,
    pub order_count: u32,
    /// Strength score used for ranking
    pub score: f64,
}

/// Strongest levels of one side, ranked by strength score
///
/// Bid zones act as support (demand), ask zones as resistance (supply).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Zone {
    /// Prices of the ranked levels, strongest first
    pub prices: Vec<i64>,

    pub total_lot: f64,

    pub total_value: f64,

    /// Lot-weighted average price, 0 when the zone holds no lots
    pub avg_price: f64,

    pub levels: Vec<ZoneLevel>,
}

impl Zone {
    /// Level with the highest strength score
    pub fn strongest(&self) -> Option<&ZoneLevel> {
        self.levels.first()
    }

    /// Lowest price in the zone (nearest support for a demand zone)
    pub fn lowest_price(&self) -> Option<i64> {
        self.prices.iter().copied().min()
    }

    /// Highest price in the zone (nearest resistance for a supply zone)
    pub fn highest_price(&self) -> Option<i64> {
        self.prices.iter().copied().max()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_levels_follow_book_order() {
        let snapshot = Snapshot::new(
            vec![PriceLevel::new(100, 1, 10.0), PriceLevel::new(99, 1, 10.0)],
            vec![PriceLevel::new(101, 1, 10.0)],
            100,
            0,
        );

        assert_eq!(snapshot.best_bid().map(|l| l.price), Some(100));
        assert_eq!(snapshot.best_ask().map(|l| l.price), Some(101));
        assert!(Snapshot::new(vec![], vec![], 0, 0).best_bid().is_none());
    }

    #[test]
    fn test_ratio_semantics() {
        assert_eq!(Ratio::of(4.0, 2.0), Ratio::Finite(2.0));
        assert_eq!(Ratio::of(5.0, 0.0), Ratio::Infinite);
        assert_eq!(Ratio::of(0.0, 0.0), Ratio::Finite(0.0));
        assert_eq!(Ratio::of(0.0, 3.0), Ratio::Finite(0.0));

        assert!(Ratio::Infinite.exceeds(2.0));
        assert!(!Ratio::Finite(2.0).exceeds(2.0));
        assert_eq!(Ratio::Infinite.as_f64(), f64::INFINITY);
    }

    #[test]
    fn test_ratio_json() {
        assert_eq!(serde_json::to_string(&Ratio::Infinite).unwrap(), "\"inf\"");
        assert_eq!(serde_json::to_string(&Ratio::Finite(1.5)).unwrap(), "1.5");

        let parsed: Ratio = serde_json::from_str("\"inf\"").unwrap();
        assert_eq!(parsed, Ratio::Infinite);
        let parsed: Ratio = serde_json::from_str("0.25").unwrap();
        assert_eq!(parsed, Ratio::Finite(0.25));
        assert!(serde_json::from_str::<Ratio>("\"nan\"").is_err());
    }

    #[test]
    fn test_snapshot_accepts_feed_field_names() {
        let raw = r#"{
            "bid": [{ "price": 1000, "freq": 3, "lot": 250 }],
            "offer": [{ "price": 1005, "freq": 1, "lot": 40 }],
            "last_price": 1000,
            "volume": 125000
        }"#;

        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.bids[0], PriceLevel::new(1000, 3, 250.0));
        assert_eq!(snapshot.asks[0].lot_size, 40.0);
        assert_eq!(snapshot.traded_volume, 125_000);
        assert_eq!(snapshot.timestamp, None);
    }

    #[test]
    fn test_price_level_fractional_lot() {
        let level: PriceLevel =
            serde_json::from_str(r#"{ "price": 1000, "freq": 2, "lot": 12.5 }"#).unwrap();
        assert_eq!(level, PriceLevel::new(1000, 2, 12.5));
        assert_eq!(serde_json::to_value(level).unwrap()["lot_size"], 12.5);
    }
}
