//! Core data types for order book analytics
//!
//! Result entities produced by the detectors, the composite scorer, the signal
//! generator and the summary builder. Every entity is recomputed per call and
//! always fully populated.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::orderbook::types::{Imbalance, MarketDepth, Ratio, Spread, Zone};

// ============================================================================
// Manipulation Detection
// ============================================================================

/// Bid prices that looked large-and-thin but did not persist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FakeBidDetection {
    pub detected: bool,

    /// Flagged prices, ascending
    pub fake_prices: Vec<i64>,

    pub count: usize,
}

/// Kind of spoofing behaviour matched at a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpoofingPatternKind {
    /// Appear/disappear cycle with near-constant period
    RegularCancellation,
}

/// One price exhibiting a spoofing pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpoofingPattern {
    pub price: i64,

    /// Window indices at which the large order was present
    pub appearances: Vec<usize>,

    pub pattern: SpoofingPatternKind,
}

/// Spoofing patterns found in the window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpoofingDetection {
    pub detected: bool,

    /// Matched patterns, ascending by price
    pub patterns: Vec<SpoofingPattern>,

    pub count: usize,
}

/// Both detector results for one window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ManipulationReport {
    pub fake_bid: FakeBidDetection,
    pub spoofing: SpoofingDetection,
}

// ============================================================================
// Composite Score
// ============================================================================

/// Points awarded per scoring factor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreComponents {
    pub bid_strength: u32,
    pub bid_ask_ratio: u32,
    pub spread: u32,
    pub volume: u32,
    pub imbalance: u32,
    pub no_fake_bid: u32,
    pub no_spoofing: u32,
}

impl ScoreComponents {
    /// Factor names paired with their points, in scoring order
    pub fn entries(&self) -> [(&'static str, u32); 7] {
        [
            ("bid_strength", self.bid_strength),
            ("bid_ask_ratio", self.bid_ask_ratio),
            ("spread", self.spread),
            ("volume", self.volume),
            ("imbalance", self.imbalance),
            ("no_fake_bid", self.no_fake_bid),
            ("no_spoofing", self.no_spoofing),
        ]
    }

    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, points)| points).sum()
    }
}

/// Bounded 0-100 bullishness score with its itemised components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResult {
    pub score: u32,

    /// Score as a percentage of the maximum score
    pub percentage: f64,

    pub components: ScoreComponents,

    pub fake_bid_detected: bool,

    pub spoofing_detected: bool,
}

// ============================================================================
// Trading Signal
// ============================================================================

/// Discrete trading signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    StrongBuy,
    Buy,
    HoldPositive,
    Neutral,
    Caution,
    Sell,
    FakeBidDetected,
    SpoofingDetected,
    NoData,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::StrongBuy => "STRONG_BUY",
            SignalKind::Buy => "BUY",
            SignalKind::HoldPositive => "HOLD_POSITIVE",
            SignalKind::Neutral => "NEUTRAL",
            SignalKind::Caution => "CAUTION",
            SignalKind::Sell => "SELL",
            SignalKind::FakeBidDetected => "FAKE_BID_DETECTED",
            SignalKind::SpoofingDetected => "SPOOFING_DETECTED",
            SignalKind::NoData => "NO_DATA",
        }
    }

    /// Signals whose recommendation cites the nearest support
    pub fn is_bullish(&self) -> bool {
        matches!(self, SignalKind::StrongBuy | SignalKind::Buy)
    }

    /// Signals whose recommendation cites the nearest resistance
    pub fn is_bearish(&self) -> bool {
        matches!(self, SignalKind::Sell | SignalKind::Caution)
    }

    /// Whether the signal comes from the manipulation short-circuit
    pub fn is_manipulation(&self) -> bool {
        matches!(
            self,
            SignalKind::FakeBidDetected | SignalKind::SpoofingDetected
        )
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trading signal bundled with the market context it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TradingSignal {
    pub signal: SignalKind,

    /// 0-100
    pub confidence: u32,

    pub score: ScoreResult,

    pub market_depth: MarketDepth,

    /// Strongest demand levels of the current snapshot
    pub support_zone: Zone,

    /// Strongest supply levels of the current snapshot
    pub resistance_zone: Zone,

    pub spread: Spread,

    pub recommendation: String,
}

// ============================================================================
// Volume Profile
// ============================================================================

/// Direction of traded volume across the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
}

/// Per-snapshot volume sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VolumePoint {
    /// Position inside the window
    pub index: usize,

    /// Snapshot timestamp, if the snapshot carried one
    pub timestamp: Option<i64>,

    pub volume: u64,

    pub bid_strength: f64,

    pub lot_imbalance: f64,
}

/// Traded volume behaviour over the trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VolumeProfile {
    /// Effective window length
    pub lookback_period: usize,

    pub avg_volume: f64,

    pub volume_trend: VolumeTrend,

    pub data: Vec<VolumePoint>,
}

// ============================================================================
// Analysis Summary
// ============================================================================

/// Best prices of the current snapshot (0 for an empty side)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceLevels {
    pub best_bid: i64,
    pub best_ask: i64,

    /// `(best_bid + best_ask) / 2`, 0 unless both sides are present
    pub mid_price: f64,
}

/// Aggregate metrics of the current snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrderBookMetrics {
    pub bid_strength: f64,
    pub bid_ask_ratio: Ratio,
    pub bid_value_ratio: Ratio,
    pub spread: i64,
    pub spread_percentage: f64,
    pub total_bid_lot: f64,
    pub total_ask_lot: f64,
    pub total_bid_value: f64,
    pub total_ask_value: f64,
}

/// Strongest demand and supply zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyLevels {
    pub strongest_demand: Zone,
    pub strongest_supply: Zone,
}

/// Complete analysis of a history, rooted at its latest snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisSummary {
    pub generated_at: DateTime<Utc>,
    pub current_price_levels: PriceLevels,
    pub order_book_metrics: OrderBookMetrics,
    pub market_manipulation: ManipulationReport,
    pub key_levels: KeyLevels,
    pub market_depth: MarketDepth,
    pub imbalance: Imbalance,
    pub volume_analysis: VolumeProfile,
    pub trading_signal: TradingSignal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&SignalKind::HoldPositive).unwrap(),
            "\"HOLD_POSITIVE\""
        );
        assert_eq!(
            serde_json::to_string(&SignalKind::NoData).unwrap(),
            "\"NO_DATA\""
        );
        assert_eq!(SignalKind::SpoofingDetected.to_string(), "SPOOFING_DETECTED");
    }

    #[test]
    fn test_signal_kind_groups() {
        assert!(SignalKind::FakeBidDetected.is_manipulation());
        assert!(SignalKind::SpoofingDetected.is_manipulation());
        assert!(!SignalKind::Sell.is_manipulation());
        assert!(!SignalKind::NoData.is_manipulation());

        assert!(SignalKind::Buy.is_bullish());
        assert!(SignalKind::Caution.is_bearish());
        assert!(!SignalKind::Neutral.is_bullish() && !SignalKind::Neutral.is_bearish());
    }

    #[test]
    fn test_pattern_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&SpoofingPatternKind::RegularCancellation).unwrap(),
            "\"regular_cancellation\""
        );
    }

    #[test]
    fn test_components_total() {
        let components = ScoreComponents {
            bid_strength: 25,
            bid_ask_ratio: 20,
            spread: 15,
            volume: 10,
            imbalance: 10,
            no_fake_bid: 10,
            no_spoofing: 0,
        };
        assert_eq!(components.total(), 90);
        assert_eq!(components.entries()[6], ("no_spoofing", 0));
    }
}
