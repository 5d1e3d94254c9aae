//! Order book analyzer facade
//!
//! Binds an [`AnalyzerConfig`] to every metric, detector and scoring
//! operation. The analyzer holds no per-history state: each call borrows the
//! history for its duration and recomputes everything from it.

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::orderbook::analytics::types::{
    AnalysisSummary, FakeBidDetection, ManipulationReport, ScoreResult, SpoofingDetection,
    TradingSignal, VolumeProfile,
};
use crate::orderbook::analytics::{anomaly, profile, score, signal, summary};
use crate::orderbook::metrics;
use crate::orderbook::types::{Imbalance, MarketDepth, PriceLevel, Ratio, Snapshot, Zone};

/// Stateless analyzer over caller-owned snapshot histories
///
/// Operations split into two shapes:
/// - `*_for(current, history)`: `current` is scored, `history` feeds the
///   detectors; the caller decides whether `history` contains `current`
/// - history-only variants (`score`, `analyze`, `summary`): the last snapshot
///   of `history` is current
#[derive(Debug, Clone, Default)]
pub struct OrderBookAnalyzer {
    config: AnalyzerConfig,
}

impl OrderBookAnalyzer {
    /// Create an analyzer with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Aggregate metrics
    // ------------------------------------------------------------------

    pub fn total_lot(&self, levels: &[PriceLevel]) -> f64 {
        metrics::total_lot(levels)
    }

    pub fn total_value(&self, levels: &[PriceLevel]) -> f64 {
        metrics::total_value(levels, self.config.unit_multiplier)
    }

    pub fn bid_strength(&self, snapshot: &Snapshot) -> f64 {
        metrics::bid_strength(snapshot)
    }

    pub fn bid_ask_ratio(&self, snapshot: &Snapshot) -> Ratio {
        metrics::bid_ask_ratio(snapshot)
    }

    pub fn bid_value_ratio(&self, snapshot: &Snapshot) -> Ratio {
        metrics::bid_value_ratio(snapshot, self.config.unit_multiplier)
    }

    pub fn spread(&self, snapshot: &Snapshot) -> i64 {
        metrics::spread(snapshot)
    }

    pub fn spread_percentage(&self, snapshot: &Snapshot) -> f64 {
        metrics::spread_percentage(snapshot)
    }

    pub fn strength_score(&self, level: &PriceLevel) -> f64 {
        metrics::strength_score(level)
    }

    pub fn is_significant(&self, level: &PriceLevel) -> bool {
        metrics::is_significant(
            level,
            self.config.unit_multiplier,
            self.config.min_order_value,
        )
    }

    pub fn imbalance(&self, snapshot: &Snapshot) -> Imbalance {
        metrics::imbalance(snapshot, self.config.unit_multiplier)
    }

    pub fn market_depth(&self, snapshot: &Snapshot, depth: usize) -> MarketDepth {
        metrics::market_depth(snapshot, depth, self.config.unit_multiplier)
    }

    pub fn strongest_demand(&self, snapshot: &Snapshot, depth: usize) -> Zone {
        metrics::strongest_demand(snapshot, depth, self.config.unit_multiplier)
    }

    pub fn strongest_supply(&self, snapshot: &Snapshot, depth: usize) -> Zone {
        metrics::strongest_supply(snapshot, depth, self.config.unit_multiplier)
    }

    // ------------------------------------------------------------------
    // Manipulation detection
    // ------------------------------------------------------------------

    pub fn detect_fake_bid(&self, history: &[Snapshot]) -> FakeBidDetection {
        anomaly::detect_fake_bid(history, &self.config.fake_bid)
    }

    pub fn detect_spoofing(&self, history: &[Snapshot]) -> SpoofingDetection {
        anomaly::detect_spoofing(
            history,
            &self.config.spoofing,
            self.config.unit_multiplier,
            self.config.min_order_value,
        )
    }

    pub fn detect_manipulation(&self, history: &[Snapshot]) -> ManipulationReport {
        summary::detect_manipulation(history, &self.config)
    }

    // ------------------------------------------------------------------
    // Scoring and signals
    // ------------------------------------------------------------------

    /// Composite score of `current`, with detectors run over `history`
    pub fn score_for(&self, current: &Snapshot, history: &[Snapshot]) -> ScoreResult {
        score::calculate_bullish_score(current, history, &self.config)
    }

    /// Composite score of the latest snapshot; zero score for an empty history
    pub fn score(&self, history: &[Snapshot]) -> ScoreResult {
        match history.last() {
            Some(current) => self.score_for(current, history),
            None => ScoreResult::default(),
        }
    }

    /// Trading signal for `current`, with detectors run over `history`
    pub fn signal_for(&self, current: &Snapshot, history: &[Snapshot]) -> TradingSignal {
        let score = self.score_for(current, history);
        signal::generate_signal(current, score, &self.config)
    }

    /// Trading signal for the latest snapshot; `NO_DATA` for an empty history
    pub fn analyze(&self, history: &[Snapshot]) -> TradingSignal {
        match history.last() {
            Some(current) => self.signal_for(current, history),
            None => signal::no_data_signal(),
        }
    }

    // ------------------------------------------------------------------
    // Reporting views
    // ------------------------------------------------------------------

    pub fn volume_profile(&self, history: &[Snapshot]) -> VolumeProfile {
        profile::volume_profile(
            history,
            self.config.volume_lookback,
            self.config.unit_multiplier,
        )
    }

    /// Complete analysis of the history; `None` when it is empty
    pub fn summary(&self, history: &[Snapshot]) -> Option<AnalysisSummary> {
        summary::build_summary(history, &self.config)
    }

    /// Whether the history passes the watchlist screening rule
    pub fn is_candidate(&self, history: &[Snapshot]) -> bool {
        summary::is_candidate(history, &self.config)
    }
}
