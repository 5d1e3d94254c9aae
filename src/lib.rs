// Library exports for orderbook-signal

pub mod config; // Configuration management
pub mod error;

// Snapshot model, metrics, detectors, scoring and signals
pub mod orderbook;

pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use orderbook::analytics::{AnalysisSummary, ScoreResult, SignalKind, TradingSignal};
pub use orderbook::{OrderBookAnalyzer, PriceLevel, Snapshot};
