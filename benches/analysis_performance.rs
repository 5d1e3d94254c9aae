// Performance profile for full-history analysis
//
// Detection cost grows with window size x levels per snapshot and is paid on
// every call. This profiles summary generation over a 20-snapshot history
// with 10 levels per side.

use orderbook_signal::{OrderBookAnalyzer, PriceLevel, Snapshot};
use std::time::Instant;

const ITERATIONS: u32 = 10_000;

fn synthetic_history(len: usize, levels: usize) -> Vec<Snapshot> {
    (0..len)
        .map(|i| {
            let bids = (0..levels)
                .map(|l| {
                    let lot = (200 + (i * l) % 900) as f64;
                    PriceLevel::new(10_000 - l as i64 * 5, 3 + (l % 4) as u32, lot)
                })
                .collect();
            let asks = (0..levels)
                .map(|l| {
                    let lot = (150 + (i + l) % 700) as f64;
                    PriceLevel::new(10_005 + l as i64 * 5, 2 + (l % 3) as u32, lot)
                })
                .collect();
            Snapshot::new(bids, asks, 10_000, 100_000 + i as u64 * 10_000)
        })
        .collect()
}

fn main() {
    println!("=== Order Book Analysis Performance Profiling ===\n");

    let analyzer = OrderBookAnalyzer::default();
    let history = synthetic_history(20, 10);

    let start = Instant::now();
    let mut strong_signals = 0u32;
    for _ in 0..ITERATIONS {
        if let Some(summary) = analyzer.summary(&history) {
            if summary.trading_signal.confidence > 50 {
                strong_signals += 1;
            }
        }
    }
    let elapsed = start.elapsed();

    println!("History: {} snapshots x 10 levels per side", history.len());
    println!("Iterations: {}", ITERATIONS);
    println!("Total: {:?}", elapsed);
    println!("Per summary: {:?}", elapsed / ITERATIONS);
    println!("Signals above 50 confidence: {}", strong_signals);
}
