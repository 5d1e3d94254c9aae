//! Volume profile over the trailing window
//!
//! Samples traded volume, bid strength and lot imbalance per snapshot and
//! reports the mean volume plus a first-vs-last volume trend.

use statrs::statistics::Statistics;

use crate::orderbook::analytics::anomaly::trailing_window;
use crate::orderbook::analytics::types::{VolumePoint, VolumeProfile, VolumeTrend};
use crate::orderbook::metrics::{bid_strength, imbalance};
use crate::orderbook::types::Snapshot;

/// Build the volume profile of the trailing `min(lookback, len)` snapshots
///
/// An empty history yields an empty profile with zero average volume.
pub fn volume_profile(
    history: &[Snapshot],
    lookback: usize,
    unit_multiplier: f64,
) -> VolumeProfile {
    let window = trailing_window(history, lookback);

    let data: Vec<VolumePoint> = window
        .iter()
        .enumerate()
        .map(|(index, snapshot)| VolumePoint {
            index,
            timestamp: snapshot.timestamp,
            volume: snapshot.traded_volume,
            bid_strength: bid_strength(snapshot),
            lot_imbalance: imbalance(snapshot, unit_multiplier).lot_imbalance,
        })
        .collect();

    let avg_volume = if data.is_empty() {
        0.0
    } else {
        data.iter().map(|point| point.volume as f64).mean()
    };

    VolumeProfile {
        lookback_period: window.len(),
        avg_volume,
        volume_trend: volume_trend(&data),
        data,
    }
}

/// Increasing when the latest volume is above the earliest one
fn volume_trend(data: &[VolumePoint]) -> VolumeTrend {
    match (data.first(), data.last()) {
        (Some(first), Some(last)) if last.volume > first.volume => VolumeTrend::Increasing,
        _ => VolumeTrend::Decreasing,
    }
}
