//! Time axis resolution.

use crate::units::TimeUnit;

/// Picks the display unit for a file of the given duration.
///
/// Under one second is shown in milliseconds, under a minute in seconds,
/// anything longer in minutes.
pub fn select_unit(total_duration_secs: f64) -> TimeUnit {
    if total_duration_secs < 1.0 {
        TimeUnit::Milliseconds
    } else if total_duration_secs < 60.0 {
        TimeUnit::Seconds
    } else {
        TimeUnit::Minutes
    }
}

/// Timestamps for `count` samples spread over `span` (already in display units).
///
/// Sample `i` sits at `i / count * span`. The spacing is derived from the
/// duration, not from the nominal sample rate.
pub fn timestamps(count: usize, span: f64) -> Vec<f64> {
    (0..count)
        .map(|i| i as f64 / count as f64 * span)
        .collect()
}

/// Chooses the axis unit and computes timestamps for each channel.
pub fn resolve(total_duration_secs: f64, sample_counts: &[usize]) -> (TimeUnit, Vec<Vec<f64>>) {
    let unit = select_unit(total_duration_secs);
    let span = unit.convert_seconds(total_duration_secs);
    let times = sample_counts
        .iter()
        .map(|&count| timestamps(count, span))
        .collect();
    (unit, times)
}
