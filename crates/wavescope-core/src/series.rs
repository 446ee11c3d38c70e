//! Channel series construction.
//!
//! Splits interleaved normalized samples into one amplitude sequence per
//! channel and scales them back to the integer full-scale range of the
//! source bit depth.

use serde::{Deserialize, Serialize};

use crate::wav::WaveFormatDescriptor;

/// Time/amplitude pairs for one channel, in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSeries {
    times: Vec<f64>,
    amplitudes: Vec<f64>,
}

impl ChannelSeries {
    /// Zips timestamps and amplitudes positionally.
    ///
    /// Both sequences must have the same length.
    pub(crate) fn new(times: Vec<f64>, amplitudes: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), amplitudes.len());
        Self { times, amplitudes }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Iterates `(time, amplitude)` points.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.amplitudes.iter().copied())
    }

    /// Largest absolute amplitude, or 0.0 when empty.
    pub fn peak(&self) -> f64 {
        self.amplitudes.iter().fold(0.0, |acc, a| acc.max(a.abs()))
    }
}

/// Demultiplexes interleaved samples into per-channel amplitude sequences.
///
/// Each sample is multiplied by `round(2^(bits-1))`. Channel 0 is always
/// present; channel 1 only when it received at least one sample. A trailing
/// partial frame is dropped.
pub fn build(format: &WaveFormatDescriptor, normalized: &[f32]) -> Vec<Vec<f64>> {
    let scale = format.full_scale();
    let channels = format.channel_count.max(1) as usize;
    let frames = normalized.len() / channels;

    let mut first = Vec::with_capacity(frames);
    let mut second = Vec::with_capacity(if channels > 1 { frames } else { 0 });

    for frame in normalized.chunks_exact(channels) {
        first.push(frame[0] as f64 * scale);
        if let Some(&right) = frame.get(1) {
            second.push(right as f64 * scale);
        }
    }

    if second.is_empty() {
        vec![first]
    } else {
        vec![first, second]
    }
}
