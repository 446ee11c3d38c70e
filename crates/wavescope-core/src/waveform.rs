//! The loaded waveform and the pipeline that produces it.

use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::axis;
use crate::error::DecodeResult;
use crate::series::{self, ChannelSeries};
use crate::units::TimeUnit;
use crate::wav::{self, DecodedAudio, WaveFormatDescriptor};

/// Everything needed to draw one file. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWaveform {
    channels: Vec<ChannelSeries>,
    time_unit: TimeUnit,
    total_duration: f64,
    format: WaveFormatDescriptor,
}

impl LoadedWaveform {
    /// Runs series building and axis resolution over decoded audio.
    pub fn from_decoded(decoded: &DecodedAudio) -> Self {
        let normalized = decoded.normalized_samples();
        let amplitudes = series::build(&decoded.format, &normalized);
        let total_duration = decoded.total_duration_secs();

        let counts: Vec<usize> = amplitudes.iter().map(Vec::len).collect();
        let (time_unit, times) = axis::resolve(total_duration, &counts);

        let channels = times
            .into_iter()
            .zip(amplitudes)
            .map(|(t, a)| ChannelSeries::new(t, a))
            .collect();

        Self {
            channels,
            time_unit,
            total_duration,
            format: decoded.format,
        }
    }

    pub fn channels(&self) -> &[ChannelSeries] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelSeries> {
        self.channels.get(index)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Unit of every timestamp in the series.
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Total duration in seconds.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Total duration in the axis unit.
    pub fn span(&self) -> f64 {
        self.time_unit.convert_seconds(self.total_duration)
    }

    pub fn format(&self) -> &WaveFormatDescriptor {
        &self.format
    }
}

/// A waveform together with how long the pipeline took.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub waveform: LoadedWaveform,
    pub elapsed: Duration,
}

/// Decodes a stream and builds its waveform, timing the whole pipeline.
pub fn load<R: Read>(reader: R, max_bytes: u64) -> DecodeResult<LoadReport> {
    let started = Instant::now();
    let decoded = wav::decode(reader, max_bytes)?;
    let waveform = LoadedWaveform::from_decoded(&decoded);
    let elapsed = started.elapsed();

    log::info!(
        "loaded {} channel(s), {:.3} s of audio in {:.3} s (axis: {})",
        waveform.channel_count(),
        waveform.total_duration(),
        elapsed.as_secs_f64(),
        waveform.time_unit()
    );

    Ok(LoadReport { waveform, elapsed })
}

/// Opens a file and runs [`load`] on it.
pub fn load_path<P: AsRef<Path>>(path: P, max_bytes: u64) -> DecodeResult<LoadReport> {
    let file = std::fs::File::open(path.as_ref())?;
    load(std::io::BufReader::new(file), max_bytes)
}
