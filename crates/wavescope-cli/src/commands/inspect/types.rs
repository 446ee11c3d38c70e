//! Type definitions for the inspect command.

use serde::{Deserialize, Serialize};
use wavescope_core::{ChannelSeries, TimeUnit, WaveformViewer};

use crate::json_output::{JsonError, JsonWarning};

/// What a viewer shows for one loaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectReport {
    /// Input file path
    pub input: String,
    /// BLAKE3 hash of the input file
    pub input_hash: String,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channel_count: u16,
    /// Sample frames in the data chunk
    pub frames: usize,
    pub duration_secs: f64,
    /// Unit of the time axis
    pub time_unit: TimeUnit,
    pub axis_label: String,
    /// Axis extent in `time_unit`
    pub span: f64,
    pub channels: Vec<ChannelSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerSummary>,
    /// Wall time of decode + series + axis
    pub load_time_secs: f64,
}

/// Per-channel series summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub index: usize,
    pub points: usize,
    /// Largest absolute amplitude, in integer full-scale units
    pub peak: f64,
    /// Time of the last point, in axis units
    pub last_time: f64,
}

impl ChannelSummary {
    fn from_series(index: usize, series: &ChannelSeries) -> Self {
        Self {
            index,
            points: series.len(),
            peak: series.peak(),
            last_time: series.times().last().copied().unwrap_or(0.0),
        }
    }
}

/// Marker as entered and as drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSummary {
    /// Value in the entry unit
    pub value: f64,
    pub unit: TimeUnit,
    /// Position on the time axis, in axis units
    pub projected: f64,
}

impl InspectReport {
    /// Summarizes a viewer that has a waveform loaded.
    pub fn from_viewer(input: &str, input_hash: &str, viewer: &WaveformViewer) -> Option<Self> {
        let waveform = viewer.waveform()?;
        let format = waveform.format();

        let marker = viewer
            .marker()
            .zip(viewer.projected_marker())
            .map(|(m, projected)| MarkerSummary {
                value: m.raw_value,
                unit: m.unit,
                projected,
            });

        Some(Self {
            input: input.to_string(),
            input_hash: input_hash.to_string(),
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample,
            channel_count: format.channel_count,
            frames: waveform.channel(0).map(ChannelSeries::len).unwrap_or(0),
            duration_secs: waveform.total_duration(),
            time_unit: waveform.time_unit(),
            axis_label: waveform.time_unit().axis_label(),
            span: waveform.span(),
            channels: waveform
                .channels()
                .iter()
                .enumerate()
                .map(|(i, s)| ChannelSummary::from_series(i, s))
                .collect(),
            marker,
            load_time_secs: viewer
                .last_load_time()
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0),
        })
    }
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectReport>,
}

impl InspectOutput {
    pub fn success(result: InspectReport, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            result: None,
        }
    }
}

/// Result for a single file in batch mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInspectItem {
    pub input: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<JsonWarning>,
}

/// Counts for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchInspectSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// JSON output for `inspect --input-dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInspectOutput {
    pub success: bool,
    pub items: Vec<BatchInspectItem>,
    pub summary: BatchInspectSummary,
}

impl BatchInspectOutput {
    pub fn from_items(items: Vec<BatchInspectItem>) -> Self {
        let succeeded = items.iter().filter(|i| i.success).count();
        let summary = BatchInspectSummary {
            total: items.len(),
            succeeded,
            failed: items.len() - succeeded,
        };
        Self {
            success: summary.failed == 0,
            items,
            summary,
        }
    }
}
