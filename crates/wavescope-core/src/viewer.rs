//! Viewer session state.
//!
//! [`WaveformViewer`] is what a UI adapter talks to. Each user action maps to
//! one method call: opening a file, editing the marker text, picking a unit
//! from the selector, toggling a channel checkbox. The viewer owns the only
//! copy of the current waveform and marker; nothing is global.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::config::LoadLimits;
use crate::error::DecodeResult;
use crate::marker::{parse_marker_text, MarkerState, MarkerUpdate};
use crate::surface::{PlotSnapshot, RenderSurface, SeriesView, Y_LABEL};
use crate::units::TimeUnit;
use crate::waveform::{self, LoadReport, LoadedWaveform};

/// Unit the marker text box starts in.
pub const DEFAULT_ENTRY_UNIT: TimeUnit = TimeUnit::Seconds;

/// Current waveform, marker and channel visibility.
#[derive(Debug, Clone)]
pub struct WaveformViewer {
    limits: LoadLimits,
    waveform: Option<LoadedWaveform>,
    last_load: Option<Duration>,
    marker: Option<MarkerState>,
    entry_unit: TimeUnit,
    visibility: Vec<bool>,
}

impl Default for WaveformViewer {
    fn default() -> Self {
        Self::new(LoadLimits::default())
    }
}

impl WaveformViewer {
    pub fn new(limits: LoadLimits) -> Self {
        Self {
            limits,
            waveform: None,
            last_load: None,
            marker: None,
            entry_unit: DEFAULT_ENTRY_UNIT,
            visibility: Vec::new(),
        }
    }

    /// Starts the unit selector on `unit` instead of the default.
    pub fn with_entry_unit(mut self, unit: TimeUnit) -> Self {
        self.entry_unit = unit;
        self
    }

    pub fn limits(&self) -> &LoadLimits {
        &self.limits
    }

    // =====================================================================
    // Loading
    // =====================================================================

    /// Loads an in-memory WAV file.
    ///
    /// On failure the previous waveform, marker and visibility are untouched.
    pub fn load_file(&mut self, bytes: &[u8]) -> DecodeResult<&LoadedWaveform> {
        self.load_reader(bytes)
    }

    /// Loads a WAV stream.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> DecodeResult<&LoadedWaveform> {
        let result = waveform::load(reader, self.limits.max_bytes());
        self.install(result)
    }

    /// Loads a WAV file from disk.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> DecodeResult<&LoadedWaveform> {
        let result = waveform::load_path(path.as_ref(), self.limits.max_bytes());
        self.install(result)
    }

    fn install(&mut self, result: DecodeResult<LoadReport>) -> DecodeResult<&LoadedWaveform> {
        let report = match result {
            Ok(report) => report,
            Err(err) => {
                log::warn!("load failed, keeping previous waveform: {}", err);
                return Err(err);
            }
        };

        if let (Some(previous), Some(marker)) = (&self.waveform, self.marker) {
            if previous.time_unit() != report.waveform.time_unit() {
                log::debug!(
                    "axis unit changed {} -> {}, marker now at {}",
                    previous.time_unit(),
                    report.waveform.time_unit(),
                    marker.project(report.waveform.time_unit())
                );
            }
        }

        self.visibility = vec![true; report.waveform.channel_count()];
        self.last_load = Some(report.elapsed);
        Ok(&*self.waveform.insert(report.waveform))
    }

    pub fn waveform(&self) -> Option<&LoadedWaveform> {
        self.waveform.as_ref()
    }

    /// Wall time of the last successful load.
    pub fn last_load_time(&self) -> Option<Duration> {
        self.last_load
    }

    // =====================================================================
    // Marker
    // =====================================================================

    /// Applies the marker text box contents.
    ///
    /// Empty text clears the marker. Text that is not a number changes
    /// nothing.
    pub fn set_marker_text(&mut self, text: &str) -> MarkerUpdate {
        if text.is_empty() {
            self.marker = None;
            return MarkerUpdate::Cleared;
        }

        match parse_marker_text(text) {
            Ok(value) => {
                self.marker = Some(MarkerState::new(value, self.entry_unit));
                MarkerUpdate::Set(value)
            }
            Err(err) => {
                log::debug!("{}; keeping previous marker", err);
                MarkerUpdate::Ignored
            }
        }
    }

    /// Switches the unit the marker is entered in.
    ///
    /// A set marker is converted from the old unit to the new one, so it keeps
    /// pointing at the same instant.
    pub fn set_display_unit(&mut self, unit: TimeUnit) {
        if unit == self.entry_unit {
            return;
        }
        if let Some(marker) = self.marker {
            self.marker = Some(marker.converted_to(unit));
        }
        self.entry_unit = unit;
    }

    /// Unit currently selected for marker entry.
    pub fn display_unit(&self) -> TimeUnit {
        self.entry_unit
    }

    pub fn marker(&self) -> Option<MarkerState> {
        self.marker
    }

    /// Marker value formatted for the text box, in the entry unit.
    pub fn marker_text(&self) -> Option<String> {
        self.marker.map(|m| m.raw_value.to_string())
    }

    /// Marker position on the current waveform's axis.
    ///
    /// `None` when no marker is set or nothing is loaded.
    pub fn projected_marker(&self) -> Option<f64> {
        let waveform = self.waveform.as_ref()?;
        self.marker.map(|m| m.project(waveform.time_unit()))
    }

    // =====================================================================
    // Channels
    // =====================================================================

    /// Shows or hides a channel.
    ///
    /// Channels the current waveform does not have are ignored.
    pub fn channel_visible(&mut self, index: usize, visible: bool) {
        match self.visibility.get_mut(index) {
            Some(flag) => *flag = visible,
            None => log::warn!(
                "ignoring visibility change for channel {} ({} loaded)",
                index,
                self.visibility.len()
            ),
        }
    }

    pub fn is_channel_visible(&self, index: usize) -> bool {
        self.visibility.get(index).copied().unwrap_or(false)
    }

    // =====================================================================
    // Rendering
    // =====================================================================

    /// Builds the data for one redraw, or `None` when nothing is loaded.
    pub fn snapshot(&self) -> Option<PlotSnapshot<'_>> {
        let waveform = self.waveform.as_ref()?;
        let series = waveform
            .channels()
            .iter()
            .enumerate()
            .map(|(index, series)| SeriesView {
                index,
                series,
                visible: self.is_channel_visible(index),
            })
            .collect();

        Some(PlotSnapshot {
            time_unit: waveform.time_unit(),
            x_label: waveform.time_unit().axis_label(),
            y_label: Y_LABEL,
            span: waveform.span(),
            full_scale: waveform.format().full_scale(),
            series,
            marker: self.projected_marker(),
        })
    }

    /// Hands the current state to a surface. Returns `false` when nothing is loaded.
    pub fn present<S: RenderSurface>(&self, surface: &mut S) -> Result<bool, S::Error> {
        match self.snapshot() {
            Some(snapshot) => {
                surface.render(&snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
