//! wavescope core
//!
//! Turns a PCM WAV file into per-channel `(time, amplitude)` series for a
//! waveform plot, and keeps a user-placed time marker consistent as the
//! display unit or the loaded file changes.
//!
//! # Pipeline
//!
//! A load runs to completion in one call:
//!
//! 1. [`wav::decode`] parses the RIFF/WAVE header, enforces the size cap and
//!    channel/bit-depth limits, and reads the sample bytes.
//! 2. [`series::build`] splits interleaved samples per channel and scales them
//!    to the integer full-scale range.
//! 3. [`axis::resolve`] picks milliseconds, seconds or minutes from the total
//!    duration and spreads timestamps across it.
//!
//! The result is an immutable [`LoadedWaveform`]. [`WaveformViewer`] holds the
//! current one next to the [`MarkerState`] and hands both to a
//! [`RenderSurface`].
//!
//! # Example
//!
//! ```rust,no_run
//! use wavescope_core::{LoadLimits, TimeUnit, WaveformViewer};
//!
//! let mut viewer = WaveformViewer::new(LoadLimits::default());
//! let bytes = std::fs::read("speech.wav")?;
//! viewer.load_file(&bytes)?;
//!
//! viewer.set_marker_text("30");
//! viewer.set_display_unit(TimeUnit::Minutes);
//! assert_eq!(viewer.marker_text().as_deref(), Some("0.5"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod axis;
pub mod config;
pub mod error;
pub mod marker;
pub mod series;
pub mod surface;
pub mod units;
pub mod viewer;
pub mod wav;
pub mod waveform;

pub use config::LoadLimits;
pub use error::{DecodeError, DecodeResult, MarkerTextError};
pub use marker::{parse_marker_text, MarkerState, MarkerUpdate};
pub use series::ChannelSeries;
pub use surface::{PlotSnapshot, RenderSurface, SeriesView};
pub use units::{convert, TimeUnit, UnknownTimeUnit};
pub use viewer::WaveformViewer;
pub use waveform::{load, load_path, LoadReport, LoadedWaveform};
