//! CLI command implementations.
//!
//! Each command drives a [`WaveformViewer`] the way a UI would: load the file,
//! pick the marker unit, type the marker text, toggle channels.

pub mod convert;
pub mod inspect;
pub mod render;

use std::fs::File;
use std::io;
use std::path::Path;

use wavescope_core::{DecodeError, MarkerTextError, MarkerUpdate, TimeUnit, WaveformViewer};

use crate::json_output::{error_codes, JsonError, JsonWarning};
use crate::settings::Settings;

/// Marker text and entry unit given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerRequest<'a> {
    pub text: Option<&'a str>,
    pub unit: Option<TimeUnit>,
}

/// A viewer with one file loaded and the marker applied.
#[derive(Debug)]
pub struct PreparedViewer {
    pub viewer: WaveformViewer,
    /// BLAKE3 hash of the input file.
    pub input_hash: String,
    pub warnings: Vec<JsonWarning>,
}

/// Loads `path` into a fresh viewer and applies the marker request.
///
/// The size cap is enforced by the viewer on the declared data length, so an
/// oversized file is rejected without being buffered. The file is hashed only
/// after it loaded.
pub fn prepare_viewer(
    path: &Path,
    settings: &Settings,
    marker: MarkerRequest<'_>,
) -> Result<PreparedViewer, JsonError> {
    let display = path.display().to_string();
    let read_error = |e: &io::Error| {
        JsonError::new(
            error_codes::FILE_READ,
            format!("Failed to read file: {}", e),
        )
        .with_file(&display)
    };

    let mut viewer = WaveformViewer::new(settings.limits).with_entry_unit(settings.default_unit);
    viewer.load_path(path).map_err(|e| match &e {
        DecodeError::Io(io_err) => read_error(io_err),
        _ => JsonError::from(&e).with_file(&display),
    })?;
    let input_hash = hash_file(path).map_err(|e| read_error(&e))?;

    if let Some(unit) = marker.unit {
        viewer.set_display_unit(unit);
    }

    let mut warnings = Vec::new();
    if let Some(text) = marker.text {
        if viewer.set_marker_text(text) == MarkerUpdate::Ignored {
            let err = MarkerTextError::InvalidMarkerText(text.to_string());
            warnings.push(JsonWarning::from(&err));
        }
    }

    Ok(PreparedViewer {
        viewer,
        input_hash,
        warnings,
    })
}

/// BLAKE3 hash of a file, streamed from disk.
pub(crate) fn hash_file(path: &Path) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut File::open(path)?, &mut hasher)?;
    Ok(hasher.finalize().to_hex().to_string())
}
