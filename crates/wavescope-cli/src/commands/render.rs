//! Render command implementation
//!
//! Draws a WAV file through the viewer onto the PNG surface.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::{prepare_viewer, MarkerRequest};
use crate::json_output::{error_codes, JsonError, JsonWarning};
use crate::png_surface::PngSurface;
use crate::settings::Settings;

/// Image options for the render command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions<'a> {
    pub width: u32,
    pub height: u32,
    /// Channels to hide before drawing
    pub hidden_channels: &'a [usize],
}

/// Result of a successful render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResult {
    pub input: String,
    pub input_hash: String,
    pub output: String,
    /// BLAKE3 hash of the written PNG
    pub output_hash: String,
    pub width: u32,
    pub height: u32,
    pub axis_label: String,
    pub visible_channels: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<f64>,
}

/// JSON output for the `render` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderResult>,
}

/// Run the render command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `output` - Path of the PNG to write
/// * `marker` - Marker text and entry unit
/// * `options` - Image size and hidden channels
/// * `json_output` - Whether to output machine-readable JSON
/// * `settings` - Resolved settings
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    output: &str,
    marker: MarkerRequest<'_>,
    options: RenderOptions<'_>,
    json_output: bool,
    settings: &Settings,
) -> Result<ExitCode> {
    match render_file(Path::new(input), Path::new(output), marker, options, settings) {
        Ok((result, warnings)) => {
            if json_output {
                let out = RenderOutput {
                    success: true,
                    errors: Vec::new(),
                    warnings,
                    result: Some(result),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for warning in &warnings {
                    println!("{} {}", "WARN".yellow(), warning.message);
                }
                println!(
                    "{} {} ({}x{}, {})",
                    "Rendered:".green().bold(),
                    result.output,
                    result.width,
                    result.height,
                    result.axis_label
                );
                println!("{} {}", "Hash:".dimmed(), &result.output_hash[..16]);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if json_output {
                let out = RenderOutput {
                    success: false,
                    errors: vec![error],
                    warnings: Vec::new(),
                    result: None,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
                Ok(ExitCode::from(1))
            } else {
                anyhow::bail!("{} ({})", error.message, error.code)
            }
        }
    }
}

fn render_file(
    input: &Path,
    output: &Path,
    marker: MarkerRequest<'_>,
    options: RenderOptions<'_>,
    settings: &Settings,
) -> std::result::Result<(RenderResult, Vec<JsonWarning>), JsonError> {
    let input_display = input.display().to_string();
    let output_display = output.display().to_string();
    let render_error = |message: String| {
        JsonError::new(error_codes::RENDER, message).with_file(&output_display)
    };

    let mut prepared = prepare_viewer(input, settings, marker)?;
    for &channel in options.hidden_channels {
        prepared.viewer.channel_visible(channel, false);
    }

    let mut surface = PngSurface::new(options.width, options.height);
    let (width, height) = (surface.width(), surface.height());
    prepared
        .viewer
        .present(&mut surface)
        .map_err(|e| render_error(format!("PNG encoding failed: {}", e)))?;
    let png_data = surface
        .into_png_data()
        .ok_or_else(|| render_error("Nothing was drawn".to_string()))?;

    write_png(output, &png_data).map_err(|e| render_error(format!("{:#}", e)))?;

    let visible_channels = (0..prepared
        .viewer
        .waveform()
        .map(|w| w.channel_count())
        .unwrap_or(0))
        .filter(|&i| prepared.viewer.is_channel_visible(i))
        .collect();
    let axis_label = prepared
        .viewer
        .waveform()
        .map(|w| w.time_unit().axis_label())
        .unwrap_or_default();

    let result = RenderResult {
        input: input_display,
        input_hash: prepared.input_hash,
        output: output_display,
        output_hash: blake3::hash(&png_data).to_hex().to_string(),
        width,
        height,
        axis_label,
        visible_channels,
        marker: prepared.viewer.projected_marker(),
    };
    Ok((result, prepared.warnings))
}

fn write_png(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, data).with_context(|| format!("Failed to write to: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn write_test_wav(path: &Path, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 1000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..200 * channels as i32 {
                writer.write_sample((i * 50) as i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        fs::write(path, cursor.into_inner()).unwrap();
    }

    fn options(hidden: &[usize]) -> RenderOptions<'_> {
        RenderOptions {
            width: 64,
            height: 32,
            hidden_channels: hidden,
        }
    }

    #[test]
    fn test_render_writes_png() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.wav");
        let output = tmp.path().join("out").join("wave.png");
        write_test_wav(&input, 2);

        let marker = MarkerRequest {
            text: Some("0.1"),
            unit: None,
        };
        let (result, warnings) =
            render_file(&input, &output, marker, options(&[]), &Settings::default()).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(result.visible_channels, vec![0, 1]);
        assert_eq!(result.axis_label, "X (milliseconds)");
        assert!((result.marker.unwrap() - 100.0).abs() < 1e-9);

        let data = fs::read(&output).unwrap();
        assert_eq!(&data[1..4], b"PNG");
        assert_eq!(result.output_hash, blake3::hash(&data).to_hex().to_string());
    }

    #[test]
    fn test_render_hidden_channel() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.wav");
        let output = tmp.path().join("wave.png");
        write_test_wav(&input, 2);

        let (result, _) = render_file(
            &input,
            &output,
            MarkerRequest::default(),
            options(&[1, 7]),
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(result.visible_channels, vec![0]);
        assert!(result.marker.is_none());
    }

    #[test]
    fn test_render_reports_clamped_dimensions() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.wav");
        let output = tmp.path().join("wave.png");
        write_test_wav(&input, 1);

        let (result, _) = render_file(
            &input,
            &output,
            MarkerRequest::default(),
            RenderOptions {
                width: 0,
                height: 0,
                hidden_channels: &[],
            },
            &Settings::default(),
        )
        .unwrap();
        assert_eq!((result.width, result.height), (1, 2));

        let data = fs::read(&output).unwrap();
        let reader = png::Decoder::new(data.as_slice()).read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (1, 2));
    }

    #[test]
    fn test_render_oversized_header_is_file_too_large() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("huge.wav");
        let output = tmp.path().join("wave.png");

        write_test_wav(&input, 1);
        let mut wav = fs::read(&input).unwrap();
        wav.truncate(44);
        // Declared data length sits in the last four header bytes.
        wav[40..44].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
        fs::write(&input, &wav).unwrap();

        let err = render_file(
            &input,
            &output,
            MarkerRequest::default(),
            options(&[]),
            &Settings::default(),
        )
        .unwrap_err();
        assert_eq!(err.code, "DECODE_001");
        assert!(!output.exists());
    }

    #[test]
    fn test_render_decode_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.wav");
        fs::write(&input, b"RIFF\0\0\0\0JUNK").unwrap();
        let output = tmp.path().join("wave.png");

        let err = render_file(
            &input,
            &output,
            MarkerRequest::default(),
            options(&[]),
            &Settings::default(),
        )
        .unwrap_err();
        assert!(err.code.starts_with("DECODE_"));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_json_failure_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("wave.png");
        let code = run(
            tmp.path().join("missing.wav").to_str().unwrap(),
            output.to_str().unwrap(),
            MarkerRequest::default(),
            options(&[]),
            true,
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_run_human_success() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.wav");
        let output = tmp.path().join("wave.png");
        write_test_wav(&input, 1);

        let code = run(
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            MarkerRequest::default(),
            options(&[]),
            false,
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(output.is_file());
    }
}
