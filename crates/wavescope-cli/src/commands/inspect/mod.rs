//! Inspect command implementation
//!
//! Loads WAV files the way the viewer does and reports what it would draw:
//! format, duration, the resolved axis unit, per-channel series and the
//! projected marker.

mod types;


pub use types::{
    BatchInspectItem, BatchInspectOutput, BatchInspectSummary, ChannelSummary, InspectOutput,
    InspectReport, MarkerSummary,
};

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

use super::{prepare_viewer, MarkerRequest};
use crate::json_output::{error_codes, JsonError, JsonWarning};
use crate::settings::Settings;

/// Run the inspect command.
///
/// # Arguments
/// * `input` - Path to a single WAV file
/// * `input_dir` - Directory to scan recursively for .wav files
/// * `marker` - Marker text and entry unit
/// * `json_output` - Whether to output machine-readable JSON
/// * `settings` - Resolved settings
///
/// # Returns
/// Exit code: 0 if every file loaded, 1 otherwise
pub fn run(
    input: Option<&str>,
    input_dir: Option<&str>,
    marker: MarkerRequest<'_>,
    json_output: bool,
    settings: &Settings,
) -> Result<ExitCode> {
    match (input, input_dir) {
        (Some(input), None) => run_single(input, marker, json_output, settings),
        (None, Some(dir)) => run_batch(dir, marker, json_output, settings),
        _ => anyhow::bail!("Exactly one of --input or --input-dir is required"),
    }
}

fn run_single(
    input: &str,
    marker: MarkerRequest<'_>,
    json_output: bool,
    settings: &Settings,
) -> Result<ExitCode> {
    match inspect_file(Path::new(input), marker, settings) {
        Ok((report, warnings)) => {
            if json_output {
                let output = InspectOutput::success(report, warnings);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_report(&report, &warnings);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if json_output {
                let output = InspectOutput::failure(vec![error]);
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(ExitCode::from(1))
            } else {
                anyhow::bail!("{} ({})", error.message, error.code)
            }
        }
    }
}

fn run_batch(
    input_dir: &str,
    marker: MarkerRequest<'_>,
    json_output: bool,
    settings: &Settings,
) -> Result<ExitCode> {
    let dir = Path::new(input_dir);
    if !dir.is_dir() {
        if json_output {
            let error = JsonError::new(
                error_codes::NOT_A_DIRECTORY,
                format!("Input path is not a directory: {}", input_dir),
            );
            let output = InspectOutput::failure(vec![error]);
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        } else {
            anyhow::bail!("Input path is not a directory: {}", input_dir);
        }
    }

    let items: Vec<BatchInspectItem> = find_wav_files(dir)
        .iter()
        .map(|path| inspect_batch_item(path, marker, settings))
        .collect();

    let output = BatchInspectOutput::from_items(items);
    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_batch(&output);
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// One batch record. Marker warnings are kept next to the report.
fn inspect_batch_item(
    path: &Path,
    marker: MarkerRequest<'_>,
    settings: &Settings,
) -> BatchInspectItem {
    let input = path.display().to_string();
    match inspect_file(path, marker, settings) {
        Ok((report, warnings)) => BatchInspectItem {
            input,
            success: true,
            result: Some(report),
            error: None,
            warnings,
        },
        Err(error) => BatchInspectItem {
            input,
            success: false,
            result: None,
            error: Some(error),
            warnings: Vec::new(),
        },
    }
}

/// Loads one file into a viewer and summarizes it.
pub(crate) fn inspect_file(
    path: &Path,
    marker: MarkerRequest<'_>,
    settings: &Settings,
) -> std::result::Result<(InspectReport, Vec<JsonWarning>), JsonError> {
    let display = path.display().to_string();
    if !has_wav_extension(path) {
        return Err(JsonError::new(
            error_codes::UNSUPPORTED_FORMAT,
            format!("Not a .wav file: {}", display),
        )
        .with_file(&display));
    }

    let prepared = prepare_viewer(path, settings, marker)?;
    // prepare_viewer only returns a viewer with a waveform loaded.
    let report = InspectReport::from_viewer(&display, &prepared.input_hash, &prepared.viewer)
        .ok_or_else(|| {
            JsonError::new(error_codes::FILE_READ, "No waveform loaded").with_file(&display)
        })?;
    Ok((report, prepared.warnings))
}

fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// Recursively collects .wav files under `dir`, sorted for deterministic output.
fn find_wav_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_wav_extension(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn print_report(report: &InspectReport, warnings: &[JsonWarning]) {
    println!("{} {}", "Inspecting:".cyan().bold(), report.input);
    println!(
        "{} {} Hz, {} bit, {} channel(s), {} frames",
        "Format:".dimmed(),
        report.sample_rate,
        report.bits_per_sample,
        report.channel_count,
        report.frames
    );
    println!("{} {:.3} s", "Duration:".dimmed(), report.duration_secs);
    println!(
        "{} {} (0 to {} {})",
        "Axis:".dimmed(),
        report.axis_label,
        report.span,
        report.time_unit.symbol()
    );

    for channel in &report.channels {
        println!(
            "  {} {}: {} points, peak {}",
            "Channel".green(),
            channel.index,
            channel.points,
            channel.peak
        );
    }

    match &report.marker {
        Some(marker) => println!(
            "{} {} {} (at {} {} on the axis)",
            "Marker:".dimmed(),
            marker.value,
            marker.unit.symbol(),
            marker.projected,
            report.time_unit.symbol()
        ),
        None => println!("{} none", "Marker:".dimmed()),
    }

    for warning in warnings {
        println!("{} {}", "WARN".yellow(), warning.message);
    }

    println!("{} {}", "Hash:".dimmed(), report.input_hash);
    println!(
        "{}",
        format!("Loaded in {:.4} seconds", report.load_time_secs).dimmed()
    );
}

fn print_batch(output: &BatchInspectOutput) {
    println!("{}", "Inspect Report".cyan().bold());
    println!("{}", "==============".dimmed());

    for item in &output.items {
        match (&item.result, &item.error) {
            (Some(report), _) => println!(
                "{} {} {}",
                "OK".green(),
                item.input,
                format!(
                    "({} ch, {:.3} s, {})",
                    report.channel_count, report.duration_secs, report.time_unit
                )
                .dimmed()
            ),
            (None, Some(error)) => {
                println!("{} {} - {}", "ERROR".red(), item.input, error.message)
            }
            (None, None) => println!("{} {}", "ERROR".red(), item.input),
        }
        for warning in &item.warnings {
            println!("  {} {}", "WARN".yellow(), warning.message);
        }
    }

    println!("\n{}", "Summary".cyan().bold());
    println!("{}", "-------".dimmed());
    println!("Total:     {}", output.summary.total);
    println!("Succeeded: {}", output.summary.succeeded.to_string().green());
    if output.summary.failed > 0 {
        println!("Failed:    {}", output.summary.failed.to_string().red());
    }
}
