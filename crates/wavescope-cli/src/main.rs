//! wavescope CLI - inspect and plot PCM WAV files from the command line
//!
//! Each command loads files through the same viewer session a UI would use.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use wavescope_cli::commands::{self, MarkerRequest};
use wavescope_cli::png_surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wavescope_cli::parse_unit;
use wavescope_cli::settings::Settings;
use wavescope_core::TimeUnit;

/// wavescope - PCM WAV waveform inspector
#[derive(Parser)]
#[command(name = "wavescope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a settings file (default: <config dir>/wavescope/settings.json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Override the maximum loadable length, in minutes at 44.1 kHz
    #[arg(long, global = true)]
    max_minutes: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a WAV file and report format, axis, channel series and marker
    Inspect {
        /// Path to the WAV file to inspect
        #[arg(short, long, conflicts_with = "input_dir")]
        input: Option<String>,

        /// Directory to recursively scan for .wav files (batch mode)
        #[arg(long, required_unless_present = "input")]
        input_dir: Option<String>,

        /// Marker time as typed into the marker box
        #[arg(short, long, allow_hyphen_values = true)]
        marker: Option<String>,

        /// Unit the marker is entered in (ms, s, min)
        #[arg(short, long, value_parser = parse_unit)]
        unit: Option<TimeUnit>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Draw a WAV file's waveform to a PNG image
    Render {
        /// Path to the WAV file to draw
        #[arg(short, long)]
        input: String,

        /// Path of the PNG file to write
        #[arg(short, long)]
        output: String,

        /// Marker time as typed into the marker box
        #[arg(short, long, allow_hyphen_values = true)]
        marker: Option<String>,

        /// Unit the marker is entered in (ms, s, min)
        #[arg(short, long, value_parser = parse_unit)]
        unit: Option<TimeUnit>,

        /// Channel to hide (repeatable)
        #[arg(long = "hide-channel")]
        hide_channel: Vec<usize>,

        /// Image width in pixels
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Convert a time value between ms, s and min
    Convert {
        /// Value to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Unit of the value
        #[arg(long, value_parser = parse_unit)]
        from: TimeUnit,

        /// Unit to convert to
        #[arg(long, value_parser = parse_unit)]
        to: TimeUnit,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            input,
            input_dir,
            marker,
            unit,
            json,
        } => Settings::load(cli.config.as_deref(), cli.max_minutes).and_then(|settings| {
            commands::inspect::run(
                input.as_deref(),
                input_dir.as_deref(),
                MarkerRequest {
                    text: marker.as_deref(),
                    unit,
                },
                json,
                &settings,
            )
        }),
        Commands::Render {
            input,
            output,
            marker,
            unit,
            hide_channel,
            width,
            height,
            json,
        } => Settings::load(cli.config.as_deref(), cli.max_minutes).and_then(|settings| {
            commands::render::run(
                &input,
                &output,
                MarkerRequest {
                    text: marker.as_deref(),
                    unit,
                },
                commands::render::RenderOptions {
                    width,
                    height,
                    hidden_channels: &hide_channel,
                },
                json,
                &settings,
            )
        }),
        Commands::Convert {
            value,
            from,
            to,
            json,
        } => commands::convert::run(value, from, to, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
