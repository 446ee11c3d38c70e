//! Convert command implementation
//!
//! Converts a time value between milliseconds, seconds and minutes.

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::process::ExitCode;
use wavescope_core::{convert, TimeUnit};

/// JSON output for the `convert` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOutput {
    pub value: f64,
    pub from: TimeUnit,
    pub to: TimeUnit,
    pub result: f64,
}

impl ConvertOutput {
    pub fn new(value: f64, from: TimeUnit, to: TimeUnit) -> Self {
        Self {
            value,
            from,
            to,
            result: convert(value, from, to),
        }
    }
}

/// Run the convert command
///
/// # Returns
/// Exit code: 0 on success, 1 if the value is not finite
pub fn run(value: f64, from: TimeUnit, to: TimeUnit, json_output: bool) -> Result<ExitCode> {
    if !value.is_finite() {
        anyhow::bail!("Value must be a finite number, got: {}", value);
    }

    let output = ConvertOutput::new(value, from, to);
    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} = {}",
            format!("{} {}", output.value, from.symbol()).dimmed(),
            format!("{} {}", output.result, to.symbol()).green().bold()
        );
    }
    Ok(ExitCode::SUCCESS)
}
