//! Marker state.
//!
//! A marker is a value in the unit it was entered in. It is only re-expressed
//! in the axis unit when drawn, so switching files never loses it.

use serde::{Deserialize, Serialize};

use crate::error::MarkerTextError;
use crate::units::{convert, TimeUnit};

/// A placed marker: the entered value and the unit it was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerState {
    pub raw_value: f64,
    pub unit: TimeUnit,
}

impl MarkerState {
    pub fn new(raw_value: f64, unit: TimeUnit) -> Self {
        Self { raw_value, unit }
    }

    /// The same instant expressed in `unit`.
    pub fn converted_to(self, unit: TimeUnit) -> Self {
        Self {
            raw_value: convert(self.raw_value, self.unit, unit),
            unit,
        }
    }

    /// Position of the marker on an axis measured in `axis_unit`.
    pub fn project(self, axis_unit: TimeUnit) -> f64 {
        convert(self.raw_value, self.unit, axis_unit)
    }
}

/// Outcome of a marker text edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerUpdate {
    /// Text was empty; the marker is gone.
    Cleared,
    /// Marker placed at this value, in the entry unit.
    Set(f64),
    /// Text was not a number; the previous marker is kept.
    Ignored,
}

/// Reads marker text as a finite number.
///
/// Surrounding whitespace is ignored and a single `,` is accepted as the
/// decimal separator.
pub fn parse_marker_text(text: &str) -> Result<f64, MarkerTextError> {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MarkerTextError::InvalidMarkerText(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marker_text() {
        assert_eq!(parse_marker_text("30").unwrap(), 30.0);
        assert_eq!(parse_marker_text(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_marker_text("2,5").unwrap(), 2.5);
        assert_eq!(parse_marker_text("-1e3").unwrap(), -1000.0);
    }

    #[test]
    fn test_parse_marker_text_rejects_non_numbers() {
        for text in ["", "   ", "abc", "1.2.3", "1,2,3", "NaN", "inf", "12s"] {
            assert_eq!(
                parse_marker_text(text),
                Err(MarkerTextError::InvalidMarkerText(text.to_string())),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn test_marker_converted_to() {
        let marker = MarkerState::new(30.0, TimeUnit::Seconds);
        let minutes = marker.converted_to(TimeUnit::Minutes);
        assert_eq!(minutes, MarkerState::new(0.5, TimeUnit::Minutes));
    }

    #[test]
    fn test_marker_projection() {
        let marker = MarkerState::new(0.5, TimeUnit::Minutes);
        assert_eq!(marker.project(TimeUnit::Seconds), 30.0);
        assert_eq!(marker.project(TimeUnit::Milliseconds), 30_000.0);
        assert_eq!(marker.project(TimeUnit::Minutes), 0.5);
    }
}
