//! Load limits.

use serde::{Deserialize, Serialize};

/// Reference sample rate the byte cap is expressed against.
pub const REFERENCE_SAMPLE_RATE: u32 = 44_100;

/// Default cap: one hour at the reference rate.
pub const DEFAULT_MAX_MINUTES: u32 = 60;

/// Bounds on what a single load may allocate.
///
/// The cap is a duration at a reference rate rather than a raw byte count so
/// it can be configured in terms users reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadLimits {
    /// Reference sample rate in Hz.
    pub reference_sample_rate: u32,
    /// Maximum duration, in minutes at the reference rate.
    pub max_minutes: u32,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            reference_sample_rate: REFERENCE_SAMPLE_RATE,
            max_minutes: DEFAULT_MAX_MINUTES,
        }
    }
}

impl LoadLimits {
    /// Limits with a custom duration at the reference rate.
    pub fn minutes(max_minutes: u32) -> Self {
        Self {
            max_minutes,
            ..Self::default()
        }
    }

    /// Maximum declared `data` chunk length in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.reference_sample_rate as u64 * 60 * self.max_minutes as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cap_is_one_hour_at_44100() {
        assert_eq!(LoadLimits::default().max_bytes(), 44_100 * 60 * 60);
    }

    #[test]
    fn test_minutes_override() {
        let limits = LoadLimits::minutes(10);
        assert_eq!(limits.reference_sample_rate, 44_100);
        assert_eq!(limits.max_bytes(), 44_100 * 60 * 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let limits: LoadLimits = serde_json::from_str(r#"{"max_minutes": 5}"#).unwrap();
        assert_eq!(limits.reference_sample_rate, REFERENCE_SAMPLE_RATE);
        assert_eq!(limits.max_minutes, 5);
    }
}
