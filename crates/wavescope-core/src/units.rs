//! Time units and conversion between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit of the time axis and of marker values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
}

impl TimeUnit {
    /// All units, smallest first.
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Milliseconds, TimeUnit::Seconds, TimeUnit::Minutes];

    /// Lowercase plural name.
    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
        }
    }

    /// Short symbol used in compact output.
    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
        }
    }

    /// Horizontal axis label, e.g. `X (seconds)`.
    pub fn axis_label(self) -> String {
        format!("X ({})", self.name())
    }

    /// Expresses a duration given in seconds in this unit.
    pub fn convert_seconds(self, seconds: f64) -> f64 {
        convert(seconds, TimeUnit::Seconds, self)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text that does not name a time unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time unit '{0}' (expected ms, s or min)")]
pub struct UnknownTimeUnit(pub String);

impl FromStr for TimeUnit {
    type Err = UnknownTimeUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ms" | "millisecond" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "sec" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "min" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            _ => Err(UnknownTimeUnit(s.to_string())),
        }
    }
}

/// Converts a time value between units using direct ratios.
///
/// Every directed pair is a single multiplication or division, so values like
/// `convert(1500.0, Milliseconds, Minutes)` come out exact.
///
/// # Example
///
/// ```rust
/// use wavescope_core::{convert, TimeUnit};
///
/// assert_eq!(convert(1.0, TimeUnit::Minutes, TimeUnit::Milliseconds), 60000.0);
/// assert_eq!(convert(1500.0, TimeUnit::Milliseconds, TimeUnit::Minutes), 0.025);
/// ```
pub fn convert(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    use TimeUnit::*;
    match (from, to) {
        (Milliseconds, Seconds) => value / 1_000.0,
        (Milliseconds, Minutes) => value / 60_000.0,
        (Seconds, Milliseconds) => value * 1_000.0,
        (Seconds, Minutes) => value / 60.0,
        (Minutes, Milliseconds) => value * 60_000.0,
        (Minutes, Seconds) => value * 60.0,
        (Milliseconds, Milliseconds) | (Seconds, Seconds) | (Minutes, Minutes) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TimeUnit::*;

    #[test]
    fn test_convert_table() {
        assert_eq!(convert(1500.0, Milliseconds, Seconds), 1.5);
        assert_eq!(convert(1500.0, Milliseconds, Minutes), 0.025);
        assert_eq!(convert(2.5, Seconds, Milliseconds), 2500.0);
        assert_eq!(convert(30.0, Seconds, Minutes), 0.5);
        assert_eq!(convert(1.0, Minutes, Milliseconds), 60_000.0);
        assert_eq!(convert(0.5, Minutes, Seconds), 30.0);
    }

    #[test]
    fn test_convert_identity() {
        for unit in TimeUnit::ALL {
            assert_eq!(convert(12.345, unit, unit), 12.345);
        }
    }

    #[test]
    fn test_convert_roundtrip_all_pairs() {
        let values = [0.0, 0.001, 1.0, 17.25, 59.999, 3600.0, -42.0, 1e9];
        for from in TimeUnit::ALL {
            for to in TimeUnit::ALL {
                for &x in &values {
                    let back = convert(convert(x, from, to), to, from);
                    let tolerance = 1e-12 * x.abs().max(1.0);
                    assert!(
                        (back - x).abs() <= tolerance,
                        "{} {} -> {} -> back = {}",
                        x,
                        from,
                        to,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_ms_to_minutes_is_not_double_hop() {
        // 90 000 ms is exactly 1.5 minutes.
        assert_eq!(convert(90_000.0, Milliseconds, Minutes), 1.5);
        assert_eq!(convert(1.5, Minutes, Milliseconds), 90_000.0);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("ms".parse::<TimeUnit>().unwrap(), Milliseconds);
        assert_eq!("Seconds".parse::<TimeUnit>().unwrap(), Seconds);
        assert_eq!(" MIN ".parse::<TimeUnit>().unwrap(), Minutes);
        assert!("hours".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Milliseconds.axis_label(), "X (milliseconds)");
        assert_eq!(Minutes.symbol(), "min");
        assert_eq!(Seconds.to_string(), "seconds");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Minutes).unwrap(), "\"minutes\"");
        let unit: TimeUnit = serde_json::from_str("\"milliseconds\"").unwrap();
        assert_eq!(unit, Milliseconds);
    }
}
