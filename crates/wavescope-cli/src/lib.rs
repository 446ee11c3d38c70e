//! wavescope CLI library.
//!
//! Command-line adapter over `wavescope-core`: settings resolution, the
//! inspect/render/convert commands, JSON output types and a PNG rendering
//! surface.

pub mod commands;
pub mod json_output;
pub mod png_surface;
pub mod settings;

use wavescope_core::{TimeUnit, UnknownTimeUnit};

/// Parses a unit argument (`ms`, `s`, `min` or the long names).
pub fn parse_unit(s: &str) -> Result<TimeUnit, UnknownTimeUnit> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("ms").unwrap(), TimeUnit::Milliseconds);
        assert_eq!(parse_unit("min").unwrap(), TimeUnit::Minutes);
        assert!(parse_unit("hours").is_err());
    }
}
