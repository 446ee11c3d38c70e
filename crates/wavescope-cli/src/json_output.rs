//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag. Error and warning codes are stable so scripts
//! can branch on them.

use serde::{Deserialize, Serialize};
use wavescope_core::{DecodeError, MarkerTextError};

/// Error codes for CLI operations.
///
/// Decode failures pass through the core's `DECODE_XXX` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unsupported file extension in batch mode
    pub const UNSUPPORTED_FORMAT: &str = "CLI_002";
    /// PNG encoding or write failure
    pub const RENDER: &str = "CLI_003";
    /// Input path is not a directory
    pub const NOT_A_DIRECTORY: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "DECODE_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&DecodeError> for JsonError {
    fn from(err: &DecodeError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "MARKER_001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&MarkerTextError> for JsonWarning {
    fn from(err: &MarkerTextError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
