//! Error types for the wavescope core.

use thiserror::Error;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that abort a file load.
///
/// Every variant is recoverable: the load is abandoned and whatever waveform
/// was displayed before stays in place.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Declared data length exceeds the configured byte cap.
    #[error("audio data too large: {declared} bytes declared, limit is {max} bytes")]
    FileTooLarge {
        /// Length of the `data` chunk as declared in the header.
        declared: u64,
        /// Configured maximum.
        max: u64,
    },

    /// Only mono and stereo files can be displayed.
    #[error("unsupported channel count: {0} (only 1 or 2 channels supported)")]
    UnsupportedChannelCount(u16),

    /// Bit depth is zero, not byte aligned, or wider than 32 bits.
    #[error("unsupported bits per sample: {0} (only 8, 16, 24, 32 supported)")]
    UnsupportedBitDepth(u16),

    /// Format tag is not integer PCM.
    #[error("unsupported audio format code: {0:#06x} (only PCM supported)")]
    UnsupportedFormat(u16),

    /// Container structure is broken or truncated.
    #[error("malformed WAV container: {0}")]
    MalformedContainer(String),

    /// I/O error while reading the stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Creates a malformed container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedContainer(message.into())
    }

    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::FileTooLarge { .. } => "DECODE_001",
            DecodeError::UnsupportedChannelCount(_) => "DECODE_002",
            DecodeError::UnsupportedBitDepth(_) => "DECODE_003",
            DecodeError::UnsupportedFormat(_) => "DECODE_004",
            DecodeError::MalformedContainer(_) => "DECODE_005",
            DecodeError::Io(_) => "DECODE_006",
        }
    }
}

/// Marker text that could not be read as a time value.
///
/// Never fatal. The viewer keeps the previous marker when it sees this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerTextError {
    /// Text is not a finite number.
    #[error("invalid marker text: {0:?}")]
    InvalidMarkerText(String),
}

impl MarkerTextError {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            MarkerTextError::InvalidMarkerText(_) => "MARKER_001",
        }
    }
}
