//! WAV format descriptor.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};

/// Format tag for integer PCM.
pub const WAVE_FORMAT_PCM: u16 = 0x0001;

/// Format tag for `WAVE_FORMAT_EXTENSIBLE`; the real format lives in the sub-format GUID.
pub const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Largest supported byte depth.
pub const MAX_BYTE_DEPTH: u16 = 4;

/// Largest supported channel count.
pub const MAX_CHANNELS: u16 = 2;

/// Format parameters read from the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveFormatDescriptor {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (8, 16, 24 or 32).
    pub bits_per_sample: u16,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channel_count: u16,
    /// Declared average bytes per second.
    pub byte_rate: u32,
    /// Declared bytes per sample frame.
    pub block_align: u16,
}

impl WaveFormatDescriptor {
    /// Creates a descriptor with byte rate and block align derived from the other fields.
    ///
    /// Derived fields saturate at their type's maximum.
    pub fn new(sample_rate: u32, bits_per_sample: u16, channel_count: u16) -> Self {
        let block_align = channel_count.saturating_mul(bits_per_sample / 8);
        Self {
            sample_rate,
            bits_per_sample,
            channel_count,
            byte_rate: sample_rate.saturating_mul(block_align as u32),
            block_align,
        }
    }

    /// Bytes per sample per channel.
    pub fn byte_depth(&self) -> usize {
        (self.bits_per_sample / 8) as usize
    }

    /// Bytes per sample frame, computed from depth and channel count.
    ///
    /// The declared `block_align` is not trusted for slicing.
    pub fn frame_size(&self) -> usize {
        self.byte_depth() * self.channel_count as usize
    }

    /// Signed full-scale value, `2^(bits-1)`.
    pub fn full_scale(&self) -> f64 {
        2f64.powi(self.bits_per_sample as i32 - 1).round()
    }

    /// Bytes per second used for duration calculation.
    ///
    /// Falls back to the computed rate when the header declares zero.
    pub fn effective_byte_rate(&self) -> u64 {
        if self.byte_rate > 0 {
            self.byte_rate as u64
        } else {
            self.sample_rate as u64 * self.frame_size() as u64
        }
    }

    /// Checks channel count and bit depth against what the pipeline supports.
    pub fn validate(&self) -> DecodeResult<()> {
        if self.channel_count == 0 || self.channel_count > MAX_CHANNELS {
            return Err(DecodeError::UnsupportedChannelCount(self.channel_count));
        }
        let bits = self.bits_per_sample;
        if bits == 0 || bits % 8 != 0 || bits / 8 > MAX_BYTE_DEPTH {
            return Err(DecodeError::UnsupportedBitDepth(bits));
        }
        Ok(())
    }
}
