//! Bounded WAV decoding.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::format::WaveFormatDescriptor;
use super::header::read_header;
use super::pcm::normalize_samples;
use crate::error::{DecodeError, DecodeResult};

/// Upper bound on the up-front reservation for the `data` chunk. Larger
/// chunks grow the buffer as bytes actually arrive.
const INITIAL_DATA_CAPACITY: u64 = 1 << 20;

/// Raw sample bytes of the `data` chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPcmBuffer {
    bytes: Vec<u8>,
    declared_len: u64,
}

impl RawPcmBuffer {
    /// Interleaved sample bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length declared by the `data` chunk header.
    pub fn declared_len(&self) -> u64 {
        self.declared_len
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A decoded file: format plus the sample bytes it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    pub format: WaveFormatDescriptor,
    pub pcm: RawPcmBuffer,
}

impl DecodedAudio {
    /// Number of sample frames.
    pub fn frame_count(&self) -> usize {
        self.pcm.len() / self.format.frame_size()
    }

    /// Playback duration in seconds, from the declared byte rate.
    pub fn total_duration_secs(&self) -> f64 {
        self.pcm.declared_len() as f64 / self.format.effective_byte_rate() as f64
    }

    /// Interleaved samples normalized to `[-1.0, 1.0]`.
    pub fn normalized_samples(&self) -> Vec<f32> {
        normalize_samples(self.pcm.as_bytes(), &self.format)
    }
}

/// Decodes a WAV stream, refusing `data` chunks longer than `max_bytes`.
///
/// The cap is checked against the declared length before any sample bytes
/// are read, so an oversized file never gets buffered.
pub fn decode<R: Read>(mut reader: R, max_bytes: u64) -> DecodeResult<DecodedAudio> {
    let header = read_header(&mut reader)?;
    let format = header.format;

    if header.data_len > max_bytes {
        log::warn!(
            "rejecting data chunk of {} bytes (limit {})",
            header.data_len,
            max_bytes
        );
        return Err(DecodeError::FileTooLarge {
            declared: header.data_len,
            max: max_bytes,
        });
    }

    let frame_size = format.frame_size() as u64;
    if header.data_len % frame_size != 0 {
        return Err(DecodeError::malformed(format!(
            "data length {} is not a multiple of the {}-byte frame size",
            header.data_len, frame_size
        )));
    }

    let mut bytes = Vec::with_capacity(header.data_len.min(INITIAL_DATA_CAPACITY) as usize);
    reader.by_ref().take(header.data_len).read_to_end(&mut bytes)?;
    if (bytes.len() as u64) < header.data_len {
        return Err(DecodeError::malformed(format!(
            "data chunk truncated: declared {} bytes, found {}",
            header.data_len,
            bytes.len()
        )));
    }

    log::debug!(
        "decoded {} bytes of {}-bit PCM ({} channel(s))",
        bytes.len(),
        format.bits_per_sample,
        format.channel_count
    );

    Ok(DecodedAudio {
        format,
        pcm: RawPcmBuffer {
            bytes,
            declared_len: header.data_len,
        },
    })
}

/// Decodes an in-memory WAV file.
pub fn decode_bytes(bytes: &[u8], max_bytes: u64) -> DecodeResult<DecodedAudio> {
    decode(bytes, max_bytes)
}

/// Opens and decodes a WAV file from disk.
pub fn decode_file<P: AsRef<Path>>(path: P, max_bytes: u64) -> DecodeResult<DecodedAudio> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file), max_bytes)
}
