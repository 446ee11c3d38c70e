//! PCM WAV decoding.
//!
//! Parses the RIFF/WAVE container, validates the format against what the
//! viewer can display (mono or stereo, 8/16/24/32-bit integer PCM) and turns
//! sample bytes into normalized floats. Display scaling happens later in
//! [`crate::series`].

mod decoder;
mod format;
mod header;
mod pcm;


// Re-export public API
pub use decoder::{decode, decode_bytes, decode_file, DecodedAudio, RawPcmBuffer};
pub use format::{
    WaveFormatDescriptor, MAX_BYTE_DEPTH, MAX_CHANNELS, WAVE_FORMAT_EXTENSIBLE, WAVE_FORMAT_PCM,
};
pub use header::{read_header, WavHeader};
pub use pcm::{decode_sample, normalize_samples, read_signed_le};
