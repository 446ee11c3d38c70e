//! PCM sample reconstruction and normalization.

use super::format::WaveFormatDescriptor;

/// Reconstructs a signed integer from 1 to 4 little-endian bytes.
///
/// The bytes are placed in the low-order positions of a 4-byte buffer, decoded
/// as a little-endian `i32`, then sign-extended from the top bit of the last
/// byte.
///
/// # Example
///
/// ```rust
/// use wavescope_core::wav::read_signed_le;
///
/// assert_eq!(read_signed_le(&[0xFF, 0x7F]), 32767);
/// assert_eq!(read_signed_le(&[0x00, 0x80]), -32768);
/// assert_eq!(read_signed_le(&[0xFF, 0xFF, 0xFF]), -1);
/// ```
pub fn read_signed_le(bytes: &[u8]) -> i32 {
    debug_assert!((1..=4).contains(&bytes.len()));
    let mut buf = [0u8; 4];
    buf[..bytes.len()].copy_from_slice(bytes);
    let shift = 32 - 8 * bytes.len() as u32;
    (i32::from_le_bytes(buf) << shift) >> shift
}

/// Decodes one sample of `bits_per_sample` width to its signed integer value.
///
/// 8-bit WAV data is offset-binary (128 is silence); flipping the top bit turns
/// it into two's complement before reconstruction.
pub fn decode_sample(bytes: &[u8], bits_per_sample: u16) -> i32 {
    if bits_per_sample == 8 {
        read_signed_le(&[bytes[0] ^ 0x80])
    } else {
        read_signed_le(bytes)
    }
}

/// Converts interleaved PCM bytes to samples normalized by full scale.
///
/// Output order matches the input: frame by frame, channel by channel. A
/// trailing partial sample is ignored.
pub fn normalize_samples(data: &[u8], format: &WaveFormatDescriptor) -> Vec<f32> {
    let full_scale = format.full_scale();
    data.chunks_exact(format.byte_depth())
        .map(|chunk| (decode_sample(chunk, format.bits_per_sample) as f64 / full_scale) as f32)
        .collect()
}
