//! Shared WAV fixtures for integration tests.

#![allow(dead_code)]

use std::io::Cursor;

/// Writes integer PCM with hound.
pub fn wav_int<S: hound::Sample + Copy>(
    channels: u16,
    sample_rate: u32,
    bits: u16,
    samples: &[S],
) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Mono 16-bit file of `frames` samples forming a slow ramp.
pub fn mono16(sample_rate: u32, frames: usize) -> Vec<u8> {
    let samples: Vec<i16> = (0..frames).map(|i| (i % 2000) as i16 * 16 - 16000).collect();
    wav_int(1, sample_rate, 16, &samples)
}

/// Mono 16-bit file lasting `seconds` at 8 kHz.
pub fn mono16_seconds(seconds: f64) -> Vec<u8> {
    mono16(8000, (seconds * 8000.0).round() as usize)
}
