//! RIFF/WAVE header parsing.
//!
//! Walks chunks from the start of the stream until the `data` chunk header,
//! leaving the reader positioned at the first sample byte. Nothing past the
//! `data` header is read here, so the size cap can be enforced before any
//! sample bytes are buffered.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use super::format::{WaveFormatDescriptor, WAVE_FORMAT_EXTENSIBLE, WAVE_FORMAT_PCM};
use crate::error::{DecodeError, DecodeResult};

/// Minimum size of a `fmt ` chunk body.
const FMT_CHUNK_MIN: u32 = 16;

/// Size of a `fmt ` body carrying the `WAVE_FORMAT_EXTENSIBLE` extension.
const FMT_EXTENSIBLE_SIZE: u32 = 40;

/// Parsed header: the format and the declared length of the `data` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub format: WaveFormatDescriptor,
    pub data_len: u64,
}

/// Reads the container header up to and including the `data` chunk header.
pub fn read_header<R: Read>(reader: &mut R) -> DecodeResult<WavHeader> {
    let riff = read_tag(reader, "RIFF header")?;
    if &riff != b"RIFF" {
        return Err(DecodeError::malformed("missing RIFF header"));
    }
    reader
        .read_u32::<LittleEndian>()
        .map_err(eof_as_malformed("RIFF size"))?;
    let wave = read_tag(reader, "WAVE identifier")?;
    if &wave != b"WAVE" {
        return Err(DecodeError::malformed("missing WAVE identifier"));
    }

    let mut format: Option<WaveFormatDescriptor> = None;

    loop {
        let id = match read_tag(reader, "chunk id") {
            Ok(id) => id,
            Err(DecodeError::MalformedContainer(_)) if format.is_none() => {
                return Err(DecodeError::malformed("missing fmt chunk"));
            }
            Err(DecodeError::MalformedContainer(_)) => {
                return Err(DecodeError::malformed("missing data chunk"));
            }
            Err(e) => return Err(e),
        };
        let size = reader
            .read_u32::<LittleEndian>()
            .map_err(eof_as_malformed("chunk size"))?;

        match &id {
            b"fmt " => {
                let parsed = read_fmt_chunk(reader, size)?;
                log::debug!(
                    "fmt chunk: {} Hz, {} bit, {} channel(s)",
                    parsed.sample_rate,
                    parsed.bits_per_sample,
                    parsed.channel_count
                );
                format = Some(parsed);
            }
            b"data" => {
                let format = format
                    .ok_or_else(|| DecodeError::malformed("data chunk before fmt chunk"))?;
                return Ok(WavHeader {
                    format,
                    data_len: size as u64,
                });
            }
            _ => {
                log::debug!(
                    "skipping chunk {:?} ({} bytes)",
                    String::from_utf8_lossy(&id),
                    size
                );
                skip(reader, padded(size))?;
            }
        }
    }
}

/// Parses and validates a `fmt ` chunk body of `size` bytes, consuming its padding.
fn read_fmt_chunk<R: Read>(reader: &mut R, size: u32) -> DecodeResult<WaveFormatDescriptor> {
    if size < FMT_CHUNK_MIN {
        return Err(DecodeError::malformed(format!(
            "fmt chunk too short: {} bytes",
            size
        )));
    }

    let eof = eof_as_malformed("fmt chunk");
    let mut format_tag = reader.read_u16::<LittleEndian>().map_err(&eof)?;
    let channel_count = reader.read_u16::<LittleEndian>().map_err(&eof)?;
    let sample_rate = reader.read_u32::<LittleEndian>().map_err(&eof)?;
    let byte_rate = reader.read_u32::<LittleEndian>().map_err(&eof)?;
    let block_align = reader.read_u16::<LittleEndian>().map_err(&eof)?;
    let bits_per_sample = reader.read_u16::<LittleEndian>().map_err(&eof)?;
    let mut consumed = FMT_CHUNK_MIN;

    if format_tag == WAVE_FORMAT_EXTENSIBLE && size >= FMT_EXTENSIBLE_SIZE {
        // cbSize, valid bits, channel mask, then the sub-format GUID whose
        // first two bytes are the effective format tag.
        reader.read_u16::<LittleEndian>().map_err(&eof)?;
        reader.read_u16::<LittleEndian>().map_err(&eof)?;
        reader.read_u32::<LittleEndian>().map_err(&eof)?;
        let mut guid = [0u8; 16];
        reader.read_exact(&mut guid).map_err(&eof)?;
        format_tag = u16::from_le_bytes([guid[0], guid[1]]);
        consumed = FMT_EXTENSIBLE_SIZE;
    }

    skip(reader, padded(size) - consumed as u64)?;

    if format_tag != WAVE_FORMAT_PCM {
        return Err(DecodeError::UnsupportedFormat(format_tag));
    }

    let format = WaveFormatDescriptor {
        sample_rate,
        bits_per_sample,
        channel_count,
        byte_rate,
        block_align,
    };
    format.validate()?;
    if sample_rate == 0 {
        return Err(DecodeError::malformed("sample rate of zero"));
    }
    Ok(format)
}

/// Chunk size including the pad byte for odd sizes.
fn padded(size: u32) -> u64 {
    size as u64 + (size % 2) as u64
}

fn read_tag<R: Read>(reader: &mut R, what: &'static str) -> DecodeResult<[u8; 4]> {
    let mut tag = [0u8; 4];
    reader.read_exact(&mut tag).map_err(eof_as_malformed(what))?;
    Ok(tag)
}

fn skip<R: Read>(reader: &mut R, len: u64) -> DecodeResult<()> {
    let skipped = io::copy(&mut reader.by_ref().take(len), &mut io::sink())?;
    if skipped < len {
        return Err(DecodeError::malformed(format!(
            "chunk truncated: expected {} bytes, found {}",
            len, skipped
        )));
    }
    Ok(())
}

/// Maps an unexpected end of stream to `MalformedContainer`, other I/O errors to `Io`.
fn eof_as_malformed(what: &'static str) -> impl Fn(io::Error) -> DecodeError {
    move |err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::malformed(format!("truncated {}", what))
        } else {
            DecodeError::Io(err)
        }
    }
}
