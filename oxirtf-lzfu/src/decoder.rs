//! LZFu decompression: container validation and control-group replay.
//!
//! Decoding runs the container through three states: parse and validate the
//! header, verify the payload CRC (compressed variant), then replay the
//! control-group stream into the output until `raw_size` bytes exist. Every
//! back-reference copies byte by byte through the window, reading each
//! source byte before pushing the freshly produced one - references with an
//! offset distance smaller than their length read bytes they are
//! simultaneously producing, and a block copy would replay stale data.

use crate::dictionary::{self, WINDOW_MASK};
use crate::encoder::MIN_MATCH;
use crate::error::{LzfuError, Result};
use crate::header::{CompressionType, HEADER_LEN, RtfHeader};
use oxirtf_core::Crc32;

/// Decompress a compressed RTF container.
///
/// On success the result holds exactly `raw_size` bytes equal to the data
/// the container was built from. All errors are terminal for this input;
/// the first inconsistency found is returned and nothing is retried.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let header = RtfHeader::parse(data)?;
    let body = &data[HEADER_LEN..];
    let raw_size = header.raw_size as usize;

    match header.compression_type {
        CompressionType::Uncompressed => {
            if body.len() < raw_size {
                return Err(LzfuError::truncated_input(raw_size, body.len()));
            }
            Ok(body[..raw_size].to_vec())
        }
        CompressionType::Compressed => {
            let payload_len = header.payload_len()?;
            if body.len() < payload_len {
                return Err(LzfuError::truncated_input(payload_len, body.len()));
            }
            let payload = &body[..payload_len];

            let computed = Crc32::compute(payload);
            if computed != header.crc {
                return Err(LzfuError::checksum_mismatch(header.crc, computed));
            }

            expand(payload, raw_size)
        }
    }
}

/// Replay the control-group stream into `raw_size` output bytes.
fn expand(payload: &[u8], raw_size: usize) -> Result<Vec<u8>> {
    let mut window = dictionary::seeded_window();
    let mut output = Vec::with_capacity(raw_size);
    let mut cursor = 0;

    'stream: while output.len() < raw_size {
        let control = next_byte(payload, &mut cursor, output.len(), raw_size)?;

        for item in 0..8 {
            if output.len() == raw_size {
                break;
            }

            if control & (1 << item) == 0 {
                let byte = next_byte(payload, &mut cursor, output.len(), raw_size)?;
                window.write_byte(byte);
                output.push(byte);
                continue;
            }

            let hi = next_byte(payload, &mut cursor, output.len(), raw_size)?;
            let lo = next_byte(payload, &mut cursor, output.len(), raw_size)?;
            let reference = u16::from_be_bytes([hi, lo]);
            let offset = (reference >> 4) as usize;
            let length = (reference & 0x0F) as usize + MIN_MATCH;

            // A reference to the write cursor is the end-of-stream marker
            if offset == window.position() {
                break 'stream;
            }
            if output.len() + length > raw_size {
                return Err(LzfuError::length_mismatch(raw_size, output.len() + length));
            }

            // Offsets are absolute window slots; the distance stays fixed
            // while both read and write positions advance together
            let distance = window.position().wrapping_sub(offset) & WINDOW_MASK;
            for _ in 0..length {
                let byte = window.read_back(distance);
                window.write_byte(byte);
                output.push(byte);
            }
        }
    }

    if output.len() != raw_size {
        return Err(LzfuError::length_mismatch(raw_size, output.len()));
    }
    Ok(output)
}

/// Pull one payload byte, or fail with the stream position that ran dry.
#[inline]
fn next_byte(payload: &[u8], cursor: &mut usize, produced: usize, expected: usize) -> Result<u8> {
    match payload.get(*cursor) {
        Some(&byte) => {
            *cursor += 1;
            Ok(byte)
        }
        None => Err(LzfuError::truncated_payload(produced, expected)),
    }
}
