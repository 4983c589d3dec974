//! Compressed RTF container header.
//!
//! Every container opens with four little-endian `u32` fields:
//!
//! ```text
//! +--------------+-----------+-----------+-----------+------------------+
//! | comp_size    | raw_size  | magic     | crc       | payload...       |
//! +--------------+-----------+-----------+-----------+------------------+
//!  0              4           8           12          16
//! ```
//!
//! `comp_size` counts every byte after itself (12 header bytes + payload),
//! `raw_size` is the uncompressed length, `magic` selects the compressed or
//! raw-passthrough payload, and `crc` protects the payload of the compressed
//! variant only (raw containers carry zero and the field is never checked).

use crate::error::{LzfuError, Result};

/// Length of the container header, in bytes.
pub const HEADER_LEN: usize = 16;

/// Bytes of the header counted by `comp_size` (everything after the field).
pub const HEADER_TAIL: usize = 12;

/// Magic tag for an LZ-compressed payload (`LZFu` in little-endian ASCII).
pub const MAGIC_COMPRESSED: u32 = 0x7546_5A4C;

/// Magic tag for a raw, uncompressed payload (`MELA`).
pub const MAGIC_UNCOMPRESSED: u32 = 0x414C_454D;

/// Payload encoding selected by the header's magic tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionType {
    /// Payload is an LZFu control-group stream.
    #[default]
    Compressed,
    /// Payload is the original bytes, stored verbatim.
    Uncompressed,
}

impl CompressionType {
    /// The 4-byte tag value for this payload encoding.
    pub fn magic(self) -> u32 {
        match self {
            CompressionType::Compressed => MAGIC_COMPRESSED,
            CompressionType::Uncompressed => MAGIC_UNCOMPRESSED,
        }
    }

    /// Map a tag value back to a payload encoding.
    pub fn from_magic(magic: u32) -> Result<Self> {
        match magic {
            MAGIC_COMPRESSED => Ok(CompressionType::Compressed),
            MAGIC_UNCOMPRESSED => Ok(CompressionType::Uncompressed),
            other => Err(LzfuError::unknown_magic(other)),
        }
    }
}

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtfHeader {
    /// Byte count of everything after the `compressed_size` field itself.
    pub compressed_size: u32,
    /// Length of the original uncompressed data.
    pub raw_size: u32,
    /// Payload encoding named by the magic tag.
    pub compression_type: CompressionType,
    /// CRC-32 of the payload (compressed variant only; zero for raw).
    pub crc: u32,
}

impl RtfHeader {
    /// Parse the 16-byte header from the front of `data`.
    ///
    /// Reads nothing past the first 16 bytes and never touches the payload,
    /// so this doubles as the cheap metadata-only entry point. The CRC is
    /// returned as stored; verifying it against the payload is the
    /// decompressor's job.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(LzfuError::truncated_input(HEADER_LEN, data.len()));
        }

        let compressed_size = read_u32_le(data, 0);
        let raw_size = read_u32_le(data, 4);
        let compression_type = CompressionType::from_magic(read_u32_le(data, 8))?;
        let crc = read_u32_le(data, 12);

        Ok(Self {
            compressed_size,
            raw_size,
            compression_type,
            crc,
        })
    }

    /// Header for a payload of `payload_len` bytes.
    pub fn for_payload(
        payload_len: usize,
        raw_size: usize,
        compression_type: CompressionType,
        crc: u32,
    ) -> Result<Self> {
        let compressed_size = payload_len
            .checked_add(HEADER_TAIL)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(LzfuError::InputTooLarge { size: raw_size })?;
        let raw_size =
            u32::try_from(raw_size).map_err(|_| LzfuError::InputTooLarge { size: raw_size })?;

        Ok(Self {
            compressed_size,
            raw_size,
            compression_type,
            crc,
        })
    }

    /// Serialize the four fields into the first 16 bytes of `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than [`HEADER_LEN`].
    pub fn write_into(&self, buf: &mut [u8]) {
        buf[0..4].copy_from_slice(&self.compressed_size.to_le_bytes());
        buf[4..8].copy_from_slice(&self.raw_size.to_le_bytes());
        buf[8..12].copy_from_slice(&self.compression_type.magic().to_le_bytes());
        buf[12..16].copy_from_slice(&self.crc.to_le_bytes());
    }

    /// Payload length implied by `compressed_size`.
    ///
    /// Fails with `TruncatedInput` when `compressed_size` is too small to
    /// cover even the header tail (a malformed header no payload can match).
    pub fn payload_len(&self) -> Result<usize> {
        (self.compressed_size as usize)
            .checked_sub(HEADER_TAIL)
            .ok_or_else(|| LzfuError::truncated_input(HEADER_TAIL, self.compressed_size as usize))
    }
}

#[inline]
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compressed() {
        let data = b"-\x00\x00\x00+\x00\x00\x00LZFu\xf1\xc5\xc7\xa7extra";
        let header = RtfHeader::parse(data).unwrap();
        assert_eq!(header.compressed_size, 45);
        assert_eq!(header.raw_size, 43);
        assert_eq!(header.compression_type, CompressionType::Compressed);
        assert_eq!(header.crc, 0xA7C7C5F1);
        assert_eq!(header.payload_len().unwrap(), 33);
    }

    #[test]
    fn test_parse_uncompressed() {
        let mut data = [0u8; 16];
        data[0..4].copy_from_slice(&17u32.to_le_bytes());
        data[4..8].copy_from_slice(&5u32.to_le_bytes());
        data[8..12].copy_from_slice(b"MELA");
        let header = RtfHeader::parse(&data).unwrap();
        assert_eq!(header.compression_type, CompressionType::Uncompressed);
        assert_eq!(header.crc, 0);
    }

    #[test]
    fn test_parse_short_input() {
        let err = RtfHeader::parse(&[0u8; 15]).unwrap_err();
        assert!(matches!(
            err,
            LzfuError::TruncatedInput {
                needed: 16,
                available: 15
            }
        ));
    }

    #[test]
    fn test_parse_unknown_magic() {
        let mut data = [0u8; 16];
        data[8..12].copy_from_slice(b"GZIP");
        let err = RtfHeader::parse(&data).unwrap_err();
        assert!(matches!(err, LzfuError::UnknownMagic { .. }));
    }

    #[test]
    fn test_write_roundtrip() {
        let header =
            RtfHeader::for_payload(33, 43, CompressionType::Compressed, 0xA7C7C5F1).unwrap();
        let mut buf = [0u8; HEADER_LEN];
        header.write_into(&mut buf);
        assert_eq!(RtfHeader::parse(&buf).unwrap(), header);
        assert_eq!(&buf[8..12], b"LZFu");
    }

    #[test]
    fn test_magic_values() {
        assert_eq!(MAGIC_COMPRESSED.to_le_bytes(), *b"LZFu");
        assert_eq!(MAGIC_UNCOMPRESSED.to_le_bytes(), *b"MELA");
        assert!(CompressionType::from_magic(0).is_err());
    }

    #[test]
    fn test_undersized_comp_size() {
        let mut data = [0u8; 16];
        data[0..4].copy_from_slice(&4u32.to_le_bytes());
        data[8..12].copy_from_slice(b"LZFu");
        let header = RtfHeader::parse(&data).unwrap();
        assert!(header.payload_len().is_err());
    }
}
