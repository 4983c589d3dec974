//! # OxiRTF LZFu
//!
//! Pure Rust implementation of the compressed RTF ("LZFu") format used by
//! mail clients to shrink Rich Text Format message bodies.
//!
//! The format is an LZ77 family: a 4096-byte sliding window pre-seeded with
//! 207 bytes of common RTF boilerplate, two-byte back-references covering
//! runs of 2..=17 bytes, and control bytes flagging each of eight items as
//! literal or reference. A 16-byte container header carries the sizes, a
//! magic tag selecting the compressed or raw-passthrough variant, and a
//! CRC-32 over the compressed payload.
//!
//! ## Container layout
//!
//! ```text
//! | offset | field     | size | meaning                                  |
//! |--------|-----------|------|------------------------------------------|
//! |      0 | comp_size |    4 | bytes following this field               |
//! |      4 | raw_size  |    4 | length of the uncompressed data          |
//! |      8 | magic     |    4 | `LZFu` (compressed) or `MELA` (raw)      |
//! |     12 | crc       |    4 | CRC-32 of payload (compressed only)      |
//! |     16 | payload   |      | control groups + items, or raw bytes     |
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxirtf_lzfu::{compress, decompress, parse_header};
//!
//! let original = b"{\\rtf1\\ansi\\ansicpg1252\\pard hello world}\r\n";
//!
//! let container = compress(original).unwrap();
//! assert_eq!(parse_header(&container).unwrap().raw_size, 43);
//!
//! let restored = decompress(&container).unwrap();
//! assert_eq!(restored, original);
//! ```
//!
//! ## Interoperability
//!
//! The encoder reproduces the reference containers byte for byte: the match
//! search order, the end-of-stream marker, and the zero-initial CRC variant
//! are all part of the observable format. Every compress or decompress call
//! owns its own window, so calls may run freely in parallel.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod error;
pub mod header;
pub mod tokenizer;

// Re-exports
pub use decoder::decompress;
pub use encoder::{CompressOptions, MatchHeuristic, compress, compress_with};
pub use error::{LzfuError, Result};
pub use header::{CompressionType, HEADER_LEN, RtfHeader};

/// Parse the 16-byte container header without touching the payload.
///
/// This is the cheap metadata-only operation: it reads nothing past the
/// header, never verifies the CRC, and works on a prefix of a container.
///
/// # Example
///
/// ```rust
/// use oxirtf_lzfu::{CompressionType, compress, parse_header};
///
/// let container = compress(b"{\\rtf1 hi}").unwrap();
/// let header = parse_header(&container).unwrap();
/// assert_eq!(header.raw_size, 10);
/// assert_eq!(header.compression_type, CompressionType::Compressed);
/// ```
pub fn parse_header(data: &[u8]) -> Result<RtfHeader> {
    RtfHeader::parse(data)
}
