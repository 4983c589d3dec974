//! # OxiRTF Core
//!
//! Core components for the OxiRTF compressed-RTF library.
//!
//! This crate provides the two primitives the LZFu codec is built on:
//!
//! - [`crc`]: the table-driven CRC-32 variant used by the compressed RTF
//!   container header
//! - [`ringbuffer`]: the fixed-capacity sliding window that serves as both
//!   seed dictionary and match history
//!
//! ## Architecture
//!
//! OxiRTF is layered the same way as its sibling archiver projects:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Bindings                                            │
//! │     FFI / scripting wrappers (out of tree)              │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec (oxirtf-lzfu)                                 │
//! │     Container header, match finder, decoder, tokenizer  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Primitives (this crate)                             │
//! │     RingBuffer, CRC                                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxirtf_core::crc::Crc32;
//! use oxirtf_core::ringbuffer::RingBuffer;
//!
//! // Compute the container CRC
//! let crc = Crc32::compute(b"123456789");
//! assert_eq!(crc, 0x2DFD2D88);
//!
//! // Replay a self-overlapping back-reference
//! let mut ring = RingBuffer::new(4096);
//! ring.write_byte(b'A');
//! ring.write_byte(b'B');
//! for _ in 0..4 {
//!     let byte = ring.read_back(2);
//!     ring.write_byte(byte);
//! }
//! assert_eq!(ring.read_back(1), b'B');
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod crc;
pub mod ringbuffer;

// Re-exports for convenience
pub use crc::Crc32;
pub use ringbuffer::RingBuffer;
