//! LZFu-specific error types.

use thiserror::Error;

/// Compressed RTF container errors.
///
/// Every variant is terminal for the call that raised it: the codec surfaces
/// the first inconsistency it detects and never retries or repairs. There
/// are no transient conditions in a pure in-memory codec, so callers should
/// treat all of these as reject-this-input signals.
#[derive(Debug, Error)]
pub enum LzfuError {
    /// Input ended before the container header or its declared payload.
    #[error("Truncated input: need {needed} bytes, have {available}")]
    TruncatedInput {
        /// Number of bytes required by the header or its size fields.
        needed: usize,
        /// Number of bytes actually available.
        available: usize,
    },

    /// The 4-byte compression tag matches neither recognized value.
    #[error("Unknown compression tag: {found:#010x}")]
    UnknownMagic {
        /// The unrecognized tag value, little-endian decoded.
        found: u32,
    },

    /// CRC-32 of the payload disagrees with the header.
    #[error("CRC mismatch: header {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// CRC stored in the container header.
        expected: u32,
        /// CRC computed over the payload.
        computed: u32,
    },

    /// The control-group stream ran out before producing `raw_size` bytes.
    #[error("Truncated payload: produced {produced} of {expected} bytes")]
    TruncatedPayload {
        /// Bytes produced before the payload was exhausted.
        produced: usize,
        /// Bytes the header promised.
        expected: usize,
    },

    /// Decoded output length disagrees with the header's `raw_size`.
    #[error("Length mismatch: header says {expected} bytes, decoded {actual}")]
    LengthMismatch {
        /// `raw_size` from the container header.
        expected: usize,
        /// Length the decoder actually produced (or would have produced).
        actual: usize,
    },

    /// Input too large for the container's 32-bit size fields.
    #[error("Input too large for container size fields: {size} bytes")]
    InputTooLarge {
        /// Length of the offending input.
        size: usize,
    },
}

/// Result type alias for LZFu operations.
pub type Result<T> = std::result::Result<T, LzfuError>;

impl LzfuError {
    /// Create a truncated input error.
    pub fn truncated_input(needed: usize, available: usize) -> Self {
        Self::TruncatedInput { needed, available }
    }

    /// Create an unknown magic error.
    pub fn unknown_magic(found: u32) -> Self {
        Self::UnknownMagic { found }
    }

    /// Create a checksum mismatch error.
    pub fn checksum_mismatch(expected: u32, computed: u32) -> Self {
        Self::ChecksumMismatch { expected, computed }
    }

    /// Create a truncated payload error.
    pub fn truncated_payload(produced: usize, expected: usize) -> Self {
        Self::TruncatedPayload { produced, expected }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LzfuError::unknown_magic(0xDEADBEEF);
        assert!(err.to_string().contains("0xdeadbeef"));

        let err = LzfuError::checksum_mismatch(0xA7C7C5F1, 0x12345678);
        assert!(err.to_string().contains("CRC mismatch"));

        let err = LzfuError::truncated_payload(5, 43);
        assert!(err.to_string().contains("5 of 43"));
    }
}
