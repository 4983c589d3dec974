//! Interoperability and round-trip tests against reference containers.
//!
//! The two reference vectors come from the format's canonical examples; the
//! encoder must reproduce them byte for byte, and the decoder must invert
//! them, before any other behaviour can be trusted.

use oxirtf_lzfu::{
    CompressOptions, CompressionType, LzfuError, MatchHeuristic, compress, compress_with,
    decompress, parse_header,
};

const SIMPLE_RAW: &[u8] = b"{\\rtf1\\ansi\\ansicpg1252\\pard hello world}\r\n";
const SIMPLE_COMPRESSED: &[u8] = b"-\x00\x00\x00+\x00\x00\x00LZFu\xf1\xc5\xc7\xa7\x03\x00\n\
\x00rcpg125B2\n\xf3 hel\t\x00 bw\x05\xb0ld}\n\x80\x0f\xa0";

const CROSSING_RAW: &[u8] = b"{\\rtf1 WXYZWXYZWXYZWXYZWXYZ}";
const CROSSING_COMPRESSED: &[u8] =
    b"\x1a\x00\x00\x00\x1c\x00\x00\x00LZFu\xe2\xd4KQA\x00\x04 WXYZ\rn}\x01\x0e\xb0";

#[test]
fn test_compress_simple_vector() {
    assert_eq!(compress(SIMPLE_RAW).unwrap(), SIMPLE_COMPRESSED);
}

#[test]
fn test_decompress_simple_vector() {
    assert_eq!(decompress(SIMPLE_COMPRESSED).unwrap(), SIMPLE_RAW);
}

#[test]
fn test_compress_crossing_vector() {
    // Exercises a back-reference whose offset distance (4) is smaller than
    // its length (16): the copy reads bytes it is producing
    assert_eq!(compress(CROSSING_RAW).unwrap(), CROSSING_COMPRESSED);
}

#[test]
fn test_decompress_crossing_vector() {
    assert_eq!(decompress(CROSSING_COMPRESSED).unwrap(), CROSSING_RAW);
}

#[test]
fn test_simple_vector_header() {
    let header = parse_header(SIMPLE_COMPRESSED).unwrap();
    assert_eq!(header.compressed_size, 45);
    assert_eq!(header.raw_size, 43);
    assert_eq!(header.compression_type, CompressionType::Compressed);
    assert_eq!(header.crc, 0xA7C7C5F1);
}

#[test]
fn test_empty_input_container() {
    let container = compress(b"").unwrap();
    assert_eq!(
        container,
        b"\x0f\x00\x00\x00\x00\x00\x00\x00LZFu\x27\xd7\xca\x10\x01\x0c\xf0"
    );
    assert_eq!(decompress(&container).unwrap(), b"");
}

#[test]
fn test_header_invariant() {
    for input in [
        &b""[..],
        b"x",
        SIMPLE_RAW,
        CROSSING_RAW,
        b"completely unrelated to rtf",
    ] {
        let container = compress(input).unwrap();
        let header = parse_header(&container).unwrap();
        assert_eq!(header.raw_size as usize, input.len());
        assert_eq!(header.compressed_size as usize, container.len() - 4);
    }
}

#[test]
fn test_roundtrip_patterns() {
    let mut samples: Vec<Vec<u8>> = vec![
        b"".to_vec(),
        b"a".to_vec(),
        b"ab".to_vec(),
        (0u8..=255).collect(),
        vec![0u8; 300],
        vec![b'X'; 5000],
        b"WXYZ".repeat(700),
    ];
    // A document long enough to wrap the 4096-byte window several times
    let mut long = Vec::new();
    for i in 0..600 {
        long.extend_from_slice(format!("{{\\b paragraph {i}}}\\par\r\n").as_bytes());
    }
    samples.push(long);

    for input in &samples {
        let container = compress(input).unwrap();
        let restored = decompress(&container).unwrap();
        assert_eq!(&restored, input, "round-trip failed for {} bytes", input.len());
    }
}

#[test]
fn test_roundtrip_pseudo_random() {
    // Reproducible pseudo-random bytes; mostly incompressible
    let mut seed: u64 = 0x123456789ABCDEF0;
    let mut data = Vec::with_capacity(10_000);
    for _ in 0..10_000 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    let container = compress(&data).unwrap();
    assert_eq!(decompress(&container).unwrap(), data);
}

#[test]
fn test_token_heuristic_streams_decode() {
    let options = CompressOptions::new().with_heuristic(MatchHeuristic::TokenBoundary);
    let mut samples: Vec<Vec<u8>> = vec![
        SIMPLE_RAW.to_vec(),
        CROSSING_RAW.to_vec(),
        b"{\\rtf1{\\fonttbl{\\f0\\fswiss Helv;}}\\pard\\plain body text\\par}".to_vec(),
        // Not valid RTF: the heuristic must degrade, not fail
        vec![0xFE; 100],
    ];
    let mut big = Vec::new();
    for i in 0..200 {
        big.extend_from_slice(format!("\\pard\\fi-{i}\\tx{i} item {i}\\par\r\n").as_bytes());
    }
    samples.push(big);

    for input in &samples {
        let container = compress_with(input, options).unwrap();
        assert_eq!(&decompress(&container).unwrap(), input);
    }
}

#[test]
fn test_raw_passthrough_roundtrip() {
    let container = compress_with(
        SIMPLE_RAW,
        CompressOptions::new().with_compression_type(CompressionType::Uncompressed),
    )
    .unwrap();
    let header = parse_header(&container).unwrap();
    assert_eq!(header.compression_type, CompressionType::Uncompressed);
    assert_eq!(header.crc, 0);
    assert_eq!(header.compressed_size as usize, SIMPLE_RAW.len() + 12);
    assert_eq!(decompress(&container).unwrap(), SIMPLE_RAW);
}

#[test]
fn test_single_bit_corruption_detected() {
    let container = compress(SIMPLE_RAW).unwrap();
    for byte_index in 16..container.len() {
        for bit in 0..8 {
            let mut corrupt = container.clone();
            corrupt[byte_index] ^= 1 << bit;
            let err = decompress(&corrupt).unwrap_err();
            assert!(
                matches!(err, LzfuError::ChecksumMismatch { .. }),
                "flipping bit {bit} of byte {byte_index} gave {err:?}"
            );
        }
    }
}

#[test]
fn test_header_truncation() {
    let container = compress(SIMPLE_RAW).unwrap();
    for len in 0..16 {
        let err = decompress(&container[..len]).unwrap_err();
        assert!(matches!(err, LzfuError::TruncatedInput { .. }));
    }
    let err = parse_header(&container[..15]).unwrap_err();
    assert!(matches!(err, LzfuError::TruncatedInput { .. }));
}

#[test]
fn test_payload_truncation() {
    let container = compress(SIMPLE_RAW).unwrap();
    for len in 16..container.len() {
        let err = decompress(&container[..len]).unwrap_err();
        assert!(
            matches!(
                err,
                LzfuError::TruncatedInput { .. } | LzfuError::TruncatedPayload { .. }
            ),
            "truncating to {len} gave {err:?}"
        );
    }
}

#[test]
fn test_unknown_magic() {
    let mut container = compress(SIMPLE_RAW).unwrap();
    container[8..12].copy_from_slice(b"GZIP");
    assert!(matches!(
        decompress(&container).unwrap_err(),
        LzfuError::UnknownMagic { .. }
    ));
}

#[test]
fn test_trailing_garbage_ignored() {
    // comp_size bounds the payload; bytes past it are not decoded
    let mut container = compress(CROSSING_RAW).unwrap();
    container.extend_from_slice(b"trailing junk");
    assert_eq!(decompress(&container).unwrap(), CROSSING_RAW);
}
