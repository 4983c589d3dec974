//! LZFu compression: match search and control-group emission.
//!
//! The encoder walks the input once. At every position it looks for the
//! longest run of upcoming bytes already present in the sliding window
//! (lengths 2..=17), emitting either a two-byte back-reference or a literal
//! byte. Eight items share one leading control byte whose bits, LSB first,
//! flag each item as a reference. The stream ends with a marker reference
//! pointing at the current write cursor.
//!
//! The search order is part of the interoperable format's observable
//! behaviour: candidates are scanned by ascending window slot, a candidate
//! wins only with a strictly longer match (so the lowest slot of equal
//! matches is kept), and the scan stops as soon as a full 17-byte match is
//! found. Consumed bytes enter the window while the winning match extends,
//! which lets a match run past the cursor into the bytes it is itself
//! producing - that is how short repeating runs collapse into a single
//! reference.

use crate::dictionary::{self, DICTIONARY, WINDOW_MASK, WINDOW_SIZE};
use crate::error::Result;
use crate::header::{CompressionType, HEADER_LEN, RtfHeader};
use crate::tokenizer;
use oxirtf_core::{Crc32, RingBuffer};

/// Shortest run worth encoding as a back-reference.
pub const MIN_MATCH: usize = 2;

/// Longest run a single back-reference can cover.
pub const MAX_MATCH: usize = 17;

/// Items per control-byte group.
const GROUP_ITEMS: usize = 8;

/// Match-search policy for the encoder.
///
/// Both policies produce streams the decoder handles identically; the
/// token-aware policy only changes which matches the encoder prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchHeuristic {
    /// Unrestricted byte-wise search over the whole window.
    #[default]
    Bytewise,
    /// Try matches starting at RTF token boundaries first, falling back to
    /// the unrestricted search when no boundary-aligned match reaches
    /// [`MIN_MATCH`].
    TokenBoundary,
}

/// Options for [`compress_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressOptions {
    /// Container variant to emit.
    pub compression_type: CompressionType,
    /// Match-search policy (compressed variant only).
    pub heuristic: MatchHeuristic,
}

impl CompressOptions {
    /// Default options: compressed container, byte-wise match search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the container variant.
    pub fn with_compression_type(mut self, compression_type: CompressionType) -> Self {
        self.compression_type = compression_type;
        self
    }

    /// Select the match-search policy.
    pub fn with_heuristic(mut self, heuristic: MatchHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Compress `input` into a compressed RTF container.
///
/// Always emits the LZ-compressed variant with the byte-wise match search,
/// which reproduces the reference containers byte for byte.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    compress_with(input, CompressOptions::new())
}

/// Compress `input` into a container with explicit options.
///
/// The only failure mode is input too large for the header's 32-bit size
/// fields; compression itself is total over finite byte sequences.
pub fn compress_with(input: &[u8], options: CompressOptions) -> Result<Vec<u8>> {
    match options.compression_type {
        CompressionType::Uncompressed => store_raw(input),
        CompressionType::Compressed => {
            let payload = compress_payload(input, options.heuristic);
            let crc = Crc32::compute(&payload);
            let header =
                RtfHeader::for_payload(payload.len(), input.len(), CompressionType::Compressed, crc)?;
            let mut out = vec![0u8; HEADER_LEN];
            out.reserve(payload.len());
            header.write_into(&mut out);
            out.extend_from_slice(&payload);
            Ok(out)
        }
    }
}

/// Wrap `input` verbatim in a raw-passthrough container (CRC unused).
fn store_raw(input: &[u8]) -> Result<Vec<u8>> {
    let header = RtfHeader::for_payload(input.len(), input.len(), CompressionType::Uncompressed, 0)?;
    let mut out = vec![0u8; HEADER_LEN];
    out.reserve(input.len());
    header.write_into(&mut out);
    out.extend_from_slice(input);
    Ok(out)
}

/// Encode the control-group payload for `input`.
fn compress_payload(input: &[u8], heuristic: MatchHeuristic) -> Vec<u8> {
    let mut payload = Vec::with_capacity(payload_capacity_hint(input.len()));
    let mut finder = MatchFinder::new(input, heuristic);
    let mut pos = 0;
    let mut done = false;

    while !done {
        let mut control = 0u8;
        // Worst case: 8 two-byte references plus the end marker
        let mut group = [0u8; 2 * GROUP_ITEMS + 2];
        let mut group_len = 0;
        let mut items = 0;

        while items < GROUP_ITEMS && pos < input.len() {
            let match_len = finder.longest_match(&input[pos..], pos);
            if match_len < MIN_MATCH {
                group[group_len] = input[pos];
                group_len += 1;
                pos += 1;
            } else {
                let (hi, lo) = pack_reference(finder.best_offset(), match_len);
                group[group_len] = hi;
                group[group_len + 1] = lo;
                group_len += 2;
                control |= 1 << items;
                pos += match_len;
            }
            items += 1;
        }

        if pos >= input.len() && items < GROUP_ITEMS {
            // End marker: a reference to the write cursor itself
            control |= 1 << items;
            let (hi, lo) = pack_reference(finder.position(), MIN_MATCH);
            group[group_len] = hi;
            group[group_len + 1] = lo;
            group_len += 2;
            done = true;
        }

        payload.push(control);
        payload.extend_from_slice(&group[..group_len]);
    }

    payload
}

/// Pack a back-reference: 12-bit absolute window offset, then length - 2,
/// big-endian across the two bytes.
#[inline]
fn pack_reference(offset: usize, length: usize) -> (u8, u8) {
    debug_assert!(offset < WINDOW_SIZE);
    debug_assert!((MIN_MATCH..=MAX_MATCH).contains(&length));
    let hi = (offset >> 4) as u8;
    let lo = ((offset << 4) & 0xF0) as u8 | ((length - MIN_MATCH) as u8 & 0x0F);
    (hi, lo)
}

/// Initial payload allocation, sized by how well RTF usually compresses.
fn payload_capacity_hint(input_len: usize) -> usize {
    let guess = if input_len > 100 * 1024 {
        input_len / 4
    } else if input_len > 50 * 1024 {
        input_len / 3
    } else {
        input_len / 2
    };
    guess + 2 * GROUP_ITEMS + 2
}

/// Longest-match search over the sliding window.
struct MatchFinder {
    window: RingBuffer,
    /// Window slots that begin an RTF token (token heuristic only).
    window_boundary: Vec<bool>,
    /// Input offsets that begin an RTF token (token heuristic only).
    input_boundary: Vec<bool>,
    heuristic: MatchHeuristic,
    best_offset: usize,
    best_len: usize,
}

impl MatchFinder {
    fn new(input: &[u8], heuristic: MatchHeuristic) -> Self {
        let window = dictionary::seeded_window();
        let (window_boundary, input_boundary) = match heuristic {
            MatchHeuristic::Bytewise => (Vec::new(), Vec::new()),
            MatchHeuristic::TokenBoundary => {
                let mut window_boundary = vec![false; WINDOW_SIZE];
                for (slot, flag) in tokenizer::token_boundaries(DICTIONARY).into_iter().enumerate()
                {
                    window_boundary[slot] = flag;
                }
                (window_boundary, tokenizer::token_boundaries(input))
            }
        };

        Self {
            window,
            window_boundary,
            input_boundary,
            heuristic,
            best_offset: 0,
            best_len: 0,
        }
    }

    /// Absolute window offset of the best match found by the last search.
    fn best_offset(&self) -> usize {
        self.best_offset
    }

    /// Current window write cursor (the end-marker offset).
    fn position(&self) -> usize {
        self.window.position()
    }

    /// Push one consumed input byte into the window.
    fn push(&mut self, byte: u8, input_index: usize) {
        if self.heuristic == MatchHeuristic::TokenBoundary {
            self.window_boundary[self.window.position()] = self.input_boundary[input_index];
        }
        self.window.write_byte(byte);
    }

    /// Find the longest window match for the front of `rest`.
    ///
    /// `base` is the input offset of `rest[0]`. The consumed bytes (the
    /// winning match, or the single literal when no match reaches
    /// [`MIN_MATCH`]) are in the window when this returns; the caller must
    /// advance by the returned length, or by one for a literal.
    fn longest_match(&mut self, rest: &[u8], base: usize) -> usize {
        let end = self.window.position();
        let start = if self.window.is_full() {
            (end + 1) & WINDOW_MASK
        } else {
            0
        };

        self.best_len = 0;
        self.best_offset = 0;

        if self.heuristic == MatchHeuristic::TokenBoundary {
            self.scan(start, end, rest, base, true);
            if self.best_len < MIN_MATCH {
                self.scan(start, end, rest, base, false);
            }
        } else {
            self.scan(start, end, rest, base, false);
        }

        if self.best_len == 0 {
            self.push(rest[0], base);
        }
        self.best_len
    }

    /// One pass over the candidate slots in `start..end` (wrapping).
    fn scan(&mut self, start: usize, end: usize, rest: &[u8], base: usize, boundaries_only: bool) {
        let mut offset = start;
        loop {
            if !boundaries_only || self.window_boundary[offset] {
                self.try_candidate(offset, rest, base);
            }
            offset = (offset + 1) & WINDOW_MASK;
            if offset == end || self.best_len >= MAX_MATCH {
                break;
            }
        }
    }

    /// Extend a match at `offset`, pushing bytes as it passes the best.
    ///
    /// Pushing while extending keeps the window exactly one byte behind the
    /// read position, so a candidate near the cursor can match into the run
    /// it is producing, and every consumed byte lands in the window once.
    fn try_candidate(&mut self, offset: usize, rest: &[u8], base: usize) {
        let max_len = rest.len().min(MAX_MATCH);
        let mut window_pos = offset;
        let mut len = 0;

        while len < max_len && self.window.read_at(window_pos) == rest[len] {
            len += 1;
            if len > self.best_len {
                self.push(rest[len - 1], base + len - 1);
            }
            window_pos = (window_pos + 1) & WINDOW_MASK;
        }

        if len > self.best_len {
            self.best_offset = offset;
            self.best_len = len;
        }
    }
}
