//! The fixed LZFu seed dictionary and window constants.
//!
//! Every compressed RTF stream starts from the same 207 bytes of RTF
//! boilerplate pre-loaded into the sliding window, so the very first
//! back-reference of a stream can already address common fragments like
//! `{\rtf1\ansi` or font names. The constant is mandated by the wire format;
//! interoperability requires it byte-for-byte.

use oxirtf_core::RingBuffer;

/// Size of the sliding window, in bytes.
pub const WINDOW_SIZE: usize = 4096;

/// Mask for window offset arithmetic (`WINDOW_SIZE - 1`).
pub const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// The 207-byte seed dictionary shared by every compressed RTF stream.
pub const DICTIONARY: &[u8] = b"{\\rtf1\\ansi\\mac\\deff0\\deftab720{\\fonttbl;}\
{\\f0\\fnil \\froman \\fswiss \\fmodern \\fscript \
\\fdecor MS Sans SerifSymbolArialTimes New RomanCourier\
{\\colortbl\\red0\\green0\\blue0\r\n\\par \\pard\\plain\\\
f0\\fs20\\b\\i\\u\\tab\\tx";

/// Length of [`DICTIONARY`]. The window cursor starts here.
pub const DICTIONARY_LEN: usize = 207;

/// Create a window seeded with the dictionary, cursor at byte 207.
pub fn seeded_window() -> RingBuffer {
    let mut window = RingBuffer::new(WINDOW_SIZE);
    window.preload(DICTIONARY);
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_length() {
        assert_eq!(DICTIONARY.len(), DICTIONARY_LEN);
    }

    #[test]
    fn test_dictionary_contents() {
        assert!(DICTIONARY.starts_with(b"{\\rtf1\\ansi\\mac\\deff0"));
        assert!(DICTIONARY.ends_with(b"\\b\\i\\u\\tab\\tx"));
        // The only CR LF sits inside the colortbl fragment
        assert_eq!(DICTIONARY[163..169], *b"blue0\r");
        assert_eq!(DICTIONARY[169], b'\n');
    }

    #[test]
    fn test_seeded_window() {
        let window = seeded_window();
        assert_eq!(window.position(), DICTIONARY_LEN);
        assert_eq!(window.len(), DICTIONARY_LEN);
        assert_eq!(window.read_at(0), b'{');
        assert_eq!(window.read_back(DICTIONARY_LEN), b'{');
        assert_eq!(window.read_back(1), b'x');
    }
}
