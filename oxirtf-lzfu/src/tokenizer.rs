//! RTF lexical scanner.
//!
//! Splits an RTF byte stream into its surface-level lexical units: group
//! braces, control words (`\keyword` with an optional signed numeric
//! parameter), control symbols (`\` followed by one non-alphabetic byte),
//! and runs of plain text. Bare CR/LF bytes between tokens are ignored, as
//! RTF readers are required to do.
//!
//! The scanner serves two roles. It is a public iterator for callers that
//! want to inspect RTF structure, and it feeds the encoder's optional
//! token-boundary match heuristic: token start offsets mark the window
//! slots where matches are most likely to pay off. Decoding never depends
//! on it.

use thiserror::Error;

/// Maximum length of a control word keyword, in ASCII letters.
const KEYWORD_MAX: usize = 32;

/// Maximum length of a control word parameter, in decimal digits.
const PARAM_MAX: usize = 10;

/// Tokenization errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// Input ended in the middle of a control word or symbol.
    #[error("Unexpected end of input at offset {offset}")]
    UnexpectedEof {
        /// Offset at which more input was required.
        offset: usize,
    },

    /// Control word keyword exceeds 32 letters.
    #[error("Invalid keyword at offset {offset}: too long")]
    KeywordTooLong {
        /// Offset of the keyword's first letter.
        offset: usize,
    },

    /// Control word parameter exceeds 10 digits.
    #[error("Invalid parameter at offset {offset}: too long")]
    ParameterTooLong {
        /// Offset of the parameter's first byte.
        offset: usize,
    },

    /// Control word parameter is not a valid signed integer.
    #[error("Invalid parameter at offset {offset}")]
    InvalidParameter {
        /// Offset of the parameter's first byte.
        offset: usize,
    },
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizeError>;

/// One RTF lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `{` - start of a group.
    GroupOpen,
    /// `}` - end of a group.
    GroupClose,
    /// `\` followed by a single non-alphabetic byte.
    ControlSymbol(char),
    /// `\keyword` with an optional numeric parameter.
    ControlWord {
        /// The keyword, 1..=32 ASCII letters.
        keyword: &'a str,
        /// Optional signed decimal parameter.
        parameter: Option<i64>,
    },
    /// A run of plain document bytes.
    Text(&'a [u8]),
}

/// A token together with the offset of its first byte in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtfToken<'a> {
    /// Byte offset of the token's first byte.
    pub offset: usize,
    /// What the token is.
    pub kind: TokenKind<'a>,
}

/// Iterator over the tokens of an RTF byte stream.
///
/// # Example
///
/// ```
/// use oxirtf_lzfu::tokenizer::{TokenKind, Tokenizer};
///
/// let mut tokens = Tokenizer::new(b"{\\rtf1 hi}");
/// assert!(matches!(
///     tokens.next().unwrap().unwrap().kind,
///     TokenKind::GroupOpen
/// ));
/// assert!(matches!(
///     tokens.next().unwrap().unwrap().kind,
///     TokenKind::ControlWord { keyword: "rtf", parameter: Some(1) }
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    /// Scan a control word or control symbol; `start` is the backslash.
    fn control_token(&mut self, start: usize) -> Result<RtfToken<'a>> {
        let Some(&first) = self.input.get(self.pos) else {
            return Err(TokenizeError::UnexpectedEof { offset: self.pos });
        };

        if !first.is_ascii_alphabetic() {
            self.pos += 1;
            return Ok(RtfToken {
                offset: start,
                kind: TokenKind::ControlSymbol(first as char),
            });
        }

        let keyword_start = self.pos;
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_alphabetic() {
            if self.pos - keyword_start == KEYWORD_MAX {
                return Err(TokenizeError::KeywordTooLong {
                    offset: keyword_start,
                });
            }
            self.pos += 1;
        }
        if self.pos == self.input.len() {
            // A control word must be delimited within the input
            return Err(TokenizeError::UnexpectedEof { offset: self.pos });
        }
        let keyword = std::str::from_utf8(&self.input[keyword_start..self.pos])
            .expect("keyword bytes are ASCII letters");

        let param_start = self.pos;
        let negative = self.input[self.pos] == b'-';
        if negative {
            self.pos += 1;
            if self.pos == self.input.len() {
                return Err(TokenizeError::UnexpectedEof { offset: self.pos });
            }
        }
        let digits_start = self.pos;
        let mut magnitude: i64 = 0;
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
            if self.pos - digits_start == PARAM_MAX {
                return Err(TokenizeError::ParameterTooLong {
                    offset: param_start,
                });
            }
            // At most 10 digits, so this cannot overflow i64
            magnitude = magnitude * 10 + i64::from(self.input[self.pos] - b'0');
            self.pos += 1;
        }
        if self.pos == self.input.len() {
            return Err(TokenizeError::UnexpectedEof { offset: self.pos });
        }

        let parameter = if self.pos > digits_start {
            Some(if negative { -magnitude } else { magnitude })
        } else if negative {
            // A bare `-` is not a parameter
            return Err(TokenizeError::InvalidParameter {
                offset: param_start,
            });
        } else {
            None
        };

        // One space after a control word is part of the token
        if self.input[self.pos] == b' ' {
            self.pos += 1;
        }

        Ok(RtfToken {
            offset: start,
            kind: TokenKind::ControlWord { keyword, parameter },
        })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<RtfToken<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut text_start: Option<usize> = None;
        while self.pos < self.input.len() {
            let byte = self.input[self.pos];
            match byte {
                b'{' | b'}' | b'\\' | b'\r' | b'\n' => {
                    if let Some(start) = text_start {
                        // Delimiter stays for the next call
                        return Some(Ok(RtfToken {
                            offset: start,
                            kind: TokenKind::Text(&self.input[start..self.pos]),
                        }));
                    }
                    let offset = self.pos;
                    self.pos += 1;
                    match byte {
                        b'{' => {
                            return Some(Ok(RtfToken {
                                offset,
                                kind: TokenKind::GroupOpen,
                            }));
                        }
                        b'}' => {
                            return Some(Ok(RtfToken {
                                offset,
                                kind: TokenKind::GroupClose,
                            }));
                        }
                        b'\\' => {
                            let token = self.control_token(offset);
                            if token.is_err() {
                                self.failed = true;
                            }
                            return Some(token);
                        }
                        // Bare CR/LF between tokens is skipped
                        _ => {}
                    }
                }
                _ => {
                    if text_start.is_none() {
                        text_start = Some(self.pos);
                    }
                    self.pos += 1;
                }
            }
        }

        text_start.map(|start| {
            Ok(RtfToken {
                offset: start,
                kind: TokenKind::Text(&self.input[start..]),
            })
        })
    }
}

/// Byte offsets at which lexical units begin, as a bitmap over `input`.
///
/// Scanning stops at the first malformed construct; bytes past it stay
/// unmarked. This is only a heuristic signal for the encoder, so a partial
/// map is fine, and tokenizer failures never surface from compression.
pub(crate) fn token_boundaries(input: &[u8]) -> Vec<bool> {
    let mut map = vec![false; input.len()];
    for token in Tokenizer::new(input) {
        match token {
            Ok(t) => map[t.offset] = true,
            Err(_) => break,
        }
    }
    map
}
