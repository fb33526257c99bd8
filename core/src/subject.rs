//! Caller input and its encoded haystack window.
//!
//! Text bounds are character indices into the caller's text. They are applied
//! to the text first and only then converted to byte offsets, so the engine
//! sees the same window the caller described. Pre-encoded bytes are taken as
//! they are, with byte bounds.

use crate::Diagnostic;

/// What the caller handed to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject<'h> {
    /// Decodable text.
    Text(&'h str),
    /// Pre-encoded bytes. Offsets reported back may split characters.
    Bytes(&'h [u8]),
}

impl<'h> From<&'h str> for Subject<'h> {
    fn from(s: &'h str) -> Self {
        Subject::Text(s)
    }
}

impl<'h> From<&'h String> for Subject<'h> {
    fn from(s: &'h String) -> Self {
        Subject::Text(s.as_str())
    }
}

impl<'h> From<&'h [u8]> for Subject<'h> {
    fn from(b: &'h [u8]) -> Self {
        Subject::Bytes(b)
    }
}

impl<'h, const N: usize> From<&'h [u8; N]> for Subject<'h> {
    fn from(b: &'h [u8; N]) -> Self {
        Subject::Bytes(b)
    }
}

impl<'h> From<&'h Vec<u8>> for Subject<'h> {
    fn from(b: &'h Vec<u8>) -> Self {
        Subject::Bytes(b.as_slice())
    }
}

impl<'h> Subject<'h> {
    /// The diagnostic an operation on this subject must surface, if any.
    #[must_use]
    pub fn diagnostic(&self, operation: &'static str) -> Option<Diagnostic> {
        match self {
            Subject::Text(_) => None,
            Subject::Bytes(_) => Some(Diagnostic::UndecodedInput { operation }),
        }
    }

    /// Encode the window `[pos, endpos)` into a [`Haystack`].
    ///
    /// `endpos` past the end is clamped. A `pos` past the window's end gives
    /// a haystack that is not [searchable](Haystack::is_searchable), which the
    /// adapter treats as "no match".
    #[must_use]
    pub fn window(self, pos: usize, endpos: Option<usize>) -> Haystack<'h> {
        match self {
            Subject::Text(text) => {
                let window = match endpos {
                    Some(end) => &text[..char_to_byte(text, end)],
                    None => text,
                };
                let start = match window.char_indices().nth(pos) {
                    Some((i, _)) => i,
                    None if pos == window.chars().count() => window.len(),
                    None => window.len() + 1,
                };
                Haystack {
                    bytes: window.as_bytes(),
                    start,
                    is_text: true,
                }
            }
            Subject::Bytes(all) => {
                let end = endpos.map_or(all.len(), |e| e.min(all.len()));
                let bytes = &all[..end];
                let start = if pos <= bytes.len() {
                    pos
                } else {
                    bytes.len() + 1
                };
                Haystack {
                    bytes,
                    start,
                    is_text: false,
                }
            }
        }
    }
}

/// Byte offset of the `n`th character, or the text length when `n` is past it.
fn char_to_byte(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

/// The exact byte buffer an operation ran against.
///
/// Every offset a [`Match`](crate::Match) reports is relative to
/// [`as_bytes`](Self::as_bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Haystack<'h> {
    bytes: &'h [u8],
    start: usize,
    is_text: bool,
}

impl<'h> Haystack<'h> {
    /// The encoded window.
    #[must_use]
    pub fn as_bytes(&self) -> &'h [u8] {
        self.bytes
    }

    /// Byte offset where searching starts.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns `true` when `start` lies inside the window (its end included).
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.start <= self.bytes.len()
    }

    /// Returns `true` when the buffer came from caller text.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.is_text
    }

    /// Returns `true` when byte and character offsets may differ.
    #[must_use]
    pub fn has_multibyte(&self) -> bool {
        !self.bytes.is_ascii()
    }

    /// Returns `true` unless `offset` falls inside an encoded character of
    /// caller text. Byte buffers have no character boundaries to respect.
    #[must_use]
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        !self.is_text || self.bytes.get(offset).map_or(true, |&b| b & 0xC0 != 0x80)
    }

    /// The diagnostic an operation over this buffer surfaces, if any.
    ///
    /// Buffers built from pre-encoded bytes raise
    /// [`Diagnostic::UndecodedInput`]; text buffers raise nothing.
    #[must_use]
    pub fn diagnostic(&self, operation: &'static str) -> Option<Diagnostic> {
        (!self.is_text).then_some(Diagnostic::UndecodedInput { operation })
    }
}
