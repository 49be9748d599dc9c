//! Byte/character offset handling for token spans.
//!
//! Regex matches come back as byte offsets, while anything shown to a reader
//! (JSON output, token tables) uses character offsets. A token stores both so
//! nothing downstream converts twice.
//!
//! ```text
//! Text:  "Café noir"
//! byte:   C=0 a=1 f=2 é=3..5 ' '=5 n=6 ...
//! char:   C=0 a=1 f=2 é=3    ' '=4 n=5 ...
//! ```

use serde::{Deserialize, Serialize};

/// A text span with both byte and character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    /// Byte offset (start, inclusive)
    pub byte_start: usize,
    /// Byte offset (end, exclusive)
    pub byte_end: usize,
    /// Character offset (start, inclusive)
    pub char_start: usize,
    /// Character offset (end, exclusive)
    pub char_end: usize,
}

impl TextSpan {
    /// Create a span from byte offsets, computing char offsets from text.
    ///
    /// ```
    /// use litcoref::offset::TextSpan;
    ///
    /// let text = "Price €50";
    /// let span = TextSpan::from_bytes(text, 6, 11);
    /// assert_eq!(span.char_start, 6);
    /// assert_eq!(span.char_end, 9);
    /// ```
    #[must_use]
    pub fn from_bytes(text: &str, byte_start: usize, byte_end: usize) -> Self {
        let (char_start, char_end) = bytes_to_chars(text, byte_start, byte_end);
        Self {
            byte_start,
            byte_end,
            char_start,
            char_end,
        }
    }

    /// Extract the text for this span.
    #[must_use]
    pub fn extract<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.byte_start..self.byte_end).unwrap_or("")
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

/// Convert byte offsets to character offsets.
///
/// Offsets past the end of the text clamp to the character count. An offset
/// inside a multi-byte character maps to the character that contains it.
#[must_use]
pub fn bytes_to_chars(text: &str, byte_start: usize, byte_end: usize) -> (usize, usize) {
    let converter = SpanConverter::new(text);
    (
        converter.byte_to_char(byte_start),
        converter.byte_to_char(byte_end),
    )
}

/// Convert character offsets to byte offsets.
#[must_use]
pub fn chars_to_bytes(text: &str, char_start: usize, char_end: usize) -> (usize, usize) {
    let converter = SpanConverter::new(text);
    (
        converter.char_to_byte(char_start),
        converter.char_to_byte(char_end),
    )
}

// =============================================================================
// Span Converter
// =============================================================================

/// Converter for handling many spans from the same text.
///
/// Pre-computes mapping tables so each conversion is O(1). ASCII text skips
/// the tables entirely.
#[derive(Debug, Clone)]
pub struct SpanConverter {
    byte_to_char: Vec<usize>,
    char_to_byte: Vec<usize>,
    len: usize,
    is_ascii: bool,
}

impl SpanConverter {
    /// Create a converter for the given text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                byte_to_char: Vec::new(),
                char_to_byte: Vec::new(),
                len: text.len(),
                is_ascii: true,
            };
        }

        let mut byte_to_char = vec![0usize; text.len() + 1];
        let mut char_to_byte = Vec::with_capacity(text.len() + 1);
        let mut char_count = 0;
        for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
            for slot in &mut byte_to_char[byte_idx..byte_idx + ch.len_utf8()] {
                *slot = char_idx;
            }
            char_to_byte.push(byte_idx);
            char_count = char_idx + 1;
        }
        byte_to_char[text.len()] = char_count;
        char_to_byte.push(text.len());

        Self {
            byte_to_char,
            char_to_byte,
            len: text.len(),
            is_ascii: false,
        }
    }

    /// Convert byte offset to char offset.
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        if self.is_ascii {
            byte_idx.min(self.len)
        } else {
            self.byte_to_char
                .get(byte_idx)
                .or_else(|| self.byte_to_char.last())
                .copied()
                .unwrap_or(0)
        }
    }

    /// Convert char offset to byte offset.
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        if self.is_ascii {
            char_idx.min(self.len)
        } else {
            self.char_to_byte
                .get(char_idx)
                .or_else(|| self.char_to_byte.last())
                .copied()
                .unwrap_or(0)
        }
    }

    /// Convert byte span to TextSpan.
    #[must_use]
    pub fn from_bytes(&self, byte_start: usize, byte_end: usize) -> TextSpan {
        TextSpan {
            byte_start,
            byte_end,
            char_start: self.byte_to_char(byte_start),
            char_end: self.byte_to_char(byte_end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_identity() {
        let conv = SpanConverter::new("hello world");
        assert_eq!(conv.byte_to_char(6), 6);
        assert_eq!(conv.char_to_byte(6), 6);
        assert_eq!(conv.byte_to_char(100), 11);
    }

    #[test]
    fn multibyte_offsets() {
        let text = "Café noir";
        let span = TextSpan::from_bytes(text, 6, 10);
        assert_eq!(span.extract(text), "noir");
        assert_eq!((span.char_start, span.char_end), (5, 9));
        assert_eq!(chars_to_bytes(text, 5, 9), (6, 10));
    }

    #[test]
    fn empty_text() {
        assert_eq!(bytes_to_chars("", 0, 0), (0, 0));
        assert_eq!(chars_to_bytes("", 0, 0), (0, 0));
    }

    #[test]
    fn typographic_dash() {
        let text = "called – and";
        let conv = SpanConverter::new(text);
        // '–' is three bytes
        assert_eq!(conv.byte_to_char(10), 8);
        assert_eq!(conv.char_to_byte(9), 11);
    }
}
