//! Rule-based word tokenizer.
//!
//! Splits text into words and punctuation the way English pipelines usually
//! do: clitics come off their host (`Hudson's` → `Hudson` `'s`,
//! `didn't` → `did` `n't`), hyphenated compounds split at the hyphen, and
//! `--` / `...` stay whole.

use crate::doc::{Doc, Token};
use crate::offset::SpanConverter;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:['\x{2019}](?:s|re|ll|ve|d|m)\b)|[\p{L}\p{N}]+|-{2,}|\.{3}|\S")
        .expect("token regex is valid")
});

/// Whitespace-aware tokenizer producing an untagged [`Doc`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Byte ranges of each token in `text`.
    #[must_use]
    pub fn token_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        for m in TOKEN_RE.find_iter(text) {
            let (start, end) = (m.start(), m.end());
            match negation_split(text, start, end) {
                Some(split) => {
                    ranges.push((start, split));
                    ranges.push((split, end + apostrophe_t_len(&text[end..])));
                }
                None => {
                    // Already consumed as part of a preceding "n't".
                    if ranges.last().is_some_and(|&(_, prev_end)| prev_end > start) {
                        continue;
                    }
                    ranges.push((start, end));
                }
            }
        }
        ranges
    }

    /// Tokenize `text` into a document.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Doc {
        let converter = SpanConverter::new(text);
        let ranges = self.token_ranges(text);

        let mut tokens: Vec<Token> = ranges
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| Token::new(i, &text[start..end], converter.from_bytes(start, end)))
            .collect();

        for i in 0..tokens.len() {
            let ws_end = ranges.get(i + 1).map_or(text.len(), |&(next, _)| next);
            tokens[i].whitespace = text[ranges[i].1..ws_end].to_string();
        }

        log::debug!("tokenized {} bytes into {} tokens", text.len(), tokens.len());
        Doc::new(text, tokens)
    }
}

/// If the word `text[start..end]` ends in `n` and is followed by `'t`, return
/// the byte offset where `n't` begins.
fn negation_split(text: &str, start: usize, end: usize) -> Option<usize> {
    let word = &text[start..end];
    if word.len() < 2 || !word.ends_with(|c: char| c == 'n' || c == 'N') {
        return None;
    }
    let len = apostrophe_t_len(&text[end..]);
    if len == 0 {
        return None;
    }
    // "t" must close the word
    let after = &text[end + len..];
    if after.chars().next().is_some_and(char::is_alphanumeric) {
        return None;
    }
    Some(end - 1)
}

/// Byte length of a leading `'t` / `’t`, or 0.
fn apostrophe_t_len(rest: &str) -> usize {
    for apostrophe in ['\'', '\u{2019}'] {
        let mut chars = rest.chars();
        if chars.next() == Some(apostrophe) && matches!(chars.next(), Some('t' | 'T')) {
            return apostrophe.len_utf8() + 1;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        Tokenizer::new()
            .tokenize(input)
            .tokens()
            .iter()
            .map(|t| t.text.clone())
            .collect()
    }

    #[test]
    fn splits_words_and_punctuation() {
        assert_eq!(
            texts("My father was a fox farmer."),
            ["My", "father", "was", "a", "fox", "farmer", "."]
        );
    }

    #[test]
    fn possessive_clitic() {
        assert_eq!(
            texts("the Hudson's Bay Company"),
            ["the", "Hudson", "'s", "Bay", "Company"]
        );
        assert_eq!(texts("Laird\u{2019}s"), ["Laird", "\u{2019}s"]);
    }

    #[test]
    fn negation_clitic() {
        assert_eq!(texts("it didn't happen"), ["it", "did", "n't", "happen"]);
        assert_eq!(texts("don\u{2019}t"), ["do", "n\u{2019}t"]);
    }

    #[test]
    fn n_apostrophe_without_t_is_not_split() {
        assert_eq!(texts("the men's room"), ["the", "men", "'s", "room"]);
    }

    #[test]
    fn hyphens_and_dashes() {
        assert_eq!(texts("rat-like"), ["rat", "-", "like"]);
        assert_eq!(
            texts("operation--that"),
            ["operation", "--", "that"]
        );
        assert_eq!(texts("called \u{2013} and"), ["called", "\u{2013}", "and"]);
    }

    #[test]
    fn quotes_are_separate_tokens() {
        assert_eq!(
            texts("saying, \"Christmas present!\""),
            ["saying", ",", "\"", "Christmas", "present", "!", "\""]
        );
    }

    #[test]
    fn whitespace_is_attached() {
        let doc = Tokenizer::new().tokenize("He left.\n\nShe stayed.");
        assert_eq!(doc[0].whitespace, " ");
        assert_eq!(doc[2].whitespace, "\n\n");
        assert!(doc[2].ends_paragraph());
        assert_eq!(doc[5].whitespace, "");
    }

    #[test]
    fn empty_input() {
        assert!(Tokenizer::new().tokenize("").is_empty());
        assert!(Tokenizer::new().tokenize("   \n").is_empty());
    }
}
