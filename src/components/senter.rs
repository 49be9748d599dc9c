//! Sentence boundary detection.

use crate::doc::{Doc, Sentence};
use crate::lexicon::contains;
use crate::pipeline::Component;
use crate::Result;

const TERMINATORS: &[&str] = &[".", "!", "?", "...", "\u{2026}"];
const CLOSERS: &[&str] = &["\"", "'", "\u{201d}", "\u{2019}", ")", "]"];
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "rev", "capt", "col", "gen", "lt", "sgt",
];

/// Punctuation- and paragraph-based sentence splitter.
///
/// A sentence ends after `.`, `!`, `?` or an ellipsis, unless the period
/// follows a title abbreviation (`Mr.`). Closing quotes and brackets stay with
/// the sentence they close. A blank line always ends a sentence.
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    /// Create a splitter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute sentence ranges for a document.
    #[must_use]
    pub fn split(&self, doc: &Doc) -> Vec<Sentence> {
        let tokens = doc.tokens();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            let mut end_here = token.ends_paragraph();

            if contains(TERMINATORS, token.text.as_str()) {
                let after_title = token.text == "."
                    && i > 0
                    && tokens[i - 1].whitespace.is_empty()
                    && contains(ABBREVIATIONS, tokens[i - 1].lower());
                if !after_title {
                    // Swallow attached closing quotes/brackets and repeated terminators.
                    while i + 1 < tokens.len()
                        && tokens[i].whitespace.is_empty()
                        && (contains(CLOSERS, tokens[i + 1].text.as_str())
                            || contains(TERMINATORS, tokens[i + 1].text.as_str()))
                    {
                        i += 1;
                    }
                    end_here = true;
                }
            }

            if end_here {
                sentences.push(Sentence {
                    index: sentences.len(),
                    start,
                    end: i + 1,
                });
                start = i + 1;
            }
            i += 1;
        }

        if start < tokens.len() {
            sentences.push(Sentence {
                index: sentences.len(),
                start,
                end: tokens.len(),
            });
        }
        sentences
    }
}

impl Component for SentenceSplitter {
    fn name(&self) -> &'static str {
        "senter"
    }

    fn process(&self, doc: &mut Doc) -> Result<()> {
        let sentences = self.split(doc);
        log::debug!("senter: {} sentences", sentences.len());
        doc.set_sentences(sentences);
        Ok(())
    }
}
