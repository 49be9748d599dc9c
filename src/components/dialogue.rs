//! Quoted speech and who says it.
//!
//! Quotes are `"..."` or `“...”` spans. A quote still open at the end of its
//! paragraph ends there, the way fiction runs long speeches across
//! paragraphs. Single quotes are never quotation marks here; in English prose
//! they are apostrophes far more often.
//!
//! A quote is attributed when a speech verb sits next to it with a speaker on
//! the far side of the verb:
//!
//! | Pattern | Example |
//! |---------|---------|
//! | quote, verb speaker | `"Go," said Laird` |
//! | quote, speaker verb | `"Go," Laird said` / `"Go," the fox barked` |
//! | speaker verb, quote | `Laird said, "Go."` |
//! | subject ... verb, quote | `the hired man took a swipe, saying, "Go."` |

use crate::doc::{Doc, EntityLabel, Tag};
use crate::lexicon::{self, contains};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Pronouns that can be the subject of a speech verb.
const SUBJECT_PRONOUNS: &[&str] = &["i", "he", "she", "we", "they", "it", "xe", "ze", "fae"];

/// A quoted passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// Opening quote mark
    pub open: usize,
    /// End (exclusive) of the quoted words; the closing mark when `closed`
    pub end: usize,
    /// A closing mark was found before the paragraph ended
    pub closed: bool,
}

impl Quotation {
    /// Token range of the quoted words, marks excluded.
    #[must_use]
    pub fn content(&self) -> Range<usize> {
        self.open + 1..self.end
    }

    /// True if `token` is quoted or is one of the marks.
    #[must_use]
    pub fn covers(&self, token: usize) -> bool {
        let last = if self.closed { self.end } else { self.end.saturating_sub(1) };
        (self.open..=last).contains(&token)
    }
}

/// A quotation with its speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// The quote
    pub quote: Quotation,
    /// Token standing for the speaker: a name's head, a pronoun or a noun head
    pub speaker: usize,
    /// The speech verb, lowercased
    pub verb: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Open,
    Close,
    Either,
}

fn quote_mark(text: &str) -> Option<Mark> {
    match text {
        "\"" => Some(Mark::Either),
        "\u{201c}" => Some(Mark::Open),
        "\u{201d}" => Some(Mark::Close),
        _ => None,
    }
}

/// All quotations, in document order.
#[must_use]
pub fn quotations(doc: &Doc) -> Vec<Quotation> {
    let mut out = Vec::new();
    let mut open: Option<usize> = None;

    for token in doc.tokens() {
        let i = token.index;
        match (quote_mark(&token.text), open) {
            (Some(Mark::Open | Mark::Either), None) => open = Some(i),
            (Some(Mark::Close | Mark::Either), Some(o)) => {
                out.push(Quotation {
                    open: o,
                    end: i,
                    closed: true,
                });
                open = None;
            }
            (Some(Mark::Open), Some(o)) => {
                out.push(Quotation {
                    open: o,
                    end: i,
                    closed: false,
                });
                open = Some(i);
            }
            _ => {}
        }
        if let Some(o) = open {
            if token.ends_paragraph() {
                out.push(Quotation {
                    open: o,
                    end: i + 1,
                    closed: false,
                });
                open = None;
            }
        }
    }
    if let Some(o) = open {
        out.push(Quotation {
            open: o,
            end: doc.len(),
            closed: false,
        });
    }
    out
}

/// Every quotation that has a speaker.
#[must_use]
pub fn attributions(doc: &Doc) -> Vec<Attribution> {
    quotations(doc)
        .into_iter()
        .filter_map(|q| attribute(doc, q))
        .collect()
}

/// Speaker and speech verb of one quotation, if the text names them.
#[must_use]
pub fn attribute(doc: &Doc, quote: Quotation) -> Option<Attribution> {
    let (speaker, verb) = after_quote(doc, &quote).or_else(|| before_quote(doc, &quote))?;
    Some(Attribution {
        quote,
        speaker,
        verb: doc[verb].lower().to_string(),
    })
}

fn is_speech_verb(doc: &Doc, i: usize) -> bool {
    doc.token(i)
        .is_some_and(|t| contains(lexicon::SPEECH_VERBS, t.lower()))
}

/// `"..." said Laird` / `"..." Laird said`.
fn after_quote(doc: &Doc, quote: &Quotation) -> Option<(usize, usize)> {
    if !quote.closed {
        return None;
    }
    let mut k = quote.end + 1;
    if doc.token(k).is_some_and(|t| t.text == ",") {
        k += 1;
    }
    if is_speech_verb(doc, k) {
        let (speaker, _) = speaker_from(doc, k + 1)?;
        return Some((speaker, k));
    }
    let (speaker, next) = speaker_from(doc, k)?;
    is_speech_verb(doc, next).then_some((speaker, next))
}

/// `Laird said, "..."`, or the subject of the sentence when only the verb is
/// next to the quote.
fn before_quote(doc: &Doc, quote: &Quotation) -> Option<(usize, usize)> {
    let mut j = quote.open.checked_sub(1)?;
    if matches!(doc[j].text.as_str(), "," | ":") {
        j = j.checked_sub(1)?;
    }
    if !is_speech_verb(doc, j) {
        return None;
    }
    if let Some(prev) = j.checked_sub(1) {
        if let Some(speaker) = speaker_ending_at(doc, prev) {
            return Some((speaker, j));
        }
    }
    let sentence = doc.sentence_of(j)?;
    let subject = (sentence.start..j).find_map(|i| speaker_ending_at(doc, i))?;
    Some((subject, j))
}

/// A speaker phrase starting at `k`: its head and the token after it.
fn speaker_from(doc: &Doc, k: usize) -> Option<(usize, usize)> {
    let token = doc.token(k)?;
    if token.tag == Tag::Pronoun && contains(SUBJECT_PRONOUNS, token.lower()) {
        return Some((k, k + 1));
    }
    if token.tag == Tag::ProperNoun {
        let entity = doc.entity_at(k)?;
        return Some((entity.head(), entity.end));
    }
    let determiner = token.tag == Tag::Determiner || token.morph.possessive;
    if !determiner {
        return None;
    }
    let mut head = k + 1;
    while doc.token(head).is_some_and(|t| t.tag == Tag::Adjective) {
        head += 1;
    }
    while doc.token(head + 1).is_some_and(|t| t.tag == Tag::Noun) {
        head += 1;
    }
    speaker_noun(doc, head).then_some((head, head + 1))
}

/// Head of a speaker phrase that ends at token `i`.
fn speaker_ending_at(doc: &Doc, i: usize) -> Option<usize> {
    let token = doc.token(i)?;
    match token.tag {
        Tag::Pronoun => contains(SUBJECT_PRONOUNS, token.lower()).then_some(i),
        Tag::ProperNoun => doc
            .entity_at(i)
            .filter(|e| e.head() == i && e.label == EntityLabel::Person)
            .map(|e| e.head()),
        Tag::Noun => {
            let next_is_noun = doc.token(i + 1).is_some_and(|t| t.tag == Tag::Noun);
            (!next_is_noun && speaker_noun(doc, i)).then_some(i)
        }
        _ => None,
    }
}

fn speaker_noun(doc: &Doc, i: usize) -> bool {
    doc.token(i).is_some_and(|t| {
        let lemma = lexicon::lemma(t.lower());
        t.tag == Tag::Noun && (lexicon::is_person_noun(&lemma) || lexicon::is_animal_noun(&lemma))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;

    fn doc(text: &str) -> Doc {
        Pipeline::load("en_literary").unwrap().process(text).unwrap()
    }

    fn speakers(text: &str) -> Vec<(String, String)> {
        let doc = doc(text);
        attributions(&doc)
            .into_iter()
            .map(|a| (doc[a.speaker].text.clone(), a.verb))
            .collect()
    }

    fn pair(speaker: &str, verb: &str) -> (String, String) {
        (speaker.to_string(), verb.to_string())
    }

    #[test]
    fn quotes_pair_up() {
        let doc = doc("\"Stop,\" he said. She laughed. \u{201c}Why?\u{201d}");
        let quotes = quotations(&doc);
        assert_eq!(quotes.len(), 2);
        assert!(quotes.iter().all(|q| q.closed));
        assert_eq!(doc.span_text(quotes[0].content().start, quotes[0].content().end), "Stop,");
        assert_eq!(doc[quotes[1].end].text, "\u{201d}");
    }

    #[test]
    fn open_quote_ends_with_paragraph() {
        let doc = doc("\"It was cold.\n\nThe fox slept.");
        let quotes = quotations(&doc);
        assert_eq!(quotes.len(), 1);
        assert!(!quotes[0].closed);
        assert_eq!(doc.span_text(quotes[0].content().start, quotes[0].content().end), "It was cold.");
        assert!(!quotes[0].covers(quotes[0].end));
    }

    #[test]
    fn verb_then_speaker() {
        assert_eq!(
            speakers("\"Look at the foxes,\" said Laird."),
            [pair("Laird", "said")]
        );
        assert_eq!(
            speakers("\"Go away,\" growled the old dog."),
            [pair("dog", "growled")]
        );
    }

    #[test]
    fn speaker_then_verb() {
        assert_eq!(
            speakers("\"It is late,\" she whispered."),
            [pair("she", "whispered")]
        );
    }

    #[test]
    fn speaker_before_quote() {
        assert_eq!(
            speakers("Henry Bailey said, \"Christmas present!\""),
            [pair("Bailey", "said")]
        );
        assert_eq!(
            speakers("The hired man took a swipe at me, saying, \"Christmas present!\""),
            [pair("man", "saying")]
        );
    }

    #[test]
    fn unattributed_quotes() {
        assert!(speakers("\"Christmas present!\" It was late.").is_empty());
        assert!(speakers("It was \"funny\" to him.").is_empty());
    }
}
