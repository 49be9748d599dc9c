//! Story segmentation: paragraphs grouped into narrative stages.
//!
//! Every paragraph (blank-line separated) is scored against five stages.
//! A cue phrase found anywhere in the paragraph adds 2; every cue word adds
//! 1.5. Stages are then weighted by where the paragraph sits in the story:
//!
//! | Stage | Weight | Where (0 = first paragraph, 1 = last) |
//! |-------|--------|---------------------------------------|
//! | introduction | 1.5 | before 0.2 |
//! | rising action | 1.2 | 0.1 to 0.6 |
//! | climax | 1.5 | 0.5 to 0.8 |
//! | falling action | 1.2 | 0.6 to 0.9 |
//! | conclusion | 1.5 | after 0.8 |
//!
//! A paragraph whose best score is 1 or less takes the stage of its
//! position. Neighbouring paragraphs of one stage merge, and a weak
//! paragraph wedged between two of the same stage is absorbed by them.
//! Texts of fewer than three paragraphs come back as one unsegmented span.

use crate::doc::{Doc, Token};
use crate::lexicon::contains;
use crate::pipeline::Component;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewer paragraphs than this are not segmented.
const MIN_PARAGRAPHS: usize = 3;
/// A best score at or under this falls back to position.
const MIN_SCORE: f64 = 1.0;
/// Score of a position-only guess.
const FALLBACK_SCORE: f64 = 0.5;
/// An isolated paragraph scoring this much keeps its own stage.
const KEEP_ISOLATED: f64 = 3.0;

/// Narrative stage of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Setting and people
    Introduction,
    /// Trouble starts
    RisingAction,
    /// Peak of the conflict
    Climax,
    /// Aftermath
    FallingAction,
    /// Ending and reflection
    Conclusion,
    /// Too short to segment
    Unsegmented,
}

impl SegmentKind {
    const STAGES: [SegmentKind; 5] = [
        SegmentKind::Introduction,
        SegmentKind::RisingAction,
        SegmentKind::Climax,
        SegmentKind::FallingAction,
        SegmentKind::Conclusion,
    ];

    /// Snake-case label.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            SegmentKind::Introduction => "introduction",
            SegmentKind::RisingAction => "rising_action",
            SegmentKind::Climax => "climax",
            SegmentKind::FallingAction => "falling_action",
            SegmentKind::Conclusion => "conclusion",
            SegmentKind::Unsegmented => "unsegmented",
        }
    }

    fn phrases(self) -> &'static [&'static [&'static str]] {
        match self {
            SegmentKind::Introduction => &[
                &["once", "upon", "a", "time"],
                &["in", "the", "beginning"],
                &["it", "all", "started"],
                &["long", "ago"],
                &["first"],
                &["initially"],
                &["at", "first"],
            ],
            SegmentKind::RisingAction => &[
                &["suddenly"],
                &["but", "then"],
                &["however"],
                &["until"],
                &["unexpectedly"],
                &["surprisingly"],
                &["began", "to"],
            ],
            SegmentKind::Climax => &[
                &["finally"],
                &["at", "last"],
                &["ultimate"],
                &["critical"],
                &["decisive"],
                &["crucial"],
                &["pinnacle"],
                &["culmination"],
            ],
            SegmentKind::FallingAction => &[
                &["after", "that"],
                &["following"],
                &["subsequently"],
                &["next"],
                &["later"],
                &["afterward"],
                &["soon", "after"],
            ],
            SegmentKind::Conclusion => &[
                &["finally"],
                &["in", "the", "end"],
                &["eventually"],
                &["at", "last"],
                &["ultimately"],
                &["in", "conclusion"],
                &["lastly"],
            ],
            SegmentKind::Unsegmented => &[],
        }
    }

    /// Word stems; a token starting with one counts as a cue.
    fn cues(self) -> &'static [&'static str] {
        match self {
            SegmentKind::Introduction => &[],
            SegmentKind::RisingAction => &[
                "conflict", "problem", "challenge", "difficult", "obstacle", "trouble", "dispute",
                "disagree", "worried", "concerned", "anxious", "nervous", "tense", "stressed",
                "afraid", "scared",
            ],
            SegmentKind::Climax => &[
                "shouted", "screamed", "yelled", "cried", "exclaimed", "exploded", "burst", "broke",
                "shattered", "crashed", "fought", "battled", "confronted", "faced", "challenged",
                "attacked", "defended", "struggled",
            ],
            SegmentKind::FallingAction => &[
                "solved", "resolved", "settled", "fixed", "handled", "managed", "addressed",
                "result", "outcome", "effect", "consequence", "aftermath", "impact", "reaction",
            ],
            SegmentKind::Conclusion => &[
                "ended", "finished", "completed", "concluded", "closed", "final", "learned",
                "realized", "understood", "recognized", "discovered",
            ],
            SegmentKind::Unsegmented => &[],
        }
    }

    fn position_weight(self, position: f64) -> f64 {
        let favoured = match self {
            SegmentKind::Introduction => position < 0.2,
            SegmentKind::RisingAction => position > 0.1 && position < 0.6,
            SegmentKind::Climax => position > 0.5 && position < 0.8,
            SegmentKind::FallingAction => position > 0.6 && position < 0.9,
            SegmentKind::Conclusion => position > 0.8,
            SegmentKind::Unsegmented => false,
        };
        match (favoured, self) {
            (false, _) => 1.0,
            (true, SegmentKind::RisingAction | SegmentKind::FallingAction) => 1.2,
            (true, _) => 1.5,
        }
    }

    fn by_position(position: f64) -> Self {
        if position < 0.2 {
            SegmentKind::Introduction
        } else if position < 0.4 {
            SegmentKind::RisingAction
        } else if position < 0.6 {
            SegmentKind::Climax
        } else if position < 0.8 {
            SegmentKind::FallingAction
        } else {
            SegmentKind::Conclusion
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A run of paragraphs in one narrative stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Stage
    pub kind: SegmentKind,
    /// Best paragraph score in the segment
    pub score: f64,
    /// First token (inclusive)
    pub start: usize,
    /// Last token (exclusive)
    pub end: usize,
    /// Paragraphs merged into the segment
    pub paragraphs: usize,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}..{}] {} paragraphs, score {:.1}",
            self.kind, self.start, self.end, self.paragraphs, self.score
        )
    }
}

/// The `segmenter` pipe.
#[derive(Debug, Clone, Default)]
pub struct StorySegmenter;

impl StorySegmenter {
    /// Create a segmenter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Segment a document.
    #[must_use]
    pub fn segment(&self, doc: &Doc) -> Vec<Segment> {
        let paragraphs = paragraphs(doc.tokens());
        if paragraphs.is_empty() {
            return Vec::new();
        }
        if paragraphs.len() < MIN_PARAGRAPHS {
            return vec![Segment {
                kind: SegmentKind::Unsegmented,
                score: 10.0,
                start: 0,
                end: doc.len(),
                paragraphs: paragraphs.len(),
            }];
        }

        let last = (paragraphs.len() - 1) as f64;
        let scored: Vec<Segment> = paragraphs
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| {
                let position = i as f64 / last;
                let (kind, score) = classify(&doc.tokens()[start..end], position);
                Segment {
                    kind,
                    score,
                    start,
                    end,
                    paragraphs: 1,
                }
            })
            .collect();
        smooth(scored)
    }
}

impl Component for StorySegmenter {
    fn name(&self) -> &'static str {
        "segmenter"
    }

    fn process(&self, doc: &mut Doc) -> Result<()> {
        let segments = self.segment(doc);
        log::debug!("segmenter: {} segments", segments.len());
        doc.set_segments(segments);
        Ok(())
    }
}

/// Token ranges of the paragraphs.
fn paragraphs(tokens: &[Token]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = 0;
    for token in tokens {
        if token.ends_paragraph() {
            out.push((start, token.index + 1));
            start = token.index + 1;
        }
    }
    if start < tokens.len() {
        out.push((start, tokens.len()));
    }
    out
}

fn classify(tokens: &[Token], position: f64) -> (SegmentKind, f64) {
    let mut best = (SegmentKind::Unsegmented, 0.0);
    for kind in SegmentKind::STAGES {
        let score = score(kind, tokens) * kind.position_weight(position);
        if score > best.1 {
            best = (kind, score);
        }
    }
    if best.1 > MIN_SCORE {
        best
    } else {
        (SegmentKind::by_position(position), FALLBACK_SCORE)
    }
}

fn score(kind: SegmentKind, tokens: &[Token]) -> f64 {
    let words: Vec<&str> = tokens.iter().map(Token::lower).collect();
    let phrases = kind
        .phrases()
        .iter()
        .filter(|phrase| words.windows(phrase.len()).any(|w| w == **phrase))
        .count();
    let cues = match kind {
        SegmentKind::Introduction => introductions(tokens),
        _ => words
            .iter()
            .filter(|w| kind.cues().iter().any(|cue| w.starts_with(cue)))
            .count(),
    };
    2.0 * phrases as f64 + 1.5 * cues as f64
}

/// `named Laird`, `called Henry`, `in the cellar`, `at a farm`.
fn introductions(tokens: &[Token]) -> usize {
    let mut count = 0;
    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1);
        match token.lower() {
            "named" | "called" => {
                if next.is_some_and(Token::is_capitalized) {
                    count += 1;
                }
            }
            "in" | "at" => {
                let article = next.is_some_and(|t| contains(&["the", "a"], t.lower()));
                let noun = tokens
                    .get(i + 2)
                    .is_some_and(|t| t.text.starts_with(|c: char| c.is_ascii_lowercase()));
                if article && noun {
                    count += 1;
                }
            }
            _ => {}
        }
    }
    count
}

fn smooth(scored: Vec<Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    for (i, segment) in scored.iter().enumerate() {
        let Some(current) = out.last_mut() else {
            out.push(segment.clone());
            continue;
        };
        let isolated = scored.get(i + 1).is_some_and(|n| n.kind == current.kind);
        if segment.kind == current.kind {
            current.score = current.score.max(segment.score);
        } else if !(isolated && segment.score < KEEP_ISOLATED) {
            out.push(segment.clone());
            continue;
        }
        current.end = segment.end;
        current.paragraphs += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;

    fn kinds(text: &str) -> Vec<SegmentKind> {
        let doc = Tokenizer::new().tokenize(text);
        StorySegmenter::new()
            .segment(&doc)
            .iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn short_texts_are_unsegmented() {
        assert_eq!(kinds("One paragraph.\n\nTwo."), [SegmentKind::Unsegmented]);
        assert!(kinds("").is_empty());
    }

    #[test]
    fn stages_from_cues() {
        let text = "Once upon a time a farmer named Laird lived in the hills.\n\n\
                    Suddenly there was trouble. He was worried and afraid.\n\n\
                    He shouted and fought and struggled at last.\n\n\
                    After that the problem was resolved and settled.\n\n\
                    In the end he learned and realized what mattered.";
        assert_eq!(
            kinds(text),
            [
                SegmentKind::Introduction,
                SegmentKind::RisingAction,
                SegmentKind::Climax,
                SegmentKind::FallingAction,
                SegmentKind::Conclusion,
            ]
        );
    }

    #[test]
    fn position_decides_without_cues() {
        let text = "A.\n\nB.\n\nC.\n\nD.\n\nE.";
        assert_eq!(
            kinds(text),
            [
                SegmentKind::Introduction,
                SegmentKind::RisingAction,
                SegmentKind::Climax,
                SegmentKind::FallingAction,
                SegmentKind::Conclusion,
            ]
        );
    }

    #[test]
    fn weak_isolated_paragraph_is_absorbed() {
        let scored = vec![
            Segment { kind: SegmentKind::Climax, score: 4.0, start: 0, end: 3, paragraphs: 1 },
            Segment { kind: SegmentKind::RisingAction, score: 1.8, start: 3, end: 6, paragraphs: 1 },
            Segment { kind: SegmentKind::Climax, score: 3.0, start: 6, end: 9, paragraphs: 1 },
        ];
        let smoothed = smooth(scored);
        assert_eq!(smoothed.len(), 1);
        assert_eq!(smoothed[0].end, 9);
        assert_eq!(smoothed[0].paragraphs, 3);
        assert_eq!(smoothed[0].score, 4.0);
    }

    #[test]
    fn segments_cover_tokens() {
        let doc = Tokenizer::new().tokenize("I sat.\n\nHe came.\n\nWe left.\n\nIt ended.");
        let segments = StorySegmenter::new().segment(&doc);
        assert_eq!(segments[0].start, 0);
        assert_eq!(segments.last().unwrap().end, doc.len());
        assert!(segments.windows(2).all(|w| w[0].end == w[1].start));
    }
}
