//! Surface style measurements: sentence length, clause density,
//! readability, questions and exclamations, share of quoted speech.
//!
//! Readability uses the Flesch formulas with a vowel-group syllable count
//! (`[aeiouy]+`, a silent final `e` dropped on words longer than three
//! letters, never fewer than one syllable per word).

use super::dialogue;
use crate::doc::{Doc, Tag, Token};
use crate::lexicon::contains;
use crate::pipeline::Component;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "nor", "for", "yet", "so", "because", "although", "since", "unless",
    "while",
];

/// Sentence-initial verbs read as commands.
const IMPERATIVES: &[&str] = &[
    "go", "come", "look", "wait", "stop", "get", "make", "take", "run", "tell", "listen", "stand",
    "stay", "move", "let", "try",
];

const INTENSIFIERS: &[&str] = &[
    "very", "extremely", "incredibly", "absolutely", "completely", "totally", "utterly",
    "entirely", "thoroughly", "quite", "rather", "somewhat",
];

/// Overall register, from sentence length, clause density and grade level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingStyle {
    /// Short sentences, few clauses
    Conversational,
    /// Mid-length sentences
    Professional,
    /// Long, clause-heavy sentences
    Academic,
}

impl WritingStyle {
    fn from_complexity(complexity: f64) -> Self {
        if complexity > 7.0 {
            WritingStyle::Academic
        } else if complexity > 5.0 {
            WritingStyle::Professional
        } else {
            WritingStyle::Conversational
        }
    }
}

/// Style measurements of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextFeatures {
    /// Sentence count
    pub sentences: usize,
    /// Word count, punctuation excluded
    pub words: usize,
    /// Comma count
    pub commas: usize,
    /// Coordinating and subordinating conjunctions
    pub conjunctions: usize,
    /// Sentences ending in `?`
    pub questions: usize,
    /// Sentences ending in `!`
    pub exclamations: usize,
    /// Sentences opening with a command verb
    pub imperatives: usize,
    /// `very`, `extremely`, ...
    pub intensifiers: usize,
    /// Words repeated back to back (`very very`)
    pub repetitions: usize,
    /// Syllables over all words
    pub syllables: usize,
    /// Words per sentence
    pub avg_sentence_length: f64,
    /// Letters per word
    pub avg_word_length: f64,
    /// Commas and conjunctions per sentence
    pub clause_complexity: f64,
    /// Share of words inside quotation marks
    pub dialogue_ratio: f64,
    /// Flesch-Kincaid grade level
    pub flesch_kincaid_grade: f64,
    /// Flesch reading ease, higher is easier
    pub flesch_reading_ease: f64,
    /// Mean of sentence length, clause and grade scores, each capped at 10
    pub complexity: f64,
    /// Register; `None` for a text without words
    pub style: Option<WritingStyle>,
}

impl fmt::Display for TextFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} sentences, {} words, {:.1} words/sentence",
            self.sentences, self.words, self.avg_sentence_length
        )?;
        writeln!(
            f,
            "grade {:.1}, reading ease {:.1}, clause complexity {:.2}",
            self.flesch_kincaid_grade, self.flesch_reading_ease, self.clause_complexity
        )?;
        writeln!(
            f,
            "{} questions, {} exclamations, {} imperatives, dialogue {:.0}%",
            self.questions,
            self.exclamations,
            self.imperatives,
            self.dialogue_ratio * 100.0
        )?;
        if let Some(style) = self.style {
            writeln!(f, "style: {:?} ({:.1})", style, self.complexity)?;
        }
        Ok(())
    }
}

/// Syllables in one word.
#[must_use]
pub fn syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut groups = 0;
    let mut in_vowels = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !in_vowels {
            groups += 1;
        }
        in_vowels = vowel;
    }
    if lower.ends_with('e') && lower.chars().count() > 3 && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}

fn is_word(token: &Token) -> bool {
    token.text.chars().any(char::is_alphanumeric)
}

/// The `linguistic` pipe.
#[derive(Debug, Clone, Default)]
pub struct LinguisticAnalyzer;

impl LinguisticAnalyzer {
    /// Create an analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Measure a document with sentence boundaries.
    #[must_use]
    pub fn analyze(&self, doc: &Doc) -> TextFeatures {
        let mut features = TextFeatures::default();
        let words: Vec<&Token> = doc.tokens().iter().filter(|t| is_word(t)).collect();
        if words.is_empty() {
            return features;
        }

        features.sentences = doc.sentences().len().max(1);
        features.words = words.len();
        features.commas = doc.tokens().iter().filter(|t| t.text == ",").count();
        features.conjunctions = words.iter().filter(|t| contains(CONJUNCTIONS, t.lower())).count();
        features.intensifiers = words.iter().filter(|t| contains(INTENSIFIERS, t.lower())).count();
        features.repetitions = words.windows(2).filter(|w| w[0].lower() == w[1].lower()).count();
        features.syllables = words.iter().map(|t| syllables(&t.text)).sum();

        for sentence in doc.sentences() {
            let tokens = &doc.tokens()[sentence.range()];
            let last = tokens
                .iter()
                .rev()
                .find(|t| !matches!(t.text.as_str(), "\"" | "\u{201d}" | ")"));
            match last.map(|t| t.text.as_str()) {
                Some("?") => features.questions += 1,
                Some("!") => features.exclamations += 1,
                _ => {}
            }
            let first = tokens.iter().find(|t| is_word(t));
            if first.is_some_and(|t| contains(IMPERATIVES, t.lower()) && t.tag != Tag::Noun) {
                features.imperatives += 1;
            }
        }

        let quotes = dialogue::quotations(doc);
        let quoted = words
            .iter()
            .filter(|t| quotes.iter().any(|q| q.content().contains(&t.index)))
            .count();

        let sentences = features.sentences as f64;
        let word_count = features.words as f64;
        let letters: usize = words
            .iter()
            .map(|t| t.text.chars().filter(|c| c.is_alphabetic()).count())
            .sum();
        features.avg_sentence_length = word_count / sentences;
        features.avg_word_length = letters as f64 / word_count;
        features.clause_complexity = (features.commas + features.conjunctions) as f64 / sentences;
        features.dialogue_ratio = quoted as f64 / word_count;

        let per_word = features.syllables as f64 / word_count;
        features.flesch_kincaid_grade =
            0.39 * features.avg_sentence_length + 11.8 * per_word - 15.59;
        features.flesch_reading_ease =
            206.835 - 1.015 * features.avg_sentence_length - 84.6 * per_word;

        let length_score = (features.avg_sentence_length / 3.0).min(10.0);
        let clause_score = (features.clause_complexity * 3.0).min(10.0);
        let grade_score = (features.flesch_kincaid_grade / 1.5).clamp(0.0, 10.0);
        features.complexity = (length_score + clause_score + grade_score) / 3.0;
        features.style = Some(WritingStyle::from_complexity(features.complexity));
        features
    }
}

impl Component for LinguisticAnalyzer {
    fn name(&self) -> &'static str {
        "linguistic"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["senter"]
    }

    fn process(&self, doc: &mut Doc) -> Result<()> {
        if !doc.has_annotation("senter") {
            return Err(Error::pipeline("linguistic needs sentence boundaries"));
        }
        let features = self.analyze(doc);
        log::debug!(
            "linguistic: {} words, grade {:.1}",
            features.words,
            features.flesch_kincaid_grade
        );
        doc.set_features(features);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;

    fn features(text: &str) -> TextFeatures {
        let mut nlp = Pipeline::load("en_literary").unwrap();
        nlp.add_pipe("linguistic").unwrap();
        nlp.process(text).unwrap().features().cloned().unwrap()
    }

    #[test]
    fn syllable_counts() {
        assert_eq!(syllables("fox"), 1);
        assert_eq!(syllables("farmer"), 2);
        assert_eq!(syllables("cellar"), 2);
        assert_eq!(syllables("the"), 1);
        assert_eq!(syllables("rhythm"), 1);
        assert_eq!(syllables("came"), 1);
    }

    #[test]
    fn counts_and_averages() {
        let f = features("Look at the foxes! Are they very, very silver? He laughed.");
        assert_eq!(f.sentences, 3);
        assert_eq!(f.words, 11);
        assert_eq!(f.commas, 1);
        assert_eq!(f.questions, 1);
        assert_eq!(f.exclamations, 1);
        assert_eq!(f.imperatives, 1);
        assert_eq!(f.intensifiers, 2);
        assert_eq!(f.repetitions, 1);
        assert!((f.avg_sentence_length - 11.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn dialogue_share() {
        let f = features("\"Go away,\" he said.");
        assert_eq!(f.words, 4);
        assert!((f.dialogue_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn short_plain_sentences_read_as_conversational() {
        let f = features("I sat on the step. My father worked. He was tired.");
        assert_eq!(f.style, Some(WritingStyle::Conversational));
        assert!(f.flesch_reading_ease > 80.0);
    }

    #[test]
    fn long_clausal_sentences_read_as_academic() {
        let f = features(
            "Notwithstanding considerable institutional reluctance, the administration, \
             which had previously demonstrated remarkable organizational flexibility, \
             ultimately reconsidered its comprehensive methodological assumptions, \
             although several representatives, particularly those responsible for \
             interdepartmental communication, remained unconvinced.",
        );
        assert_eq!(f.style, Some(WritingStyle::Academic));
    }

    #[test]
    fn empty_text() {
        let f = features("");
        assert_eq!(f.words, 0);
        assert_eq!(f.style, None);
    }

    #[test]
    fn requires_sentences() {
        let mut doc = crate::tokenizer::Tokenizer::new().tokenize("He left.");
        assert!(LinguisticAnalyzer::new().process(&mut doc).is_err());
    }
}
