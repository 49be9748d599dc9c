//! The annotated document a pipeline produces.
//!
//! A [`Doc`] starts as a token list straight out of the tokenizer. Each
//! pipeline component then fills in one layer: sentence boundaries, tags and
//! morphology, named entities, coreference chains, the character roster,
//! story segments, style measurements.
//! [`Doc::has_annotation`] tells which layers are present.

use crate::chains::CorefChains;
use crate::components::characters::Character;
use crate::components::linguistic::TextFeatures;
use crate::components::segmenter::Segment;
use crate::offset::TextSpan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, Range};

// =============================================================================
// Token-level annotation
// =============================================================================

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tag {
    /// Common noun
    Noun,
    /// Proper noun
    ProperNoun,
    /// Pronoun
    Pronoun,
    /// Determiner / article
    Determiner,
    /// Lexical verb
    Verb,
    /// Auxiliary or copula
    Auxiliary,
    /// Adjective
    Adjective,
    /// Adverb
    Adverb,
    /// Preposition
    Adposition,
    /// Coordinating or subordinating conjunction
    Conjunction,
    /// Numeral
    Number,
    /// Punctuation
    Punct,
    /// Anything else, including untagged tokens
    #[default]
    Other,
}

impl Tag {
    /// Short label in the usual universal-dependencies style.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Tag::Noun => "NOUN",
            Tag::ProperNoun => "PROPN",
            Tag::Pronoun => "PRON",
            Tag::Determiner => "DET",
            Tag::Verb => "VERB",
            Tag::Auxiliary => "AUX",
            Tag::Adjective => "ADJ",
            Tag::Adverb => "ADV",
            Tag::Adposition => "ADP",
            Tag::Conjunction => "CONJ",
            Tag::Number => "NUM",
            Tag::Punct => "PUNCT",
            Tag::Other => "X",
        }
    }

    /// Nouns of either kind.
    #[must_use]
    pub fn is_nominal(&self) -> bool {
        matches!(self, Tag::Noun | Tag::ProperNoun)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    /// I, we
    First,
    /// you
    Second,
    /// he, she, it, they
    Third,
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Number {
    /// One referent
    Singular,
    /// Several referents
    Plural,
}

/// Grammatical gender, as signalled by pronouns, a few gendered nouns and titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// he, father
    Masculine,
    /// she, mother
    Feminine,
    /// it
    Neuter,
}

/// Morphological features filled in by the tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Morph {
    /// Person (pronouns only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    /// Number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    /// Gender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Possessive form (his, their, 's)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub possessive: bool,
    /// Reflexive form (himself)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reflexive: bool,
}

/// One token of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the document's token list
    pub index: usize,
    /// Surface text
    pub text: String,
    /// Whitespace between this token and the next
    pub whitespace: String,
    /// Location in the source text
    pub span: TextSpan,
    /// Sentence this token belongs to
    pub sentence: usize,
    /// True for the first token of a sentence
    pub is_sent_start: bool,
    /// Part-of-speech tag
    pub tag: Tag,
    /// Morphology
    pub morph: Morph,
    lower: String,
}

impl Token {
    /// Create an untagged token.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>, span: TextSpan) -> Self {
        let text = text.into();
        let lower = text.to_lowercase().replace('\u{2019}', "'");
        Self {
            index,
            text,
            whitespace: String::new(),
            span,
            sentence: 0,
            is_sent_start: index == 0,
            tag: Tag::Other,
            morph: Morph::default(),
            lower,
        }
    }

    /// Lowercased text with typographic apostrophes normalized.
    #[must_use]
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// True if the first character is uppercase.
    #[must_use]
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    /// True if the token is made only of punctuation/symbol characters.
    #[must_use]
    pub fn is_punct(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| !c.is_alphanumeric())
    }

    /// True if whitespace after this token contains a blank line.
    #[must_use]
    pub fn ends_paragraph(&self) -> bool {
        self.whitespace.matches('\n').count() >= 2
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A sentence as a half-open token range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence number
    pub index: usize,
    /// First token (inclusive)
    pub start: usize,
    /// Last token (exclusive)
    pub end: usize,
}

impl Sentence {
    /// Token range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if the sentence has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Named entities
// =============================================================================

/// Label of a named-entity span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    /// People and named animals
    Person,
    /// Companies, institutions
    Organization,
    /// Places
    Location,
    /// Other proper names (holidays, nationalities)
    Misc,
}

impl EntityLabel {
    /// Short CoNLL-style label.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PER",
            EntityLabel::Organization => "ORG",
            EntityLabel::Location => "LOC",
            EntityLabel::Misc => "MISC",
        }
    }
}

/// A proper-name span over tokens `start..end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    /// First token (inclusive)
    pub start: usize,
    /// Last token (exclusive)
    pub end: usize,
    /// Entity label
    pub label: EntityLabel,
    /// Surface text
    pub text: String,
    /// Title in front of the span (`Mr.`), not part of it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl NamedEntity {
    /// Gender signalled by the title, if there is one and it is gendered.
    #[must_use]
    pub fn title_gender(&self) -> Option<Gender> {
        self.title
            .as_deref()
            .and_then(|t| crate::lexicon::title_gender(&t.to_lowercase()))
    }

    /// Title and name, `Mrs. Smith`.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} {}", title, self.text),
            None => self.text.clone(),
        }
    }

    /// Index of the head (last) token.
    #[must_use]
    pub fn head(&self) -> usize {
        self.end.saturating_sub(1)
    }

    /// True if `token` falls inside this span.
    #[must_use]
    pub fn contains(&self, token: usize) -> bool {
        (self.start..self.end).contains(&token)
    }
}

// =============================================================================
// Doc
// =============================================================================

/// An annotated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
    entities: Vec<NamedEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coref_chains: Option<CorefChains>,
    #[serde(skip_serializing_if = "Option::is_none")]
    characters: Option<Vec<Character>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    segments: Option<Vec<Segment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<TextFeatures>,
    processed_by: Vec<String>,
}

impl Doc {
    /// Create a document from tokenizer output.
    ///
    /// Until a sentence splitter runs, the whole document is one sentence.
    #[must_use]
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        let sentences = if tokens.is_empty() {
            Vec::new()
        } else {
            vec![Sentence {
                index: 0,
                start: 0,
                end: tokens.len(),
            }]
        };
        Self {
            text: text.into(),
            tokens,
            sentences,
            entities: Vec::new(),
            coref_chains: None,
            characters: None,
            segments: None,
            features: None,
            processed_by: Vec::new(),
        }
    }

    /// Source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the document has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token by index, `None` when out of range.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// All tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Mutable tokens, for components.
    pub fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Sentences.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Replace sentence boundaries and update each token's sentence index.
    pub fn set_sentences(&mut self, sentences: Vec<Sentence>) {
        for sentence in &sentences {
            for (offset, token) in self.tokens[sentence.range()].iter_mut().enumerate() {
                token.sentence = sentence.index;
                token.is_sent_start = offset == 0;
            }
        }
        self.sentences = sentences;
    }

    /// Sentence containing `token`.
    #[must_use]
    pub fn sentence_of(&self, token: usize) -> Option<&Sentence> {
        self.tokens
            .get(token)
            .and_then(|t| self.sentences.get(t.sentence))
    }

    /// Named entities, in document order.
    #[must_use]
    pub fn entities(&self) -> &[NamedEntity] {
        &self.entities
    }

    /// Replace the named entities.
    pub fn set_entities(&mut self, mut entities: Vec<NamedEntity>) {
        entities.sort_by_key(|e| (e.start, e.end));
        self.entities = entities;
    }

    /// Entity covering `token`, if any.
    #[must_use]
    pub fn entity_at(&self, token: usize) -> Option<&NamedEntity> {
        self.entities.iter().find(|e| e.contains(token))
    }

    /// Text covered by tokens `start..end`, as it appears in the source.
    #[must_use]
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        match (self.tokens.get(start), end.checked_sub(1).and_then(|e| self.tokens.get(e))) {
            (Some(first), Some(last)) if start < end => self
                .text
                .get(first.span.byte_start..last.span.byte_end)
                .unwrap_or(""),
            _ => "",
        }
    }

    /// Coreference chains, once the `coref` component has run.
    #[must_use]
    pub fn coref_chains(&self) -> Option<&CorefChains> {
        self.coref_chains.as_ref()
    }

    /// Store coreference chains.
    pub fn set_coref_chains(&mut self, chains: CorefChains) {
        self.coref_chains = Some(chains);
    }

    /// Character roster, once the `characters` component has run.
    #[must_use]
    pub fn characters(&self) -> Option<&[Character]> {
        self.characters.as_deref()
    }

    /// Store the character roster.
    pub fn set_characters(&mut self, characters: Vec<Character>) {
        self.characters = Some(characters);
    }

    /// Story segments, once the `segmenter` component has run.
    #[must_use]
    pub fn segments(&self) -> Option<&[Segment]> {
        self.segments.as_deref()
    }

    /// Store story segments.
    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.segments = Some(segments);
    }

    /// Style measurements, once the `linguistic` component has run.
    #[must_use]
    pub fn features(&self) -> Option<&TextFeatures> {
        self.features.as_ref()
    }

    /// Store style measurements.
    pub fn set_features(&mut self, features: TextFeatures) {
        self.features = Some(features);
    }

    /// Record that a component has processed this document.
    pub fn mark_processed(&mut self, component: &str) {
        self.processed_by.push(component.to_string());
    }

    /// True if the named component has run on this document.
    #[must_use]
    pub fn has_annotation(&self, component: &str) -> bool {
        self.processed_by.iter().any(|c| c == component)
    }

    /// Names of the components that ran, in order.
    #[must_use]
    pub fn processed_by(&self) -> &[String] {
        &self.processed_by
    }
}

impl Index<usize> for Doc {
    type Output = Token;

    /// Panics when out of range, like slice indexing. Use [`Doc::token`] for
    /// a checked lookup.
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}
