//! Pipeline components.
//!
//! Each component implements [`Component`](crate::pipeline::Component) and
//! fills in one annotation layer of a [`Doc`](crate::Doc).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ characters  roster, relations, attributed speech    │  requires coref
//! ├─────────────────────────────────────────────────────┤
//! │ coref       mention detection + rule-based linking  │  requires tagger
//! ├─────────────────────────────────────────────────────┤
//! │ ner         proper-name spans (PER/ORG/LOC/MISC)    │  requires tagger
//! ├─────────────────────────────────────────────────────┤
//! │ tagger      part of speech + pronoun morphology     │  requires senter
//! ├─────────────────────────────────────────────────────┤
//! │ linguistic  sentence length, readability, style     │  requires senter
//! ├─────────────────────────────────────────────────────┤
//! │ segmenter   paragraphs grouped into story stages    │
//! ├─────────────────────────────────────────────────────┤
//! │ senter      sentence boundaries                     │
//! ├─────────────────────────────────────────────────────┤
//! │ (tokenizer) words, clitics, punctuation             │  always runs
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! [`dialogue`] is not a pipe: it finds quotations and their speakers for
//! `characters` and `linguistic`.
//!
//! # Quick Start
//!
//! ```rust
//! use litcoref::Pipeline;
//!
//! let mut nlp = Pipeline::load("en_literary").unwrap();
//! nlp.add_pipe("coref").unwrap();
//! let doc = nlp.process("My mother was tired. She slept.").unwrap();
//! assert!(doc.coref_chains().is_some());
//! ```

pub mod characters;
pub mod coref;
pub mod dialogue;
pub mod linguistic;
pub mod mentions;
pub mod ner;
pub mod segmenter;
pub mod senter;
pub mod tagger;

pub use characters::{Character, CharacterKind, CharacterRoster, Relation, Relationship, Utterance};
pub use dialogue::{Attribution, Quotation};
pub use linguistic::{LinguisticAnalyzer, TextFeatures, WritingStyle};
pub use segmenter::{Segment, SegmentKind, StorySegmenter};
pub use coref::{CorefComponent, CorefConfig, CoreferenceResolver, RuleBasedResolver};
pub use ner::HeuristicNer;
pub use senter::SentenceSplitter;
pub use tagger::LexiconTagger;
