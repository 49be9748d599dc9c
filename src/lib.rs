//! # litcoref
//!
//! Coreference chains for English prose.
//!
//! - **Pipeline**: tokenizer plus named components (`senter`, `tagger`,
//!   `ner`, `coref`, `characters`, `segmenter`, `linguistic`), loaded from
//!   presets
//! - **Coreference**: rule-based chains over pronouns, names and noun phrases
//! - **Characters**: the people and animals a text talks about, how they
//!   relate and what they say
//! - **Story shape**: narrative stages per paragraph, readability and style
//! - **CLI**: the `litcoref` binary; its commands live in [`cli`]
//!
//! ## Quick Start
//!
//! ```rust
//! use litcoref::{Pipeline, sample};
//!
//! let mut nlp = Pipeline::load("en_literary")?;
//! nlp.add_pipe("coref")?;
//!
//! let doc = nlp.process(sample::EXCERPT)?;
//! let chains = doc.coref_chains().expect("coref ran");
//! chains.print();
//!
//! match chains.resolve(&doc, sample::DEMO_TOKEN) {
//!     Some(resolution) => println!("{}", resolution),
//!     None => println!("None"),
//! }
//! # Ok::<(), litcoref::Error>(())
//! ```
//!
//! ## Design
//!
//! - **Rule-based**: word lists, suffixes and capitalization; no model files
//! - **Layered**: every component fills one annotation layer of a [`Doc`]
//! - **Pluggable**: custom [`Component`]s and [`CoreferenceResolver`]s slot in
//! - **No gender from names**: gender comes from pronouns, gendered nouns and
//!   titles (`Mrs.`), never from a first name

#![warn(missing_docs)]

pub mod chains;
pub mod cli;
pub mod components;
pub mod config;
pub mod doc;
mod error;
pub mod lang;
pub mod lexicon;
pub mod offset;
pub mod pipeline;
pub mod sample;
pub mod tokenizer;

pub use chains::{Chain, CorefChains, Mention, MentionKind, Resolution};
pub use components::{
    Character, CharacterKind, CorefConfig, CoreferenceResolver, RuleBasedResolver, Segment,
    SegmentKind, TextFeatures, WritingStyle,
};
pub use config::{Config, OutputFormat};
pub use doc::{Doc, EntityLabel, NamedEntity, Sentence, Tag, Token};
pub use error::{Error, Result};
pub use pipeline::{Component, Pipeline};

/// Preset loaded when nothing else is configured.
pub const DEFAULT_PIPELINE: &str = "en_literary";
