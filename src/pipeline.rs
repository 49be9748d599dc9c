//! Pipeline assembly and execution.
//!
//! A [`Pipeline`] is a tokenizer followed by an ordered list of
//! [`Component`]s. Presets are loaded by name, further components are added
//! by factory name:
//!
//! ```rust
//! use litcoref::Pipeline;
//!
//! let mut nlp = Pipeline::load("en_literary")?;
//! nlp.add_pipe("coref")?;
//! assert_eq!(nlp.pipe_names(), ["senter", "tagger", "ner", "coref"]);
//!
//! let doc = nlp.process("My father was a farmer. He raised foxes.")?;
//! let chains = doc.coref_chains().expect("coref ran");
//! assert_eq!(chains.to_string().trim(), "0: father(1), He(6)");
//! # Ok::<(), litcoref::Error>(())
//! ```

use crate::components::characters::CharacterRoster;
use crate::components::coref::CorefComponent;
use crate::components::linguistic::LinguisticAnalyzer;
use crate::components::ner::HeuristicNer;
use crate::components::segmenter::StorySegmenter;
use crate::components::senter::SentenceSplitter;
use crate::components::tagger::LexiconTagger;
use crate::config::Config;
use crate::doc::Doc;
use crate::lang::{detect_language, Language};
use crate::tokenizer::Tokenizer;
use crate::{Error, Result};
use std::time::Instant;

// =============================================================================
// Component trait
// =============================================================================

/// One annotation stage of a pipeline.
///
/// Components run in order over a mutable [`Doc`]. A component lists the
/// pipes it depends on in [`requires`](Component::requires); the pipeline
/// refuses to add it before they are present.
pub trait Component: Send + Sync {
    /// Pipe name, unique within a pipeline.
    fn name(&self) -> &'static str;

    /// Names of pipes that must run before this one.
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    /// Annotate the document.
    fn process(&self, doc: &mut Doc) -> Result<()>;
}

// =============================================================================
// Registry
// =============================================================================

/// A named pipeline preset.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Preset name, as passed to [`Pipeline::load`]
    pub name: &'static str,
    /// Pipes the preset starts with
    pub pipes: &'static [&'static str],
    /// One-line description
    pub description: &'static str,
}

/// Presets known to [`Pipeline::load`].
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "en_literary",
        pipes: &["senter", "tagger", "ner"],
        description: "English prose: sentences, tags, named entities",
    },
    Preset {
        name: "en_blank",
        pipes: &["senter"],
        description: "English tokenizer and sentence splitter only",
    },
];

const PRESET_ALIASES: &[(&str, &str)] = &[("en_core", "en_literary"), ("en", "en_literary")];

/// Factories known to [`Pipeline::add_pipe`], with descriptions.
pub const FACTORIES: &[(&str, &str)] = &[
    ("senter", "sentence boundaries from punctuation and paragraph breaks"),
    ("tagger", "lexicon part-of-speech tags with pronoun morphology"),
    ("ner", "heuristic proper-name spans (PER, ORG, LOC, MISC)"),
    ("coref", "rule-based coreference chains"),
    ("characters", "characters with relations and speech, from coreference chains"),
    ("segmenter", "paragraphs grouped into story stages"),
    ("linguistic", "sentence length, readability and writing style"),
];

/// Create a component by factory name.
pub fn create_component(factory: &str, config: &Config) -> Result<Box<dyn Component>> {
    match factory {
        "senter" => Ok(Box::new(SentenceSplitter::new())),
        "tagger" => Ok(Box::new(LexiconTagger::new())),
        "ner" => Ok(Box::new(HeuristicNer::new())),
        "coref" => Ok(Box::new(CorefComponent::new(config.coref.clone()))),
        "characters" => Ok(Box::new(CharacterRoster::new())),
        "segmenter" => Ok(Box::new(StorySegmenter::new())),
        "linguistic" => Ok(Box::new(LinguisticAnalyzer::new())),
        other => Err(Error::pipeline(format!(
            "unknown component factory '{}' (available: {})",
            other,
            FACTORIES
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

fn find_preset(name: &str) -> Option<&'static Preset> {
    let canonical = PRESET_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, target)| *target);
    PRESETS.iter().find(|p| p.name == canonical)
}

// =============================================================================
// Pipeline
// =============================================================================

/// Tokenizer plus an ordered list of components.
pub struct Pipeline {
    name: &'static str,
    lang: Language,
    tokenizer: Tokenizer,
    components: Vec<Box<dyn Component>>,
    config: Config,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("lang", &self.lang)
            .field("pipes", &self.pipe_names())
            .finish()
    }
}

impl Pipeline {
    /// Load a preset with default configuration.
    pub fn load(name: &str) -> Result<Self> {
        Self::load_with_config(name, Config::default())
    }

    /// Load a preset; components added later use `config`.
    pub fn load_with_config(name: &str, config: Config) -> Result<Self> {
        let preset = find_preset(name).ok_or_else(|| {
            Error::model_init(format!(
                "unknown pipeline '{}' (available: {})",
                name,
                PRESETS.iter().map(|p| p.name).collect::<Vec<_>>().join(", ")
            ))
        })?;

        let mut pipeline = Self {
            name: preset.name,
            lang: Language::English,
            tokenizer: Tokenizer::new(),
            components: Vec::new(),
            config,
        };
        for pipe in preset.pipes {
            pipeline.add_pipe(pipe)?;
        }
        log::info!(
            "loaded pipeline '{}' with pipes [{}]",
            pipeline.name,
            pipeline.pipe_names().join(", ")
        );
        Ok(pipeline)
    }

    /// Build the pipeline a [`Config`] describes: its preset plus its pipes.
    ///
    /// Pipes the preset already contains are skipped.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut pipeline = Self::load_with_config(&config.pipeline, config.clone())?;
        for pipe in &config.pipes {
            if pipeline.has_pipe(pipe) {
                log::warn!("pipe '{}' already in pipeline, skipping", pipe);
                continue;
            }
            pipeline.add_pipe(pipe)?;
        }
        Ok(pipeline)
    }

    /// Preset name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Pipeline language.
    #[must_use]
    pub fn lang(&self) -> Language {
        self.lang
    }

    /// Configuration used for new components.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Append a component created by factory name.
    pub fn add_pipe(&mut self, factory: &str) -> Result<&mut Self> {
        let component = create_component(factory, &self.config)?;
        self.add_component(component)
    }

    /// Append a custom component.
    ///
    /// Fails if a pipe with the same name exists or a required pipe is missing.
    pub fn add_component(&mut self, component: Box<dyn Component>) -> Result<&mut Self> {
        let name = component.name();
        if self.has_pipe(name) {
            return Err(Error::pipeline(format!(
                "pipe '{}' already exists in pipeline '{}'",
                name, self.name
            )));
        }
        if let Some(missing) = component.requires().iter().find(|r| !self.has_pipe(r)) {
            return Err(Error::pipeline(format!(
                "pipe '{}' requires '{}', which must be added first",
                name, missing
            )));
        }
        log::debug!("adding pipe '{}'", name);
        self.components.push(component);
        Ok(self)
    }

    /// Remove a pipe by name.
    ///
    /// Fails if another pipe depends on it.
    pub fn remove_pipe(&mut self, name: &str) -> Result<Box<dyn Component>> {
        let position = self
            .components
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| Error::pipeline(format!("no pipe named '{}'", name)))?;
        if let Some(dependent) = self.components[position + 1..]
            .iter()
            .find(|c| c.requires().contains(&name))
        {
            return Err(Error::pipeline(format!(
                "cannot remove '{}': '{}' depends on it",
                name,
                dependent.name()
            )));
        }
        Ok(self.components.remove(position))
    }

    /// Names of the pipes, in execution order.
    #[must_use]
    pub fn pipe_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// True if a pipe with this name exists.
    #[must_use]
    pub fn has_pipe(&self, name: &str) -> bool {
        self.components.iter().any(|c| c.name() == name)
    }

    /// Tokenize `text` and run every component over it.
    pub fn process(&self, text: &str) -> Result<Doc> {
        let detected = detect_language(text);
        if detected != self.lang {
            log::warn!(
                "pipeline '{}' is {} but the text looks like {}",
                self.name,
                self.lang.code(),
                detected.code()
            );
        }

        let mut doc = self.tokenizer.tokenize(text);
        for component in &self.components {
            let start = Instant::now();
            component.process(&mut doc)?;
            doc.mark_processed(component.name());
            log::debug!(
                "pipe '{}' finished in {:?}",
                component.name(),
                start.elapsed()
            );
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;

    impl Component for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn requires(&self) -> &'static [&'static str] {
            &["tagger"]
        }

        fn process(&self, doc: &mut Doc) -> Result<()> {
            if doc.is_empty() {
                return Err(Error::invalid_input("empty document"));
            }
            Ok(())
        }
    }

    #[test]
    fn load_presets() {
        assert_eq!(
            Pipeline::load("en_literary").unwrap().pipe_names(),
            ["senter", "tagger", "ner"]
        );
        assert_eq!(Pipeline::load("en_blank").unwrap().pipe_names(), ["senter"]);
        assert_eq!(Pipeline::load("en_core").unwrap().name(), "en_literary");
    }

    #[test]
    fn unknown_preset() {
        let err = Pipeline::load("xx_nothing").unwrap_err();
        assert!(matches!(err, Error::ModelInit(_)));
        assert!(err.to_string().contains("en_literary"));
    }

    #[test]
    fn add_pipe_checks() {
        let mut nlp = Pipeline::load("en_literary").unwrap();
        assert!(matches!(nlp.add_pipe("parser"), Err(Error::Pipeline(_))));
        assert!(matches!(nlp.add_pipe("tagger"), Err(Error::Pipeline(_))));
        assert!(matches!(nlp.add_pipe("characters"), Err(Error::Pipeline(_))));
        nlp.add_pipe("coref").unwrap().add_pipe("characters").unwrap();
        assert_eq!(
            nlp.pipe_names(),
            ["senter", "tagger", "ner", "coref", "characters"]
        );
    }

    #[test]
    fn coref_needs_tagger() {
        let mut nlp = Pipeline::load("en_blank").unwrap();
        let err = nlp.add_pipe("coref").unwrap_err();
        assert!(err.to_string().contains("tagger"));
    }

    #[test]
    fn custom_component_and_errors_propagate() {
        let mut nlp = Pipeline::load("en_literary").unwrap();
        nlp.add_component(Box::new(Counter)).unwrap();
        assert!(nlp.process("Some text.").unwrap().has_annotation("counter"));
        assert!(matches!(nlp.process(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn remove_pipe_respects_dependents() {
        let mut nlp = Pipeline::load("en_literary").unwrap();
        nlp.add_pipe("coref").unwrap();
        assert!(nlp.remove_pipe("tagger").is_err());
        assert_eq!(nlp.remove_pipe("coref").unwrap().name(), "coref");
        assert!(nlp.remove_pipe("coref").is_err());
    }

    #[test]
    fn from_config_skips_duplicates() {
        let config = Config {
            pipes: vec!["ner".into(), "coref".into(), "characters".into()],
            ..Config::default()
        };
        let nlp = Pipeline::from_config(&config).unwrap();
        assert_eq!(
            nlp.pipe_names(),
            ["senter", "tagger", "ner", "coref", "characters"]
        );
    }

    #[test]
    fn process_records_annotations() {
        let nlp = Pipeline::load("en_literary").unwrap();
        let doc = nlp.process("He left.").unwrap();
        assert_eq!(doc.processed_by(), ["senter", "tagger", "ner"]);
        assert!(doc.coref_chains().is_none());
    }
}
