//! End-to-end tests of the pipeline over the built-in excerpt and small texts.

use litcoref::pipeline::Component;
use litcoref::{
    sample, CharacterKind, CorefChains, Doc, EntityLabel, Error, MentionKind, Pipeline,
    SegmentKind,
};

fn coref_pipeline() -> Pipeline {
    let mut nlp = Pipeline::load("en_literary").unwrap();
    nlp.add_pipe("coref").unwrap();
    nlp
}

fn excerpt_doc() -> Doc {
    let mut nlp = coref_pipeline();
    nlp.add_pipe("characters").unwrap();
    nlp.process(sample::EXCERPT).unwrap()
}

fn check_chain_invariants(doc: &Doc, chains: &CorefChains) {
    let mut previous_first = None;
    for (i, chain) in chains.iter().enumerate() {
        assert_eq!(chain.index, i, "chains are numbered in order");
        assert!(chain.len() >= 2, "chain {} has fewer than two mentions", i);
        assert!(chain.most_specific < chain.len());
        for mention in &chain.mentions {
            assert!(!mention.roots.is_empty());
            for &root in &mention.roots {
                assert!(root < doc.len(), "root {} outside document", root);
            }
            assert_eq!(mention.texts.len(), mention.roots.len());
            assert!(mention.start < mention.end && mention.end <= doc.len());
        }
        let first = chain.mentions[0].root();
        if let Some(prev) = previous_first {
            assert!(prev <= first, "chains sorted by first mention");
        }
        previous_first = Some(first);
    }
}

// =============================================================================
// The excerpt
// =============================================================================

#[test]
fn excerpt_father_chain() {
    let doc = excerpt_doc();
    let chains = doc.coref_chains().unwrap();
    assert!(!chains.is_empty());
    assert_eq!(doc[1].text, "father");
    assert_eq!(doc[10].text, "he");

    let father = chains.chains_for_token(1);
    assert_eq!(father.len(), 1);
    assert!(father[0].has_root(10), "he refers to my father: {}", father[0]);
    assert!(chains.resolve_indices(10).unwrap().contains(&1));
    assert!(chains.to_string().contains("father(1)"));
}

#[test]
fn excerpt_demo_token() {
    let doc = excerpt_doc();
    let chains = doc.coref_chains().unwrap();
    assert_eq!(doc[sample::DEMO_TOKEN].text, ",");
    assert!(chains.resolve(&doc, sample::DEMO_TOKEN).is_none());
    assert!(chains.resolve(&doc, doc.len() + 10).is_none());
}

#[test]
fn excerpt_chain_invariants() {
    let doc = excerpt_doc();
    check_chain_invariants(&doc, doc.coref_chains().unwrap());
}

#[test]
fn excerpt_entities() {
    let doc = excerpt_doc();
    let find = |text: &str| doc.entities().iter().find(|e| e.text == text);
    assert_eq!(
        find("Hudson's Bay Company").map(|e| e.label),
        Some(EntityLabel::Organization)
    );
    assert_eq!(find("Laird").map(|e| e.label), Some(EntityLabel::Person));
    assert_eq!(find("Henry Bailey").map(|e| e.label), Some(EntityLabel::Person));
}

#[test]
fn excerpt_characters() {
    let doc = excerpt_doc();
    let roster = doc.characters().unwrap();
    assert!(roster.iter().any(|c| c.kind == CharacterKind::Narrator));
    assert!(roster
        .iter()
        .any(|c| c.kind == CharacterKind::Named && c.name == "Henry Bailey"));
    for pair in roster.windows(2) {
        assert!(pair[0].mentions >= pair[1].mentions);
    }

    let bailey = roster.iter().find(|c| c.name == "Henry Bailey").unwrap();
    assert_eq!(bailey.speech.len(), 1);
    assert_eq!(bailey.speech[0].text, "Christmas present!");
    assert_eq!(bailey.speech[0].verb, "saying");

    let laird = roster.iter().find(|c| c.name == "Laird").unwrap();
    assert!(laird
        .relationships
        .iter()
        .any(|r| r.to_string() == "brother of narrator"));
}

#[test]
fn excerpt_segments_and_features() {
    let mut nlp = Pipeline::load("en_literary").unwrap();
    nlp.add_pipe("segmenter").unwrap().add_pipe("linguistic").unwrap();
    let doc = nlp.process(sample::EXCERPT).unwrap();

    // two paragraphs are too few to segment
    let segments = doc.segments().unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].kind, SegmentKind::Unsegmented);
    assert_eq!(segments[0].paragraphs, 2);

    let features = doc.features().unwrap();
    assert_eq!(features.sentences, doc.sentences().len());
    assert_eq!(features.exclamations, 1);
    assert!(features.dialogue_ratio > 0.0 && features.dialogue_ratio < 0.05);
    assert!(features.avg_sentence_length > 15.0);
}

#[test]
fn excerpt_tokens_and_sentences() {
    let doc = excerpt_doc();
    for token in doc.tokens() {
        assert_eq!(token.span.extract(doc.text()), token.text);
    }
    let sentences = doc.sentences();
    assert_eq!(sentences.first().map(|s| s.start), Some(0));
    assert_eq!(sentences.last().map(|s| s.end), Some(doc.len()));
    for pair in sentences.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(
        doc.processed_by(),
        ["senter", "tagger", "ner", "coref", "characters"]
    );
}

// =============================================================================
// Small texts
// =============================================================================

#[test]
fn coordination_resolves_to_its_members() {
    let doc = coref_pipeline()
        .process("My brother Laird and I sat on the step. We watched.")
        .unwrap();
    let chains = doc.coref_chains().unwrap();
    let we = doc.tokens().iter().position(|t| t.text == "We").unwrap();
    let group = chains.chains_for_token(we);
    assert_eq!(group.len(), 1);
    assert_eq!(
        group[0].most_specific_mention().kind,
        MentionKind::Coordination
    );
    let resolution = chains.resolve(&doc, we).unwrap();
    assert_eq!(resolution.texts.len(), 2);
    assert_eq!(resolution.texts[0], "Laird");
}

#[test]
fn empty_text() {
    let doc = coref_pipeline().process("").unwrap();
    assert!(doc.is_empty());
    assert!(doc.coref_chains().unwrap().is_empty());
    assert_eq!(doc.coref_chains().unwrap().to_string(), "");
}

#[test]
fn unknown_preset_is_model_init_error() {
    let err = Pipeline::load("xx_missing_model").unwrap_err();
    assert!(matches!(err, Error::ModelInit(_)));
    assert!(err.to_string().contains("en_literary"));
}

#[test]
fn coref_needs_a_tagger() {
    let mut nlp = Pipeline::load("en_blank").unwrap();
    let err = nlp.add_pipe("coref").unwrap_err();
    assert!(matches!(err, Error::Pipeline(_)));
    assert!(!nlp.has_pipe("coref"));
}

struct SentenceCounter;

impl Component for SentenceCounter {
    fn name(&self) -> &'static str {
        "sentence_counter"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["senter"]
    }

    fn process(&self, doc: &mut Doc) -> litcoref::Result<()> {
        if doc.sentences().is_empty() && !doc.is_empty() {
            return Err(Error::invalid_input("no sentences"));
        }
        Ok(())
    }
}

#[test]
fn custom_component_runs_in_order() {
    let mut nlp = coref_pipeline();
    nlp.add_component(Box::new(SentenceCounter)).unwrap();
    let doc = nlp.process("He left. She stayed.").unwrap();
    assert_eq!(doc.processed_by().last().map(String::as_str), Some("sentence_counter"));
    assert!(nlp.add_component(Box::new(SentenceCounter)).is_err());
}

#[test]
fn pipeline_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Pipeline>();
}
