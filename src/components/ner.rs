//! Heuristic named-entity recognition over tagged tokens.
//!
//! Spans are maximal runs of proper nouns, joined across `'s` / `of` when
//! the joined name ends in an organization word (`the Hudson's Bay Company`,
//! `the Bank of Montreal`). A leading title (`Mr.`, `Captain`) is not part
//! of the span but marks it as a person and is kept in
//! [`NamedEntity::title`].
//!
//! # Labels
//!
//! | Cue | Label |
//! |-----|-------|
//! | ends in `Company`, `Traders`, `Inc`, ... | ORG |
//! | after a title or a person noun (`brother Laird`, `man, Henry Bailey`) | PER |
//! | after a speech verb (`said Laird`) | PER |
//! | after `in` / `from` / `to` / `near` / `at` | LOC |
//! | several words, no other cue | PER |
//! | one word followed by a verb | PER |
//! | anything else | MISC |
//!
//! No gender is ever guessed from a name itself; only a gendered title
//! (`Mr.`, `Mrs.`, `Miss`) carries one.

use crate::doc::{Doc, EntityLabel, NamedEntity, Tag, Token};
use crate::lexicon::{self, contains};
use crate::pipeline::Component;
use crate::{Error, Result};

/// Rule-based named-entity recognizer.
#[derive(Debug, Clone, Default)]
pub struct HeuristicNer;

impl HeuristicNer {
    /// Create a recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Find entity spans in a tagged document.
    #[must_use]
    pub fn extract(&self, doc: &Doc) -> Vec<NamedEntity> {
        let tokens = doc.tokens();
        let mut entities = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if tokens[i].tag != Tag::ProperNoun {
                i += 1;
                continue;
            }

            let mut start = i;
            let mut end = proper_run_end(tokens, i);

            // Join "X 's Y" / "X of Y" when the whole thing names an organization.
            while end + 1 < tokens.len()
                && matches!(tokens[end].lower(), "'s" | "of")
                && tokens[end + 1].tag == Tag::ProperNoun
            {
                let next_end = proper_run_end(tokens, end + 1);
                if !contains(lexicon::ORG_SUFFIX, tokens[next_end - 1].lower()) {
                    break;
                }
                end = next_end;
            }

            // Strip leading titles ("Mr." "Captain"), keeping their text.
            let mut title_start = None;
            while start < end && contains(lexicon::TITLES, tokens[start].lower()) {
                let mut after = start + 1;
                if after < tokens.len() && tokens[after].text == "." {
                    after += 1;
                }
                if after >= tokens.len() || tokens[after].tag != Tag::ProperNoun {
                    break;
                }
                title_start.get_or_insert(start);
                start = after;
                end = end.max(proper_run_end(tokens, start));
            }

            let label = label_span(tokens, start, end, title_start.is_some());
            entities.push(NamedEntity {
                start,
                end,
                label,
                text: doc.span_text(start, end).to_string(),
                title: title_start.map(|t| doc.span_text(t, start).trim_end().to_string()),
            });
            i = end;
        }
        entities
    }
}

impl Component for HeuristicNer {
    fn name(&self) -> &'static str {
        "ner"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["tagger"]
    }

    fn process(&self, doc: &mut Doc) -> Result<()> {
        if !doc.has_annotation("tagger") {
            return Err(Error::pipeline("ner needs tagged tokens"));
        }
        let entities = self.extract(doc);
        log::debug!("ner: {} entities", entities.len());
        doc.set_entities(entities);
        Ok(())
    }
}

/// End (exclusive) of the proper-noun run starting at `start`.
fn proper_run_end(tokens: &[Token], start: usize) -> usize {
    let mut end = start;
    while end < tokens.len() && tokens[end].tag == Tag::ProperNoun {
        end += 1;
    }
    end
}

fn label_span(tokens: &[Token], start: usize, end: usize, titled: bool) -> EntityLabel {
    let last = tokens[end - 1].lower();
    if contains(lexicon::ORG_SUFFIX, last) {
        return EntityLabel::Organization;
    }
    if titled {
        return EntityLabel::Person;
    }

    // "brother Laird", "the hired man, Henry Bailey"
    let mut before = start.checked_sub(1);
    if before.is_some_and(|b| tokens[b].text == ",") {
        before = before.and_then(|b| b.checked_sub(1));
    }
    if let Some(b) = before {
        let lemma = lexicon::lemma(tokens[b].lower());
        if tokens[b].tag == Tag::Noun && lexicon::is_person_noun(&lemma) {
            return EntityLabel::Person;
        }
    }

    // "said Laird"
    if start > 0 && contains(lexicon::SPEECH_VERBS, tokens[start - 1].lower()) {
        return EntityLabel::Person;
    }
    if start > 0 && contains(lexicon::LOC_PREPOSITION, tokens[start - 1].lower()) {
        return EntityLabel::Location;
    }
    if end - start > 1 {
        return EntityLabel::Person;
    }
    if tokens
        .get(end)
        .is_some_and(|t| matches!(t.tag, Tag::Verb | Tag::Auxiliary))
    {
        return EntityLabel::Person;
    }
    EntityLabel::Misc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Gender;
    use crate::Pipeline;

    fn entities(text: &str) -> Vec<(String, &'static str)> {
        let doc = Pipeline::load("en_literary").unwrap().process(text).unwrap();
        doc.entities()
            .iter()
            .map(|e| (e.text.clone(), e.label.as_label()))
            .collect()
    }

    fn pair(text: &str, label: &'static str) -> (String, &'static str) {
        (text.to_string(), label)
    }

    #[test]
    fn organizations_join_across_possessive() {
        assert_eq!(
            entities("He sold pelts to the Hudson's Bay Company or the Montreal Fur Traders."),
            [
                pair("Hudson's Bay Company", "ORG"),
                pair("Montreal Fur Traders", "ORG")
            ]
        );
    }

    #[test]
    fn person_after_relationship_noun() {
        assert_eq!(
            entities("My brother Laird and I sat on the step."),
            [pair("Laird", "PER")]
        );
        assert_eq!(
            entities("One time the hired man, Henry Bailey, took a swipe at me."),
            [pair("Henry Bailey", "PER")]
        );
    }

    #[test]
    fn titles_are_stripped() {
        assert_eq!(
            entities("Then Mr. Bailey came home."),
            [pair("Bailey", "PER")]
        );
    }

    #[test]
    fn titles_are_recorded_with_gender() {
        let doc = Pipeline::load("en_literary")
            .unwrap()
            .process("Mr. Smith came home. Mrs. Smith was waiting. Captain Hale knocked.")
            .unwrap();
        let titles: Vec<_> = doc
            .entities()
            .iter()
            .map(|e| (e.full_name(), e.title_gender()))
            .collect();
        assert_eq!(
            titles,
            [
                ("Mr. Smith".to_string(), Some(Gender::Masculine)),
                ("Mrs. Smith".to_string(), Some(Gender::Feminine)),
                ("Captain Hale".to_string(), None),
            ]
        );
    }

    #[test]
    fn locations_and_misc() {
        assert_eq!(
            entities("He travelled to Montreal before Christmas."),
            [pair("Montreal", "LOC"), pair("Christmas", "MISC")]
        );
    }

    #[test]
    fn single_name_before_verb() {
        assert_eq!(entities("Then Laird laughed."), [pair("Laird", "PER")]);
    }

    #[test]
    fn name_after_speech_verb() {
        assert_eq!(
            entities("\"Look,\" said Laird."),
            [pair("Laird", "PER")]
        );
    }

    #[test]
    fn requires_tagger() {
        let mut doc = crate::tokenizer::Tokenizer::new().tokenize("Laird laughed.");
        assert!(HeuristicNer::new().process(&mut doc).is_err());
    }
}
