//! Lexicon- and suffix-based part-of-speech tagger.
//!
//! Rules are tried in order; the first that matches wins:
//!
//! 1. punctuation, numbers
//! 2. clitics (`'s`, `n't`, `'re`, ...)
//! 3. closed classes: pronouns, determiners, auxiliaries, adpositions,
//!    conjunctions, adverbs
//! 4. capitalization (proper nouns)
//! 5. verb lexicon, then `-ly` / `-ing` / `-ed` suffixes
//! 6. adjective lexicon and suffixes
//! 7. everything else is a noun
//!
//! A word after a determiner, adjective or possessive is never a verb: `the
//! fall`, `the killing`, `his hired man`.

use crate::doc::{Doc, Morph, Number, Tag, Token};
use crate::lexicon::{self, contains};
use crate::pipeline::Component;
use crate::{Error, Result};
use std::collections::HashSet;

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "less", "able", "ible", "ish"];

/// Rule-based tagger filling [`Token::tag`] and [`Token::morph`].
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    /// Create a tagger.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute tags and morphology for every token without modifying `doc`.
    #[must_use]
    pub fn tag(&self, doc: &Doc) -> Vec<(Tag, Morph)> {
        let tokens = doc.tokens();
        let lowercase_seen: HashSet<&str> = tokens
            .iter()
            .filter(|t| !t.is_capitalized())
            .map(|t| t.lower())
            .collect();

        let mut tagged: Vec<(Tag, Morph)> = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| (&tokens[p], tagged[p]));
            let initial = is_sentence_initial(tokens, i);
            let (mut tag, mut morph) = self.classify(token, prev, initial, &lowercase_seen);

            if let Some((_, (prev_tag, prev_morph))) = prev {
                let modifies = matches!(prev_tag, Tag::Determiner | Tag::Adjective)
                    || prev_morph.possessive;
                if modifies && tag == Tag::Verb {
                    if token.lower().ends_with("ed") && !contains(lexicon::VERBS, token.lower()) {
                        tag = Tag::Adjective;
                    } else {
                        tag = Tag::Noun;
                        morph = noun_morph(token.lower());
                    }
                }
            }

            if lower_is(tokens.get(i + 1), "-") && lower_is(tokens.get(i + 2), "like") {
                // rat-like
                if tokens[i].whitespace.is_empty() && tokens[i + 1].whitespace.is_empty() {
                    tag = Tag::Adjective;
                    morph = Morph::default();
                }
            }

            if token.lower() == "her" && is_possessive_her(tokens.get(i + 1)) {
                morph.possessive = true;
            }

            tagged.push((tag, morph));
        }
        tagged
    }

    fn classify(
        &self,
        token: &Token,
        prev: Option<(&Token, (Tag, Morph))>,
        initial: bool,
        lowercase_seen: &HashSet<&str>,
    ) -> (Tag, Morph) {
        let lower = token.lower();
        let plain = |tag| (tag, Morph::default());

        if token.is_punct() {
            return plain(Tag::Punct);
        }
        if lower.chars().all(|c| c.is_ascii_digit()) || contains(lexicon::NUMBER_WORDS, lower) {
            return plain(Tag::Number);
        }

        // Clitics
        if lower == "'s" {
            let after_nominal = prev.is_some_and(|(_, (tag, _))| tag.is_nominal());
            return if after_nominal {
                (
                    Tag::Other,
                    Morph {
                        possessive: true,
                        ..Morph::default()
                    },
                )
            } else {
                plain(Tag::Auxiliary)
            };
        }
        if lower == "n't" {
            return plain(Tag::Adverb);
        }
        if lower.starts_with('\'') {
            return plain(Tag::Auxiliary);
        }

        // Closed classes
        if let Some(morph) = lexicon::pronoun_morph(lower) {
            return (Tag::Pronoun, morph);
        }
        if contains(lexicon::DEFINITE_DETERMINERS, lower)
            || contains(lexicon::INDEFINITE_DETERMINERS, lower)
        {
            return plain(Tag::Determiner);
        }
        for (list, tag) in [
            (lexicon::AUXILIARIES, Tag::Auxiliary),
            (lexicon::ADPOSITIONS, Tag::Adposition),
            (lexicon::CONJUNCTIONS, Tag::Conjunction),
            (lexicon::ADVERBS, Tag::Adverb),
        ] {
            if contains(list, lower) {
                return plain(tag);
            }
        }

        // Capitalization
        if token.is_capitalized() {
            let proper = if initial {
                !lowercase_seen.contains(lower) && !in_open_lexicon(lower)
            } else {
                true
            };
            if proper {
                return (
                    Tag::ProperNoun,
                    Morph {
                        number: Some(Number::Singular),
                        ..Morph::default()
                    },
                );
            }
        }

        // Verbs
        if contains(lexicon::VERBS, lower) {
            return plain(Tag::Verb);
        }
        let exception = contains(lexicon::SUFFIX_EXCEPTIONS, lower);
        if !exception && lower.len() > 4 && lower.ends_with("ly") {
            return plain(Tag::Adverb);
        }
        if !exception
            && ((lower.len() > 4 && lower.ends_with("ing"))
                || (lower.len() > 3 && lower.ends_with("ed")))
        {
            return plain(Tag::Verb);
        }

        // Adjectives
        if contains(lexicon::ADJECTIVES, lower)
            || (lower.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)))
        {
            return plain(Tag::Adjective);
        }

        (Tag::Noun, noun_morph(lower))
    }
}

impl Component for LexiconTagger {
    fn name(&self) -> &'static str {
        "tagger"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["senter"]
    }

    fn process(&self, doc: &mut Doc) -> Result<()> {
        if !doc.has_annotation("senter") {
            return Err(Error::pipeline("tagger needs sentence boundaries"));
        }
        let tagged = self.tag(doc);
        for (token, (tag, morph)) in doc.tokens_mut().iter_mut().zip(tagged) {
            token.tag = tag;
            token.morph = morph;
        }
        log::debug!("tagger: tagged {} tokens", doc.len());
        Ok(())
    }
}

fn noun_morph(lower: &str) -> Morph {
    let lemma = lexicon::lemma(lower);
    Morph {
        number: Some(if lexicon::is_plural_noun(lower) {
            Number::Plural
        } else {
            Number::Singular
        }),
        gender: lexicon::noun_gender(&lemma),
        ..Morph::default()
    }
}

fn in_open_lexicon(lower: &str) -> bool {
    let lemma = lexicon::lemma(lower);
    contains(lexicon::VERBS, lower)
        || contains(lexicon::ADJECTIVES, lower)
        || lexicon::is_person_noun(&lemma)
        || lexicon::is_animal_noun(&lemma)
        || contains(lexicon::COLLECTIVE_NOUNS, &lemma)
}

/// True if only punctuation precedes token `i` in its sentence.
fn is_sentence_initial(tokens: &[Token], i: usize) -> bool {
    let mut j = i;
    loop {
        if tokens[j].is_sent_start {
            return true;
        }
        if j == 0 || !tokens[j - 1].is_punct() {
            return false;
        }
        j -= 1;
    }
}

fn lower_is(token: Option<&Token>, word: &str) -> bool {
    token.is_some_and(|t| t.lower() == word)
}

/// `her` is a determiner when a content word follows.
fn is_possessive_her(next: Option<&Token>) -> bool {
    let Some(next) = next else {
        return false;
    };
    let lower = next.lower();
    !next.is_punct()
        && lexicon::pronoun_morph(lower).is_none()
        && ![
            lexicon::ADPOSITIONS,
            lexicon::CONJUNCTIONS,
            lexicon::DEFINITE_DETERMINERS,
            lexicon::INDEFINITE_DETERMINERS,
            lexicon::AUXILIARIES,
            lexicon::ADVERBS,
        ]
        .iter()
        .any(|list| contains(list, lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::senter::SentenceSplitter;
    use crate::doc::{Gender, Person};
    use crate::tokenizer::Tokenizer;

    fn tagged(text: &str) -> Doc {
        let mut doc = Tokenizer::new().tokenize(text);
        SentenceSplitter::new().process(&mut doc).unwrap();
        doc.mark_processed("senter");
        LexiconTagger::new().process(&mut doc).unwrap();
        doc
    }

    fn tags(text: &str) -> Vec<&'static str> {
        tagged(text).tokens().iter().map(|t| t.tag.as_label()).collect()
    }

    #[test]
    fn simple_sentence() {
        assert_eq!(
            tags("My father was a fox farmer."),
            ["PRON", "NOUN", "AUX", "DET", "NOUN", "NOUN", "PUNCT"]
        );
    }

    #[test]
    fn pronoun_morphology() {
        let doc = tagged("He killed them.");
        assert_eq!(doc[0].morph.person, Some(Person::Third));
        assert_eq!(doc[0].morph.gender, Some(Gender::Masculine));
        assert_eq!(doc[2].morph.number, Some(Number::Plural));
    }

    #[test]
    fn possessive_clitic_after_name() {
        let doc = tagged("They sold pelts to the Hudson's Bay Company.");
        assert_eq!(doc[5].tag, Tag::ProperNoun);
        assert_eq!(doc[6].text, "'s");
        assert_eq!(doc[6].tag, Tag::Other);
        assert!(doc[6].morph.possessive);
        assert_eq!(doc[8].tag, Tag::ProperNoun);
    }

    #[test]
    fn verb_after_determiner_is_noun() {
        let doc = tagged("In the fall the killing began.");
        assert_eq!(doc[2].tag, Tag::Noun);
        assert_eq!(doc[4].tag, Tag::Noun);
        assert_eq!(doc[5].tag, Tag::Verb);
    }

    #[test]
    fn participle_after_determiner_is_adjective() {
        let doc = tagged("One time the hired man came.");
        assert_eq!(doc[3].tag, Tag::Adjective);
        assert_eq!(doc[4].tag, Tag::Noun);
        assert_eq!(doc[4].morph.gender, Some(Gender::Masculine));
    }

    #[test]
    fn sentence_initial_capitals() {
        let doc = tagged("Peter left. Farmers work. The farmers rested.");
        assert_eq!(doc[0].tag, Tag::ProperNoun);
        assert_eq!(doc[3].tag, Tag::Noun);
        assert_eq!(doc[3].morph.number, Some(Number::Plural));
    }

    #[test]
    fn capitalized_after_opening_quote() {
        let doc = tagged("\"Look,\" she said. He said \"Christmas present!\"");
        assert_eq!(doc[1].tag, Tag::Verb);
        assert_eq!(doc[10].text, "Christmas");
        assert_eq!(doc[10].tag, Tag::ProperNoun);
    }

    #[test]
    fn her_as_determiner() {
        let doc = tagged("He saw her mother. He saw her.");
        assert!(doc[2].morph.possessive);
        assert!(!doc[7].morph.possessive);
    }

    #[test]
    fn rat_like_is_adjective() {
        let doc = tagged("It looked rat-like.");
        assert_eq!(doc[2].tag, Tag::Adjective);
    }

    #[test]
    fn requires_sentences() {
        let mut doc = Tokenizer::new().tokenize("He left.");
        assert!(LexiconTagger::new().process(&mut doc).is_err());
    }
}
