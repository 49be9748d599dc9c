//! Mention detection for the coreference component.
//!
//! Finds the candidate mentions of a tagged document together with the
//! features the resolver matches on (number, gender, animacy, definiteness).

use crate::chains::{Mention, MentionKind};
use crate::components::coref::CorefConfig;
use crate::doc::{Doc, EntityLabel, Gender, Number, Person, Tag, Token};
use crate::lexicon::{self, contains};
use std::collections::HashMap;

/// What kind of thing a mention can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animacy {
    /// People, named persons
    Human,
    /// Animals
    Animal,
    /// Things and places
    Inanimate,
    /// Could be either (organizations, unknown nouns)
    Unknown,
}

impl Animacy {
    /// Humans and animals.
    #[must_use]
    pub fn is_animate(&self) -> bool {
        matches!(self, Animacy::Human | Animacy::Animal)
    }
}

/// A mention plus its matching features.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Output mention
    pub mention: Mention,
    /// Sentence of the last root
    pub sentence: usize,
    /// Lowercased lemma of the head (nouns) or surface form (pronouns, names)
    pub lemma: String,
    /// Full text of a proper name
    pub name: Option<String>,
    /// Entity label of a proper name
    pub label: Option<EntityLabel>,
    /// Grammatical person
    pub person: Person,
    /// Number, if known
    pub number: Option<Number>,
    /// Gender, if signalled
    pub gender: Option<Gender>,
    /// Animacy
    pub animacy: Animacy,
    /// `the`, `this`, a possessive, or `'s` precedes a noun
    pub definite: bool,
    /// Possessive pronoun in front of a noun (`my` father)
    pub possessor: Option<String>,
    /// Possessive or reflexive pronoun form
    pub possessive: bool,
    /// Reflexive pronoun
    pub reflexive: bool,
    /// Predicate nominal (`was a farmer`), never an antecedent
    pub predicate: bool,
}

impl Candidate {
    /// Mention kind.
    #[must_use]
    pub fn kind(&self) -> MentionKind {
        self.mention.kind
    }

    /// Last root token, used for distance.
    #[must_use]
    pub fn last_root(&self) -> usize {
        self.mention.roots.last().copied().unwrap_or(self.mention.start)
    }
}

/// Detect candidate mentions, ordered so that every mention comes after the
/// mentions it could refer back to.
#[must_use]
pub fn detect(doc: &Doc, config: &CorefConfig) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    candidates.extend(pronouns(doc, config));
    candidates.extend(proper_names(doc));
    candidates.extend(nominals(doc));
    candidates.sort_by_key(|c| (c.last_root(), c.mention.roots.len()));

    let coordinations = coordinations(doc, &candidates);
    candidates.extend(coordinations);
    candidates.sort_by_key(|c| (c.last_root(), c.mention.roots.len()));
    candidates
}

fn pronouns(doc: &Doc, config: &CorefConfig) -> Vec<Candidate> {
    doc.tokens()
        .iter()
        .filter(|t| t.tag == Tag::Pronoun)
        .filter_map(|t| {
            let person = t.morph.person?;
            match person {
                Person::Second => return None,
                Person::First if !config.link_first_person => return None,
                _ => {}
            }
            Some(Candidate {
                mention: Mention::single(doc, t.index, MentionKind::Pronoun, t.index, t.index + 1),
                sentence: t.sentence,
                lemma: t.lower().to_string(),
                name: None,
                label: None,
                person,
                number: t.morph.number,
                gender: t.morph.gender,
                animacy: match (person, t.morph.gender) {
                    (Person::First, _) => Animacy::Human,
                    (_, Some(Gender::Neuter)) => Animacy::Inanimate,
                    (_, Some(_)) => Animacy::Human,
                    (_, None) => Animacy::Unknown,
                },
                definite: true,
                possessor: None,
                possessive: t.morph.possessive,
                reflexive: t.morph.reflexive,
                predicate: false,
            })
        })
        .collect()
}

fn proper_names(doc: &Doc) -> Vec<Candidate> {
    doc.entities()
        .iter()
        .map(|e| {
            let head = &doc[e.head()];
            let (number, animacy) = match e.label {
                EntityLabel::Person => (Some(Number::Singular), Animacy::Human),
                EntityLabel::Organization => (None, Animacy::Unknown),
                EntityLabel::Location => (Some(Number::Singular), Animacy::Inanimate),
                EntityLabel::Misc => (None, Animacy::Inanimate),
            };
            Candidate {
                mention: Mention::single(doc, e.head(), MentionKind::Proper, e.start, e.end),
                sentence: head.sentence,
                lemma: head.lower().to_string(),
                name: Some(e.text.to_lowercase()),
                label: Some(e.label),
                person: Person::Third,
                number,
                gender: e.title_gender(),
                animacy,
                definite: true,
                possessor: None,
                possessive: false,
                reflexive: false,
                predicate: false,
            }
        })
        .collect()
}

fn nominals(doc: &Doc) -> Vec<Candidate> {
    let tokens = doc.tokens();
    let mut out = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].tag != Tag::Noun || doc.entity_at(i).is_some() {
            i += 1;
            continue;
        }
        let run_start = i;
        while i + 1 < tokens.len() && tokens[i + 1].tag == Tag::Noun && doc.entity_at(i + 1).is_none()
        {
            i += 1;
        }
        let head = i;
        i += 1;
        out.push(nominal(doc, run_start, head));
    }
    out
}

fn nominal(doc: &Doc, run_start: usize, head: usize) -> Candidate {
    let tokens = doc.tokens();
    let token = &tokens[head];

    // Walk left over modifiers: "the naked, slippery bodies"
    let mut start = run_start;
    while start > 0 {
        let prev = &tokens[start - 1];
        let is_modifier = matches!(prev.tag, Tag::Adjective | Tag::Number)
            || (prev.text == "," && start >= 2 && tokens[start - 2].tag == Tag::Adjective)
            || (prev.text == "-" && prev.whitespace.is_empty());
        if !is_modifier {
            break;
        }
        start -= 1;
    }

    let mut definite = false;
    let mut possessor = None;
    let mut predicate = false;
    if let Some(det) = start.checked_sub(1).map(|d| &tokens[d]) {
        if det.tag == Tag::Determiner {
            start -= 1;
            definite = contains(lexicon::DEFINITE_DETERMINERS, det.lower());
            predicate = !definite && follows_copula(tokens, start);
        } else if det.tag == Tag::Pronoun && det.morph.possessive {
            start -= 1;
            definite = true;
            possessor = Some(det.lower().to_string());
        } else if det.morph.possessive {
            // "Hudson's Bay"
            definite = true;
        }
    }

    let lemma = lexicon::lemma(token.lower());
    let animacy = if lexicon::is_person_noun(&lemma) {
        Animacy::Human
    } else if lexicon::is_animal_noun(&lemma) {
        Animacy::Animal
    } else if contains(lexicon::COLLECTIVE_NOUNS, &lemma) {
        Animacy::Unknown
    } else {
        Animacy::Inanimate
    };

    Candidate {
        mention: Mention::single(doc, head, MentionKind::Nominal, start, head + 1),
        sentence: token.sentence,
        name: None,
        label: None,
        person: Person::Third,
        number: token.morph.number,
        gender: token.morph.gender,
        animacy,
        definite,
        possessor,
        possessive: false,
        reflexive: false,
        predicate,
        lemma,
    }
}

/// True if a copula (optionally followed by an adverb) precedes `det`.
fn follows_copula(tokens: &[Token], det: usize) -> bool {
    let mut j = det;
    while j > 0 {
        let prev = &tokens[j - 1];
        if prev.tag == Tag::Adverb {
            j -= 1;
            continue;
        }
        return contains(lexicon::COPULAS, prev.lower());
    }
    false
}

/// `X and Y` where at least one side is a person: "my brother Laird and I".
fn coordinations(doc: &Doc, candidates: &[Candidate]) -> Vec<Candidate> {
    let tokens = doc.tokens();
    let mut out = Vec::new();

    // Most specific mention ending / starting at each token.
    let mut by_end: HashMap<usize, &Candidate> = HashMap::new();
    let mut by_start: HashMap<usize, &Candidate> = HashMap::new();
    for c in candidates.iter().filter(|c| !c.predicate) {
        for (map, key) in [(&mut by_end, c.mention.end), (&mut by_start, c.mention.start)] {
            let slot = map.entry(key).or_insert(c);
            if c.kind().specificity() >= slot.kind().specificity() {
                *slot = c;
            }
        }
    }

    for and in tokens.iter().filter(|t| t.lower() == "and") {
        let k = and.index;
        let (Some(&left), Some(&right)) = (by_end.get(&k), by_start.get(&(k + 1))) else {
            continue;
        };
        let animacy = [left.animacy, right.animacy];
        if !animacy.contains(&Animacy::Human) || !animacy.iter().all(Animacy::is_animate) {
            continue;
        }

        let person = if left.person == Person::First || right.person == Person::First {
            Person::First
        } else {
            Person::Third
        };
        let roots = vec![left.mention.root(), right.mention.root()];
        out.push(Candidate {
            mention: Mention::with_roots(
                doc,
                roots,
                MentionKind::Coordination,
                left.mention.start,
                right.mention.end,
            ),
            sentence: right.sentence,
            lemma: "and".to_string(),
            name: None,
            label: None,
            person,
            number: Some(Number::Plural),
            gender: None,
            animacy: Animacy::Human,
            definite: true,
            possessor: None,
            possessive: false,
            reflexive: false,
            predicate: false,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;

    fn candidates(text: &str) -> (Doc, Vec<Candidate>) {
        let doc = Pipeline::load("en_literary").unwrap().process(text).unwrap();
        let found = detect(&doc, &CorefConfig::default());
        (doc, found)
    }

    fn rendered(found: &[Candidate]) -> Vec<String> {
        found.iter().map(|c| c.mention.to_string()).collect()
    }

    #[test]
    fn finds_pronouns_names_and_nouns() {
        let (_, found) = candidates("My father was a fox farmer. He raised silver foxes.");
        assert_eq!(
            rendered(&found),
            ["My(0)", "father(1)", "farmer(5)", "He(7)", "foxes(10)"]
        );
    }

    #[test]
    fn predicate_nominals_are_marked() {
        let (_, found) = candidates("My father was a fox farmer.");
        let farmer = found.iter().find(|c| c.lemma == "farmer").unwrap();
        assert!(farmer.predicate);
        assert!(!farmer.definite);
        let father = found.iter().find(|c| c.lemma == "father").unwrap();
        assert!(father.definite);
        assert_eq!(father.possessor.as_deref(), Some("my"));
        assert_eq!(father.animacy, Animacy::Human);
        assert_eq!(father.gender, Some(Gender::Masculine));
    }

    #[test]
    fn noun_phrase_spans_cover_modifiers() {
        let (doc, found) = candidates("The naked, slippery bodies were buried.");
        let bodies = found.iter().find(|c| c.lemma == "body").unwrap();
        assert_eq!(doc.span_text(bodies.mention.start, bodies.mention.end), "The naked, slippery bodies");
        assert_eq!(bodies.number, Some(Number::Plural));
    }

    #[test]
    fn coordination_of_people() {
        let (_, found) = candidates("My brother Laird and I sat on the top step.");
        let group = found
            .iter()
            .find(|c| c.kind() == MentionKind::Coordination)
            .unwrap();
        assert_eq!(group.mention.to_string(), "[Laird(2); I(4)]");
        assert_eq!(group.person, Person::First);
        assert_eq!(group.number, Some(Number::Plural));
    }

    #[test]
    fn titles_give_names_gender() {
        let (_, found) = candidates("Mrs. Smith met Mr. Jones and Dr. Hale.");
        let genders: Vec<_> = found
            .iter()
            .filter(|c| c.kind() == MentionKind::Proper)
            .map(|c| (c.lemma.as_str(), c.gender))
            .collect();
        assert_eq!(
            genders,
            [
                ("smith", Some(Gender::Feminine)),
                ("jones", Some(Gender::Masculine)),
                ("hale", None)
            ]
        );
    }

    #[test]
    fn things_are_not_coordinated() {
        let (_, found) = candidates("He smelled blood and animal fat.");
        assert!(found.iter().all(|c| c.kind() != MentionKind::Coordination));
    }

    #[test]
    fn first_person_can_be_disabled() {
        let doc = Pipeline::load("en_literary")
            .unwrap()
            .process("I saw my father.")
            .unwrap();
        let config = CorefConfig {
            link_first_person: false,
            ..CorefConfig::default()
        };
        assert_eq!(rendered(&detect(&doc, &config)), ["father(3)"]);
    }
}
