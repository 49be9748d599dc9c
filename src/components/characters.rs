//! Character roster built from coreference chains.
//!
//! Each chain that refers to a person, an animal or a group of people becomes
//! a [`Character`]; person names that never made it into a chain are added
//! with a single mention. Chains about things (`the cellar`) are ignored.
//!
//! On top of the chains the roster records:
//!
//! - **Relationships**: `my brother Laird` makes Laird the narrator's
//!   brother. People joined by `and`, or named in the sentences before a word
//!   like `together`, act with each other.
//! - **Speech**: quotations attributed by [`dialogue`](super::dialogue) are
//!   added to the speaker's lines. A speaker outside every chain (`said the
//!   old dog`) becomes a character of its own.
//! - **Members** of groups formed by coordination (`Laird and I`).

use super::coref::CorefConfig;
use super::dialogue;
use super::mentions;
use crate::chains::{Mention, MentionKind};
use crate::doc::{Doc, EntityLabel, Number, Person, Tag, Token};
use crate::lexicon::{self, contains};
use crate::pipeline::Component;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentences before a collective-action word whose characters count as
/// acting together.
const RECENT_SENTENCES: usize = 2;

/// What sort of character this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    /// The first-person narrator
    Narrator,
    /// Someone with a proper name
    Named,
    /// Someone known by a relationship or role (`my father`, `the hired man`)
    Relational,
    /// An animal
    Animal,
    /// Several people (`we`, `Laird and I`)
    Group,
}

impl CharacterKind {
    /// Lowercase label.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            CharacterKind::Narrator => "narrator",
            CharacterKind::Named => "named",
            CharacterKind::Relational => "relational",
            CharacterKind::Animal => "animal",
            CharacterKind::Group => "group",
        }
    }
}

/// How a character stands to another one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "noun", rename_all = "snake_case")]
pub enum Relation {
    /// `my brother`: the character is the target's brother
    Role(String),
    /// Coordinated with the target, or acting together with it
    ActsWith,
}

/// A relation to another character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Kind of relation
    pub relation: Relation,
    /// Name of the other character
    pub target: String,
    /// How many times the text states it
    pub mentions: usize,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.relation {
            Relation::Role(noun) => write!(f, "{} of {}", noun, self.target),
            Relation::ActsWith => write!(f, "acts with {}", self.target),
        }
    }
}

/// One quotation attributed to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Quoted words
    pub text: String,
    /// Speech verb (`said`, `barked`)
    pub verb: String,
    /// Opening quote mark
    pub token: usize,
}

/// One character of the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name
    pub name: String,
    /// Kind
    pub kind: CharacterKind,
    /// Number of mentions
    pub mentions: usize,
    /// First token that mentions the character
    pub first_token: usize,
    /// Other non-pronoun ways the text refers to the character
    pub aliases: Vec<String>,
    /// Relations to other characters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
    /// Quotations the character speaks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speech: Vec<Utterance>,
    /// Members of a group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl Character {
    fn new(name: String, kind: CharacterKind, mentions: usize, first_token: usize) -> Self {
        Self {
            name,
            kind,
            mentions,
            first_token,
            aliases: Vec::new(),
            relationships: Vec::new(),
            speech: Vec::new(),
            members: Vec::new(),
        }
    }

    fn relate(&mut self, relation: Relation, target: &str) {
        match self
            .relationships
            .iter_mut()
            .find(|r| r.relation == relation && r.target == target)
        {
            Some(existing) => existing.mentions += 1,
            None => self.relationships.push(Relationship {
                relation,
                target: target.to_string(),
                mentions: 1,
            }),
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} mentions",
            self.name,
            self.kind.as_label(),
            self.mentions
        )?;
        if !self.speech.is_empty() {
            write!(f, ", {} lines", self.speech.len())?;
        }
        f.write_str(")")?;
        if !self.aliases.is_empty() {
            write!(f, " aka {}", self.aliases.join(", "))?;
        }
        if !self.relationships.is_empty() {
            let relations: Vec<String> = self.relationships.iter().map(|r| r.to_string()).collect();
            write!(f, "; {}", relations.join(", "))?;
        }
        Ok(())
    }
}

/// A character while the roster is assembled.
struct Entry {
    character: Character,
    /// Chain the character comes from
    chain: Option<usize>,
    /// Tokens where the character is mentioned on its own
    tokens: Vec<usize>,
}

fn owner_of(entries: &[Entry], token: usize) -> Option<usize> {
    entries.iter().position(|e| e.tokens.contains(&token))
}

/// The `characters` pipe.
#[derive(Debug, Clone, Default)]
pub struct CharacterRoster;

impl CharacterRoster {
    /// Create the component.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the roster, most-mentioned first.
    #[must_use]
    pub fn build(&self, doc: &Doc) -> Vec<Character> {
        let mut entries: Vec<Entry> = Vec::new();
        if let Some(chains) = doc.coref_chains() {
            for chain in chains.iter() {
                if let Some(character) = from_chain(doc, chain) {
                    entries.push(Entry {
                        character,
                        chain: Some(chain.index),
                        tokens: chain
                            .mentions
                            .iter()
                            .filter(|m| !m.is_coordination())
                            .map(Mention::root)
                            .collect(),
                    });
                }
            }
        }

        add_unchained_names(doc, &mut entries);
        add_roles(doc, &mut entries);
        add_coordinations(doc, &mut entries);
        add_collective_actions(doc, &mut entries);
        add_speech(doc, &mut entries);

        let mut roster: Vec<Character> = entries.into_iter().map(|e| e.character).collect();
        roster.sort_by(|a, b| {
            b.mentions
                .cmp(&a.mentions)
                .then(a.first_token.cmp(&b.first_token))
        });
        roster
    }
}

impl Component for CharacterRoster {
    fn name(&self) -> &'static str {
        "characters"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["coref"]
    }

    fn process(&self, doc: &mut Doc) -> Result<()> {
        if doc.coref_chains().is_none() {
            return Err(Error::pipeline("characters needs coreference chains"));
        }
        let roster = self.build(doc);
        log::debug!("characters: {} found", roster.len());
        doc.set_characters(roster);
        Ok(())
    }
}

fn from_chain(doc: &Doc, chain: &crate::chains::Chain) -> Option<Character> {
    let first_token = chain.mentions.first()?.start;
    let best = chain.most_specific_mention();
    let root = doc.token(best.root())?;

    let narrator = chain.mentions.iter().any(|m| {
        m.kind == MentionKind::Pronoun
            && doc.token(m.root()).is_some_and(|t| {
                t.morph.person == Some(Person::First) && t.morph.number == Some(Number::Singular)
            })
    });

    let (kind, name) = if narrator {
        (CharacterKind::Narrator, "narrator".to_string())
    } else {
        match best.kind {
            MentionKind::Proper => {
                let entity = doc.entity_at(best.root())?;
                if entity.label != EntityLabel::Person {
                    return None;
                }
                (CharacterKind::Named, entity.full_name())
            }
            MentionKind::Nominal => (
                nominal_kind(root)?,
                doc.span_text(best.start, best.end).to_lowercase(),
            ),
            MentionKind::Coordination => (CharacterKind::Group, best.texts.join(" and ")),
            MentionKind::Pronoun => {
                let first_plural = root.morph.person == Some(Person::First);
                if !first_plural {
                    return None;
                }
                (CharacterKind::Group, root.lower().to_string())
            }
        }
    };

    let mut character = Character::new(name, kind, chain.len(), first_token);
    for mention in &chain.mentions {
        if mention.kind == MentionKind::Pronoun {
            continue;
        }
        let text = if mention.is_coordination() {
            mention.texts.join(" and ")
        } else {
            doc.span_text(mention.start, mention.end).to_string()
        };
        if !text.eq_ignore_ascii_case(&character.name)
            && !character.aliases.iter().any(|a| a.eq_ignore_ascii_case(&text))
        {
            character.aliases.push(text);
        }
    }
    Some(character)
}

/// Kind of character a common noun names, `None` for things.
fn nominal_kind(head: &Token) -> Option<CharacterKind> {
    let lemma = lexicon::lemma(head.lower());
    if lexicon::is_animal_noun(&lemma) {
        Some(CharacterKind::Animal)
    } else if contains(lexicon::COLLECTIVE_NOUNS, &lemma)
        || (lexicon::is_person_noun(&lemma) && head.morph.number == Some(Number::Plural))
    {
        Some(CharacterKind::Group)
    } else if lexicon::is_person_noun(&lemma) {
        Some(CharacterKind::Relational)
    } else {
        None
    }
}

fn add_unchained_names(doc: &Doc, entries: &mut Vec<Entry>) {
    for entity in doc.entities() {
        if entity.label != EntityLabel::Person || owner_of(entries, entity.head()).is_some() {
            continue;
        }
        let name = entity.full_name();
        match entries.iter_mut().find(|e| e.character.name == name) {
            Some(entry) => {
                entry.character.mentions += 1;
                entry.tokens.push(entity.head());
            }
            None => entries.push(Entry {
                character: Character::new(name, CharacterKind::Named, 1, entity.start),
                chain: None,
                tokens: vec![entity.head()],
            }),
        }
    }
}

/// `my brother`, `Laird's father`: the token that owns a relation noun.
fn possessor(doc: &Doc, mention: &Mention) -> Option<usize> {
    let root = mention.root();
    for i in (mention.start.saturating_sub(1)..root).rev() {
        let token = &doc[i];
        if token.tag == Tag::Pronoun && token.morph.possessive {
            return Some(i);
        }
        if token.lower() == "'s" && token.morph.possessive {
            let owner = i.checked_sub(1)?;
            return Some(doc.entity_at(owner).map_or(owner, |e| e.head()));
        }
    }
    None
}

fn add_roles(doc: &Doc, entries: &mut [Entry]) {
    let Some(chains) = doc.coref_chains() else {
        return;
    };
    for i in 0..entries.len() {
        let Some(chain) = entries[i].chain.and_then(|c| chains.get(c)) else {
            continue;
        };
        for mention in chain.mentions.iter().filter(|m| m.kind == MentionKind::Nominal) {
            let lemma = lexicon::lemma(doc[mention.root()].lower());
            if !contains(lexicon::RELATION_NOUNS, &lemma) {
                continue;
            }
            let Some(owner) = possessor(doc, mention) else {
                continue;
            };
            let target = match owner_of(entries, owner) {
                Some(j) if j == i => continue,
                Some(j) => entries[j].character.name.clone(),
                None => match doc.entity_at(owner) {
                    Some(e) if e.label == EntityLabel::Person => e.full_name(),
                    _ => continue,
                },
            };
            entries[i].character.relate(Relation::Role(lemma), &target);
        }
    }
}

/// `Laird and I`: the two act with each other, and a group chain built on
/// the coordination lists them as members.
fn add_coordinations(doc: &Doc, entries: &mut [Entry]) {
    let candidates = mentions::detect(doc, &CorefConfig::default());
    for coordination in candidates
        .iter()
        .filter(|c| c.kind() == MentionKind::Coordination)
    {
        let owners: Vec<usize> = coordination
            .mention
            .roots
            .iter()
            .filter_map(|&r| owner_of(entries, r))
            .collect();
        for &a in &owners {
            for &b in &owners {
                if a != b {
                    let target = entries[b].character.name.clone();
                    entries[a].character.relate(Relation::ActsWith, &target);
                }
            }
        }
    }

    let Some(chains) = doc.coref_chains() else {
        return;
    };
    for i in 0..entries.len() {
        if entries[i].character.kind != CharacterKind::Group {
            continue;
        }
        let Some(chain) = entries[i].chain.and_then(|c| chains.get(c)) else {
            continue;
        };
        let Some(group) = chain.mentions.iter().find(|m| m.is_coordination()) else {
            continue;
        };
        let members = group
            .roots
            .iter()
            .zip(&group.texts)
            .map(|(&root, text)| match owner_of(entries, root) {
                Some(j) => entries[j].character.name.clone(),
                None => text.clone(),
            })
            .collect();
        entries[i].character.members = members;
    }
}

/// `They ate together`: everyone named in the last few sentences acts with
/// everyone else, unless a group is already around to take the action.
fn add_collective_actions(doc: &Doc, entries: &mut [Entry]) {
    for token in doc
        .tokens()
        .iter()
        .filter(|t| contains(lexicon::COLLECTIVE_ACTION_WORDS, t.lower()))
    {
        let window = token.sentence.saturating_sub(RECENT_SENTENCES)..=token.sentence;
        let recent = |e: &Entry| e.tokens.iter().any(|&t| window.contains(&doc[t].sentence));

        if entries
            .iter()
            .any(|e| e.character.kind == CharacterKind::Group && recent(e))
        {
            continue;
        }
        let active: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| recent(e))
            .map(|(i, _)| i)
            .collect();
        if active.len() < 2 {
            continue;
        }
        log::debug!(
            "characters: {} act together at token {}",
            active.len(),
            token.index
        );
        for &a in &active {
            for &b in &active {
                if a != b {
                    let target = entries[b].character.name.clone();
                    entries[a].character.relate(Relation::ActsWith, &target);
                }
            }
        }
    }
}

fn add_speech(doc: &Doc, entries: &mut Vec<Entry>) {
    for attribution in dialogue::attributions(doc) {
        let owner = match owner_of(entries, attribution.speaker) {
            Some(i) => i,
            None => match speaker_entry(doc, attribution.speaker) {
                Some(entry) => {
                    entries.push(entry);
                    entries.len() - 1
                }
                None => {
                    log::debug!(
                        "characters: no character for speaker at token {}",
                        attribution.speaker
                    );
                    continue;
                }
            },
        };
        let content = attribution.quote.content();
        entries[owner].character.speech.push(Utterance {
            text: doc.span_text(content.start, content.end).to_string(),
            verb: attribution.verb,
            token: attribution.quote.open,
        });
    }
}

/// A new character for a speaker noun that no chain covers.
fn speaker_entry(doc: &Doc, head: usize) -> Option<Entry> {
    let token = doc.token(head)?;
    if token.tag != Tag::Noun {
        return None;
    }
    let kind = nominal_kind(token)?;
    let mut start = head;
    while start > 0 && doc[start - 1].tag == Tag::Adjective {
        start -= 1;
    }
    if start > 0 && (doc[start - 1].tag == Tag::Determiner || doc[start - 1].morph.possessive) {
        start -= 1;
    }
    let name = doc.span_text(start, head + 1).to_lowercase();
    Some(Entry {
        character: Character::new(name, kind, 1, start),
        chain: None,
        tokens: vec![head],
    })
}
