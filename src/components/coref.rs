//! Rule-based coreference resolution.
//!
//! Mentions are visited in document order and linked to earlier mentions by a
//! handful of rules:
//!
//! 1. **Apposition**: `my brother Laird`, `the hired man, Henry Bailey`
//! 2. **Names**: exact, substring or last-name match within one entity label
//! 3. **Definite nouns**: `the cellar` links back to an earlier `cellar`
//! 4. **First person**: every `I`/`me`/`my` is the narrator; `we` links to an
//!    earlier `we` or to a coordination that includes the narrator
//! 5. **Third-person pronouns**: nearest agreeing antecedent within a few
//!    sentences
//!
//! # Gender
//!
//! Gender is taken from pronouns, from a short list of gendered nouns
//! (`father`, `wife`) and from gendered titles (`Mr.`, `Mrs.`). It is never
//! guessed from a name: `Laird` has no gender until a `he` joins its chain.
//! `Mr. Smith` and `Mrs. Smith` share a surname but never a chain.
//!
//! # Example
//!
//! ```rust
//! use litcoref::Pipeline;
//!
//! let mut nlp = Pipeline::load("en_literary")?;
//! nlp.add_pipe("coref")?;
//! let doc = nlp.process("Henry Bailey came in. Then Bailey sat down. He was tired.")?;
//! let chains = doc.coref_chains().expect("coref ran");
//! assert_eq!(chains.to_string(), "0: Bailey(1), Bailey(6), He(10)\n");
//! # Ok::<(), litcoref::Error>(())
//! ```

use super::mentions::{self, Animacy, Candidate};
use crate::chains::{CorefChains, Mention, MentionKind};
use crate::doc::{Doc, EntityLabel, Gender, Number, Person};
use crate::lexicon::{self, contains};
use crate::pipeline::Component;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Configuration
// =============================================================================

/// Coreference settings, the `[coref]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorefConfig {
    /// How many sentences back a pronoun may look for its antecedent
    pub max_sentence_distance: usize,
    /// Put first-person pronouns into chains (the narrator)
    pub link_first_person: bool,
    /// Let `they` refer to a single person
    pub singular_they: bool,
    /// Substring and last-name matching for proper names
    pub fuzzy_names: bool,
    /// Keep single-mention chains in the output
    pub include_singletons: bool,
}

impl Default for CorefConfig {
    fn default() -> Self {
        Self {
            max_sentence_distance: 3,
            link_first_person: true,
            singular_they: false,
            fuzzy_names: true,
            include_singletons: false,
        }
    }
}

// =============================================================================
// Resolver trait
// =============================================================================

/// Anything that can turn a tagged document into coreference chains.
pub trait CoreferenceResolver: Send + Sync {
    /// Compute chains for `doc`.
    fn resolve(&self, doc: &Doc) -> CorefChains;

    /// Resolver name, for logs.
    fn name(&self) -> &'static str;
}

// =============================================================================
// Rule-based resolver
// =============================================================================

/// The default resolver.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedResolver {
    config: CorefConfig,
}

impl RuleBasedResolver {
    /// Create a resolver with configuration.
    #[must_use]
    pub fn new(config: CorefConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CorefConfig {
        &self.config
    }

    /// Resolve a tagged document.
    #[must_use]
    pub fn resolve(&self, doc: &Doc) -> CorefChains {
        let candidates = mentions::detect(doc, &self.config);
        if candidates.is_empty() {
            return CorefChains::default();
        }

        let index = MentionIndex::build(&candidates);
        let mut clusters = Clusters::new(&candidates);
        for i in 0..candidates.len() {
            for j in self.antecedents(doc, &candidates, &index, &clusters, i) {
                clusters.union(j, i);
            }
        }

        let mut groups: HashMap<usize, Vec<Mention>> = HashMap::new();
        for (i, candidate) in candidates.iter().enumerate() {
            groups
                .entry(clusters.find(i))
                .or_default()
                .push(candidate.mention.clone());
        }
        let min_len = if self.config.include_singletons { 1 } else { 2 };
        let chains = CorefChains::new(
            groups
                .into_values()
                .filter(|g| g.len() >= min_len)
                .collect(),
        );
        log::debug!(
            "coref: {} mentions, {} chains",
            candidates.len(),
            chains.len()
        );
        chains
    }

    /// Earlier candidates that candidate `i` corefers with.
    fn antecedents(
        &self,
        doc: &Doc,
        candidates: &[Candidate],
        index: &MentionIndex,
        clusters: &Clusters,
        i: usize,
    ) -> Vec<usize> {
        let mention = &candidates[i];
        match mention.kind() {
            MentionKind::Pronoun if mention.person == Person::First => {
                first_person_antecedent(index, mention, i).into_iter().collect()
            }
            MentionKind::Pronoun => self
                .pronoun_antecedent(candidates, clusters, i)
                .into_iter()
                .collect(),
            MentionKind::Proper => self.name_antecedents(doc, candidates, index, clusters, i),
            MentionKind::Nominal => nominal_antecedent(candidates, index, i).into_iter().collect(),
            MentionKind::Coordination => Vec::new(),
        }
    }

    fn name_antecedents(
        &self,
        doc: &Doc,
        candidates: &[Candidate],
        index: &MentionIndex,
        clusters: &Clusters,
        i: usize,
    ) -> Vec<usize> {
        let name = &candidates[i];
        let mut found = Vec::new();

        // Apposition
        if name.label == Some(EntityLabel::Person) {
            let start = name.mention.start;
            let mut ends = vec![start];
            if start >= 2 && doc[start - 1].text == "," {
                ends.push(start - 1);
            }
            let apposed = ends
                .iter()
                .flat_map(|end| before(index.ending_at(*end), i))
                .filter(|&j| {
                    let c = &candidates[j];
                    c.kind() == MentionKind::Nominal
                        && !c.predicate
                        && c.animacy == Animacy::Human
                        && !clusters.features(j).conflicts(name.gender)
                })
                .max();
            found.extend(apposed);
        }

        // Earlier mention of the same name, unless a title says otherwise
        // ("Mr. Smith" / "Mrs. Smith").
        if let Some(text) = &name.name {
            let mut earlier: Vec<usize> = text
                .split_whitespace()
                .flat_map(|word| before(index.names_with(word), i))
                .collect();
            earlier.sort_unstable_by(|a, b| b.cmp(a));
            earlier.dedup();
            let matched = earlier.into_iter().find(|&j| {
                let c = &candidates[j];
                c.kind() == MentionKind::Proper
                    && c.label == name.label
                    && !clusters.features(j).conflicts(name.gender)
                    && c.name
                        .as_deref()
                        .is_some_and(|other| names_match(text, other, self.config.fuzzy_names))
            });
            found.extend(matched);
        }
        found
    }

    fn pronoun_antecedent(
        &self,
        candidates: &[Candidate],
        clusters: &Clusters,
        i: usize,
    ) -> Option<usize> {
        let pronoun = &candidates[i];
        let root = pronoun.last_root();
        let mut best: Option<(usize, f64)> = None;

        for j in (0..i).rev() {
            let candidate = &candidates[j];
            let distance = pronoun.sentence.saturating_sub(candidate.sentence);
            if distance > self.config.max_sentence_distance
                || (pronoun.reflexive && distance > 0)
            {
                break;
            }
            if candidate.predicate
                || candidate.person != Person::Third
                || candidate.mention.roots.contains(&root)
            {
                continue;
            }

            let cluster = clusters.features(j);
            if !self.agrees(pronoun, candidate, cluster) {
                continue;
            }

            let mut score = root.saturating_sub(candidate.last_root()) as f64;
            if pronoun.gender != Some(Gender::Neuter) && cluster.animate {
                score *= 0.25;
            }
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((j, score));
            }
        }
        best.map(|(j, _)| j)
    }

    /// Number, gender and animacy agreement between a third-person pronoun
    /// and a candidate plus the rest of its chain so far.
    fn agrees(&self, pronoun: &Candidate, candidate: &Candidate, cluster: &Features) -> bool {
        let they = contains(lexicon::THEY_FORMS, &pronoun.lemma);

        let number = candidate.number.or(cluster.number.map(|(_, n)| n));
        if let (Some(p), Some(c)) = (pronoun.number, number) {
            let singular_they =
                self.config.singular_they && they && c == Number::Singular && cluster.human;
            if p != c && !singular_they {
                return false;
            }
        }

        match pronoun.gender {
            Some(Gender::Neuter) => !cluster.human && !cluster.masculine && !cluster.feminine,
            Some(g) => cluster.animate && !cluster.conflicts(Some(g)),
            // they
            None if they => true,
            // xe, ze, fae
            None => cluster.human,
        }
    }
}

impl CoreferenceResolver for RuleBasedResolver {
    fn resolve(&self, doc: &Doc) -> CorefChains {
        self.resolve(doc)
    }

    fn name(&self) -> &'static str {
        "rule-based"
    }
}

fn first_person_antecedent(index: &MentionIndex, pronoun: &Candidate, i: usize) -> Option<usize> {
    match pronoun.number {
        Some(Number::Plural) => before(&index.first_plural, i).next(),
        _ => before(&index.first_singular, i).next(),
    }
}

fn nominal_antecedent(candidates: &[Candidate], index: &MentionIndex, i: usize) -> Option<usize> {
    let noun = &candidates[i];
    if !noun.definite || noun.predicate {
        return None;
    }
    before(index.with_lemma(&noun.lemma), i).find(|&j| {
        let c = &candidates[j];
        if c.predicate {
            return false;
        }
        match c.kind() {
            MentionKind::Nominal => {
                c.lemma == noun.lemma
                    && c.number == noun.number
                    && !matches!((&c.possessor, &noun.possessor), (Some(a), Some(b)) if a != b)
            }
            // "the Hudson's Bay Company ... the company"
            MentionKind::Proper => {
                c.label == Some(EntityLabel::Organization)
                    && noun.number != Some(Number::Plural)
                    && lexicon::lemma(&c.lemma) == noun.lemma
            }
            _ => false,
        }
    })
}

/// Exact, substring or last-name match of two lowercased names.
fn names_match(a: &str, b: &str, fuzzy: bool) -> bool {
    if a == b {
        return true;
    }
    if !fuzzy {
        return false;
    }
    let a_words: Vec<&str> = a.split_whitespace().collect();
    let b_words: Vec<&str> = b.split_whitespace().collect();
    let (short, long) = if a_words.len() <= b_words.len() {
        (&a_words, &b_words)
    } else {
        (&b_words, &a_words)
    };
    !short.is_empty() && long.windows(short.len()).any(|w| w == short.as_slice())
}

// =============================================================================
// Candidate lookup
// =============================================================================

/// Earlier candidates from an ascending index list, nearest first.
fn before(list: &[usize], i: usize) -> impl Iterator<Item = usize> + '_ {
    list[..list.partition_point(|&j| j < i)].iter().rev().copied()
}

/// Candidate indices keyed by what antecedent search looks up, so no rule
/// has to rescan every earlier mention. Every list is ascending.
#[derive(Debug, Default)]
struct MentionIndex {
    by_end: HashMap<usize, Vec<usize>>,
    by_name_word: HashMap<String, Vec<usize>>,
    by_lemma: HashMap<String, Vec<usize>>,
    first_singular: Vec<usize>,
    first_plural: Vec<usize>,
}

impl MentionIndex {
    fn build(candidates: &[Candidate]) -> Self {
        let mut index = Self::default();
        for (i, c) in candidates.iter().enumerate() {
            index.by_end.entry(c.mention.end).or_default().push(i);
            match c.kind() {
                MentionKind::Proper => {
                    if let Some(name) = &c.name {
                        let mut words: Vec<&str> = name.split_whitespace().collect();
                        words.sort_unstable();
                        words.dedup();
                        for word in words {
                            index.by_name_word.entry(word.to_string()).or_default().push(i);
                        }
                    }
                    if c.label == Some(EntityLabel::Organization) {
                        index.by_lemma.entry(lexicon::lemma(&c.lemma)).or_default().push(i);
                    }
                }
                MentionKind::Nominal => {
                    index.by_lemma.entry(c.lemma.clone()).or_default().push(i);
                }
                MentionKind::Pronoun | MentionKind::Coordination => {}
            }
            if c.person == Person::First {
                if c.kind() == MentionKind::Pronoun && c.number == Some(Number::Singular) {
                    index.first_singular.push(i);
                }
                if c.number == Some(Number::Plural) || c.kind() == MentionKind::Coordination {
                    index.first_plural.push(i);
                }
            }
        }
        index
    }

    fn ending_at(&self, end: usize) -> &[usize] {
        self.by_end.get(&end).map_or(&[], Vec::as_slice)
    }

    fn names_with(&self, word: &str) -> &[usize] {
        self.by_name_word.get(word).map_or(&[], Vec::as_slice)
    }

    fn with_lemma(&self, lemma: &str) -> &[usize] {
        self.by_lemma.get(lemma).map_or(&[], Vec::as_slice)
    }
}

// =============================================================================
// Union-find
// =============================================================================

/// What a chain-so-far is known to be, merged as clusters join.
#[derive(Debug, Clone, Copy, Default)]
struct Features {
    human: bool,
    animate: bool,
    /// Number of the earliest member that has one
    number: Option<(usize, Number)>,
    masculine: bool,
    feminine: bool,
}

impl Features {
    fn of(i: usize, c: &Candidate) -> Self {
        Self {
            human: c.animacy == Animacy::Human,
            animate: c.animacy.is_animate(),
            number: c.number.map(|n| (i, n)),
            masculine: c.gender == Some(Gender::Masculine),
            feminine: c.gender == Some(Gender::Feminine),
        }
    }

    fn merge(&mut self, other: &Features) {
        self.human |= other.human;
        self.animate |= other.animate;
        self.number = match (self.number, other.number) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (a, b) => a.or(b),
        };
        self.masculine |= other.masculine;
        self.feminine |= other.feminine;
    }

    /// True if a member carries the opposite of `gender`.
    fn conflicts(&self, gender: Option<Gender>) -> bool {
        match gender {
            Some(Gender::Masculine) => self.feminine,
            Some(Gender::Feminine) => self.masculine,
            _ => false,
        }
    }
}

/// Disjoint sets over candidate indices, union by size, with the merged
/// [`Features`] of each set kept on its root.
#[derive(Debug)]
struct Clusters {
    parent: Vec<usize>,
    size: Vec<usize>,
    features: Vec<Features>,
}

impl Clusters {
    fn new(candidates: &[Candidate]) -> Self {
        Self {
            parent: (0..candidates.len()).collect(),
            size: vec![1; candidates.len()],
            features: candidates
                .iter()
                .enumerate()
                .map(|(i, c)| Features::of(i, c))
                .collect(),
        }
    }

    fn find(&self, mut i: usize) -> usize {
        while self.parent[i] != i {
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (root, child) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        let merged = self.features[child];
        self.features[root].merge(&merged);
    }

    fn features(&self, i: usize) -> &Features {
        &self.features[self.find(i)]
    }
}

// =============================================================================
// Pipeline component
// =============================================================================

/// The `coref` pipe: runs a [`CoreferenceResolver`] and stores its chains on
/// the document.
pub struct CorefComponent {
    resolver: Box<dyn CoreferenceResolver>,
}

impl std::fmt::Debug for CorefComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorefComponent")
            .field("resolver", &self.resolver.name())
            .finish()
    }
}

impl Default for CorefComponent {
    fn default() -> Self {
        Self::new(CorefConfig::default())
    }
}

impl CorefComponent {
    /// Component backed by [`RuleBasedResolver`].
    #[must_use]
    pub fn new(config: CorefConfig) -> Self {
        Self::with_resolver(Box::new(RuleBasedResolver::new(config)))
    }

    /// Component backed by a custom resolver.
    #[must_use]
    pub fn with_resolver(resolver: Box<dyn CoreferenceResolver>) -> Self {
        Self { resolver }
    }
}

impl Component for CorefComponent {
    fn name(&self) -> &'static str {
        "coref"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["tagger"]
    }

    fn process(&self, doc: &mut Doc) -> Result<()> {
        if !doc.has_annotation("tagger") {
            return Err(Error::pipeline("coref needs tagged tokens; add 'tagger' first"));
        }
        let chains = self.resolver.resolve(doc);
        log::debug!("{}: {} chains", self.resolver.name(), chains.len());
        doc.set_coref_chains(chains);
        Ok(())
    }
}
