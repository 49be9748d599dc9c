//! Coreference chains and pronoun resolution.
//!
//! A [`CorefChains`] value is what the `coref` component stores on a
//! [`Doc`]. It prints one line per chain:
//!
//! ```text
//! 0: father(1), he(10), he(33)
//! 1: [Laird(118); I(120)], we(130)
//! ```
//!
//! Mentions are shown by their root token(s) with the token index in
//! parentheses; a coordinated mention lists each member in brackets.

use crate::doc::Doc;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Mentions
// =============================================================================

/// How a mention refers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    /// he, she, it, they, I
    Pronoun,
    /// A proper name
    Proper,
    /// A common noun phrase
    Nominal,
    /// Several mentions joined by `and`
    Coordination,
}

impl MentionKind {
    /// How informative a mention of this kind is, higher is better.
    #[must_use]
    pub fn specificity(&self) -> u8 {
        match self {
            MentionKind::Proper => 3,
            MentionKind::Nominal | MentionKind::Coordination => 2,
            MentionKind::Pronoun => 1,
        }
    }
}

/// One mention in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Root token indices: one for a plain mention, several for a coordination
    pub roots: Vec<usize>,
    /// Text of each root token
    pub texts: Vec<String>,
    /// Mention kind
    pub kind: MentionKind,
    /// First token of the full phrase (inclusive)
    pub start: usize,
    /// Last token of the full phrase (exclusive)
    pub end: usize,
}

impl Mention {
    /// A single-root mention of `doc[root]`, covering `start..end`.
    #[must_use]
    pub fn single(doc: &Doc, root: usize, kind: MentionKind, start: usize, end: usize) -> Self {
        Self::with_roots(doc, vec![root], kind, start, end)
    }

    /// A mention over several roots.
    #[must_use]
    pub fn with_roots(
        doc: &Doc,
        roots: Vec<usize>,
        kind: MentionKind,
        start: usize,
        end: usize,
    ) -> Self {
        let texts = roots
            .iter()
            .map(|&r| doc.token(r).map(|t| t.text.clone()).unwrap_or_default())
            .collect();
        Self {
            roots,
            texts,
            kind,
            start,
            end,
        }
    }

    /// First root token.
    #[must_use]
    pub fn root(&self) -> usize {
        self.roots.first().copied().unwrap_or(self.start)
    }

    /// True for coordinations.
    #[must_use]
    pub fn is_coordination(&self) -> bool {
        self.roots.len() > 1
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .roots
            .iter()
            .zip(&self.texts)
            .map(|(root, text)| format!("{}({})", text, root))
            .collect();
        if parts.len() == 1 {
            f.write_str(&parts[0])
        } else {
            write!(f, "[{}]", parts.join("; "))
        }
    }
}

// =============================================================================
// Chains
// =============================================================================

/// Mentions judged to refer to the same entity, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Chain number
    pub index: usize,
    /// Mentions, in document order
    pub mentions: Vec<Mention>,
    /// Index into `mentions` of the most informative mention
    pub most_specific: usize,
}

impl Chain {
    /// The most informative mention.
    #[must_use]
    pub fn most_specific_mention(&self) -> &Mention {
        &self.mentions[self.most_specific]
    }

    /// Number of mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// True if the chain has no mentions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// True if a single-root mention of this chain sits on `token`.
    #[must_use]
    pub fn has_root(&self, token: usize) -> bool {
        self.mentions
            .iter()
            .any(|m| !m.is_coordination() && m.root() == token)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.index)?;
        for (i, mention) in self.mentions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", mention)?;
        }
        Ok(())
    }
}

/// The resolved referent of a token: the texts of the most specific
/// mentions it ultimately points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Token indices
    pub tokens: Vec<usize>,
    /// Token texts
    pub texts: Vec<String>,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.texts.join(", "))
    }
}

/// All coreference chains of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorefChains {
    chains: Vec<Chain>,
}

impl CorefChains {
    /// Build chains from groups of mentions.
    ///
    /// Mentions are sorted within each group, empty groups are dropped, and
    /// chains are numbered by their first mention.
    #[must_use]
    pub fn new(groups: Vec<Vec<Mention>>) -> Self {
        let mut chains: Vec<Chain> = groups
            .into_iter()
            .filter(|g| !g.is_empty())
            .map(|mut mentions| {
                mentions.sort_by_key(|m| (m.root(), m.roots.len()));
                let most_specific = most_specific(&mentions);
                Chain {
                    index: 0,
                    mentions,
                    most_specific,
                }
            })
            .collect();
        chains.sort_by_key(|c| c.mentions[0].root());
        for (index, chain) in chains.iter_mut().enumerate() {
            chain.index = index;
        }
        Self { chains }
    }

    /// Chains in order.
    pub fn iter(&self) -> impl Iterator<Item = &Chain> {
        self.chains.iter()
    }

    /// Number of chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// True if there are no chains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Chain by number.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Chain> {
        self.chains.get(index)
    }

    /// Chains with a mention rooted at `token`, coordinations included.
    #[must_use]
    pub fn chains_for_token(&self, token: usize) -> Vec<&Chain> {
        self.chains
            .iter()
            .filter(|c| c.mentions.iter().any(|m| m.roots.contains(&token)))
            .collect()
    }

    /// Print every chain to stdout.
    pub fn print(&self) {
        print!("{}", self);
    }

    /// Token indices `token` ultimately refers to, or `None` if it is in no
    /// chain.
    ///
    /// The most specific mention of the token's chain is returned; if that
    /// mention is itself a coordination or a pronoun, each of its roots is
    /// resolved in turn.
    #[must_use]
    pub fn resolve_indices(&self, token: usize) -> Option<Vec<usize>> {
        self.chain_of(token)?;
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.resolve_into(token, &mut path, &mut out);
        Some(out)
    }

    /// Resolve `token` to the texts it refers to.
    ///
    /// Returns `None` when the token is in no chain or out of range.
    #[must_use]
    pub fn resolve(&self, doc: &Doc, token: usize) -> Option<Resolution> {
        doc.token(token)?;
        let tokens = self.resolve_indices(token)?;
        let texts = tokens
            .iter()
            .filter_map(|&t| doc.token(t).map(|tok| tok.text.clone()))
            .collect();
        Some(Resolution { tokens, texts })
    }

    fn chain_of(&self, token: usize) -> Option<&Chain> {
        self.chains.iter().find(|c| c.has_root(token))
    }

    fn resolve_into(&self, token: usize, path: &mut Vec<usize>, out: &mut Vec<usize>) {
        let chain = match self.chain_of(token) {
            Some(chain) if !path.contains(&chain.index) => chain,
            _ => {
                if !out.contains(&token) {
                    out.push(token);
                }
                return;
            }
        };
        path.push(chain.index);
        for &root in &chain.most_specific_mention().roots {
            self.resolve_into(root, path, out);
        }
        path.pop();
    }
}

impl fmt::Display for CorefChains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chain in &self.chains {
            writeln!(f, "{}", chain)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CorefChains {
    type Item = &'a Chain;
    type IntoIter = std::slice::Iter<'a, Chain>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.iter()
    }
}

fn most_specific(mentions: &[Mention]) -> usize {
    let mut best = 0;
    for (i, mention) in mentions.iter().enumerate() {
        if mention.kind.specificity() > mentions[best].kind.specificity() {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;

    // "Peter and his wife ..." style fixture built by hand so the chain
    // layout does not depend on the resolver.
    fn fixture() -> (Doc, CorefChains) {
        let doc = Tokenizer::new().tokenize(
            "Peter came home . He said that his wife was tired . He and his wife left . They were happy .",
        );
        // Peter(0) He(4) his(7) wife(8) He(12) and(13) his(14) wife(15) They(18)
        let chains = CorefChains::new(vec![
            vec![
                Mention::single(&doc, 4, MentionKind::Pronoun, 4, 5),
                Mention::single(&doc, 0, MentionKind::Proper, 0, 1),
                Mention::single(&doc, 7, MentionKind::Pronoun, 7, 8),
                Mention::single(&doc, 12, MentionKind::Pronoun, 12, 13),
                Mention::single(&doc, 14, MentionKind::Pronoun, 14, 15),
            ],
            vec![
                Mention::with_roots(&doc, vec![12, 15], MentionKind::Coordination, 12, 16),
                Mention::single(&doc, 18, MentionKind::Pronoun, 18, 19),
            ],
        ]);
        (doc, chains)
    }

    #[test]
    fn chains_are_sorted_and_numbered() {
        let (_, chains) = fixture();
        assert_eq!(chains.len(), 2);
        assert_eq!(
            chains.to_string(),
            "0: Peter(0), He(4), his(7), He(12), his(14)\n1: [He(12); wife(15)], They(18)\n"
        );
    }

    #[test]
    fn most_specific_prefers_names() {
        let (_, chains) = fixture();
        let chain = chains.get(0).unwrap();
        assert_eq!(chain.most_specific_mention().texts, ["Peter"]);
        assert_eq!(chains.get(1).unwrap().most_specific, 0);
    }

    #[test]
    fn resolve_through_coordination() {
        let (doc, chains) = fixture();
        let resolution = chains.resolve(&doc, 18).unwrap();
        assert_eq!(resolution.tokens, [0, 15]);
        assert_eq!(resolution.to_string(), "[Peter, wife]");
    }

    #[test]
    fn resolve_pronoun_to_name() {
        let (doc, chains) = fixture();
        assert_eq!(chains.resolve(&doc, 7).unwrap().to_string(), "[Peter]");
        assert_eq!(chains.resolve_indices(0), Some(vec![0]));
    }

    #[test]
    fn tokens_outside_chains() {
        let (doc, chains) = fixture();
        assert!(chains.resolve(&doc, 1).is_none());
        assert!(chains.resolve(&doc, 500).is_none());
        // Only part of a coordination, not a chain of its own.
        assert!(chains.resolve(&doc, 15).is_none());
        assert_eq!(chains.chains_for_token(12).len(), 2);
    }

    #[test]
    fn mention_display() {
        let (doc, _) = fixture();
        let coordination = Mention::with_roots(&doc, vec![12, 15], MentionKind::Coordination, 12, 16);
        assert_eq!(coordination.to_string(), "[He(12); wife(15)]");
        assert!(coordination.is_coordination());
    }

    #[test]
    fn empty_groups_are_dropped() {
        let chains = CorefChains::new(vec![Vec::new()]);
        assert!(chains.is_empty());
        assert_eq!(chains.to_string(), "");
    }

    #[test]
    fn serializes_to_json() {
        let (_, chains) = fixture();
        let json = serde_json::to_value(&chains).unwrap();
        assert!(json.is_array());
        assert_eq!(json[1]["mentions"][0]["kind"], "coordination");
        let back: CorefChains = serde_json::from_value(json).unwrap();
        assert_eq!(back, chains);
    }
}
