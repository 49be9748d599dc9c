//! Property-based tests for tokenization and chain building.
//!
//! Tokens must tile the input text, and the full pipeline must produce
//! well-formed chains for any sentence built from a small English vocabulary.

use litcoref::tokenizer::Tokenizer;
use litcoref::Pipeline;
use proptest::prelude::*;

const WORDS: &[&str] = &[
    "he", "she", "it", "they", "I", "we", "my", "his", "her", "their", "himself", "The", "the",
    "a", "father", "mother", "fox", "foxes", "cellar", "Laird", "Henry", "Bailey", "Mr.",
    "brother", "and", "was", "had", "sat", "ran", "in", "of", "Company", "Montreal", "small",
    "didn't", "Laird's", ",", ".", "!", "--", "\"",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..40).prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every token's span extracts exactly its text.
    #[test]
    fn token_spans_extract_text(text in ".{0,200}") {
        let doc = Tokenizer::new().tokenize(&text);
        for token in doc.tokens() {
            prop_assert_eq!(token.span.extract(&text), token.text.as_str());
            prop_assert!(!token.text.trim().is_empty());
        }
    }

    /// Leading whitespace plus each token and its trailing whitespace
    /// rebuilds the input.
    #[test]
    fn tokens_tile_the_text(text in "[ a-zA-Z'’.,\n-]{0,200}") {
        let doc = Tokenizer::new().tokenize(&text);
        let mut rebuilt = String::new();
        match doc.tokens().first() {
            Some(first) => rebuilt.push_str(&text[..first.span.byte_start]),
            None => rebuilt.push_str(&text),
        }
        for (i, token) in doc.tokens().iter().enumerate() {
            prop_assert_eq!(token.index, i);
            rebuilt.push_str(&token.text);
            rebuilt.push_str(&token.whitespace);
        }
        prop_assert_eq!(rebuilt, text);
    }

    /// Char offsets agree with byte offsets.
    #[test]
    fn char_offsets_match_bytes(text in ".{0,120}") {
        let doc = Tokenizer::new().tokenize(&text);
        for token in doc.tokens() {
            let by_chars: String = text
                .chars()
                .skip(token.span.char_start)
                .take(token.span.char_end - token.span.char_start)
                .collect();
            prop_assert_eq!(by_chars, token.text.clone());
        }
    }

    /// Chains from the full pipeline are well formed.
    #[test]
    fn chains_are_well_formed(text in sentence()) {
        let mut nlp = Pipeline::load("en_literary").unwrap();
        nlp.add_pipe("coref").unwrap();
        nlp.add_pipe("characters").unwrap();
        let doc = nlp.process(&text).unwrap();
        let chains = doc.coref_chains().unwrap();

        for (i, chain) in chains.iter().enumerate() {
            prop_assert_eq!(chain.index, i);
            prop_assert!(chain.len() >= 2);
            for mention in &chain.mentions {
                prop_assert!(mention.roots.iter().all(|&r| r < doc.len()));
            }
        }
        for token in 0..doc.len() + 2 {
            let resolved = chains.resolve(&doc, token);
            if chains.chains_for_token(token).is_empty() {
                prop_assert!(resolved.is_none());
            }
            if let Some(resolution) = resolved {
                prop_assert!(!resolution.tokens.is_empty());
                prop_assert!(resolution.tokens.iter().all(|&t| t < doc.len()));
            }
        }
        // formatting never panics
        let _ = chains.to_string();
    }
}
