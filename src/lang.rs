//! Language detection by Unicode script.
//!
//! Pipelines are built for one language. Detection here is only good enough
//! to notice that someone fed Cyrillic or CJK text into an English pipeline.

use serde::{Deserialize, Serialize};

/// Languages the script detector can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (also any unmarked Latin-script text)
    English,
    /// German
    German,
    /// French
    French,
    /// Spanish
    Spanish,
    /// Russian (any Cyrillic)
    Russian,
    /// Chinese
    Chinese,
    /// Japanese
    Japanese,
    /// Korean
    Korean,
    /// Arabic
    Arabic,
    /// Hebrew
    Hebrew,
}

const ALL: [Language; 10] = [
    Language::English,
    Language::German,
    Language::French,
    Language::Spanish,
    Language::Russian,
    Language::Chinese,
    Language::Japanese,
    Language::Korean,
    Language::Arabic,
    Language::Hebrew,
];

impl Language {
    /// ISO 639-1 code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Russian => "ru",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Arabic => "ar",
            Language::Hebrew => "he",
        }
    }

    /// Returns true for Latin-script languages.
    #[must_use]
    pub fn is_latin(&self) -> bool {
        matches!(
            self,
            Language::English | Language::German | Language::French | Language::Spanish
        )
    }
}

/// Heuristic language detection based on Unicode scripts.
///
/// Latin text defaults to English unless language-specific letters dominate.
/// Text without any alphabetic characters is reported as English.
#[must_use]
pub fn detect_language(text: &str) -> Language {
    let mut counts = [0usize; ALL.len()];

    for c in text.chars().filter(|c| c.is_alphabetic()) {
        let slot = match c {
            '\u{4e00}'..='\u{9fff}' => Language::Chinese,
            '\u{3040}'..='\u{30ff}' => Language::Japanese,
            '\u{ac00}'..='\u{d7af}' => Language::Korean,
            '\u{0600}'..='\u{06ff}' => Language::Arabic,
            '\u{0590}'..='\u{05ff}' => Language::Hebrew,
            '\u{0400}'..='\u{04ff}' => Language::Russian,
            'ß' | 'ä' | 'ö' | 'ü' | 'Ä' | 'Ö' | 'Ü' => {
                counts[Language::German as usize] += 9;
                Language::German
            }
            'à' | 'â' | 'ç' | 'è' | 'ê' | 'ë' | 'î' | 'ï' | 'ô' | 'û' | 'ù' => {
                counts[Language::French as usize] += 4;
                Language::French
            }
            'ñ' | 'á' | 'í' | 'ó' | 'ú' => {
                counts[Language::Spanish as usize] += 4;
                Language::Spanish
            }
            _ => Language::English,
        };
        counts[slot as usize] += 1;
    }

    let best = ALL
        .iter()
        .copied()
        .max_by_key(|lang| counts[*lang as usize])
        .unwrap_or(Language::English);

    // Kanji alone reads as Chinese; any kana means Japanese.
    if best == Language::Chinese && counts[Language::Japanese as usize] > 0 {
        return Language::Japanese;
    }
    if counts[best as usize] == 0 {
        return Language::English;
    }
    best
}
