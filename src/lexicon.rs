//! Closed-class word lists and small open-class lexicons.
//!
//! Everything the tagger, name finder and resolver know about English words
//! lives here. Lists stay short: structural cues (capitalization, suffixes,
//! position) do most of the work, the lists only cover what structure cannot.

use crate::doc::{Gender, Morph, Number, Person};

// =============================================================================
// Pronouns
// =============================================================================

/// Morphology of a personal pronoun, or `None` if `lower` is not one.
///
/// Neopronouns (xe, ze, fae) are third person singular with no gender.
#[must_use]
pub fn pronoun_morph(lower: &str) -> Option<Morph> {
    use Gender::*;
    use Number::*;
    use Person::*;

    let (person, number, gender, possessive, reflexive) = match lower {
        "i" | "me" => (First, Some(Singular), None, false, false),
        "my" | "mine" => (First, Some(Singular), None, true, false),
        "myself" => (First, Some(Singular), None, false, true),
        "we" | "us" => (First, Some(Plural), None, false, false),
        "our" | "ours" => (First, Some(Plural), None, true, false),
        "ourselves" => (First, Some(Plural), None, false, true),
        "you" => (Second, None, None, false, false),
        "your" | "yours" => (Second, None, None, true, false),
        "yourself" => (Second, Some(Singular), None, false, true),
        "yourselves" => (Second, Some(Plural), None, false, true),
        "he" | "him" => (Third, Some(Singular), Some(Masculine), false, false),
        "his" => (Third, Some(Singular), Some(Masculine), true, false),
        "himself" => (Third, Some(Singular), Some(Masculine), false, true),
        "she" | "her" => (Third, Some(Singular), Some(Feminine), false, false),
        "hers" => (Third, Some(Singular), Some(Feminine), true, false),
        "herself" => (Third, Some(Singular), Some(Feminine), false, true),
        "it" => (Third, Some(Singular), Some(Neuter), false, false),
        "its" => (Third, Some(Singular), Some(Neuter), true, false),
        "itself" => (Third, Some(Singular), Some(Neuter), false, true),
        "they" | "them" => (Third, Some(Plural), None, false, false),
        "their" | "theirs" => (Third, Some(Plural), None, true, false),
        "themselves" | "themself" => (Third, Some(Plural), None, false, true),
        "xe" | "xem" | "ze" | "hir" | "zir" | "fae" => (Third, Some(Singular), None, false, false),
        "xyr" | "xyrs" | "hirs" | "zirs" | "faer" | "faers" => {
            (Third, Some(Singular), None, true, false)
        }
        "xemself" | "hirself" | "zirself" | "faeself" => {
            (Third, Some(Singular), None, false, true)
        }
        _ => return None,
    };

    Some(Morph {
        person: Some(person),
        number,
        gender,
        possessive,
        reflexive,
    })
}

/// Possessive determiners that make the following noun phrase definite.
pub const POSSESSIVE_DETERMINERS: &[&str] = &[
    "my", "your", "his", "her", "its", "our", "their", "xyr", "zir", "hir", "faer",
];

/// `they`-family forms, for singular-they handling.
pub const THEY_FORMS: &[&str] = &["they", "them", "their", "theirs", "themselves", "themself"];

// =============================================================================
// Closed classes
// =============================================================================

/// Determiners that mark a noun phrase as definite.
pub const DEFINITE_DETERMINERS: &[&str] = &["the", "this", "that", "these", "those"];

/// Determiners that introduce a new referent.
pub const INDEFINITE_DETERMINERS: &[&str] = &[
    "a", "an", "another", "some", "any", "no", "each", "every", "several", "many", "few",
    "all", "both", "such", "either", "neither",
];

/// Prepositions and particles.
pub const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "to", "for", "from", "with", "by", "about", "against", "into",
    "onto", "over", "under", "after", "before", "behind", "below", "beneath", "beside",
    "between", "beyond", "during", "inside", "outside", "near", "off", "out", "through",
    "toward", "towards", "upon", "within", "without", "across", "along", "among", "around",
    "like", "than", "since", "until", "till", "up", "down", "via", "despite",
];

/// Coordinating and subordinating conjunctions.
pub const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "so", "because", "although", "though", "while",
    "when", "whenever", "where", "wherever", "if", "unless", "whether", "as", "once",
    "which", "who", "whom", "whose", "what",
];

/// Auxiliaries, copulas and modal verbs.
pub const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must", "'re", "'m", "'ll", "'d", "'ve", "ca", "wo",
];

/// Copulas, for spotting predicate nominals.
pub const COPULAS: &[&str] = &["is", "was", "are", "were", "be", "been", "became", "become", "seemed"];

/// Adverbs that no suffix rule catches.
pub const ADVERBS: &[&str] = &[
    "not", "n't", "very", "so", "too", "also", "then", "there", "here", "now", "just", "only",
    "even", "still", "away", "again", "always", "never", "often", "once", "soon", "already",
    "ever", "almost", "quite", "rather", "perhaps", "yet", "back", "together", "ago", "far",
    "instead", "however", "indeed", "else", "how", "why",
];

/// Number words.
pub const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
];

/// Titles that precede person names.
pub const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "dr", "prof", "sir", "dame", "lady", "lord", "captain",
    "major", "colonel", "general", "sergeant", "inspector", "detective", "reverend", "st",
    "uncle", "aunt",
];

/// Gender a title gives the name it precedes (`Mr.` vs `Mrs.`), if any.
#[must_use]
pub fn title_gender(lower: &str) -> Option<Gender> {
    match lower.trim_end_matches('.') {
        "mr" | "mister" | "sir" | "lord" | "uncle" => Some(Gender::Masculine),
        "mrs" | "ms" | "miss" | "dame" | "lady" | "aunt" | "madam" => Some(Gender::Feminine),
        _ => None,
    }
}

// =============================================================================
// Open classes
// =============================================================================

/// Irregular and frequent verbs that suffix rules miss.
pub const VERBS: &[&str] = &[
    "say", "said", "go", "went", "gone", "get", "got", "make", "made", "know", "knew", "known",
    "think", "thought", "take", "took", "taken", "see", "saw", "seen", "come", "came", "give",
    "gave", "given", "tell", "told", "find", "found", "feel", "felt", "leave", "left", "keep",
    "kept", "hold", "held", "bring", "brought", "buy", "bought", "sell", "sold", "sit", "sat",
    "stand", "stood", "run", "ran", "put", "let", "mean", "meant", "meet", "met", "pay", "paid",
    "begin", "began", "begun", "hang", "hung", "bend", "bent", "lie", "lay", "lain", "lead",
    "led", "lose", "lost", "send", "sent", "speak", "spoke", "spend", "spent", "wear", "wore",
    "win", "won", "write", "wrote", "grow", "grew", "fall", "fell", "hear", "heard", "eat",
    "ate", "drink", "drank", "sleep", "slept", "shake", "shook", "throw", "threw", "break",
    "broke", "choose", "chose", "drive", "drove", "forget", "forgot", "hide", "hid", "rise",
    "rose", "ride", "rode", "fly", "flew", "catch", "caught", "teach", "taught", "fight",
    "fought", "seek", "sought", "understand", "understood", "become", "want", "look", "seem",
    "try", "ask", "need", "kill", "skin", "wish", "watch", "remove", "raise", "supply",
    "hate", "love", "like", "live", "die", "died", "walk", "turn", "open", "close", "hope",
    "carry", "scrape", "stretch", "bury", "plant", "collect", "light", "lit",
];

/// Common adjectives that no suffix rule catches.
pub const ADJECTIVES: &[&str] = &[
    "good", "bad", "big", "small", "little", "long", "short", "old", "young", "new", "high",
    "low", "large", "great", "whole", "cold", "hot", "warm", "cool", "early", "late", "prime",
    "silver", "golden", "black", "white", "blue", "red", "green", "brown", "grey", "gray",
    "dark", "bright", "strong", "weak", "naked", "mean", "primitive", "heroic", "northern",
    "southern", "magnificent", "arrogant", "seasonal", "top", "hired", "same", "other",
    "own", "first", "last", "next", "several", "whole", "funny", "slippery", "clotted",
    "plumed", "real", "true", "full", "empty", "wild", "quiet", "loud", "soft", "hard",
];

/// Organization name endings.
pub const ORG_SUFFIX: &[&str] = &[
    "inc", "corp", "ltd", "llc", "co", "plc", "company", "corporation", "foundation",
    "institute", "university", "college", "bank", "group", "agency", "traders", "society",
    "association", "club", "church", "school", "army", "navy", "railway", "railroad",
];

/// Prepositions that introduce locations.
pub const LOC_PREPOSITION: &[&str] = &["in", "from", "at", "to", "near", "toward", "towards"];

/// Nouns that can only refer to men or boys.
pub const MASCULINE_NOUNS: &[&str] = &[
    "man", "men", "boy", "father", "dad", "brother", "son", "uncle", "husband", "grandfather",
    "grandpa", "king", "prince", "lord", "sir", "gentleman", "nephew", "monk", "priest",
];

/// Nouns that can only refer to women or girls.
pub const FEMININE_NOUNS: &[&str] = &[
    "woman", "women", "girl", "mother", "mom", "mum", "sister", "daughter", "aunt", "wife",
    "grandmother", "grandma", "queen", "princess", "lady", "niece", "nun", "actress",
    "waitress",
];

/// Nouns denoting people: relationships, occupations, generic person terms.
pub const PERSON_NOUNS: &[&str] = &[
    "person", "people", "man", "woman", "boy", "girl", "child", "baby", "father", "mother",
    "dad", "mom", "mum", "parent", "brother", "sister", "son", "daughter", "uncle", "aunt",
    "cousin", "husband", "wife", "grandfather", "grandmother", "grandpa", "grandma",
    "family", "friend", "enemy", "neighbor", "neighbour", "stranger", "visitor", "guest",
    "farmer", "trader", "hunter", "doctor", "nurse", "teacher", "student", "worker",
    "servant", "master", "owner", "boss", "soldier", "officer", "king", "queen", "prince",
    "princess", "lord", "lady", "gentleman", "savage", "adventurer", "narrator",
    "hero", "heroine", "villain", "priest", "preacher", "clerk", "driver", "sailor",
];

/// Nouns denoting animals.
pub const ANIMAL_NOUNS: &[&str] = &[
    "fox", "dog", "cat", "horse", "cow", "pig", "sheep", "goat", "chicken", "hen", "duck",
    "goose", "bird", "wolf", "bear", "deer", "rabbit", "mouse", "rat", "mink", "calf",
    "lamb", "pony", "mare", "colt", "puppy", "kitten", "owl", "crow", "snake", "fish",
];

/// Collective nouns for groups of characters.
pub const COLLECTIVE_NOUNS: &[&str] = &[
    "family", "group", "team", "crowd", "gang", "band", "party", "crew", "company", "troop",
    "herd", "pack", "flock", "tribe", "clan", "couple", "pair",
];

/// Verbs that introduce or tag quoted speech, animal sounds included.
pub const SPEECH_VERBS: &[&str] = &[
    "say", "says", "said", "saying", "ask", "asks", "asked", "asking", "reply", "replies",
    "replied", "shout", "shouted", "whisper", "whispered", "murmur", "murmured", "exclaimed",
    "announced", "declared", "answered", "responded", "called", "cried", "muttered", "yelled",
    "spoke", "remarked", "added", "continued", "interrupted", "repeated", "sighed", "groaned",
    "mumbled", "laughed", "gasped", "stammered", "screamed", "barked", "growled", "howled",
    "roared", "squealed", "snorted", "bellowed", "hissed", "croaked", "purred", "yelped",
    "whimpered", "snarled", "whined",
];

/// Person nouns that name a relation to someone else (`my brother`).
pub const RELATION_NOUNS: &[&str] = &[
    "father", "mother", "dad", "mom", "mum", "parent", "brother", "sister", "son", "daughter",
    "uncle", "aunt", "cousin", "grandfather", "grandmother", "grandpa", "grandma", "husband",
    "wife", "nephew", "niece", "friend", "enemy", "neighbor", "neighbour", "boss", "master",
    "owner", "partner", "companion", "teacher", "student", "servant", "guest", "lover",
];

/// Words that mark people acting as one (`they ate together`).
pub const COLLECTIVE_ACTION_WORDS: &[&str] = &[
    "together", "jointly", "collectively", "unison", "simultaneously", "united", "gathered",
    "assembled", "rallied", "reunited", "teamed",
];

/// Nouns ending in `-ing`/`-ed`/`-ly` that are not verbs or adverbs.
pub const SUFFIX_EXCEPTIONS: &[&str] = &[
    "thing", "something", "nothing", "anything", "everything", "king", "ring", "wing",
    "spring", "string", "morning", "evening", "ceiling", "building", "bed", "shed", "sled",
    "seed", "hundred", "family", "supply", "reply", "ally", "belly", "jelly", "lily",
    "holly", "fly", "only", "early", "ugly", "silly", "daily", "lonely", "lovely", "friendly",
    "kindly", "holy",
];

/// Words ending in `s` that are not plurals.
const SINGULAR_S: &[&str] = &[
    "christmas", "news", "species", "series", "gas", "bus", "lens", "always", "was", "has",
    "is", "this", "his", "its", "yes", "whereas", "perhaps", "sometimes", "mathematics",
];

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("wolves", "wolf"),
    ("calves", "calf"),
    ("halves", "half"),
    ("leaves", "leaf"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("selves", "self"),
    ("sheep", "sheep"),
    ("deer", "deer"),
    ("fish", "fish"),
];

// =============================================================================
// Lookups
// =============================================================================

/// Membership test for the word lists above.
#[must_use]
pub fn contains(list: &[&str], word: &str) -> bool {
    list.contains(&word)
}

/// True if `lower` looks like a plural noun.
#[must_use]
pub fn is_plural_noun(lower: &str) -> bool {
    if let Some(&(plural, singular)) = IRREGULAR_PLURALS.iter().find(|(p, _)| *p == lower) {
        return plural != singular;
    }
    lower.len() > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
        && !contains(SINGULAR_S, lower)
}

/// Singular form of a noun, used to match repeated mentions.
///
/// ```
/// use litcoref::lexicon::lemma;
///
/// assert_eq!(lemma("foxes"), "fox");
/// assert_eq!(lemma("companies"), "company");
/// assert_eq!(lemma("wives"), "wife");
/// assert_eq!(lemma("pelts"), "pelt");
/// assert_eq!(lemma("glass"), "glass");
/// ```
#[must_use]
pub fn lemma(lower: &str) -> String {
    if let Some((_, singular)) = IRREGULAR_PLURALS.iter().find(|(p, _)| *p == lower) {
        return (*singular).to_string();
    }
    if !is_plural_noun(lower) {
        return lower.to_string();
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["xes", "ches", "shes", "sses", "zes"] {
        if lower.ends_with(suffix) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    lower[..lower.len() - 1].to_string()
}

/// Gender carried by a noun lemma, if any.
#[must_use]
pub fn noun_gender(lemma: &str) -> Option<Gender> {
    if contains(MASCULINE_NOUNS, lemma) {
        Some(Gender::Masculine)
    } else if contains(FEMININE_NOUNS, lemma) {
        Some(Gender::Feminine)
    } else {
        None
    }
}

/// True if the noun lemma denotes a person.
#[must_use]
pub fn is_person_noun(lemma: &str) -> bool {
    contains(PERSON_NOUNS, lemma) || noun_gender(lemma).is_some()
}

/// True if the noun lemma denotes an animal.
#[must_use]
pub fn is_animal_noun(lemma: &str) -> bool {
    contains(ANIMAL_NOUNS, lemma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pronoun_features() {
        let he = pronoun_morph("he").unwrap();
        assert_eq!(he.person, Some(Person::Third));
        assert_eq!(he.gender, Some(Gender::Masculine));
        assert!(!he.possessive);

        let their = pronoun_morph("their").unwrap();
        assert_eq!(their.number, Some(Number::Plural));
        assert!(their.possessive);

        let xe = pronoun_morph("xe").unwrap();
        assert_eq!(xe.gender, None);
        assert_eq!(xe.number, Some(Number::Singular));

        assert!(pronoun_morph("father").is_none());
    }

    #[test]
    fn plural_detection() {
        assert!(is_plural_noun("foxes"));
        assert!(is_plural_noun("women"));
        assert!(!is_plural_noun("christmas"));
        assert!(!is_plural_noun("grass"));
        assert!(!is_plural_noun("sheep"));
        assert!(!is_plural_noun("fox"));
    }

    #[test]
    fn lemmas() {
        assert_eq!(lemma("churches"), "church");
        assert_eq!(lemma("men"), "man");
        assert_eq!(lemma("bodies"), "body");
        assert_eq!(lemma("father"), "father");
    }

    #[test]
    fn person_and_animal_nouns() {
        assert!(is_person_noun("father"));
        assert!(is_person_noun("wife"));
        assert!(!is_person_noun("cellar"));
        assert!(is_animal_noun("fox"));
        assert_eq!(noun_gender("mother"), Some(Gender::Feminine));
        assert_eq!(noun_gender("farmer"), None);
    }

    #[test]
    fn gendered_titles() {
        assert_eq!(title_gender("mr"), Some(Gender::Masculine));
        assert_eq!(title_gender("mrs."), Some(Gender::Feminine));
        assert_eq!(title_gender("miss"), Some(Gender::Feminine));
        assert_eq!(title_gender("captain"), None);
    }
}
