//! Sentence segmentation, tokenization, and coarse part-of-speech tagging

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Coarse grammatical category assigned to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
    Noun,
    Propn,
    Other,
}

/// A segmentation unit of text with its coarse category
#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub pos: Pos,
}

impl Token {
    /// True when every character of the surface form is alphabetic
    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c.is_alphabetic())
    }
}

/// Linguistic analysis capability consumed by the generators.
///
/// Implementations must keep sentence boundaries and categories stable for
/// a given input; generators are deterministic given an analyzer and a
/// seeded randomness source.
pub trait Analyzer {
    /// Split text into sentence spans (trimmed, in document order)
    fn sentences(&self, text: &str) -> Vec<String>;
    /// Split text into word and punctuation tokens with categories
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Words that never act as nouns for blanking purposes: determiners,
/// pronouns, prepositions, conjunctions, auxiliaries, common adverbs.
static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "this", "that", "these", "those", "i", "you", "he",
        "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "mine", "yours", "hers",
        "ours", "theirs", "myself", "yourself", "himself", "herself",
        "itself", "ourselves", "themselves", "who", "whom", "whose", "which",
        "what", "of", "in", "on", "at", "by", "for", "with", "about",
        "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "out", "off", "over",
        "under", "again", "further", "away", "and", "but", "or", "nor", "so",
        "yet", "if", "because", "as", "until", "while", "when", "where",
        "why", "how", "than", "is", "am", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did",
        "doing", "will", "would", "shall", "should", "can", "could", "may",
        "might", "must", "not", "no", "yes", "very", "too", "also", "just",
        "only", "there", "here", "then", "now", "once", "all", "any",
        "both", "each", "few", "more", "most", "other", "some", "such",
        "own", "same",
    ]
    .into_iter()
    .collect()
});

/// Lowercased abbreviations that end in a period without closing a sentence
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "rev", "gen", "sen", "st", "sr",
        "jr", "etc", "vs", "e.g", "i.e", "cf", "fig", "no", "vol", "ch",
        "sec", "dept", "inc", "ltd", "co", "corp", "approx", "est", "u.s",
        "u.k",
    ]
    .into_iter()
    .collect()
});

/// Rule-based English analyzer.
///
/// Sentence boundaries follow terminal punctuation with an abbreviation
/// guard; tagging is a heuristic over a function-word lexicon, suffix
/// rules, and capitalization. Cheap to construct; callers own the
/// instance and pass it to the generators.
#[derive(Debug, Default, Clone)]
pub struct EnglishAnalyzer;

impl EnglishAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Word immediately preceding a period, used for the abbreviation guard
    fn word_before(chars: &[char], dot: usize) -> String {
        let mut start = dot;
        while start > 0 {
            let c = chars[start - 1];
            if c.is_alphabetic() || c == '.' {
                start -= 1;
            } else {
                break;
            }
        }
        chars[start..dot].iter().collect::<String>().to_lowercase()
    }

    fn is_abbreviation(chars: &[char], dot: usize) -> bool {
        let word = Self::word_before(chars, dot);
        if word.is_empty() {
            return false;
        }
        // Single capital initials ("J. Smith") never end a sentence
        if word.chars().count() == 1 {
            return true;
        }
        ABBREVIATIONS.contains(word.trim_end_matches('.'))
            || ABBREVIATIONS.contains(word.as_str())
    }

    fn classify(&self, word: &str, sentence_start: bool) -> Pos {
        if !word.chars().all(|c| c.is_alphabetic()) {
            return Pos::Other;
        }
        let lower = word.to_lowercase();
        if FUNCTION_WORDS.contains(lower.as_str()) {
            return Pos::Other;
        }
        let capitalized = word
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase());
        if capitalized && !sentence_start {
            return Pos::Propn;
        }
        // Derivational adverbs and past forms are never blanked
        if lower.chars().count() > 4 && (lower.ends_with("ly") || lower.ends_with("ed")) {
            return Pos::Other;
        }
        Pos::Noun
    }
}

impl Analyzer for EnglishAnalyzer {
    fn sentences(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        let push_span = |from: usize, to: usize, out: &mut Vec<String>| {
            let span: String = chars[from..to].iter().collect();
            let trimmed = span.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        };

        while i < chars.len() {
            let c = chars[i];
            if c == '.' || c == '!' || c == '?' {
                // Trailing quotes and brackets belong to the sentence
                let mut end = i + 1;
                while end < chars.len()
                    && matches!(chars[end], '.' | '!' | '?' | '"' | '\'' | ')' | ']')
                {
                    end += 1;
                }
                let at_boundary = end >= chars.len() || chars[end].is_whitespace();
                if at_boundary && !(c == '.' && Self::is_abbreviation(&chars, i)) {
                    push_span(start, end, &mut sentences);
                    start = end;
                    i = end;
                    continue;
                }
            }
            i += 1;
        }
        if start < chars.len() {
            push_span(start, chars.len(), &mut sentences);
        }
        sentences
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut sentence_start = true;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }
            if c.is_alphanumeric() {
                let mut j = i + 1;
                while j < chars.len()
                    && (chars[j].is_alphanumeric()
                        || (chars[j] == '\''
                            && j + 1 < chars.len()
                            && chars[j + 1].is_alphanumeric()))
                {
                    j += 1;
                }
                let word: String = chars[i..j].iter().collect();
                let pos = self.classify(&word, sentence_start);
                tokens.push(Token { text: word, pos });
                sentence_start = false;
                i = j;
            } else {
                if matches!(c, '.' | '!' | '?') {
                    sentence_start = true;
                }
                tokens.push(Token {
                    text: c.to_string(),
                    pos: Pos::Other,
                });
                i += 1;
            }
        }
        tokens
    }
}
