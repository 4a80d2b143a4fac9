//! Word scramble puzzle generation

use std::collections::HashSet;

use pyo3::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analyzer::{Analyzer, EnglishAnalyzer};

/// Letter scramble puzzle over a single word
#[pyclass]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleItem {
    #[pyo3(get)]
    pub puzzle: String,
    #[pyo3(get)]
    pub answer: String,
}

#[pymethods]
impl PuzzleItem {
    fn __repr__(&self) -> String {
        format!("PuzzleItem(answer='{}')", self.answer)
    }
}

/// Shuffle the characters of a word, re-sampling while the result equals
/// the original whenever a different arrangement exists
fn scramble<R: Rng>(rng: &mut R, word: &str) -> String {
    let original: Vec<char> = word.chars().collect();
    let mut letters = original.clone();
    let rearrangeable = original.len() >= 2 && original.iter().any(|c| *c != original[0]);
    loop {
        letters.shuffle(rng);
        if !rearrangeable || letters != original {
            return letters.into_iter().collect();
        }
    }
}

/// Generate scramble puzzles with an injected randomness source.
///
/// Purely alphabetic words of at least `min_word_length` characters are
/// lowercased and de-duplicated; a random selection of `max_puzzles` of
/// them is scrambled. Answers are pairwise distinct by construction.
pub fn generate_puzzles_with<R: Rng>(
    analyzer: &dyn Analyzer,
    rng: &mut R,
    text: &str,
    min_word_length: usize,
    max_puzzles: usize,
) -> Vec<PuzzleItem> {
    let mut seen = HashSet::new();
    let mut words: Vec<String> = Vec::new();
    for token in analyzer.tokenize(text) {
        if !token.is_alpha() || token.text.chars().count() < min_word_length {
            continue;
        }
        let word = token.text.to_lowercase();
        if seen.insert(word.clone()) {
            words.push(word);
        }
    }

    words.shuffle(rng);
    words.truncate(max_puzzles);

    words
        .into_iter()
        .map(|word| {
            let scrambled = scramble(rng, &word);
            PuzzleItem {
                puzzle: format!("Unscramble this word: {}", scrambled),
                answer: word,
            }
        })
        .collect()
}

/// Generate scramble puzzles using thread-local randomness
pub fn generate_puzzles(
    analyzer: &dyn Analyzer,
    text: &str,
    min_word_length: usize,
    max_puzzles: usize,
) -> Vec<PuzzleItem> {
    generate_puzzles_with(
        analyzer,
        &mut rand::thread_rng(),
        text,
        min_word_length,
        max_puzzles,
    )
}

// ============= Python Binding =============

#[pyfunction]
#[pyo3(name = "generate_puzzles")]
#[pyo3(signature = (text, min_word_length=6, max_puzzles=5))]
pub fn py_generate_puzzles(
    text: &str,
    min_word_length: usize,
    max_puzzles: usize,
) -> PyResult<Vec<PuzzleItem>> {
    let analyzer = EnglishAnalyzer::new();
    Ok(generate_puzzles(&analyzer, text, min_word_length, max_puzzles))
}
