//! Fill-in-the-blank question generation

use pyo3::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analyzer::{Analyzer, EnglishAnalyzer, Pos};

/// Marker substituted for the blanked noun
pub const BLANK: &str = "_____";

/// Multiple-choice question with one noun blanked out of a sentence
#[pyclass]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizItem {
    #[pyo3(get)]
    pub question: String,
    #[pyo3(get)]
    pub choices: Vec<String>,
    #[pyo3(get)]
    pub answer: String,
}

#[pymethods]
impl QuizItem {
    fn __repr__(&self) -> String {
        format!(
            "QuizItem(question='{}...', answer='{}')",
            &self.question.chars().take(40).collect::<String>(),
            self.answer
        )
    }
}

/// Noun and proper-noun surface forms of a sentence, in order,
/// case preserved
fn sentence_nouns(analyzer: &dyn Analyzer, sentence: &str) -> Vec<String> {
    analyzer
        .tokenize(sentence)
        .into_iter()
        .filter(|t| matches!(t.pos, Pos::Noun | Pos::Propn))
        .map(|t| t.text)
        .collect()
}

/// Generate quiz questions with an injected randomness source.
///
/// Sentences longer than `sentence_length` characters are processed in
/// document order; each contributes at most one question, blanking one
/// of its nouns chosen uniformly at random. Distractors are sampled
/// without replacement from the sentence's other distinct nouns, taking
/// all of them when fewer than `max_options` exist.
pub fn generate_quiz_with<R: Rng>(
    analyzer: &dyn Analyzer,
    rng: &mut R,
    text: &str,
    sentence_length: usize,
    max_questions: usize,
    max_options: usize,
    min_nouns: usize,
) -> Vec<QuizItem> {
    let mut quiz = Vec::new();
    if max_questions == 0 {
        return quiz;
    }

    for sentence in analyzer.sentences(text) {
        if sentence.chars().count() <= sentence_length {
            continue;
        }

        let nouns = sentence_nouns(analyzer, &sentence);
        if nouns.len() < min_nouns {
            continue;
        }
        let answer = match nouns.choose(rng) {
            Some(noun) => noun.clone(),
            None => continue,
        };

        // First-occurrence de-dup keeps the pool reproducible under a
        // seeded rng; the answer is excluded so choices stay distinct
        let mut pool: Vec<String> = Vec::new();
        for noun in &nouns {
            if *noun != answer && !pool.contains(noun) {
                pool.push(noun.clone());
            }
        }
        pool.shuffle(rng);
        pool.truncate(max_options);

        let mut choices = pool;
        choices.push(answer.clone());
        choices.shuffle(rng);

        // Literal substring replacement, blanking every occurrence.
        // Known limitation kept for compatibility: an answer recurring
        // inside another word is blanked there too.
        let question = sentence.replace(&answer, BLANK);

        quiz.push(QuizItem {
            question,
            choices,
            answer,
        });
        if quiz.len() == max_questions {
            break;
        }
    }
    quiz
}

/// Generate quiz questions using thread-local randomness
pub fn generate_quiz(
    analyzer: &dyn Analyzer,
    text: &str,
    sentence_length: usize,
    max_questions: usize,
    max_options: usize,
    min_nouns: usize,
) -> Vec<QuizItem> {
    generate_quiz_with(
        analyzer,
        &mut rand::thread_rng(),
        text,
        sentence_length,
        max_questions,
        max_options,
        min_nouns,
    )
}

// ============= Python Binding =============

#[pyfunction]
#[pyo3(name = "generate_quiz")]
#[pyo3(signature = (text, sentence_length=30, max_questions=5, max_options=3, min_nouns=1))]
pub fn py_generate_quiz(
    text: &str,
    sentence_length: usize,
    max_questions: usize,
    max_options: usize,
    min_nouns: usize,
) -> PyResult<Vec<QuizItem>> {
    let analyzer = EnglishAnalyzer::new();
    Ok(generate_quiz(
        &analyzer,
        text,
        sentence_length,
        max_questions,
        max_options,
        min_nouns,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Token;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    /// Deterministic stand-in for the linguistic capability: sentences
    /// are '|'-separated, every alphabetic word is a noun.
    struct NounFixture;

    impl Analyzer for NounFixture {
        fn sentences(&self, text: &str) -> Vec<String> {
            text.split('|')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        }

        fn tokenize(&self, text: &str) -> Vec<Token> {
            text.split_whitespace()
                .map(|w| {
                    let word: String = w.chars().filter(|c| c.is_alphanumeric()).collect();
                    let pos = if !word.is_empty() && word.chars().all(|c| c.is_alphabetic()) {
                        Pos::Noun
                    } else {
                        Pos::Other
                    };
                    Token { text: word, pos }
                })
                .collect()
        }
    }

    /// Fixture that tags every token Other, as in noun-free text
    struct NoNounFixture;

    impl Analyzer for NoNounFixture {
        fn sentences(&self, text: &str) -> Vec<String> {
            NounFixture.sentences(text)
        }

        fn tokenize(&self, text: &str) -> Vec<Token> {
            NounFixture
                .tokenize(text)
                .into_iter()
                .map(|t| Token {
                    text: t.text,
                    pos: Pos::Other,
                })
                .collect()
        }
    }

    const TEXT: &str =
        "the quick brown fox jumps over the lazy dog tonight|a second sentence about cats and dogs sleeping|short one";

    #[test]
    fn test_empty_text_yields_no_questions() {
        let mut rng = StdRng::seed_from_u64(1);
        let quiz = generate_quiz_with(&NounFixture, &mut rng, "", 30, 5, 3, 1);
        assert!(quiz.is_empty());
    }

    #[test]
    fn test_answer_is_always_among_choices() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = generate_quiz_with(&NounFixture, &mut rng, TEXT, 20, 5, 3, 1);
            assert!(!quiz.is_empty());
            for item in &quiz {
                assert!(item.choices.contains(&item.answer));
            }
        }
    }

    #[test]
    fn test_choices_have_no_duplicates() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = generate_quiz_with(&NounFixture, &mut rng, TEXT, 20, 5, 3, 1);
            for item in &quiz {
                let distinct: HashSet<&String> = item.choices.iter().collect();
                assert_eq!(distinct.len(), item.choices.len());
            }
        }
    }

    #[test]
    fn test_choices_bounded_by_max_options_plus_answer() {
        let mut rng = StdRng::seed_from_u64(3);
        let quiz = generate_quiz_with(&NounFixture, &mut rng, TEXT, 20, 5, 3, 1);
        for item in &quiz {
            assert!(item.choices.len() <= 4);
            assert!(!item.choices.is_empty());
        }
    }

    #[test]
    fn test_question_count_bounded_by_max_questions() {
        for k in 0..4 {
            let mut rng = StdRng::seed_from_u64(9);
            let quiz = generate_quiz_with(&NounFixture, &mut rng, TEXT, 20, k, 3, 1);
            assert!(quiz.len() <= k);
        }
    }

    #[test]
    fn test_short_sentences_are_skipped() {
        let mut rng = StdRng::seed_from_u64(5);
        let quiz = generate_quiz_with(&NounFixture, &mut rng, "tiny words here", 30, 5, 3, 1);
        assert!(quiz.is_empty());
    }

    #[test]
    fn test_sentence_length_filter_is_strict() {
        // Exactly at the threshold is excluded, one past it qualifies
        let sentence = "abcdefghij klmnopqrst uvwxyzabcd";
        assert_eq!(sentence.chars().count(), 32);
        let mut rng = StdRng::seed_from_u64(5);
        let at = generate_quiz_with(&NounFixture, &mut rng, sentence, 32, 5, 3, 1);
        assert!(at.is_empty());
        let mut rng = StdRng::seed_from_u64(5);
        let above = generate_quiz_with(&NounFixture, &mut rng, sentence, 31, 5, 3, 1);
        assert_eq!(above.len(), 1);
    }

    #[test]
    fn test_no_nouns_yields_no_questions() {
        let mut rng = StdRng::seed_from_u64(11);
        let quiz = generate_quiz_with(&NoNounFixture, &mut rng, TEXT, 10, 5, 3, 1);
        assert!(quiz.is_empty());
    }

    #[test]
    fn test_min_nouns_filters_sparse_sentences() {
        // Single qualifying noun in the sentence, so min_nouns=2 rejects it
        let text = "wordless 123 456 789 000 111 222 333 444 555";
        let mut rng = StdRng::seed_from_u64(2);
        let quiz = generate_quiz_with(&NounFixture, &mut rng, text, 10, 5, 3, 2);
        assert!(quiz.is_empty());
    }

    #[test]
    fn test_blank_replaces_answer_in_question() {
        let mut rng = StdRng::seed_from_u64(21);
        let quiz = generate_quiz_with(&NounFixture, &mut rng, TEXT, 20, 5, 3, 1);
        for item in &quiz {
            assert!(item.question.contains(BLANK));
            assert!(!item.question.contains(&item.answer));
        }
    }

    #[test]
    fn test_blanked_sentence_reconstructs_original() {
        let analyzer = EnglishAnalyzer::new();
        let text = "An apple a day keeps the doctor away. Banana is yellow.";
        let mut rng = StdRng::seed_from_u64(13);
        let quiz = generate_quiz_with(&analyzer, &mut rng, text, 10, 5, 3, 1);
        assert_eq!(quiz.len(), 2);

        let originals = analyzer.sentences(text);
        for (item, original) in quiz.iter().zip(&originals) {
            assert_eq!(&item.question.replace(BLANK, &item.answer), original);
        }
    }

    #[test]
    fn test_same_seed_same_quiz() {
        let mut a = StdRng::seed_from_u64(77);
        let mut b = StdRng::seed_from_u64(77);
        let first = generate_quiz_with(&NounFixture, &mut a, TEXT, 20, 5, 3, 1);
        let second = generate_quiz_with(&NounFixture, &mut b, TEXT, 20, 5, 3, 1);
        assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.question, y.question);
            assert_eq!(x.choices, y.choices);
            assert_eq!(x.answer, y.answer);
        }
    }

    #[test]
    fn test_quiz_item_serializes() {
        let item = QuizItem {
            question: format!("The {} is blue", BLANK),
            choices: vec!["sky".to_string(), "sea".to_string()],
            answer: "sky".to_string(),
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: QuizItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.answer, "sky");
        assert_eq!(back.choices.len(), 2);
    }
}
