//! Submission grading for quizzes and puzzles

use pyo3::prelude::*;
use strsim::{jaro_winkler, levenshtein, normalized_levenshtein};

use crate::puzzle::PuzzleItem;
use crate::quiz::QuizItem;

/// Result of comparing a submitted answer with the expected one
#[pyclass]
#[derive(Debug, Clone)]
pub struct MatchResult {
    #[pyo3(get)]
    pub is_correct: bool,
    #[pyo3(get)]
    pub similarity: f64,
    #[pyo3(get)]
    pub feedback: String,
}

#[pymethods]
impl MatchResult {
    fn __repr__(&self) -> String {
        format!(
            "MatchResult(is_correct={}, similarity={:.2})",
            self.is_correct, self.similarity
        )
    }
}

/// Graded record for one quiz question
#[pyclass]
#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    #[pyo3(get)]
    pub question: String,
    #[pyo3(get)]
    pub submitted: Option<String>,
    #[pyo3(get)]
    pub expected: String,
    #[pyo3(get)]
    pub is_correct: bool,
}

/// Graded quiz submission
#[pyclass]
#[derive(Debug, Clone)]
pub struct QuizReport {
    #[pyo3(get)]
    pub outcomes: Vec<QuestionOutcome>,
    #[pyo3(get)]
    pub score: usize,
    #[pyo3(get)]
    pub total: usize,
}

#[pymethods]
impl QuizReport {
    fn __repr__(&self) -> String {
        format!("QuizReport(score={}/{})", self.score, self.total)
    }
}

/// Graded record for one puzzle
#[pyclass]
#[derive(Debug, Clone)]
pub struct PuzzleOutcome {
    #[pyo3(get)]
    pub puzzle: String,
    #[pyo3(get)]
    pub submitted: Option<String>,
    #[pyo3(get)]
    pub expected: String,
    #[pyo3(get)]
    pub is_correct: bool,
    #[pyo3(get)]
    pub feedback: String,
}

/// Graded puzzle submission
#[pyclass]
#[derive(Debug, Clone)]
pub struct PuzzleReport {
    #[pyo3(get)]
    pub outcomes: Vec<PuzzleOutcome>,
    #[pyo3(get)]
    pub score: usize,
    #[pyo3(get)]
    pub total: usize,
}

#[pymethods]
impl PuzzleReport {
    fn __repr__(&self) -> String {
        format!("PuzzleReport(score={}/{})", self.score, self.total)
    }
}

/// Compare a submitted answer with the expected one.
///
/// Both sides are trimmed and lowercased before comparison. A miss
/// carries a similarity score (Jaro-Winkler weighted over normalized
/// Levenshtein, which handles transposed letters better) so callers can
/// tell a near miss from a blank guess.
pub fn check_answer(submitted: &str, expected: &str) -> MatchResult {
    let submitted_norm = submitted.trim().to_lowercase();
    let expected_norm = expected.trim().to_lowercase();

    if !submitted_norm.is_empty() && submitted_norm == expected_norm {
        return MatchResult {
            is_correct: true,
            similarity: 1.0,
            feedback: "Correct!".to_string(),
        };
    }

    let similarity = normalized_levenshtein(&submitted_norm, &expected_norm) * 0.4
        + jaro_winkler(&submitted_norm, &expected_norm) * 0.6;

    let feedback = if similarity >= 0.5 {
        let distance = levenshtein(&submitted_norm, &expected_norm);
        format!(
            "Close - {} letters off. The answer was '{}'.",
            distance, expected
        )
    } else {
        format!("Incorrect. The answer was '{}'.", expected)
    };

    MatchResult {
        is_correct: false,
        similarity,
        feedback,
    }
}

/// Grade a quiz submission. Choices are fixed strings, so a response is
/// correct only when it equals the expected answer exactly; a missing
/// response counts as wrong.
pub fn grade_quiz(quiz: &[QuizItem], responses: &[Option<String>]) -> QuizReport {
    let mut outcomes = Vec::with_capacity(quiz.len());
    let mut score = 0;

    for (i, item) in quiz.iter().enumerate() {
        let submitted = responses.get(i).cloned().flatten();
        let is_correct = submitted.as_deref() == Some(item.answer.as_str());
        if is_correct {
            score += 1;
        }
        outcomes.push(QuestionOutcome {
            question: item.question.clone(),
            submitted,
            expected: item.answer.clone(),
            is_correct,
        });
    }

    QuizReport {
        outcomes,
        score,
        total: quiz.len(),
    }
}

/// Grade a puzzle submission with normalized matching and per-item
/// feedback
pub fn grade_puzzles(puzzles: &[PuzzleItem], responses: &[Option<String>]) -> PuzzleReport {
    let mut outcomes = Vec::with_capacity(puzzles.len());
    let mut score = 0;

    for (i, item) in puzzles.iter().enumerate() {
        let submitted = responses.get(i).cloned().flatten();
        let result = check_answer(submitted.as_deref().unwrap_or(""), &item.answer);
        if result.is_correct {
            score += 1;
        }
        outcomes.push(PuzzleOutcome {
            puzzle: item.puzzle.clone(),
            submitted,
            expected: item.answer.clone(),
            is_correct: result.is_correct,
            feedback: result.feedback,
        });
    }

    PuzzleReport {
        outcomes,
        score,
        total: puzzles.len(),
    }
}

// ============= Python Bindings =============

#[pyfunction]
#[pyo3(name = "check_answer")]
pub fn py_check_answer(submitted: &str, expected: &str) -> MatchResult {
    check_answer(submitted, expected)
}

#[pyfunction]
#[pyo3(name = "grade_quiz")]
pub fn py_grade_quiz(quiz: Vec<QuizItem>, responses: Vec<Option<String>>) -> QuizReport {
    grade_quiz(&quiz, &responses)
}

#[pyfunction]
#[pyo3(name = "grade_puzzles")]
pub fn py_grade_puzzles(puzzles: Vec<PuzzleItem>, responses: Vec<Option<String>>) -> PuzzleReport {
    grade_puzzles(&puzzles, &responses)
}
