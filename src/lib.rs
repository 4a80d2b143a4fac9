//! DocQuiz Core - Rust core for document-based exercise generation
//!
//! Extracts text from uploaded documents (.txt, .pdf, .docx) and derives
//! practice exercises from it: fill-in-the-blank quizzes and word
//! scramble puzzles, plus grading helpers for submitted answers.

mod analyzer;
mod extract;
mod puzzle;
mod quiz;
mod scoring;

use pyo3::prelude::*;

// Re-export the Rust API
pub use analyzer::{Analyzer, EnglishAnalyzer, Pos, Token};
pub use extract::{extract_text, ExtractError};
pub use puzzle::{generate_puzzles, generate_puzzles_with, PuzzleItem};
pub use quiz::{generate_quiz, generate_quiz_with, QuizItem, BLANK};
pub use scoring::{
    check_answer, grade_puzzles, grade_quiz, MatchResult, PuzzleOutcome, PuzzleReport,
    QuestionOutcome, QuizReport,
};

/// DocQuiz Core Python Module
#[pymodule]
fn docquiz_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Text extraction
    m.add_function(wrap_pyfunction!(extract::py_extract_text, m)?)?;

    // Exercise generation
    m.add_function(wrap_pyfunction!(quiz::py_generate_quiz, m)?)?;
    m.add_function(wrap_pyfunction!(puzzle::py_generate_puzzles, m)?)?;

    // Submission grading
    m.add_function(wrap_pyfunction!(scoring::py_check_answer, m)?)?;
    m.add_function(wrap_pyfunction!(scoring::py_grade_quiz, m)?)?;
    m.add_function(wrap_pyfunction!(scoring::py_grade_puzzles, m)?)?;

    // Register classes
    m.add_class::<quiz::QuizItem>()?;
    m.add_class::<puzzle::PuzzleItem>()?;
    m.add_class::<scoring::MatchResult>()?;
    m.add_class::<scoring::QuestionOutcome>()?;
    m.add_class::<scoring::QuizReport>()?;
    m.add_class::<scoring::PuzzleOutcome>()?;
    m.add_class::<scoring::PuzzleReport>()?;

    Ok(())
}
