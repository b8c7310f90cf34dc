//! Penmark Core - answer grading for English writing practice
//!
//! Scores a learner's sentence against a model answer, and provides the
//! pieces around it: saved-word storage, ingestion of generated content and
//! a speech playback session.

mod config;
mod content;
mod error;
mod feedback;
mod grading;
mod keywords;
mod length;
mod normalize;
mod similarity;
mod speech;
mod vocabulary;

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub use config::{GradingConfig, ScoreWeights, SpecialMessages};
pub use content::{
    parse_word_examples, parse_writing_problems, ExampleSentence, RelatedWord, WordExamples,
    WritingProblem,
};
pub use error::{PenmarkError, Result};
pub use feedback::{Band, BandThresholds, FeedbackTable, FeedbackTier};
pub use grading::{grade, grade_input, Grader, GradingInput, GradingResult, ScoreBreakdown};
pub use keywords::{content_words, keyword_match, STOP_WORDS};
pub use length::{length_score, word_count};
pub use normalize::{is_blank, normalize};
pub use similarity::{edit_similarity, levenshtein_distance};
pub use speech::{Completion, PlaybackSession, Route, SpeechEngine, SpeechOptions, Voice};
pub use vocabulary::{
    add_word, delete_word, get_word, init_database, init_schema, list_words,
    word_count as saved_word_count, SavedWord,
};

/// Penmark Core Python Module
#[cfg(feature = "python")]
#[pymodule]
fn penmark_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Grading
    m.add_function(wrap_pyfunction!(grading::py_grade, m)?)?;
    m.add_function(wrap_pyfunction!(grading::py_grade_with_config, m)?)?;

    // Saved words
    m.add_function(wrap_pyfunction!(vocabulary::py_init_database, m)?)?;
    m.add_function(wrap_pyfunction!(vocabulary::py_add_word, m)?)?;
    m.add_function(wrap_pyfunction!(vocabulary::py_list_words, m)?)?;
    m.add_function(wrap_pyfunction!(vocabulary::py_delete_word, m)?)?;

    // Generated content
    m.add_function(wrap_pyfunction!(content::py_parse_writing_problems, m)?)?;

    // Register classes
    m.add_class::<grading::GradingResult>()?;
    m.add_class::<vocabulary::SavedWord>()?;
    m.add_class::<content::WritingProblem>()?;

    Ok(())
}
