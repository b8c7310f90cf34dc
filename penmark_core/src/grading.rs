//! Writing answer grading against a single model answer
//!
//! The final score blends three signals computed on normalized text:
//! character edit similarity, content-word overlap and word-count ratio.
//! Blank answers and exact matches short-circuit before any scoring.

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::config::GradingConfig;
use crate::error::Result;
use crate::feedback::Band;
use crate::keywords::keyword_match;
use crate::length::length_score;
use crate::normalize::{is_blank, normalize};
use crate::similarity::edit_similarity;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

static DEFAULT_GRADER: Lazy<Grader> = Lazy::new(Grader::default);

/// A learner answer paired with the model answer it is graded against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingInput {
    pub learner_answer: String,
    pub reference_answer: String,
}

impl GradingInput {
    pub fn new(learner_answer: impl Into<String>, reference_answer: impl Into<String>) -> Self {
        Self {
            learner_answer: learner_answer.into(),
            reference_answer: reference_answer.into(),
        }
    }
}

/// Outcome of grading one answer
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    #[cfg_attr(feature = "python", pyo3(get))]
    pub score: u8,
    pub band: Band,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub feedback: String,
}

#[cfg(feature = "python")]
#[pymethods]
impl GradingResult {
    #[getter(band)]
    fn py_band(&self) -> &'static str {
        self.band.as_str()
    }

    fn __repr__(&self) -> String {
        format!(
            "GradingResult(score={}, band='{}', feedback='{}')",
            self.score, self.band, self.feedback
        )
    }
}

/// Sub-scores behind a computed grade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub edit_similarity: f64,
    pub keyword_match: f64,
    pub length_score: f64,
    /// Weighted sum before rounding
    pub weighted: f64,
}

/// Stateless grader parameterized by a [`GradingConfig`]
#[derive(Debug, Clone, Default)]
pub struct Grader {
    config: GradingConfig,
}

impl Grader {
    /// Build a grader from a configuration, validating it first
    pub fn new(config: GradingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load configuration from a TOML file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            config: GradingConfig::from_file(path)?,
        })
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Grade `learner` against `reference`. Never fails.
    pub fn grade(&self, learner: &str, reference: &str) -> GradingResult {
        if is_blank(learner) {
            return GradingResult {
                score: 0,
                band: Band::Poor,
                feedback: self.config.messages.empty_answer.clone(),
            };
        }

        let learner = normalize(learner);
        let reference = normalize(reference);

        if learner == reference {
            return GradingResult {
                score: 100,
                band: Band::Excellent,
                feedback: self.config.messages.perfect_match.clone(),
            };
        }

        let breakdown = self.score_normalized(&learner, &reference);
        let score = round_score(breakdown.weighted);
        log::debug!(
            "graded answer: edit={:.2} keyword={:.2} length={:.0} -> {}",
            breakdown.edit_similarity,
            breakdown.keyword_match,
            breakdown.length_score,
            score
        );

        self.classify(score)
    }

    pub fn grade_input(&self, input: &GradingInput) -> GradingResult {
        self.grade(&input.learner_answer, &input.reference_answer)
    }

    /// Sub-scores for a pair that goes through weighted scoring.
    ///
    /// Returns `None` when a blank answer or exact match short-circuits.
    pub fn breakdown(&self, learner: &str, reference: &str) -> Option<ScoreBreakdown> {
        if is_blank(learner) {
            return None;
        }
        let learner = normalize(learner);
        let reference = normalize(reference);
        if learner == reference {
            return None;
        }
        Some(self.score_normalized(&learner, &reference))
    }

    /// Band and feedback sentence for an already computed score
    pub fn classify(&self, score: u8) -> GradingResult {
        GradingResult {
            score,
            band: self.config.bands.band_for(score),
            feedback: self.config.feedback.message_for(score).to_string(),
        }
    }

    fn score_normalized(&self, learner: &str, reference: &str) -> ScoreBreakdown {
        let weights = &self.config.weights;
        let edit = edit_similarity(learner, reference);
        let keyword = keyword_match(learner, reference);
        let length = length_score(learner, reference);

        ScoreBreakdown {
            edit_similarity: edit,
            keyword_match: keyword,
            length_score: length,
            weighted: weights.edit * edit + weights.keyword * keyword + weights.length * length,
        }
    }
}

/// Round half away from zero into `0..=100`
fn round_score(weighted: f64) -> u8 {
    let rounded = weighted.round();
    debug_assert!(
        (0.0..=100.0).contains(&rounded),
        "weighted score out of range: {weighted}"
    );
    rounded.clamp(0.0, 100.0) as u8
}

/// Grade with the default configuration
pub fn grade(learner: &str, reference: &str) -> GradingResult {
    DEFAULT_GRADER.grade(learner, reference)
}

pub fn grade_input(input: &GradingInput) -> GradingResult {
    DEFAULT_GRADER.grade_input(input)
}

// ============= Python Bindings =============

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "grade")]
pub fn py_grade(learner_answer: &str, reference_answer: &str) -> GradingResult {
    grade(learner_answer, reference_answer)
}

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "grade_with_config")]
pub fn py_grade_with_config(
    learner_answer: &str,
    reference_answer: &str,
    config_toml: &str,
) -> PyResult<GradingResult> {
    let grader = Grader::new(GradingConfig::from_toml_str(config_toml)?)?;
    Ok(grader.grade(learner_answer, reference_answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreWeights;
    use pretty_assertions::assert_eq;

    const REFERENCE: &str = "I go to school every day.";

    #[test]
    fn test_blank_answer() {
        let grader = Grader::default();
        for learner in ["", "   ", "\n\t"] {
            let result = grader.grade(learner, REFERENCE);
            assert_eq!(result.score, 0);
            assert_eq!(result.band, Band::Poor);
            assert_eq!(result.feedback, grader.config().messages.empty_answer);
        }
    }

    #[test]
    fn test_blank_answer_with_blank_reference() {
        assert_eq!(grade("", "").score, 0);
    }

    #[test]
    fn test_exact_match_ignores_case_and_padding() {
        let grader = Grader::default();
        let result = grader.grade("  i GO to school every day. ", REFERENCE);
        assert_eq!(
            result,
            GradingResult {
                score: 100,
                band: Band::Excellent,
                feedback: grader.config().messages.perfect_match.clone(),
            }
        );
    }

    #[test]
    fn test_stop_word_reference() {
        let breakdown = Grader::default().breakdown("ok", "to the").unwrap();
        assert_eq!(breakdown.keyword_match, 100.0);
        assert_eq!(breakdown.length_score, 70.0);
        // 0.5 * 16.67 + 0.3 * 100 + 0.2 * 70 = 52.33
        assert_eq!(grade("ok", "to the").score, 52);
        assert_eq!(grade("ok", "to the").band, Band::Fair);
    }

    #[test]
    fn test_breakdown_short_circuits() {
        let grader = Grader::default();
        assert!(grader.breakdown(" ", REFERENCE).is_none());
        assert!(grader.breakdown(REFERENCE, REFERENCE).is_none());
        assert!(grader.breakdown("I go to school", REFERENCE).is_some());
    }

    #[test]
    fn test_score_matches_breakdown() {
        let grader = Grader::default();
        let learner = "I goes school day";
        let breakdown = grader.breakdown(learner, REFERENCE).unwrap();
        assert_eq!(grader.grade(learner, REFERENCE).score as f64, breakdown.weighted.round());
    }

    #[test]
    fn test_feedback_depends_only_on_score() {
        let grader = Grader::default();
        let a = grader.grade("I goes school day", REFERENCE);
        let b = grader.classify(a.score);
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_weights() {
        let config = GradingConfig {
            weights: ScoreWeights {
                edit: 0.0,
                keyword: 1.0,
                length: 0.0,
            },
            ..Default::default()
        };
        let grader = Grader::new(config).unwrap();
        // keyword overlap is 2 of 3
        assert_eq!(grader.grade("I goes school day", REFERENCE).score, 67);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GradingConfig::default();
        config.bands.good = 95;
        assert!(Grader::new(config).is_err());
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_score(52.5), 53);
        assert_eq!(round_score(52.49), 52);
        assert_eq!(round_score(0.0), 0);
        assert_eq!(round_score(100.0), 100);
    }

    #[test]
    fn test_grade_input() {
        let input = GradingInput::new("I go to school", REFERENCE);
        assert_eq!(grade_input(&input), grade("I go to school", REFERENCE));
    }

    #[test]
    fn test_result_serializes() {
        let json = serde_json::to_value(grade(REFERENCE, REFERENCE)).unwrap();
        assert_eq!(json["score"], 100);
        assert_eq!(json["band"], "excellent");
    }
}
