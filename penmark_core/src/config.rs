//! Grading configuration

use crate::error::{PenmarkError, Result};
use crate::feedback::{BandThresholds, FeedbackTable};
use serde::{Deserialize, Serialize};
use std::path::Path;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights applied to the three sub-scores; they must sum to 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub edit: f64,
    pub keyword: f64,
    pub length: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            edit: 0.5,
            keyword: 0.3,
            length: 0.2,
        }
    }
}

/// Sentences returned by the short-circuit branches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialMessages {
    pub empty_answer: String,
    pub perfect_match: String,
}

impl Default for SpecialMessages {
    fn default() -> Self {
        Self {
            empty_answer: "Please enter an answer.".to_string(),
            perfect_match: "Perfect! Your answer matches the model answer.".to_string(),
        }
    }
}

/// Everything the grader can be tuned with.
///
/// `bands` drives the reported band and `feedback` drives the sentence;
/// the two tables are intentionally separate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    pub weights: ScoreWeights,
    pub bands: BandThresholds,
    pub feedback: FeedbackTable,
    pub messages: SpecialMessages,
}

impl GradingConfig {
    /// Parse a TOML document; missing sections keep their defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let ScoreWeights {
            edit,
            keyword,
            length,
        } = self.weights;

        for (name, weight) in [("edit", edit), ("keyword", keyword), ("length", length)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PenmarkError::invalid_config(format!(
                    "weights.{name} must be a non-negative number, got {weight}"
                )));
            }
        }

        let sum = edit + keyword + length;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PenmarkError::invalid_config(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }

        self.bands.validate().map_err(PenmarkError::InvalidConfig)?;
        self.feedback.validate().map_err(PenmarkError::InvalidConfig)?;
        Ok(())
    }
}
