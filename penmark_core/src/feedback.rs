//! Score classification: display band and feedback sentence
//!
//! The band shown to the learner and the sentence chosen for them come from
//! two separate threshold tables. Defaults differ (85/70/50 for bands,
//! 90/75/60/40 for sentences) and each can be configured on its own.

use serde::{Deserialize, Serialize};

/// Qualitative band derived from a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Band {
    /// Display band for `score` under the given thresholds
    pub fn from_score(score: u8, thresholds: &BandThresholds) -> Self {
        if score >= thresholds.excellent {
            Band::Excellent
        } else if score >= thresholds.good {
            Band::Good
        } else if score >= thresholds.fair {
            Band::Fair
        } else {
            Band::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Excellent => "excellent",
            Band::Good => "good",
            Band::Fair => "fair",
            Band::Poor => "poor",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum score for each display band; anything below `fair` is poor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    pub excellent: u8,
    pub good: u8,
    pub fair: u8,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            excellent: 85,
            good: 70,
            fair: 50,
        }
    }
}

impl BandThresholds {
    pub fn band_for(&self, score: u8) -> Band {
        Band::from_score(score, self)
    }

    /// Validate threshold ordering
    pub fn validate(&self) -> Result<(), String> {
        if self.excellent > 100 {
            return Err(format!("bands.excellent ({}) cannot exceed 100", self.excellent));
        }
        if !(self.excellent > self.good && self.good > self.fair) {
            return Err(format!(
                "band thresholds must be strictly descending (excellent={}, good={}, fair={})",
                self.excellent, self.good, self.fair
            ));
        }
        Ok(())
    }
}

/// One row of the feedback table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTier {
    pub min_score: u8,
    pub message: String,
}

impl FeedbackTier {
    fn new(min_score: u8, message: &str) -> Self {
        Self {
            min_score,
            message: message.to_string(),
        }
    }
}

/// Feedback sentences keyed by minimum score, evaluated top-down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackTable {
    pub tiers: Vec<FeedbackTier>,
    /// Used when the score is below every tier
    pub fallback: String,
}

impl Default for FeedbackTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                FeedbackTier::new(90, "Excellent! This is a near-perfect answer."),
                FeedbackTier::new(75, "Good job! A few small fixes and it will be perfect."),
                FeedbackTier::new(
                    60,
                    "Not bad. The core content is there, but there is room to improve.",
                ),
                FeedbackTier::new(
                    40,
                    "Close, but there is a significant gap from the model answer. Try again.",
                ),
            ],
            fallback: "This needs more work. Use the model answer as a guide and rewrite it."
                .to_string(),
        }
    }
}

impl FeedbackTable {
    pub fn message_for(&self, score: u8) -> &str {
        self.tiers
            .iter()
            .find(|tier| score >= tier.min_score)
            .map(|tier| tier.message.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Validate tier ordering
    pub fn validate(&self) -> Result<(), String> {
        if let Some(first) = self.tiers.first() {
            if first.min_score > 100 {
                return Err(format!(
                    "feedback tier min_score ({}) cannot exceed 100",
                    first.min_score
                ));
            }
        }
        for pair in self.tiers.windows(2) {
            if pair[0].min_score <= pair[1].min_score {
                return Err(format!(
                    "feedback tiers must be strictly descending ({} then {})",
                    pair[0].min_score, pair[1].min_score
                ));
            }
        }
        Ok(())
    }
}
