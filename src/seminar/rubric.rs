use serde::{Deserialize, Serialize};

/// Lowest accepted value for a single rubric criterion.
pub const MIN_CRITERION_SCORE: u8 = 1;
/// Highest accepted value for a single rubric criterion.
pub const MAX_CRITERION_SCORE: u8 = 10;

const CRITERION_WEIGHT: f64 = 0.25;

/// Whether a single criterion score lies in the accepted rubric range.
pub const fn is_valid_score(score: u8) -> bool {
    score >= MIN_CRITERION_SCORE && score <= MAX_CRITERION_SCORE
}

/// One evaluator's four criterion scores for a presentation.
///
/// The type performs no bounds checking of its own; range enforcement happens
/// in the Evaluation Service before a submission reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricScores {
    pub content: u8,
    pub organization: u8,
    pub delivery: u8,
    pub engagement: u8,
}

impl RubricScores {
    pub const fn new(content: u8, organization: u8, delivery: u8, engagement: u8) -> Self {
        Self {
            content,
            organization,
            delivery,
            engagement,
        }
    }

    /// Criterion values paired with the field names used in validation
    /// messages and audit output.
    pub const fn criteria(&self) -> [(&'static str, u8); 4] {
        [
            ("content", self.content),
            ("organization", self.organization),
            ("delivery", self.delivery),
            ("engagement", self.engagement),
        ]
    }

    /// Sum of the four criteria (4 to 40 for in-range scores).
    pub fn total(&self) -> u16 {
        self.criteria()
            .iter()
            .map(|(_, value)| u16::from(*value))
            .sum()
    }

    /// Equal-weight mean of the four criteria, equal to `total() / 4.0`.
    pub fn weighted(&self) -> f64 {
        f64::from(self.total()) * CRITERION_WEIGHT
    }
}
