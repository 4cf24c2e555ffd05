//! Validation results produced by the evaluator step.

use serde::{Deserialize, Serialize};

/// How strongly the data supports a hypothesis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strength {
    /// Score of at least 0.8
    Strong,
    /// Score of at least 0.6
    Medium,
    /// Anything lower
    Weak,
}

impl Strength {
    /// Band a validation score.
    ///
    /// ```
    /// use adlens_core::Strength;
    ///
    /// assert_eq!(Strength::from_score(0.85), Strength::Strong);
    /// assert_eq!(Strength::from_score(0.6), Strength::Medium);
    /// assert_eq!(Strength::from_score(0.2), Strength::Weak);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Strength::Strong
        } else if score >= 0.6 {
            Strength::Medium
        } else {
            Strength::Weak
        }
    }
}

/// Urgency of a recommendation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    /// Act now
    High,
    /// Act soon
    Medium,
    /// Nice to have
    Low,
}

/// A hypothesis after quantitative validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedHypothesis {
    /// Id of the validated hypothesis
    pub hypothesis_id: String,
    /// Title copied from the hypothesis
    pub title: String,
    /// Data-backed score in [0, 1]
    pub validation_score: f64,
    /// Statistics gathered by the check
    pub metrics: serde_json::Map<String, serde_json::Value>,
    /// Whether the score clears the confidence threshold
    pub is_valid: bool,
    /// Score band
    pub strength: Strength,
}

/// Action proposed from the best validated hypothesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What to do
    pub action: String,
    /// How urgently
    pub priority: Priority,
    /// Expected effect, if estimated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_impact: Option<String>,
}

/// Output of the evaluator step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// One entry per input hypothesis, in input order
    pub validated_hypotheses: Vec<ValidatedHypothesis>,
    /// Mean validation score, 0 when there are no hypotheses
    pub validation_confidence: f64,
    /// Recommendation derived from the best hypothesis
    pub recommendation: Recommendation,
    /// Ids of hypotheses scoring below the confidence threshold
    pub flagged: Vec<String>,
    /// Whether the insight step should be retried
    pub needs_retry: bool,
}
