//! Hypotheses produced by the insight step.

use serde::{Deserialize, Serialize};

fn default_confidence() -> f64 {
    0.5
}

fn default_severity() -> String {
    "medium".to_string()
}

/// A proposed explanation for a performance change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Hypothesis identifier
    #[serde(default)]
    pub id: String,
    /// Short title, used by the evaluator to pick a check
    #[serde(default)]
    pub title: String,
    /// Longer explanation
    #[serde(default)]
    pub description: String,
    /// Model confidence in [0, 1]
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Supporting observations
    #[serde(default)]
    pub evidence: Vec<String>,
    /// Free-form severity label
    #[serde(default = "default_severity")]
    pub severity: String,
}

/// Output of the insight step.
///
/// # Examples
///
/// ```
/// use adlens_core::Insights;
///
/// let insights: Insights = serde_json::from_str(
///     r#"{"hypotheses": [{"id": "hyp_1", "title": "Creative Fatigue"}]}"#,
/// ).unwrap();
///
/// assert_eq!(insights.hypotheses[0].confidence, 0.5);
/// assert!(insights.recommended_actions.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Insights {
    /// Ranked hypotheses
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
    /// Id of the most likely hypothesis
    #[serde(default)]
    pub primary_cause: Option<String>,
    /// Follow-up actions proposed alongside the hypotheses
    #[serde(default)]
    pub recommended_actions: Vec<String>,
}
