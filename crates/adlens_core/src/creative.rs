//! Ad copy suggestions produced by the creative step.

use serde::{Deserialize, Serialize};

/// A single ad creative suggestion.
///
/// Fields the model adds beyond the known ones are kept in `extra`.
///
/// # Examples
///
/// ```
/// use adlens_core::Creative;
///
/// let creative: Creative = serde_json::from_str(
///     r#"{"angle": "Urgency", "headline": "Last day!", "tone": "bold"}"#,
/// ).unwrap();
///
/// assert_eq!(creative.headline, "Last day!");
/// assert_eq!(creative.extra["tone"], "bold");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Creative {
    /// Creative identifier
    #[serde(default)]
    pub id: String,
    /// Campaign the creative is written for
    #[serde(default)]
    pub campaign_name: String,
    /// Messaging angle
    #[serde(default)]
    pub angle: String,
    /// Headline copy
    #[serde(default)]
    pub headline: String,
    /// Body copy
    #[serde(default)]
    pub message: String,
    /// Expected CTR range
    #[serde(default)]
    pub target_ctr: String,
    /// Why this creative should work
    #[serde(default)]
    pub rationale: String,
    /// Additional fields returned by the model
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
