//! Configuration sections.
//!
//! Every section implements `Default` with the same values as the bundled
//! `adlens.toml`, so partially specified files still deserialize.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Chat model parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// OpenAI-compatible chat-completions URL
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Decision thresholds shared by the analysis steps.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Mean ROAS below this marks a campaign as underperforming
    pub roas: f64,
    /// Mean CTR below this marks a campaign as underperforming
    pub ctr: f64,
    /// Minimum validation score for a valid hypothesis
    pub confidence: f64,
    /// Share of low-ROAS records that triggers a pattern
    pub low_performer_share: f64,
    /// Recent/early ratio below which a trend is declining
    pub trend_decline_ratio: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            roas: 2.0,
            ctr: 0.015,
            confidence: 0.6,
            low_performer_share: 0.3,
            trend_decline_ratio: 0.8,
        }
    }
}

/// Statistics knobs for the data summary.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fraction of rows in each of the early and recent windows
    pub trend_window_fraction: f64,
    /// IQR multiplier for outlier fences
    pub outlier_iqr_multiplier: f64,
    /// Records required before trend patterns are reported
    pub min_records_for_trend: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_window_fraction: 0.25,
            outlier_iqr_multiplier: 1.5,
            min_records_for_trend: 10,
        }
    }
}

/// Evaluator retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Insight reruns allowed after a failed validation
    pub max_retries: u32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self { max_retries: 1 }
    }
}

/// Creative generation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CreativeConfig {
    /// Suggestions requested per campaign
    pub num_suggestions: usize,
    /// Campaigns to write creatives for
    pub max_campaigns: usize,
    /// Existing messages quoted in the prompt
    pub max_existing_samples: usize,
}

impl Default for CreativeConfig {
    fn default() -> Self {
        Self {
            num_suggestions: 5,
            max_campaigns: 5,
            max_existing_samples: 3,
        }
    }
}

/// File locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Input CSV
    pub data: PathBuf,
    /// Directory searched for prompt overrides
    pub prompts_dir: PathBuf,
    /// Output directory for report artifacts
    pub reports_dir: PathBuf,
    /// Output directory for the execution log
    pub logs_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data/sample_fb_ads.csv"),
            prompts_dir: PathBuf::from("prompts"),
            reports_dir: PathBuf::from("reports"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}
