//! Offline driver returning canned responses.

use adlens_core::{GenerateRequest, GenerateResponse};
use adlens_error::AdlensResult;
use adlens_interface::AnalystDriver;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument};

const PLAN_RESPONSE: &str = r#"{
  "tasks": [
    {"id": "task_1", "agent": "data_agent", "description": "Summarize dataset"},
    {"id": "task_2", "agent": "insight_agent", "description": "Generate hypotheses", "dependencies": ["task_1"]},
    {"id": "task_3", "agent": "evaluator_agent", "description": "Validate with metrics", "dependencies": ["task_2"]},
    {"id": "task_4", "agent": "creative_agent", "description": "Generate creative suggestions", "dependencies": ["task_3"]}
  ]
}"#;

const INSIGHT_RESPONSE: &str = r#"{
  "hypotheses": [
    {
      "id": "hyp_1",
      "title": "Creative Fatigue",
      "description": "Ad creatives showing declining engagement over time",
      "confidence": 0.75,
      "evidence": ["CTR dropped significantly over campaign duration"],
      "severity": "high"
    },
    {
      "id": "hyp_2",
      "title": "Budget Inefficiency",
      "description": "Spend concentrated on campaigns returning below-target ROAS",
      "confidence": 0.6,
      "evidence": ["High-spend records with low ROAS"],
      "severity": "medium"
    }
  ],
  "primary_cause": "hyp_1",
  "recommended_actions": [
    "Refresh creative messaging",
    "Test new ad formats"
  ]
}"#;

const CREATIVE_RESPONSE: &str = r#"{
  "creatives": [
    {
      "angle": "Value-focused",
      "headline": "Save 40% on Premium Quality - Limited Time",
      "message": "Get the best value now! Our biggest sale is ending soon. Shop now and save big.",
      "target_ctr": "2.5-3.5%",
      "rationale": "Clear value prop with urgency"
    },
    {
      "angle": "Social Proof",
      "headline": "Join 10,000+ Happy Customers",
      "message": "See why thousands switched this season. Rated 4.8 stars by real buyers.",
      "target_ctr": "2.0-3.0%",
      "rationale": "Trust signals lift engagement on fatigued audiences"
    }
  ]
}"#;

const ACKNOWLEDGEMENT: &str = "Mock response generated successfully.";

/// Driver that answers from canned JSON instead of calling a model.
///
/// The response is chosen from keywords in the system prompt, checked in
/// order: `planner`, `insight`, `creative`. Anything else gets a plain
/// acknowledgement.
///
/// # Examples
///
/// ```
/// use adlens_core::{GenerateRequest, Message};
/// use adlens_interface::AnalystDriver;
/// use adlens_models::MockDriver;
///
/// # #[tokio::main]
/// # async fn main() {
/// let driver = MockDriver::new();
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::system("You are the Insight agent."), Message::user("Why?")])
///     .build()
///     .unwrap();
///
/// let response = driver.generate(&request).await.unwrap();
/// assert!(response.text().contains("hypotheses"));
/// assert_eq!(driver.call_count(), 1);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockDriver {
    calls: AtomicUsize,
}

impl MockDriver {
    /// Creates a mock driver with a zeroed call counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn canned_response(system_prompt: &str) -> &'static str {
        let lower = system_prompt.to_lowercase();
        if lower.contains("planner") {
            PLAN_RESPONSE
        } else if lower.contains("insight") {
            INSIGHT_RESPONSE
        } else if lower.contains("creative") {
            CREATIVE_RESPONSE
        } else {
            ACKNOWLEDGEMENT
        }
    }
}

#[async_trait]
impl AnalystDriver for MockDriver {
    #[instrument(skip(self, req), fields(provider = "mock"))]
    async fn generate(&self, req: &GenerateRequest) -> AdlensResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = Self::canned_response(req.system_prompt().unwrap_or_default());
        debug!(response_len = text.len(), "Using mock response");
        Ok(GenerateResponse::from_text(text))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    fn is_mock(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_keyword_wins_over_creative() {
        let prompt = "You are the Planner. Agents: data_agent, creative_agent.";
        assert_eq!(MockDriver::canned_response(prompt), PLAN_RESPONSE);
    }

    #[test]
    fn unknown_prompt_gets_acknowledgement() {
        assert_eq!(MockDriver::canned_response("Summarize"), ACKNOWLEDGEMENT);
    }

    #[test]
    fn canned_payloads_are_valid_json() {
        for payload in [PLAN_RESPONSE, INSIGHT_RESPONSE, CREATIVE_RESPONSE] {
            assert!(serde_json::from_str::<serde_json::Value>(payload).is_ok());
        }
    }
}
