//! Hypothesis generation step.

use crate::extraction::{coerce_text_fields, extract_json, scalar_text, text_list};
use crate::request::chat_request;
use adlens_core::{Evaluation, Hypothesis, Insights};
use adlens_data::DataSummary;
use adlens_error::AdlensResult;
use adlens_interface::AnalystDriver;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{info, instrument, warn};

const DEFAULT_CONFIDENCE: f64 = 0.5;
const PATTERN_CONFIDENCE: f64 = 0.7;

/// Proposes hypotheses explaining the dataset's performance.
pub struct InsightAgent<'a> {
    driver: &'a dyn AnalystDriver,
    system_prompt: &'a str,
}

impl<'a> InsightAgent<'a> {
    /// Create an insight agent using `system_prompt` as instructions.
    pub fn new(driver: &'a dyn AnalystDriver, system_prompt: &'a str) -> Self {
        Self {
            driver,
            system_prompt,
        }
    }

    /// Generate hypotheses for `query`.
    ///
    /// A failed model call yields hypotheses derived from the summary's
    /// patterns; an unusable reply yields a single "Unknown Issue".
    #[instrument(skip(self, summary), fields(provider = self.driver.provider_name()))]
    pub async fn generate(&self, summary: &DataSummary, query: &str) -> AdlensResult<Insights> {
        self.run(summary, query, None).await
    }

    /// Generate hypotheses again, telling the model which ones were rejected.
    #[instrument(skip(self, summary, previous), fields(flagged = previous.flagged.len()))]
    pub async fn regenerate(
        &self,
        summary: &DataSummary,
        query: &str,
        previous: &Evaluation,
    ) -> AdlensResult<Insights> {
        self.run(summary, query, Some(reviewer_feedback(previous)))
            .await
    }

    async fn run(
        &self,
        summary: &DataSummary,
        query: &str,
        feedback: Option<String>,
    ) -> AdlensResult<Insights> {
        let mut user_prompt = format!(
            "Analyze the following data and generate insights:\n\n\
             Query: {}\n\n\
             Data Summary:\n{}\n\n\
             Generate structured hypotheses about what's causing performance issues.\n\
             Return JSON with hypotheses array, primary_cause, and recommended_actions.",
            query,
            summary.to_pretty_json()
        );
        if let Some(feedback) = feedback {
            user_prompt.push_str("\n\n");
            user_prompt.push_str(&feedback);
        }

        let request = chat_request("insight", self.system_prompt, user_prompt)?;

        let insights = match self.driver.generate(&request).await {
            Ok(response) => parse_insights(&response.text()),
            Err(e) => {
                warn!(error = %e, "Insight generation failed, deriving hypotheses from patterns");
                fallback_insights(summary)
            }
        };

        info!(hypotheses = insights.hypotheses.len(), "Generated hypotheses");
        Ok(insights)
    }
}

/// Parse a model reply into insights.
///
/// Replies without a usable insight document become a single
/// "Unknown Issue" hypothesis quoting the start of the reply.
///
/// ```
/// use adlens_agents::parse_insights;
///
/// let insights = parse_insights(r#"{"hypotheses": [{"id": "h1", "title": "Fatigue", "confidence": "85%"}]}"#);
/// assert_eq!(insights.hypotheses[0].confidence, 0.85);
///
/// let unknown = parse_insights("I could not decide.");
/// assert_eq!(unknown.hypotheses[0].title, "Unknown Issue");
/// ```
pub fn parse_insights(text: &str) -> Insights {
    let parsed = extract_json(text)
        .ok()
        .and_then(|json| serde_json::from_str::<Value>(&json).ok())
        .filter(|value| value.get("hypotheses").is_some_and(Value::is_array))
        .map(|mut value| {
            normalize_confidence(&mut value);
            insights_from_document(&value)
        });

    match parsed {
        Some(insights) => insights,
        None => {
            warn!(response_len = text.len(), "Reply was not an insight document");
            unknown_issue(text)
        }
    }
}

/// Build insights field by field. A malformed hypothesis is dropped on its
/// own; the rest of the document is kept.
fn insights_from_document(document: &Value) -> Insights {
    let hypotheses = document
        .get("hypotheses")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(lenient_hypothesis).collect())
        .unwrap_or_default();

    Insights {
        hypotheses,
        primary_cause: document.get("primary_cause").and_then(scalar_text),
        recommended_actions: document
            .get("recommended_actions")
            .map(text_list)
            .unwrap_or_default(),
    }
}

fn lenient_hypothesis(item: &Value) -> Option<Hypothesis> {
    let mut object = item.as_object()?.clone();
    coerce_text_fields(&mut object, &["id", "title", "description", "severity"]);
    if let Some(evidence) = object.get("evidence").map(text_list) {
        object.insert("evidence".to_string(), Value::from(evidence));
    }

    match serde_json::from_value::<Hypothesis>(Value::Object(object)) {
        Ok(hypothesis) => Some(hypothesis),
        Err(e) => {
            warn!(error = %e, "Dropping malformed hypothesis");
            None
        }
    }
}

/// Coerce every hypothesis confidence into a number in [0, 1].
///
/// Numbers are clamped. Strings contribute their first number, read as a
/// percentage when above 1. Anything else becomes 0.5.
pub fn normalize_confidence(document: &mut Value) {
    let Some(hypotheses) = document.get_mut("hypotheses").and_then(Value::as_array_mut) else {
        return;
    };

    for hypothesis in hypotheses.iter_mut().filter_map(Value::as_object_mut) {
        let confidence = match hypothesis.get("confidence") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(DEFAULT_CONFIDENCE),
            Some(Value::String(s)) => match first_number(s) {
                Some(n) if n > 1.0 => n / 100.0,
                Some(n) => n,
                None => DEFAULT_CONFIDENCE,
            },
            _ => DEFAULT_CONFIDENCE,
        };
        hypothesis.insert("confidence".to_string(), Value::from(confidence.clamp(0.0, 1.0)));
    }
}

fn first_number(text: &str) -> Option<f64> {
    static NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
    NUMBER
        .get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").ok())
        .as_ref()?
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

fn unknown_issue(text: &str) -> Insights {
    Insights {
        hypotheses: vec![Hypothesis {
            id: "hypothesis_1".to_string(),
            title: "Unknown Issue".to_string(),
            description: text.trim().chars().take(200).collect(),
            confidence: DEFAULT_CONFIDENCE,
            evidence: Vec::new(),
            severity: "medium".to_string(),
        }],
        primary_cause: None,
        recommended_actions: Vec::new(),
    }
}

/// Insights built from the summary's patterns when the model is unavailable.
pub(crate) fn fallback_insights(summary: &DataSummary) -> Insights {
    let hypotheses = summary
        .patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| Hypothesis {
            id: format!("hyp_{}", i + 1),
            title: pattern.clone(),
            description: format!("Data shows: {}", pattern),
            confidence: PATTERN_CONFIDENCE,
            evidence: vec![pattern.clone()],
            severity: "medium".to_string(),
        })
        .collect();

    Insights {
        hypotheses,
        primary_cause: Some("data_insufficient".to_string()),
        recommended_actions: vec![
            "Review campaign settings".to_string(),
            "Check audience targeting".to_string(),
            "Analyze creative performance".to_string(),
        ],
    }
}

fn reviewer_feedback(previous: &Evaluation) -> String {
    let mut feedback = String::from("Reviewer feedback on your previous answer:\n");

    let rejected: Vec<_> = previous
        .validated_hypotheses
        .iter()
        .filter(|v| previous.flagged.contains(&v.hypothesis_id))
        .collect();

    if rejected.is_empty() {
        feedback.push_str("- No hypotheses were produced.\n");
    } else {
        for v in rejected {
            feedback.push_str(&format!(
                "- \"{}\" was not supported by the data (validation score {:.0}%)\n",
                v.title,
                v.validation_score * 100.0
            ));
        }
    }

    feedback.push_str(
        "Propose hypotheses that are better supported by the numbers in the data summary.",
    );
    feedback
}
