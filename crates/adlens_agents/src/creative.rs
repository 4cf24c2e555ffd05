//! Ad copy generation for underperforming campaigns.

use crate::extraction::{coerce_text_fields, extract_json};
use crate::request::chat_request;
use adlens_config::{CreativeConfig, ThresholdsConfig};
use adlens_core::{Creative, Evaluation, Insights};
use adlens_data::{CampaignAggregate, DataSummary, Dataset, Metric, stats};
use adlens_error::AdlensResult;
use adlens_interface::AnalystDriver;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

const TEMPLATE_ANGLES: [&str; 5] = [
    "Value Proposition",
    "Urgency-Based",
    "Benefit-Focused",
    "Problem-Solution",
    "Social Proof",
];

const CREATIVE_TEXT_FIELDS: [&str; 7] = [
    "id",
    "campaign_name",
    "angle",
    "headline",
    "message",
    "target_ctr",
    "rationale",
];

/// Number of template creatives used when the reply holds no usable creative.
const UNPARSEABLE_TEMPLATE_COUNT: usize = 3;

/// Writes new creatives for the weakest campaigns.
pub struct CreativeAgent<'a> {
    driver: &'a dyn AnalystDriver,
    system_prompt: &'a str,
    dataset: &'a Dataset,
    thresholds: &'a ThresholdsConfig,
    limits: &'a CreativeConfig,
}

impl<'a> CreativeAgent<'a> {
    /// Create a creative agent over `dataset`.
    pub fn new(
        driver: &'a dyn AnalystDriver,
        system_prompt: &'a str,
        dataset: &'a Dataset,
        thresholds: &'a ThresholdsConfig,
        limits: &'a CreativeConfig,
    ) -> Self {
        Self {
            driver,
            system_prompt,
            dataset,
            thresholds,
            limits,
        }
    }

    /// Campaigns that need new creatives, weakest ROAS first.
    ///
    /// A campaign qualifies when its mean ROAS or CTR misses the thresholds,
    /// or its mean ROAS is below the first quartile of all rows.
    pub fn target_campaigns<'s>(&self, summary: &'s DataSummary) -> Vec<&'s CampaignAggregate> {
        let roas_q1 = stats::quantile(&self.dataset.values(Metric::Roas), 0.25);

        let mut targets: Vec<&CampaignAggregate> = summary
            .campaigns
            .iter()
            .filter(|c| {
                c.mean_roas < self.thresholds.roas
                    || c.mean_ctr < self.thresholds.ctr
                    || c.mean_roas < roas_q1
            })
            .collect();
        targets.sort_by(|a, b| a.mean_roas.total_cmp(&b.mean_roas));
        targets.truncate(self.limits.max_campaigns);
        targets
    }

    /// Generate creatives for every target campaign.
    #[instrument(skip_all, fields(provider = self.driver.provider_name()))]
    pub async fn generate(
        &self,
        summary: &DataSummary,
        insights: &Insights,
        evaluation: &Evaluation,
    ) -> AdlensResult<Vec<Creative>> {
        let targets = self.target_campaigns(summary);
        if targets.is_empty() {
            info!("No campaigns need a creative refresh");
            return Ok(Vec::new());
        }

        let mut creatives = Vec::new();
        for campaign in targets {
            let batch = self
                .generate_for_campaign(&campaign.campaign_name, insights, evaluation)
                .await?;
            creatives.extend(batch);
        }

        info!(creatives = creatives.len(), "Generated creative suggestions");
        Ok(creatives)
    }

    async fn generate_for_campaign(
        &self,
        campaign: &str,
        insights: &Insights,
        evaluation: &Evaluation,
    ) -> AdlensResult<Vec<Creative>> {
        let existing = self.existing_messages(campaign);
        let user_prompt = format!(
            "Generate {} new creative ideas for this campaign:\n\n\
             Campaign: {}\n\n\
             Existing Creatives:\n{}\n\n\
             Hypotheses:\n{}\n\n\
             Performance Issues: {}\n\n\
             Generate new headline and message combinations that address the issues.",
            self.limits.num_suggestions,
            campaign,
            serde_json::to_string_pretty(&existing).unwrap_or_default(),
            serde_json::to_string_pretty(&insights.hypotheses).unwrap_or_default(),
            evaluation.recommendation.action,
        );

        let request = chat_request("creative", self.system_prompt, user_prompt)?;
        let first_existing = existing.first().map(String::as_str);

        match self.driver.generate(&request).await {
            Ok(response) => match parse_creatives(&response.text(), campaign) {
                Some(creatives) => Ok(creatives),
                None => {
                    warn!(campaign, "Creative reply held no usable creatives, using templates");
                    Ok(template_creatives(
                        campaign,
                        first_existing,
                        UNPARSEABLE_TEMPLATE_COUNT,
                    ))
                }
            },
            Err(e) => {
                warn!(campaign, error = %e, "Creative generation failed, using templates");
                Ok(template_creatives(
                    campaign,
                    first_existing,
                    self.limits.num_suggestions,
                ))
            }
        }
    }

    fn existing_messages(&self, campaign: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.dataset
            .records_for(campaign)
            .into_iter()
            .map(|r| r.creative_message.as_str())
            .filter(|m| !m.is_empty() && seen.insert(*m))
            .take(self.limits.max_existing_samples)
            .map(str::to_string)
            .collect()
    }
}

/// Parse a creative reply for `campaign`.
///
/// Accepts `{"creatives": [...]}`, a bare array, or a single object. Scalar
/// values in text fields are read as text. Returns `None` when the reply
/// holds no JSON or no usable creative.
///
/// ```
/// use adlens_agents::parse_creatives;
///
/// let creatives = parse_creatives(r#"[{"headline": "A"}, {"id": "x", "headline": "B"}]"#, "Spring").unwrap();
/// assert_eq!(creatives[0].id, "Spring_creative_1");
/// assert_eq!(creatives[1].id, "x");
/// assert!(creatives.iter().all(|c| c.campaign_name == "Spring"));
/// ```
pub fn parse_creatives(text: &str, campaign: &str) -> Option<Vec<Creative>> {
    let json = extract_json(text).ok()?;
    let value: Value = serde_json::from_str(&json).ok()?;

    let items = match value {
        Value::Object(mut map) => match map.remove("creatives") {
            Some(Value::Array(items)) => items,
            Some(_) => return None,
            None => vec![Value::Object(map)],
        },
        Value::Array(items) => items,
        _ => return None,
    };

    let creatives: Vec<Creative> = items
        .into_iter()
        .filter_map(lenient_creative)
        .enumerate()
        .map(|(i, mut creative)| {
            creative.campaign_name = campaign.to_string();
            if creative.id.is_empty() {
                creative.id = format!("{}_creative_{}", campaign, i + 1);
            }
            creative
        })
        .collect();

    if creatives.is_empty() {
        return None;
    }
    Some(creatives)
}

fn lenient_creative(item: Value) -> Option<Creative> {
    let Value::Object(mut object) = item else {
        return None;
    };
    coerce_text_fields(&mut object, &CREATIVE_TEXT_FIELDS);

    match serde_json::from_value::<Creative>(Value::Object(object)) {
        Ok(creative) => Some(creative),
        Err(e) => {
            warn!(error = %e, "Dropping malformed creative");
            None
        }
    }
}

/// Deterministic creatives, one per angle, capped at five.
///
/// ```
/// use adlens_agents::template_creatives;
///
/// let creatives = template_creatives("Winter", Some("Stay warm"), 8);
/// assert_eq!(creatives.len(), 5);
/// assert_eq!(creatives[1].angle, "Urgency-Based");
/// assert!(creatives[0].message.contains("Stay warm"));
/// ```
pub fn template_creatives(campaign: &str, existing: Option<&str>, count: usize) -> Vec<Creative> {
    let existing: String = existing
        .unwrap_or("No creative available")
        .chars()
        .take(100)
        .collect();

    TEMPLATE_ANGLES
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, angle)| Creative {
            id: format!("{}_creative_{}", campaign, i + 1),
            campaign_name: campaign.to_string(),
            angle: angle.to_string(),
            headline: format!("{} - Campaign Headline", angle),
            message: format!(
                "Based on existing creative: {}... Our new angle: {}",
                existing, angle
            ),
            target_ctr: "2.0-3.0%".to_string(),
            rationale: format!("Testing {} approach for better engagement", angle.to_lowercase()),
            extra: Default::default(),
        })
        .collect()
}
