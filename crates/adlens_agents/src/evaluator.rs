//! Quantitative validation of hypotheses.

use adlens_config::{AnalysisConfig, ThresholdsConfig};
use adlens_core::{
    Evaluation, Hypothesis, Insights, Priority, Recommendation, Strength, ValidatedHypothesis,
};
use adlens_data::{CampaignAggregate, Dataset, Metric, Trend, campaign_aggregates, stats};
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};

const EXPECTED_IMPACT: &str = "+10-20% performance improvement";

/// Statistical check selected from a hypothesis title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
enum Check {
    CreativeFatigue,
    Audience,
    Budget,
    RoasTrend,
    Generic,
}

impl Check {
    fn for_title(title: &str) -> Self {
        let title = title.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| title.contains(w));

        if has(&["creative", "fatigue"]) {
            Check::CreativeFatigue
        } else if has(&["audience", "target"]) {
            Check::Audience
        } else if has(&["budget", "spend"]) {
            Check::Budget
        } else if has(&["roas", "decline", "trend", "performance", "season"]) {
            Check::RoasTrend
        } else {
            Check::Generic
        }
    }
}

/// Evidence for a window comparison: full share when the dataset-wide change
/// is negative, half of it otherwise.
fn window_evidence(change_pct: Option<f64>, declining_share: f64) -> f64 {
    match change_pct {
        Some(change) if change < 0.0 => declining_share,
        _ => declining_share / 2.0,
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Scores hypotheses against the dataset. Pure computation; no model calls.
pub struct EvaluatorAgent<'a> {
    dataset: &'a Dataset,
    thresholds: &'a ThresholdsConfig,
    campaigns: Vec<CampaignAggregate>,
    trend: Trend,
}

impl<'a> EvaluatorAgent<'a> {
    /// Create an evaluator over `dataset`.
    pub fn new(
        dataset: &'a Dataset,
        thresholds: &'a ThresholdsConfig,
        analysis: &AnalysisConfig,
    ) -> Self {
        Self {
            dataset,
            thresholds,
            campaigns: campaign_aggregates(dataset, analysis.trend_window_fraction),
            trend: Trend::compute(dataset, analysis.trend_window_fraction),
        }
    }

    /// Validate every hypothesis and derive a recommendation.
    #[instrument(skip_all, fields(hypotheses = insights.hypotheses.len()))]
    pub fn evaluate(&self, insights: &Insights) -> Evaluation {
        let validated: Vec<ValidatedHypothesis> = insights
            .hypotheses
            .iter()
            .map(|h| self.validate(h))
            .collect();

        let validation_confidence = if validated.is_empty() {
            0.0
        } else {
            validated.iter().map(|v| v.validation_score).sum::<f64>() / validated.len() as f64
        };

        let flagged: Vec<String> = validated
            .iter()
            .filter(|v| !v.is_valid)
            .map(|v| v.hypothesis_id.clone())
            .collect();
        let needs_retry = validated.is_empty() || !flagged.is_empty();
        let recommendation = recommend(&validated);

        info!(
            validation_confidence,
            flagged = flagged.len(),
            needs_retry,
            "Validation complete"
        );

        Evaluation {
            validated_hypotheses: validated,
            validation_confidence,
            recommendation,
            flagged,
            needs_retry,
        }
    }

    fn validate(&self, hypothesis: &Hypothesis) -> ValidatedHypothesis {
        let check = Check::for_title(&hypothesis.title);
        let (evidence, mut metrics) = match check {
            Check::CreativeFatigue => self.window_check(Metric::Ctr),
            Check::Audience => self.audience_check(),
            Check::Budget => self.budget_check(),
            Check::RoasTrend => self.window_check(Metric::Roas),
            Check::Generic => self.generic_check(),
        };
        metrics.insert("check".to_string(), Value::from(check.to_string()));
        metrics.insert("evidence".to_string(), Value::from(evidence));

        let score = (0.5 * hypothesis.confidence + 0.5 * evidence).clamp(0.0, 1.0);
        debug!(
            hypothesis = %hypothesis.title,
            check = %check,
            evidence,
            score,
            "Validated hypothesis"
        );

        ValidatedHypothesis {
            hypothesis_id: if hypothesis.id.is_empty() {
                "unknown".to_string()
            } else {
                hypothesis.id.clone()
            },
            title: hypothesis.title.clone(),
            validation_score: score,
            metrics,
            is_valid: score >= self.thresholds.confidence,
            strength: Strength::from_score(score),
        }
    }

    /// Dataset-wide window change plus the campaigns whose own change is negative.
    fn window_check(&self, metric: Metric) -> (f64, Map<String, Value>) {
        let (early, recent, change) = match metric {
            Metric::Ctr => (
                self.trend.early_ctr,
                self.trend.recent_ctr,
                self.trend.ctr_change_pct,
            ),
            _ => (
                self.trend.early_roas,
                self.trend.recent_roas,
                self.trend.roas_change_pct,
            ),
        };

        let declining: Vec<&str> = self
            .campaigns
            .iter()
            .filter(|c| campaign_change(c, metric).is_some_and(|pct| pct < 0.0))
            .map(|c| c.campaign_name.as_str())
            .collect();
        let evidence = window_evidence(change, share(declining.len(), self.campaigns.len()));

        let metrics = json!({
            "metric": metric.to_string(),
            "early": early,
            "recent": recent,
            "change_pct": change,
            "declining_campaigns": declining,
            "total_campaigns": self.campaigns.len(),
        });
        (evidence, into_map(metrics))
    }

    fn audience_check(&self) -> (f64, Map<String, Value>) {
        let low_ctr: Vec<&str> = self
            .campaigns
            .iter()
            .filter(|c| c.mean_ctr < self.thresholds.ctr)
            .map(|c| c.campaign_name.as_str())
            .collect();
        let evidence = share(low_ctr.len(), self.campaigns.len());

        let metrics = json!({
            "low_ctr_campaigns": low_ctr,
            "ctr_threshold": self.thresholds.ctr,
            "total_campaigns": self.campaigns.len(),
        });
        (evidence, into_map(metrics))
    }

    fn budget_check(&self) -> (f64, Map<String, Value>) {
        let spend_median = stats::median(&self.dataset.values(Metric::Spend));
        let inefficient: Vec<f64> = self
            .dataset
            .records()
            .iter()
            .filter(|r| r.spend > spend_median && r.roas < self.thresholds.roas)
            .map(|r| r.spend)
            .collect();
        let evidence = share(inefficient.len(), self.dataset.len());

        let metrics = json!({
            "inefficient_records": inefficient.len(),
            "potential_waste": stats::sum(&inefficient),
            "spend_median": spend_median,
        });
        (evidence, into_map(metrics))
    }

    fn generic_check(&self) -> (f64, Map<String, Value>) {
        let below = self
            .dataset
            .records()
            .iter()
            .filter(|r| r.roas < self.thresholds.roas)
            .count();
        let evidence = share(below, self.dataset.len());

        let metrics = json!({
            "low_roas_records": below,
            "sample_size": self.dataset.len(),
            "roas_threshold": self.thresholds.roas,
        });
        (evidence, into_map(metrics))
    }
}

fn campaign_change(campaign: &CampaignAggregate, metric: Metric) -> Option<f64> {
    match metric {
        Metric::Ctr => campaign.ctr_change_pct,
        _ => campaign.roas_change_pct,
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn recommend(validated: &[ValidatedHypothesis]) -> Recommendation {
    let best = validated.iter().fold(None::<&ValidatedHypothesis>, |best, v| match best {
        Some(b) if b.validation_score >= v.validation_score => Some(b),
        _ => Some(v),
    });

    let Some(best) = best else {
        return Recommendation {
            action: "Review overall campaign strategy".to_string(),
            priority: Priority::Medium,
            expected_impact: None,
        };
    };

    let title = best.title.to_lowercase();
    let action = [
        ("creative", "Refresh ad creatives with new messaging"),
        ("audience", "Refine audience targeting parameters"),
        ("budget", "Reallocate budget to high-performing campaigns"),
        ("seasonal", "Adjust campaign timing for better alignment"),
    ]
    .iter()
    .find(|(keyword, _)| title.contains(*keyword))
    .map_or("Optimize campaign settings", |&(_, action)| action);

    Recommendation {
        action: action.to_string(),
        priority: if best.validation_score > 0.7 {
            Priority::High
        } else {
            Priority::Medium
        },
        expected_impact: Some(EXPECTED_IMPACT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlens_data::AdRecord;
    use chrono::NaiveDate;

    fn record(campaign: &str, day: u32, roas: f64, ctr: f64, spend: f64) -> AdRecord {
        AdRecord {
            campaign_name: campaign.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day),
            spend,
            impressions: 1000.0,
            clicks: ctr * 1000.0,
            ctr,
            roas,
            creative_message: String::new(),
        }
    }

    fn hypothesis(id: &str, title: &str, confidence: f64) -> Hypothesis {
        Hypothesis {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            confidence,
            evidence: Vec::new(),
            severity: "medium".to_string(),
        }
    }

    /// Campaign A decays in CTR and ROAS; campaign B is steady and healthy.
    fn dataset() -> Dataset {
        let mut records = Vec::new();
        for day in 1..=4 {
            let d = day as f64;
            records.push(record("A", day, 3.0 - 0.5 * d, 0.02 - 0.003 * d, 200.0));
            records.push(record("B", day, 4.0, 0.03, 50.0));
        }
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn keywords_select_checks() {
        assert_eq!(Check::for_title("Creative Fatigue"), Check::CreativeFatigue);
        assert_eq!(Check::for_title("Poor Targeting"), Check::Audience);
        assert_eq!(Check::for_title("Overspend on losers"), Check::Budget);
        assert_eq!(Check::for_title("Seasonal Decline"), Check::RoasTrend);
        assert_eq!(Check::for_title("Landing page bug"), Check::Generic);
    }

    #[test]
    fn creative_fatigue_uses_ctr_windows() {
        let dataset = dataset();
        let thresholds = ThresholdsConfig::default();
        let evaluator = EvaluatorAgent::new(&dataset, &thresholds, &AnalysisConfig::default());

        let insights = Insights {
            hypotheses: vec![hypothesis("hyp_1", "Creative Fatigue", 0.8)],
            ..Insights::default()
        };
        let evaluation = evaluator.evaluate(&insights);
        let v = &evaluation.validated_hypotheses[0];

        // Dataset CTR falls and one of two campaigns declines: evidence 0.5
        assert_eq!(v.metrics["evidence"], 0.5);
        assert!((v.validation_score - 0.65).abs() < 1e-9);
        assert_eq!(v.strength, Strength::Medium);
        assert!(v.is_valid);
        assert_eq!(v.metrics["declining_campaigns"], json!(["A"]));
        assert!(!evaluation.needs_retry);
        assert_eq!(
            evaluation.recommendation.action,
            "Refresh ad creatives with new messaging"
        );
        assert_eq!(evaluation.recommendation.priority, Priority::Medium);
    }

    #[test]
    fn budget_check_reports_waste() {
        let dataset = dataset();
        let thresholds = ThresholdsConfig::default();
        let evaluator = EvaluatorAgent::new(&dataset, &thresholds, &AnalysisConfig::default());

        let insights = Insights {
            hypotheses: vec![hypothesis("hyp_2", "Budget Misallocation", 0.2)],
            ..Insights::default()
        };
        let evaluation = evaluator.evaluate(&insights);
        let v = &evaluation.validated_hypotheses[0];

        // A's ROAS is 2.5, 2.0, 1.5, 1.0; only the last two are below 2.0
        assert_eq!(v.metrics["inefficient_records"], 2);
        assert_eq!(v.metrics["potential_waste"], 400.0);
        assert!((v.validation_score - 0.225).abs() < 1e-9);
        assert!(!v.is_valid);
        assert_eq!(evaluation.flagged, vec!["hyp_2".to_string()]);
        assert!(evaluation.needs_retry);
    }

    #[test]
    fn no_hypotheses_needs_retry() {
        let dataset = dataset();
        let thresholds = ThresholdsConfig::default();
        let evaluator = EvaluatorAgent::new(&dataset, &thresholds, &AnalysisConfig::default());

        let evaluation = evaluator.evaluate(&Insights::default());
        assert_eq!(evaluation.validation_confidence, 0.0);
        assert!(evaluation.needs_retry);
        assert_eq!(
            evaluation.recommendation.action,
            "Review overall campaign strategy"
        );
    }

    #[test]
    fn high_scores_get_high_priority() {
        let validated = vec![ValidatedHypothesis {
            hypothesis_id: "h".to_string(),
            title: "Seasonal slump".to_string(),
            validation_score: 0.9,
            metrics: Map::new(),
            is_valid: true,
            strength: Strength::Strong,
        }];
        let rec = recommend(&validated);
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.action, "Adjust campaign timing for better alignment");
    }
}
