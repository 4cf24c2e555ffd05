//! Dataset summary consumed by the agents.

use crate::stats::{self, percent_change, window_means};
use crate::{AdRecord, Dataset, Metric};
use adlens_config::{AnalysisConfig, ThresholdsConfig};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// First and last reporting dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest date, if any row is dated
    pub start: Option<NaiveDate>,
    /// Latest date, if any row is dated
    pub end: Option<NaiveDate>,
}

/// ROAS distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoasMetrics {
    /// Mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Sample standard deviation
    pub std: f64,
    /// Minimum
    pub min: f64,
    /// Maximum
    pub max: f64,
}

/// CTR distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CtrMetrics {
    /// Mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Sample standard deviation
    pub std: f64,
}

/// Spend totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpendMetrics {
    /// Sum over all rows
    pub total: f64,
    /// Mean
    pub mean: f64,
    /// Median
    pub median: f64,
}

/// Global metric distributions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// ROAS distribution
    pub roas: RoasMetrics,
    /// CTR distribution
    pub ctr: CtrMetrics,
    /// Spend totals
    pub spend: SpendMetrics,
}

/// Per-campaign aggregates with early/recent window changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignAggregate {
    /// Campaign name
    pub campaign_name: String,
    /// Number of rows
    pub records: usize,
    /// Mean ROAS
    pub mean_roas: f64,
    /// Mean CTR
    pub mean_ctr: f64,
    /// Total spend
    pub total_spend: f64,
    /// Percent change of ROAS from the early to the recent window
    pub roas_change_pct: Option<f64>,
    /// Percent change of CTR from the early to the recent window
    pub ctr_change_pct: Option<f64>,
}

/// Dataset-wide early versus recent comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Trend {
    /// Mean ROAS of the earliest window
    pub early_roas: f64,
    /// Mean ROAS of the latest window
    pub recent_roas: f64,
    /// Percent change of ROAS
    pub roas_change_pct: Option<f64>,
    /// Mean CTR of the earliest window
    pub early_ctr: f64,
    /// Mean CTR of the latest window
    pub recent_ctr: f64,
    /// Percent change of CTR
    pub ctr_change_pct: Option<f64>,
}

impl Trend {
    /// Compare the earliest and latest `fraction` of date-sorted rows.
    pub fn compute(dataset: &Dataset, fraction: f64) -> Self {
        let sorted = dataset.sorted_by_date();
        let (early_roas, recent_roas) = metric_windows(&sorted, Metric::Roas, fraction);
        let (early_ctr, recent_ctr) = metric_windows(&sorted, Metric::Ctr, fraction);
        Self {
            early_roas,
            recent_roas,
            roas_change_pct: percent_change(early_roas, recent_roas),
            early_ctr,
            recent_ctr,
            ctr_change_pct: percent_change(early_ctr, recent_ctr),
        }
    }
}

/// Direction of an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutlierKind {
    /// Above the upper fence
    High,
    /// Below the lower fence
    Low,
}

/// A record outside the IQR fences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    /// Campaign of the record
    pub campaign: String,
    /// Metric value
    pub value: f64,
    /// Direction
    #[serde(rename = "type")]
    pub kind: OutlierKind,
}

/// Outliers per metric.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outliers {
    /// ROAS outliers in file order
    pub roas: Vec<Outlier>,
}

/// Condensed view of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    /// Distinct campaigns
    pub total_campaigns: usize,
    /// Rows
    pub total_records: usize,
    /// First and last dates
    pub date_range: DateRange,
    /// Global distributions
    pub metrics: Metrics,
    /// Per-campaign aggregates in first-seen order
    pub campaigns: Vec<CampaignAggregate>,
    /// Dataset-wide trend
    pub trend: Trend,
    /// Human-readable observations
    pub patterns: Vec<String>,
    /// IQR outliers
    pub outliers: Outliers,
}

impl DataSummary {
    /// Summarize a dataset.
    #[instrument(skip_all, fields(records = dataset.len()))]
    pub fn compute(
        dataset: &Dataset,
        thresholds: &ThresholdsConfig,
        analysis: &AnalysisConfig,
    ) -> Self {
        let roas = dataset.values(Metric::Roas);
        let ctr = dataset.values(Metric::Ctr);
        let spend = dataset.values(Metric::Spend);

        let metrics = Metrics {
            roas: RoasMetrics {
                mean: stats::mean(&roas),
                median: stats::median(&roas),
                std: stats::std_dev(&roas),
                min: stats::min(&roas),
                max: stats::max(&roas),
            },
            ctr: CtrMetrics {
                mean: stats::mean(&ctr),
                median: stats::median(&ctr),
                std: stats::std_dev(&ctr),
            },
            spend: SpendMetrics {
                total: stats::sum(&spend),
                mean: stats::mean(&spend),
                median: stats::median(&spend),
            },
        };

        let dates = dataset.records().iter().filter_map(|r| r.date);
        let date_range = DateRange {
            start: dates.clone().min(),
            end: dates.max(),
        };

        let trend = Trend::compute(dataset, analysis.trend_window_fraction);
        let patterns = identify_patterns(dataset, &trend, thresholds, analysis);
        let outliers = Outliers {
            roas: find_outliers(dataset, Metric::Roas, analysis.outlier_iqr_multiplier),
        };

        debug!(
            patterns = patterns.len(),
            outliers = outliers.roas.len(),
            "Computed data summary"
        );

        Self {
            total_campaigns: dataset.campaigns().len(),
            total_records: dataset.len(),
            date_range,
            metrics,
            campaigns: campaign_aggregates(dataset, analysis.trend_window_fraction),
            trend,
            patterns,
            outliers,
        }
    }

    /// Pretty-printed JSON for prompts.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Aggregate every campaign, comparing early and recent windows of its dated rows.
pub fn campaign_aggregates(dataset: &Dataset, fraction: f64) -> Vec<CampaignAggregate> {
    let sorted = dataset.sorted_by_date();
    dataset
        .campaigns()
        .into_iter()
        .map(|name| {
            let rows: Vec<&AdRecord> = sorted
                .iter()
                .copied()
                .filter(|r| r.campaign_name == name)
                .collect();
            let column = |metric: Metric| rows.iter().map(|r| metric.of(r)).collect::<Vec<_>>();
            let (early_roas, recent_roas) = metric_windows(&rows, Metric::Roas, fraction);
            let (early_ctr, recent_ctr) = metric_windows(&rows, Metric::Ctr, fraction);

            CampaignAggregate {
                campaign_name: name.to_string(),
                records: rows.len(),
                mean_roas: stats::mean(&column(Metric::Roas)),
                mean_ctr: stats::mean(&column(Metric::Ctr)),
                total_spend: stats::sum(&column(Metric::Spend)),
                roas_change_pct: percent_change(early_roas, recent_roas),
                ctr_change_pct: percent_change(early_ctr, recent_ctr),
            }
        })
        .collect()
}

fn metric_windows(rows: &[&AdRecord], metric: Metric, fraction: f64) -> (f64, f64) {
    let values: Vec<f64> = rows.iter().map(|r| metric.of(r)).collect();
    window_means(&values, fraction).unwrap_or((0.0, 0.0))
}

fn identify_patterns(
    dataset: &Dataset,
    trend: &Trend,
    thresholds: &ThresholdsConfig,
    analysis: &AnalysisConfig,
) -> Vec<String> {
    let mut patterns = Vec::new();
    let n = dataset.len();

    if n > analysis.min_records_for_trend {
        if trend.recent_roas < trend.early_roas * thresholds.trend_decline_ratio {
            patterns.push("Declining ROAS trend detected".to_string());
        }
        if trend.recent_ctr < trend.early_ctr * thresholds.trend_decline_ratio {
            patterns.push("Declining CTR trend detected".to_string());
        }
    }

    let low_performers = dataset
        .records()
        .iter()
        .filter(|r| r.roas < thresholds.roas)
        .count();
    if low_performers as f64 > n as f64 * thresholds.low_performer_share {
        patterns.push(format!(
            "{} records with ROAS < {}",
            low_performers, thresholds.roas
        ));
    }

    let spend_q3 = stats::quantile(&dataset.values(Metric::Spend), 0.75);
    let high_spend_low_roas = dataset
        .records()
        .iter()
        .filter(|r| r.spend > spend_q3 && r.roas < thresholds.roas)
        .count();
    if high_spend_low_roas > 0 {
        patterns.push(format!(
            "{} high-spend records with low ROAS",
            high_spend_low_roas
        ));
    }

    patterns
}

fn find_outliers(dataset: &Dataset, metric: Metric, multiplier: f64) -> Vec<Outlier> {
    let values = dataset.values(metric);
    let q1 = stats::quantile(&values, 0.25);
    let q3 = stats::quantile(&values, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;

    dataset
        .records()
        .iter()
        .filter_map(|r| {
            let value = metric.of(r);
            let kind = if value > upper {
                OutlierKind::High
            } else if value < lower {
                OutlierKind::Low
            } else {
                return None;
            };
            Some(Outlier {
                campaign: r.campaign_name.clone(),
                value,
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn declining_trend_is_detected() {
        // 12 rows: ROAS falls from 4.0 to 1.0 across January
        let records = (1..=12)
            .map(|day| record("A", day, 4.0 - (day as f64 - 1.0) * 0.27, 0.02, 100.0))
            .collect();
        let dataset = Dataset::from_records(records).unwrap();

        let summary = DataSummary::compute(
            &dataset,
            &ThresholdsConfig::default(),
            &AnalysisConfig::default(),
        );

        assert!(summary.patterns.contains(&"Declining ROAS trend detected".to_string()));
        assert!(!summary.patterns.iter().any(|p| p.contains("CTR")));
        let change = summary.trend.roas_change_pct.unwrap();
        assert!(change < -50.0);
    }

    #[test]
    fn short_datasets_skip_trend_patterns() {
        let records = (1..=5)
            .map(|day| record("A", day, 5.0 / day as f64, 0.02, 100.0))
            .collect();
        let dataset = Dataset::from_records(records).unwrap();
        let summary = DataSummary::compute(
            &dataset,
            &ThresholdsConfig::default(),
            &AnalysisConfig::default(),
        );
        assert!(!summary.patterns.iter().any(|p| p.starts_with("Declining")));
    }

    #[test]
    fn outliers_are_tagged() {
        let mut records: Vec<AdRecord> =
            (1..=8).map(|day| record("A", day, 2.0, 0.02, 100.0)).collect();
        records.push(record("B", 9, 20.0, 0.02, 100.0));
        records.push(record("C", 10, -15.0, 0.02, 100.0));
        let dataset = Dataset::from_records(records).unwrap();

        let outliers = find_outliers(&dataset, Metric::Roas, 1.5);
        assert_eq!(outliers.len(), 2);
        assert_eq!(outliers[0].kind, OutlierKind::High);
        assert_eq!(outliers[1].campaign, "C");
        assert_eq!(outliers[1].kind, OutlierKind::Low);
    }

    #[test]
    fn outlier_kind_serializes_as_type() {
        let outlier = Outlier {
            campaign: "A".to_string(),
            value: 9.0,
            kind: OutlierKind::High,
        };
        let json = serde_json::to_value(&outlier).unwrap();
        assert_eq!(json["type"], "high");
    }
}
