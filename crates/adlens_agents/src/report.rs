//! Final report assembly and on-disk artifacts.

use crate::log::{ExecutionLog, RunStatus};
use adlens_core::{Creative, Evaluation, Insights, Priority};
use adlens_data::DataSummary;
use adlens_error::{AdlensResult, ReportError, ReportErrorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const MESSAGE_PREVIEW_CHARS: usize = 100;
const CREATIVES_PER_CAMPAIGN: usize = 3;

/// Headline numbers for the executive summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Rows analyzed
    pub total_records: usize,
    /// Distinct campaigns
    pub total_campaigns: usize,
    /// Final run status
    pub analysis_status: RunStatus,
}

/// Where a report recommendation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecommendationKind {
    /// The evaluator's recommendation
    Optimization,
    /// An action suggested alongside the hypotheses
    Action,
}

/// One entry of the recommended actions list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecommendation {
    /// Source of the recommendation
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// What to do
    pub action: String,
    /// How urgent it is
    pub priority: Priority,
    /// Expected effect, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_impact: Option<String>,
}

/// Everything an analysis run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Business question
    pub query: String,
    /// When the report was assembled
    pub timestamp: DateTime<Utc>,
    /// Executive summary numbers
    pub summary: ReportSummary,
    /// Condensed dataset
    pub data_summary: DataSummary,
    /// Hypotheses, if the insight step ran
    pub insights: Option<Insights>,
    /// Validation, if the evaluator ran
    pub evaluation: Option<Evaluation>,
    /// Suggested creatives
    pub creatives: Vec<Creative>,
    /// Ordered recommended actions
    pub recommendations: Vec<ReportRecommendation>,
}

impl AnalysisReport {
    /// Assemble a report from the pipeline state.
    ///
    /// The evaluator recommendation comes first, followed by each
    /// recommended action from the insights at medium priority.
    pub fn assemble(
        query: impl Into<String>,
        status: RunStatus,
        data_summary: DataSummary,
        insights: Option<Insights>,
        evaluation: Option<Evaluation>,
        creatives: Vec<Creative>,
    ) -> Self {
        let mut recommendations = Vec::new();
        if let Some(evaluation) = &evaluation {
            let rec = &evaluation.recommendation;
            recommendations.push(ReportRecommendation {
                kind: RecommendationKind::Optimization,
                action: rec.action.clone(),
                priority: rec.priority,
                expected_impact: rec.expected_impact.clone(),
            });
        }
        if let Some(insights) = &insights {
            recommendations.extend(insights.recommended_actions.iter().map(|action| {
                ReportRecommendation {
                    kind: RecommendationKind::Action,
                    action: action.clone(),
                    priority: Priority::Medium,
                    expected_impact: None,
                }
            }));
        }

        Self {
            query: query.into(),
            timestamp: Utc::now(),
            summary: ReportSummary {
                total_records: data_summary.total_records,
                total_campaigns: data_summary.total_campaigns,
                analysis_status: status,
            },
            data_summary,
            insights,
            evaluation,
            creatives,
            recommendations,
        }
    }
}

/// Render the human-readable report.
pub fn render_markdown(report: &AnalysisReport) -> String {
    Markdown(report).to_string()
}

/// Markdown view of a report.
struct Markdown<'a>(&'a AnalysisReport);

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "# Ad Performance Analysis Report\n")?;
        writeln!(f, "## Query\n{}\n", report.query)?;
        writeln!(f, "**Analysis Date:** {}\n", report.timestamp.to_rfc3339())?;
        writeln!(f, "---\n")?;
        writeln!(f, "## Executive Summary\n")?;
        writeln!(f, "**Total Records Analyzed:** {}  ", report.summary.total_records)?;
        writeln!(f, "**Total Campaigns:** {}  ", report.summary.total_campaigns)?;
        writeln!(f, "**Status:** {}\n", report.summary.analysis_status)?;
        writeln!(f, "---\n")?;
        writeln!(f, "## Key Insights\n")?;

        if let Some(insights) = &report.insights {
            writeln!(f, "### Performance Hypotheses\n")?;
            for h in &insights.hypotheses {
                writeln!(f, "**{}** (Confidence: {})", h.title, percent(h.confidence))?;
                writeln!(f, "- {}\n", h.description)?;
            }
        }

        if let Some(evaluation) = &report.evaluation {
            writeln!(f, "### Validated Insights\n")?;
            for v in &evaluation.validated_hypotheses {
                writeln!(
                    f,
                    "**{}** - Validation Score: {}",
                    v.title,
                    percent(v.validation_score)
                )?;
                writeln!(f, "- Strength: {}", v.strength)?;
                writeln!(f, "- Is Valid: {}\n", if v.is_valid { "Yes" } else { "No" })?;
            }
        }

        if !report.recommendations.is_empty() {
            writeln!(f, "## Recommended Actions\n")?;
            for (i, rec) in report.recommendations.iter().enumerate() {
                writeln!(f, "{}. **{}**", i + 1, rec.action)?;
                writeln!(
                    f,
                    "   - Priority: {}",
                    rec.priority.to_string().to_uppercase()
                )?;
                writeln!(
                    f,
                    "   - Expected Impact: {}\n",
                    rec.expected_impact.as_deref().unwrap_or("Positive")
                )?;
            }
        }

        if !report.creatives.is_empty() {
            writeln!(f, "## Creative Suggestions\n")?;
            for (campaign, creatives) in group_by_campaign(&report.creatives) {
                writeln!(f, "### {}\n", campaign)?;
                for c in creatives.into_iter().take(CREATIVES_PER_CAMPAIGN) {
                    let message: String = c.message.chars().take(MESSAGE_PREVIEW_CHARS).collect();
                    writeln!(f, "**{}**", c.angle)?;
                    writeln!(f, "- Headline: {}", c.headline)?;
                    writeln!(f, "- Message: {}...", message)?;
                    writeln!(f, "- Target CTR: {}\n", c.target_ctr)?;
                }
            }
        }

        write!(f, "\n---\n\n*Generated by adlens*")
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Group creatives by campaign, preserving first-seen order.
fn group_by_campaign(creatives: &[Creative]) -> Vec<(&str, Vec<&Creative>)> {
    let mut groups: Vec<(&str, Vec<&Creative>)> = Vec::new();
    for creative in creatives {
        let name = if creative.campaign_name.is_empty() {
            "Unknown"
        } else {
            creative.campaign_name.as_str()
        };
        match groups.iter_mut().find(|(campaign, _)| *campaign == name) {
            Some((_, members)) => members.push(creative),
            None => groups.push((name, vec![creative])),
        }
    }
    groups
}

/// Paths of the artifacts written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    /// Markdown report
    pub report: PathBuf,
    /// Hypotheses and validation
    pub insights: PathBuf,
    /// Creative suggestions
    pub creatives: PathBuf,
    /// Dataset summary
    pub data_summary: PathBuf,
    /// Execution log
    pub agent_logs: PathBuf,
}

#[derive(Serialize)]
struct InsightsArtifact<'a> {
    hypotheses: &'a [adlens_core::Hypothesis],
    validated: &'a [adlens_core::ValidatedHypothesis],
}

/// Writes report artifacts to disk.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    reports_dir: PathBuf,
    logs_dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer targeting `reports_dir` and `logs_dir`.
    pub fn new(reports_dir: impl Into<PathBuf>, logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            logs_dir: logs_dir.into(),
        }
    }

    /// Write every artifact, creating directories as needed.
    #[instrument(skip_all, fields(reports_dir = %self.reports_dir.display()))]
    pub fn write(&self, report: &AnalysisReport, log: &ExecutionLog) -> AdlensResult<WrittenReport> {
        create_dir(&self.reports_dir)?;
        create_dir(&self.logs_dir)?;

        let insights = InsightsArtifact {
            hypotheses: report
                .insights
                .as_ref()
                .map(|i| i.hypotheses.as_slice())
                .unwrap_or_default(),
            validated: report
                .evaluation
                .as_ref()
                .map(|e| e.validated_hypotheses.as_slice())
                .unwrap_or_default(),
        };

        let written = WrittenReport {
            report: self.reports_dir.join("report.md"),
            insights: self.reports_dir.join("insights.json"),
            creatives: self.reports_dir.join("creatives.json"),
            data_summary: self.reports_dir.join("data_summary.json"),
            agent_logs: self.logs_dir.join("agent_logs.json"),
        };

        write_file(&written.report, render_markdown(report))?;
        write_json(&written.insights, &insights)?;
        write_json(&written.creatives, &report.creatives)?;
        write_json(&written.data_summary, &report.data_summary)?;
        write_json(&written.agent_logs, log)?;

        info!(report = %written.report.display(), "Report artifacts written");
        Ok(written)
    }
}

fn create_dir(dir: &Path) -> AdlensResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        ReportError::new(ReportErrorKind::DirectoryCreation(format!(
            "{}: {}",
            dir.display(),
            e
        )))
        .into()
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AdlensResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        ReportError::new(ReportErrorKind::Serialization(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    write_file(path, json)
}

fn write_file(path: &Path, contents: String) -> AdlensResult<()> {
    debug!(path = %path.display(), bytes = contents.len(), "Writing artifact");
    std::fs::write(path, contents).map_err(|e| {
        ReportError::new(ReportErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
            .into()
    })
}
