//! Dataset summarization step.

use adlens_config::{AnalysisConfig, ThresholdsConfig};
use adlens_data::{DataSummary, Dataset};
use tracing::{info, instrument};

/// Summarizes a dataset. Pure computation; no model calls.
pub struct DataAgent<'a> {
    thresholds: &'a ThresholdsConfig,
    analysis: &'a AnalysisConfig,
}

impl<'a> DataAgent<'a> {
    /// Create a data agent with the given thresholds.
    pub fn new(thresholds: &'a ThresholdsConfig, analysis: &'a AnalysisConfig) -> Self {
        Self {
            thresholds,
            analysis,
        }
    }

    /// Compute the dataset summary.
    #[instrument(skip_all, fields(records = dataset.len()))]
    pub fn summarize(&self, dataset: &Dataset) -> DataSummary {
        let summary = DataSummary::compute(dataset, self.thresholds, self.analysis);
        info!(
            campaigns = summary.total_campaigns,
            patterns = summary.patterns.len(),
            roas_outliers = summary.outliers.roas.len(),
            "Data summary complete"
        );
        summary
    }
}
