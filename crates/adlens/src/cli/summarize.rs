//! Dataset summary command handler.

use super::commands::SummarizeArgs;
use adlens::{AdlensResult, AnalystConfig, DataSummary, Dataset};

/// Print the dataset summary JSON. Makes no model calls.
pub fn run_summarize(args: SummarizeArgs) -> AdlensResult<()> {
    let config = AnalystConfig::load_with(args.config.as_deref())?;
    let data_path = args.data.unwrap_or_else(|| config.paths.data.clone());

    let dataset = Dataset::from_path(&data_path)?;
    let summary = DataSummary::compute(&dataset, &config.thresholds, &config.analysis);
    println!("{}", summary.to_pretty_json());
    Ok(())
}
