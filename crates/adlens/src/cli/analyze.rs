//! Analysis command handler.

use super::commands::AnalyzeArgs;
use adlens::{
    AdlensResult, AnalysisRun, AnalystClient, AnalystConfig, AnalystDriver, Dataset,
    Orchestrator, PromptLibrary, ReportWriter, WrittenReport,
};
use tracing::info;

/// Run the full pipeline and print the console summary.
pub async fn run_analyze(args: AnalyzeArgs) -> AdlensResult<()> {
    let config = AnalystConfig::load_with(args.config.as_deref())?;
    let data_path = args.data.unwrap_or_else(|| config.paths.data.clone());
    let reports_dir = args
        .reports_dir
        .unwrap_or_else(|| config.paths.reports_dir.clone());
    let logs_dir = args
        .logs_dir
        .unwrap_or_else(|| config.paths.logs_dir.clone());

    println!("\n=== adlens ===\n");
    println!("Query: {}", args.query);
    println!("Data: {}\n", data_path.display());

    let dataset = Dataset::from_path(&data_path)?;
    let prompts = PromptLibrary::load(&config.paths.prompts_dir)?;
    let client = AnalystClient::from_config(&config.api)?;
    info!(
        provider = client.provider_name(),
        model = client.model_name(),
        records = dataset.len(),
        "Starting analysis"
    );

    println!("Running analysis...");
    let orchestrator = Orchestrator::new(client, config, prompts);
    let run = orchestrator.run(&args.query, &dataset).await?;

    let written = if args.no_write {
        None
    } else {
        println!("Saving results...");
        Some(ReportWriter::new(reports_dir, logs_dir).write(&run.report, &run.log)?)
    };

    print_summary(&run, written.as_ref());
    Ok(())
}

fn print_summary(run: &AnalysisRun, written: Option<&WrittenReport>) {
    let report = &run.report;

    println!("\n=== Analysis Complete ===\n");
    println!("Records Analyzed: {}", report.summary.total_records);
    println!("Campaigns: {}", report.summary.total_campaigns);
    println!(
        "Insights Generated: {}",
        report.insights.as_ref().map_or(0, |i| i.hypotheses.len())
    );
    println!("Creatives Generated: {}", report.creatives.len());

    if let Some(written) = written {
        println!("\nReports saved to:");
        for path in [
            &written.report,
            &written.insights,
            &written.creatives,
            &written.data_summary,
            &written.agent_logs,
        ] {
            println!("   - {}", path.display());
        }
    }

    if !report.recommendations.is_empty() {
        println!("\nTop Recommendations:");
        for (i, rec) in report.recommendations.iter().take(3).enumerate() {
            println!("  {}. {}", i + 1, rec.action);
        }
    }
    println!();
}
