//! Offline pipeline tests through the facade crate.

use adlens::{
    AnalystClient, AnalystConfig, AnalystDriver, Dataset, Orchestrator, PromptLibrary,
    ReportWriter, RunStatus,
};
use tempfile::TempDir;

const ADS_CSV: &str = "\
campaign_name,date,spend,impressions,clicks,ctr,roas,creative_message
Holiday Push,2024-11-01,500,20000,300,0.015,1.4,Gifts they will love
Holiday Push,2024-11-02,520,21000,280,0.0133,1.1,Gifts they will love
Evergreen,2024-11-01,200,9000,270,0.03,4.2,Built to last
Evergreen,2024-11-02,210,9500,280,0.0295,4.0,Built to last
";

#[tokio::test]
async fn test_missing_key_runs_offline_end_to_end() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let csv_path = dir.path().join("ads.csv");
    std::fs::write(&csv_path, ADS_CSV)?;

    let config = AnalystConfig::default();
    let client = AnalystClient::with_api_key(&config.api, None)?;
    assert!(client.is_mock());

    let dataset = Dataset::from_path(&csv_path)?;
    let orchestrator = Orchestrator::new(client, config, PromptLibrary::bundled());
    let run = orchestrator.run("Analyze ROAS drop", &dataset).await?;

    assert_eq!(run.report.summary.total_records, 4);
    assert_eq!(run.report.summary.analysis_status, RunStatus::Completed);
    assert!(run.report.creatives.iter().all(|c| c.campaign_name == "Holiday Push"));

    let written = ReportWriter::new(dir.path().join("reports"), dir.path().join("logs"))
        .write(&run.report, &run.log)?;
    let markdown = std::fs::read_to_string(&written.report)?;
    assert!(markdown.contains("## Query\nAnalyze ROAS drop"));
    assert!(markdown.contains("### Holiday Push"));
    Ok(())
}

#[tokio::test]
async fn test_prompt_overrides_from_directory() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("creative.md"),
        "You are a creative copywriter for a pet store.",
    )?;

    let prompts = PromptLibrary::load(dir.path())?;
    assert_eq!(
        prompts.get(adlens::PromptKind::Creative),
        "You are a creative copywriter for a pet store."
    );
    assert!(prompts.is_bundled(adlens::PromptKind::Planner));
    Ok(())
}

#[test]
fn test_missing_data_file_is_reported() {
    let err = Dataset::from_path("/definitely/not/here.csv").unwrap_err();
    assert!(err.to_string().contains("Failed to read data file"));
}
