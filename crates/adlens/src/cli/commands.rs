//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// adlens - agentic ad performance analysis
#[derive(Parser, Debug)]
#[command(name = "adlens")]
#[command(about = "Agentic ad performance analysis over campaign CSV exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full analysis pipeline and write reports
    Analyze(AnalyzeArgs),

    /// Print the dataset summary as JSON (no model calls)
    Summarize(SummarizeArgs),
}

/// Arguments for `adlens analyze`
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Business question to analyze
    #[arg(default_value = "Analyze ROAS drop")]
    pub query: String,

    /// Path to the campaign CSV (defaults to paths.data)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Extra configuration file layered over the defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory for reports (defaults to paths.reports_dir)
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,

    /// Output directory for the execution log (defaults to paths.logs_dir)
    #[arg(long)]
    pub logs_dir: Option<PathBuf>,

    /// Skip writing report files
    #[arg(long)]
    pub no_write: bool,
}

/// Arguments for `adlens summarize`
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Path to the campaign CSV (defaults to paths.data)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Extra configuration file layered over the defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults_query() {
        let cli = Cli::parse_from(["adlens", "analyze"]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.query, "Analyze ROAS drop");
                assert!(args.data.is_none());
                assert!(!args.no_write);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "adlens",
            "summarize",
            "--data",
            "ads.csv",
            "--verbose",
            "--json-logs",
        ]);
        assert!(cli.verbose);
        assert!(cli.json_logs);
        match cli.command {
            Commands::Summarize(args) => assert_eq!(args.data, Some(PathBuf::from("ads.csv"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
