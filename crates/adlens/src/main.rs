//! adlens CLI binary.
//!
//! - Run the full agent pipeline over a campaign CSV and write reports
//! - Print the statistical summary of a dataset without calling a model

use adlens::{LoggingConfig, init_logging};
use clap::Parser;

mod cli;

#[tokio::main]
async fn main() {
    use cli::{Cli, Commands, run_analyze, run_summarize};

    // Load .env before anything reads the API key
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let logging = LoggingConfig::new()
        .with_log_level(if cli.verbose { "debug" } else { "info" })
        .with_json_logs(cli.json_logs);
    if let Err(e) = init_logging(&logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Analyze(args) => run_analyze(args).await,
        Commands::Summarize(args) => run_summarize(args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("\nERROR: {}\n", e);
        std::process::exit(1);
    }
}
