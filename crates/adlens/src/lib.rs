//! adlens - agentic ad performance analysis
//!
//! adlens answers a business question about advertising performance
//! ("why did ROAS drop last week?") by running a small team of agents over a
//! campaign CSV export:
//!
//! - **Planner** breaks the question into tasks
//! - **Data agent** condenses the dataset into a statistical summary
//! - **Insight agent** asks a chat model for hypotheses
//! - **Evaluator** scores each hypothesis against the numbers and asks for
//!   another attempt when support is weak
//! - **Creative agent** writes new ad copy for underperforming campaigns
//!
//! Without an API key every model call is served by [`MockDriver`], so the
//! whole pipeline runs offline.
//!
//! # Quick Start
//!
//! ```no_run
//! use adlens::{AnalystClient, AnalystConfig, Dataset, Orchestrator, PromptLibrary};
//!
//! #[tokio::main]
//! async fn main() -> adlens::AdlensResult<()> {
//!     let config = AnalystConfig::load()?;
//!     let dataset = Dataset::from_path(&config.paths.data)?;
//!     let client = AnalystClient::from_config(&config.api)?;
//!
//!     let orchestrator = Orchestrator::new(client, config, PromptLibrary::bundled());
//!     let report = orchestrator.analyze("Analyze ROAS drop", &dataset).await?;
//!     println!("{}", adlens::render_markdown(&report));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `adlens_error` - Error types
//! - `adlens_core` - Chat and domain types
//! - `adlens_interface` - `AnalystDriver` trait
//! - `adlens_config` - Layered configuration
//! - `adlens_models` - Groq and mock drivers
//! - `adlens_data` - CSV loading and statistics
//! - `adlens_agents` - Agents, orchestrator and report writer
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;

pub use observability::{LoggingConfig, init_logging};

pub use adlens_error::{
    AdlensError, AdlensErrorKind, AdlensResult, AgentError, AgentErrorKind, BackendError,
    ConfigError, DataError, DataErrorKind, HttpError, JsonError, ReportError, ReportErrorKind,
};

pub use adlens_core::{
    AgentKind, Creative, Evaluation, GenerateRequest, GenerateResponse, Hypothesis, Insights,
    Message, Output, Priority, Recommendation, Role, Strength, Task, ValidatedHypothesis,
};

pub use adlens_interface::AnalystDriver;

pub use adlens_config::{
    AnalysisConfig, AnalystConfig, ApiConfig, CreativeConfig, EvaluationConfig, PathsConfig,
    ThresholdsConfig,
};

pub use adlens_models::{AnalystClient, GroqDriver, MockDriver};

pub use adlens_data::{AdRecord, CampaignAggregate, DataSummary, Dataset, Metric};

pub use adlens_agents::{
    AnalysisReport, AnalysisRun, ExecutionLog, Orchestrator, PromptKind, PromptLibrary,
    ReportWriter, RunStatus, TaskStatus, WrittenReport, render_markdown,
};
