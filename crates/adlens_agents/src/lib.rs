//! The adlens analysis pipeline.
//!
//! An [`Orchestrator`] asks the planner for a task list, then runs the data,
//! insight, evaluator and creative steps in order against one [`Dataset`].
//! Insight and creative steps call the model through an
//! [`AnalystDriver`](adlens_interface::AnalystDriver); each falls back to
//! deterministic output when the model fails or returns unusable text.
//!
//! [`Dataset`]: adlens_data::Dataset

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod creative;
mod data_agent;
mod evaluator;
mod extraction;
mod insight;
mod log;
mod orchestrator;
mod planner;
mod prompts;
mod report;
mod request;

pub use creative::{CreativeAgent, parse_creatives, template_creatives};
pub use data_agent::DataAgent;
pub use evaluator::EvaluatorAgent;
pub use extraction::{extract_json, parse_json};
pub use insight::{InsightAgent, normalize_confidence, parse_insights};
pub use log::{ExecutionLog, InsightAttempt, RunStatus, TaskOutcome, TaskStatus};
pub use orchestrator::{AnalysisRun, Orchestrator};
pub use planner::{PlannerAgent, default_plan};
pub use prompts::{PromptKind, PromptLibrary};
pub use report::{
    AnalysisReport, RecommendationKind, ReportRecommendation, ReportSummary, ReportWriter,
    WrittenReport, render_markdown,
};
