//! Runs a planned analysis end to end.

use crate::creative::CreativeAgent;
use crate::data_agent::DataAgent;
use crate::evaluator::EvaluatorAgent;
use crate::insight::InsightAgent;
use crate::log::{ExecutionLog, InsightAttempt, RunStatus, TaskOutcome, TaskStatus};
use crate::planner::PlannerAgent;
use crate::prompts::{PromptKind, PromptLibrary};
use crate::report::AnalysisReport;
use adlens_config::AnalystConfig;
use adlens_core::{AgentKind, Creative, Evaluation, Insights, Task};
use adlens_data::{DataSummary, Dataset};
use adlens_error::{AdlensError, AdlensResult, AgentError, AgentErrorKind};
use adlens_interface::AnalystDriver;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Report plus the log of how it was produced.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// Assembled report
    pub report: AnalysisReport,
    /// Execution log
    pub log: ExecutionLog,
}

/// Intermediate results shared between tasks.
struct PipelineState<'a> {
    dataset: &'a Dataset,
    summary: Option<DataSummary>,
    insights: Option<Insights>,
    evaluation: Option<Evaluation>,
    creatives: Option<Vec<Creative>>,
}

impl<'a> PipelineState<'a> {
    fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            summary: None,
            insights: None,
            evaluation: None,
            creatives: None,
        }
    }
}

/// Coordinates the planner, data, insight, evaluator and creative agents.
///
/// Tasks run in plan order. A step whose inputs are missing computes them
/// first, so any subset or ordering of tasks still produces a report.
///
/// # Example
///
/// ```
/// use adlens_agents::{Orchestrator, PromptLibrary};
/// use adlens_config::AnalystConfig;
/// use adlens_data::Dataset;
/// use adlens_models::MockDriver;
///
/// # #[tokio::main]
/// # async fn main() -> adlens_error::AdlensResult<()> {
/// let csv = "campaign_name,date,spend,impressions,clicks,ctr,roas,creative_message\n\
///            Spring,2024-01-01,100,10000,200,0.02,3.0,Fresh looks\n\
///            Spring,2024-01-02,120,11000,180,0.016,1.2,Fresh looks\n";
/// let dataset = Dataset::from_reader(csv.as_bytes())?;
/// let orchestrator = Orchestrator::new(MockDriver::new(), AnalystConfig::default(), PromptLibrary::bundled());
/// let report = orchestrator.analyze("Why did ROAS drop?", &dataset).await?;
/// assert_eq!(report.summary.total_records, 2);
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator<D: AnalystDriver> {
    driver: D,
    config: AnalystConfig,
    prompts: PromptLibrary,
}

impl<D: AnalystDriver> Orchestrator<D> {
    /// Create an orchestrator.
    pub fn new(driver: D, config: AnalystConfig, prompts: PromptLibrary) -> Self {
        Self {
            driver,
            config,
            prompts,
        }
    }

    /// The model driver in use.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Active configuration.
    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    /// Answer `query` and return only the report.
    pub async fn analyze(&self, query: &str, dataset: &Dataset) -> AdlensResult<AnalysisReport> {
        Ok(self.run(query, dataset).await?.report)
    }

    /// Answer `query`, returning the report and the execution log.
    #[instrument(skip(self, dataset), fields(records = dataset.len(), provider = self.driver.provider_name()))]
    pub async fn run(&self, query: &str, dataset: &Dataset) -> AdlensResult<AnalysisRun> {
        let mut log = ExecutionLog::start(query);
        info!(run_id = %log.run_id, "Starting analysis");

        let context = format!(
            "Dataset with {} records across {} campaigns",
            dataset.len(),
            dataset.campaigns().len()
        );
        let planner = PlannerAgent::new(&self.driver, self.prompts.get(PromptKind::Planner));
        let tasks = planner.plan(query, Some(&context)).await;
        log.tasks = tasks.clone();

        let mut state = PipelineState::new(dataset);
        for task in &tasks {
            let outcome = self.execute_task(task, query, &mut state, &mut log).await;
            log.outcomes.push(outcome);
        }

        let status = if log.count(TaskStatus::Completed) == 0 && log.count(TaskStatus::Failed) > 0 {
            RunStatus::Failed
        } else {
            RunStatus::Completed
        };

        let summary = match state.summary.take() {
            Some(summary) => summary,
            None => self.data_agent().summarize(dataset),
        };
        let report = AnalysisReport::assemble(
            query,
            status,
            summary,
            state.insights,
            state.evaluation,
            state.creatives.unwrap_or_default(),
        );

        log.finish(status);
        info!(
            run_id = %log.run_id,
            status = %status,
            completed = log.count(TaskStatus::Completed),
            failed = log.count(TaskStatus::Failed),
            skipped = log.count(TaskStatus::Skipped),
            "Analysis finished"
        );

        Ok(AnalysisRun { report, log })
    }

    async fn execute_task(
        &self,
        task: &Task,
        query: &str,
        state: &mut PipelineState<'_>,
        log: &mut ExecutionLog,
    ) -> TaskOutcome {
        debug!(task_id = %task.id, agent = %task.agent, "Executing task");
        let started = Instant::now();

        let result = match task.agent {
            AgentKind::DataAgent => {
                state.summary = Some(self.data_agent().summarize(state.dataset));
                Ok(())
            }
            AgentKind::InsightAgent => self.run_insight(state, query).await,
            AgentKind::EvaluatorAgent => self.run_evaluation(state, query, log).await,
            AgentKind::CreativeAgent => self.run_creative(state, query, log).await,
            AgentKind::Unknown => {
                warn!(task_id = %task.id, "No agent handles this task, skipping");
                return TaskOutcome {
                    task_id: task.id.clone(),
                    agent: task.agent,
                    status: TaskStatus::Skipped,
                    duration_ms: 0,
                    error: None,
                };
            }
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(()) => {
                info!(task_id = %task.id, agent = %task.agent, duration_ms, "Task completed");
                TaskOutcome {
                    task_id: task.id.clone(),
                    agent: task.agent,
                    status: TaskStatus::Completed,
                    duration_ms,
                    error: None,
                }
            }
            Err(e) => {
                error!(task_id = %task.id, agent = %task.agent, error = %e, "Task failed");
                TaskOutcome {
                    task_id: task.id.clone(),
                    agent: task.agent,
                    status: TaskStatus::Failed,
                    duration_ms,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn data_agent(&self) -> DataAgent<'_> {
        DataAgent::new(&self.config.thresholds, &self.config.analysis)
    }

    fn ensure_summary(&self, state: &mut PipelineState<'_>) {
        if state.summary.is_none() {
            state.summary = Some(self.data_agent().summarize(state.dataset));
        }
    }

    async fn run_insight(&self, state: &mut PipelineState<'_>, query: &str) -> AdlensResult<()> {
        self.ensure_summary(state);
        let Some(summary) = state.summary.as_ref() else {
            return Err(missing("data summary"));
        };

        let agent = InsightAgent::new(&self.driver, self.prompts.get(PromptKind::Insight));
        let insights = agent.generate(summary, query).await?;
        state.insights = Some(insights);
        Ok(())
    }

    /// Evaluate the current insights, regenerating them while the evaluator
    /// asks for it and retries remain. The best-scoring attempt is kept.
    async fn run_evaluation(
        &self,
        state: &mut PipelineState<'_>,
        query: &str,
        log: &mut ExecutionLog,
    ) -> AdlensResult<()> {
        self.ensure_summary(state);
        if state.insights.is_none() {
            self.run_insight(state, query).await?;
        }
        let Some(mut best) = state.insights.clone() else {
            return Err(missing("insights"));
        };
        let Some(summary) = state.summary.as_ref() else {
            return Err(missing("data summary"));
        };

        let evaluator = EvaluatorAgent::new(
            state.dataset,
            &self.config.thresholds,
            &self.config.analysis,
        );
        let insight_agent = InsightAgent::new(&self.driver, self.prompts.get(PromptKind::Insight));

        let first_attempt = log.insight_attempts.len();
        let mut best_evaluation = evaluator.evaluate(&best);
        let mut kept = first_attempt;
        log.insight_attempts.push(attempt(1, &best, &best_evaluation));

        let mut retries = 0;
        while best_evaluation.needs_retry && retries < self.config.evaluation.max_retries {
            retries += 1;
            info!(
                retry = retries,
                confidence = best_evaluation.validation_confidence,
                flagged = best_evaluation.flagged.len(),
                "Low validation confidence, regenerating insights"
            );

            let candidate = insight_agent.regenerate(summary, query, &best_evaluation).await?;
            let candidate_evaluation = evaluator.evaluate(&candidate);
            log.insight_attempts
                .push(attempt(retries + 1, &candidate, &candidate_evaluation));

            if candidate_evaluation.validation_confidence >= best_evaluation.validation_confidence {
                kept = log.insight_attempts.len() - 1;
                best = candidate;
                best_evaluation = candidate_evaluation;
            } else {
                debug!(
                    previous = best_evaluation.validation_confidence,
                    candidate = candidate_evaluation.validation_confidence,
                    "Retry scored lower, keeping previous insights"
                );
            }
        }

        if let Some(entry) = log.insight_attempts.get_mut(kept) {
            entry.kept = true;
        }

        state.insights = Some(best);
        state.evaluation = Some(best_evaluation);
        Ok(())
    }

    async fn run_creative(
        &self,
        state: &mut PipelineState<'_>,
        query: &str,
        log: &mut ExecutionLog,
    ) -> AdlensResult<()> {
        if state.evaluation.is_none() {
            self.run_evaluation(state, query, log).await?;
        }
        let (Some(summary), Some(insights), Some(evaluation)) =
            (&state.summary, &state.insights, &state.evaluation)
        else {
            return Err(missing("evaluation"));
        };

        let agent = CreativeAgent::new(
            &self.driver,
            self.prompts.get(PromptKind::Creative),
            state.dataset,
            &self.config.thresholds,
            &self.config.creative,
        );
        let creatives = agent.generate(summary, insights, evaluation).await?;
        state.creatives = Some(creatives);
        Ok(())
    }
}

fn attempt(number: u32, insights: &Insights, evaluation: &Evaluation) -> InsightAttempt {
    InsightAttempt {
        attempt: number,
        hypotheses: insights.hypotheses.len(),
        validation_confidence: evaluation.validation_confidence,
        needs_retry: evaluation.needs_retry,
        kept: false,
    }
}

fn missing(what: &str) -> AdlensError {
    AgentError::new(AgentErrorKind::MissingPrerequisite(what.to_string())).into()
}
