//! Execution log for one analysis run.

use adlens_core::{AgentKind, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RunStatus {
    /// Tasks are still executing
    Running,
    /// Every task ran (some may have failed or been skipped)
    Completed,
    /// The run could not produce a report
    Failed,
}

/// Result of a single planned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    /// Task finished
    Completed,
    /// Task returned an error
    Failed,
    /// No agent handles this task
    Skipped,
}

/// What happened when one task ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// Id of the planned task
    pub task_id: String,
    /// Agent that handled it
    pub agent: AgentKind,
    /// Final status
    pub status: TaskStatus,
    /// Wall time spent on the task
    pub duration_ms: u64,
    /// Error text for failed tasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One pass of the insight step and how it scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightAttempt {
    /// 1 for the first pass, 2 for the first retry, ...
    pub attempt: u32,
    /// Number of hypotheses produced
    pub hypotheses: usize,
    /// Mean validation score from the evaluator
    pub validation_confidence: f64,
    /// Whether the evaluator asked for another pass
    pub needs_retry: bool,
    /// Whether this attempt's insights were kept
    pub kept: bool,
}

/// Structured record of everything the orchestrator did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLog {
    /// Unique id of the run
    pub run_id: Uuid,
    /// Business question being answered
    pub query: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,
    /// Overall state
    pub status: RunStatus,
    /// The plan that was executed
    pub tasks: Vec<Task>,
    /// Per-task results, in execution order
    pub outcomes: Vec<TaskOutcome>,
    /// Insight passes, in order
    pub insight_attempts: Vec<InsightAttempt>,
}

impl ExecutionLog {
    /// Start a new log for `query`.
    pub fn start(query: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            query: query.into(),
            started_at: Utc::now(),
            finished_at: None,
            status: RunStatus::Running,
            tasks: Vec::new(),
            outcomes: Vec::new(),
            insight_attempts: Vec::new(),
        }
    }

    /// Mark the run as done.
    pub fn finish(&mut self, status: RunStatus) {
        self.status = status;
        self.finished_at = Some(Utc::now());
    }

    /// Outcome recorded for `task_id`, if it ran.
    pub fn outcome(&self, task_id: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.task_id == task_id)
    }

    /// Number of outcomes with `status`.
    pub fn count(&self, status: TaskStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finishing_stamps_time() {
        let mut log = ExecutionLog::start("Why did ROAS drop?");
        assert_eq!(log.status, RunStatus::Running);
        assert!(log.finished_at.is_none());

        log.finish(RunStatus::Completed);
        assert_eq!(log.status, RunStatus::Completed);
        assert!(log.finished_at.is_some_and(|t| t >= log.started_at));
    }

    #[test]
    fn statuses_serialize_lowercase() {
        let outcome = TaskOutcome {
            task_id: "t1".into(),
            agent: AgentKind::Unknown,
            status: TaskStatus::Skipped,
            duration_ms: 0,
            error: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "skipped");
        assert!(json.get("error").is_none());
    }
}
