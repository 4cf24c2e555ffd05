//! Planned analysis tasks.

use serde::{Deserialize, Serialize};

/// Pipeline agent a task is routed to.
///
/// # Examples
///
/// ```
/// use adlens_core::AgentKind;
///
/// let kind: AgentKind = serde_json::from_str("\"insight_agent\"").unwrap();
/// assert_eq!(kind, AgentKind::InsightAgent);
///
/// let unknown: AgentKind = serde_json::from_str("\"weather_agent\"").unwrap();
/// assert_eq!(unknown, AgentKind::Unknown);
/// assert_eq!(AgentKind::CreativeAgent.to_string(), "creative_agent");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentKind {
    /// Dataset summarization
    DataAgent,
    /// Hypothesis generation
    InsightAgent,
    /// Quantitative validation
    EvaluatorAgent,
    /// Ad copy generation
    CreativeAgent,
    /// Anything the planner invented
    #[serde(other)]
    Unknown,
}

/// One step of an analysis plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier
    pub id: String,
    /// Agent responsible for the task
    pub agent: AgentKind,
    /// What the task is meant to do
    #[serde(default)]
    pub description: String,
    /// Ids of tasks that must run first
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Create a task with no dependencies.
    pub fn new(id: impl Into<String>, agent: AgentKind, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            agent,
            description: description.into(),
            dependencies: Vec::new(),
        }
    }

    /// Builder method to add a dependency.
    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }
}
