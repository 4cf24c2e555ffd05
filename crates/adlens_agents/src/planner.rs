//! Task planning.

use crate::extraction::{extract_json, parse_json};
use crate::request::chat_request;
use adlens_core::{AgentKind, Task};
use adlens_error::AdlensResult;
use adlens_interface::AnalystDriver;
use serde::Deserialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Deserialize)]
struct TaskPlan {
    #[serde(default)]
    tasks: Vec<Task>,
}

/// The four-step plan used whenever the model cannot supply one.
///
/// ```
/// use adlens_agents::default_plan;
/// use adlens_core::AgentKind;
///
/// let plan = default_plan();
/// assert_eq!(plan.len(), 4);
/// assert_eq!(plan[0].agent, AgentKind::DataAgent);
/// assert_eq!(plan[3].dependencies, vec!["evaluation".to_string()]);
/// ```
pub fn default_plan() -> Vec<Task> {
    vec![
        Task::new(
            "data_summary",
            AgentKind::DataAgent,
            "Summarize dataset characteristics and identify patterns",
        ),
        Task::new(
            "insights",
            AgentKind::InsightAgent,
            "Generate hypotheses explaining performance changes",
        )
        .depends_on("data_summary"),
        Task::new(
            "evaluation",
            AgentKind::EvaluatorAgent,
            "Validate hypotheses with quantitative metrics",
        )
        .depends_on("insights"),
        Task::new(
            "creatives",
            AgentKind::CreativeAgent,
            "Generate creative recommendations for underperformers",
        )
        .depends_on("evaluation"),
    ]
}

/// Breaks a business question into pipeline tasks.
pub struct PlannerAgent<'a> {
    driver: &'a dyn AnalystDriver,
    system_prompt: &'a str,
}

impl<'a> PlannerAgent<'a> {
    /// Create a planner using `system_prompt` as instructions.
    pub fn new(driver: &'a dyn AnalystDriver, system_prompt: &'a str) -> Self {
        Self {
            driver,
            system_prompt,
        }
    }

    /// Produce a task list for `query`.
    ///
    /// Never fails: any problem with the model or its reply yields
    /// [`default_plan`].
    #[instrument(skip(self, context), fields(provider = self.driver.provider_name()))]
    pub async fn plan(&self, query: &str, context: Option<&str>) -> Vec<Task> {
        if self.driver.is_mock() {
            info!("Mock driver in use, using default task plan");
            return default_plan();
        }

        match self.request_plan(query, context).await {
            Ok(tasks) if !tasks.is_empty() => {
                info!(tasks = tasks.len(), "Generated task plan");
                tasks
            }
            Ok(_) => {
                warn!("Model returned an empty plan, using default task plan");
                default_plan()
            }
            Err(e) => {
                warn!(error = %e, "Planning failed, using default task plan");
                default_plan()
            }
        }
    }

    async fn request_plan(&self, query: &str, context: Option<&str>) -> AdlensResult<Vec<Task>> {
        let user_prompt = format!(
            "Business Query: {}\n\n\
             Context: {}\n\n\
             Break this query into specific, actionable tasks for data analysis.\n\
             Return a JSON object with the 'tasks' array.",
            query,
            context.unwrap_or("No additional context provided")
        );

        let request = chat_request("planner", self.system_prompt, user_prompt)?;
        let response = self.driver.generate(&request).await?;
        let json = extract_json(&response.text())?;
        let plan: TaskPlan = parse_json(&json)?;
        Ok(plan.tasks)
    }
}
