//! End-to-end pipeline tests with mock and scripted drivers.

use adlens_agents::{
    Orchestrator, PromptKind, PromptLibrary, RecommendationKind, RunStatus, TaskStatus,
};
use adlens_config::AnalystConfig;
use adlens_core::{AgentKind, GenerateRequest, GenerateResponse};
use adlens_data::Dataset;
use adlens_error::{AdlensResult, BackendError};
use adlens_interface::AnalystDriver;
use adlens_models::MockDriver;
use std::collections::VecDeque;
use std::sync::Mutex;

const ADS_CSV: &str = "\
campaign_name,date,spend,impressions,clicks,ctr,roas,creative_message
Winter Sale,2024-01-01,300,10000,100,0.01,1.0,Winter deals are here
Spring Launch,2024-01-01,150,10000,250,0.025,3.5,Fresh spring styles
Winter Sale,2024-01-02,300,10000,100,0.01,1.2,Winter deals are here
Spring Launch,2024-01-02,150,10000,250,0.025,3.8,Fresh spring styles
Winter Sale,2024-01-03,300,10000,100,0.01,1.4,Stay warm for less
Spring Launch,2024-01-03,150,10000,250,0.025,4.0,Fresh spring styles
Winter Sale,2024-01-04,300,10000,100,0.01,1.5,Stay warm for less
Spring Launch,2024-01-04,150,10000,250,0.025,3.7,Fresh spring styles
";

fn dataset() -> Dataset {
    Dataset::from_reader(ADS_CSV.as_bytes()).expect("test CSV parses")
}

fn insight_reply(title: &str, confidence: f64) -> String {
    format!(
        r#"Here is my analysis:
```json
{{"hypotheses": [{{"id": "h1", "title": "{title}", "description": "d", "confidence": {confidence}}}],
  "primary_cause": "h1",
  "recommended_actions": ["Pause the weakest ad set"]}}
```"#
    )
}

/// Driver that answers each agent from a script and records the prompts it saw.
///
/// A missing script entry makes the call fail.
#[derive(Default)]
struct ScriptedDriver {
    planner: Option<String>,
    insights: Mutex<VecDeque<String>>,
    creative: Option<String>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedDriver {
    fn with_insights(replies: Vec<String>) -> Self {
        Self {
            insights: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    fn user_prompts_for(&self, agent: &str) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|(system, _)| route(system) == agent)
            .map(|(_, user)| user.clone())
            .collect()
    }
}

fn route(system_prompt: &str) -> &'static str {
    let system = system_prompt.to_lowercase();
    if system.contains("planner") {
        "planner"
    } else if system.contains("insight") {
        "insight"
    } else {
        "creative"
    }
}

#[async_trait::async_trait]
impl AnalystDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> AdlensResult<GenerateResponse> {
        let system = req.system_prompt().unwrap_or_default().to_string();
        let user = req.user_prompt().unwrap_or_default().to_string();
        self.prompts.lock().unwrap().push((system.clone(), user));

        let reply = match route(&system) {
            "planner" => self.planner.clone(),
            "insight" => self.insights.lock().unwrap().pop_front(),
            _ => self.creative.clone(),
        };

        match reply {
            Some(text) => Ok(GenerateResponse::from_text(text)),
            None => Err(BackendError::new("scripted failure").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn orchestrator<D: AnalystDriver>(driver: D) -> Orchestrator<D> {
    Orchestrator::new(driver, AnalystConfig::default(), PromptLibrary::bundled())
}

#[tokio::test]
async fn test_mock_run_produces_full_report() -> anyhow::Result<()> {
    let dataset = dataset();
    let orchestrator = orchestrator(MockDriver::new());

    let run = orchestrator.run("Why did ROAS drop?", &dataset).await?;
    let report = &run.report;

    assert_eq!(report.summary.total_records, 8);
    assert_eq!(report.summary.total_campaigns, 2);
    assert_eq!(report.summary.analysis_status, RunStatus::Completed);

    let insights = report.insights.as_ref().expect("insights present");
    assert_eq!(insights.hypotheses.len(), 2);
    assert_eq!(insights.hypotheses[0].title, "Creative Fatigue");

    let evaluation = report.evaluation.as_ref().expect("evaluation present");
    assert_eq!(evaluation.validated_hypotheses.len(), 2);

    // Only the low-ROAS campaign is targeted.
    assert_eq!(report.creatives.len(), 2);
    assert!(report.creatives.iter().all(|c| c.campaign_name == "Winter Sale"));
    assert_eq!(report.creatives[0].id, "Winter Sale_creative_1");

    assert_eq!(report.recommendations[0].kind, RecommendationKind::Optimization);
    assert_eq!(
        report.recommendations[0].action,
        "Reallocate budget to high-performing campaigns"
    );
    assert_eq!(report.recommendations.len(), 3);
    assert_eq!(report.recommendations[1].action, "Refresh creative messaging");

    let log = &run.log;
    assert_eq!(log.status, RunStatus::Completed);
    assert!(log.finished_at.is_some());
    assert_eq!(log.tasks.len(), 4);
    assert_eq!(log.count(TaskStatus::Completed), 4);
    Ok(())
}

#[tokio::test]
async fn test_mock_run_skips_planner_call() -> anyhow::Result<()> {
    let dataset = dataset();
    let orchestrator = orchestrator(MockDriver::new());

    let run = orchestrator.run("Why did ROAS drop?", &dataset).await?;

    // Both mock hypotheses are flagged, so the insight step runs twice.
    assert_eq!(run.log.insight_attempts.len(), 2);
    assert_eq!(orchestrator.driver().call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_retry_keeps_better_insights() -> anyhow::Result<()> {
    let dataset = dataset();
    let driver = ScriptedDriver::with_insights(vec![
        insight_reply("Unexplained Variance", 0.1),
        insight_reply("Unexplained Variance", 0.9),
    ]);
    let orchestrator = orchestrator(driver);

    let run = orchestrator.run("Why did ROAS drop?", &dataset).await?;

    let attempts = &run.log.insight_attempts;
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].needs_retry);
    assert!(!attempts[0].kept);
    assert!(attempts[1].kept);
    assert!(attempts[1].validation_confidence > attempts[0].validation_confidence);

    let insights = run.report.insights.as_ref().expect("insights present");
    assert_eq!(insights.hypotheses[0].confidence, 0.9);
    let evaluation = run.report.evaluation.as_ref().expect("evaluation present");
    assert!(!evaluation.needs_retry);

    let insight_prompts = orchestrator.driver().user_prompts_for("insight");
    assert_eq!(insight_prompts.len(), 2);
    assert!(!insight_prompts[0].contains("Reviewer feedback"));
    assert!(insight_prompts[1].contains("\"Unexplained Variance\" was not supported"));
    assert!(insight_prompts[1].contains("validation score 30%"));
    Ok(())
}

#[tokio::test]
async fn test_retry_discards_worse_insights() -> anyhow::Result<()> {
    let dataset = dataset();
    let driver = ScriptedDriver::with_insights(vec![
        insight_reply("Unexplained Variance", 0.5),
        insight_reply("Something Else", 0.1),
    ]);
    let orchestrator = orchestrator(driver);

    let run = orchestrator.run("Why did ROAS drop?", &dataset).await?;

    let attempts = &run.log.insight_attempts;
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].kept);
    assert!(!attempts[1].kept);

    let insights = run.report.insights.as_ref().expect("insights present");
    assert_eq!(insights.hypotheses[0].title, "Unexplained Variance");
    Ok(())
}

#[tokio::test]
async fn test_failing_model_falls_back_everywhere() -> anyhow::Result<()> {
    let dataset = dataset();
    let orchestrator = orchestrator(ScriptedDriver::default());

    let run = orchestrator.run("Why did ROAS drop?", &dataset).await?;

    // Planner failure yields the default four-step plan.
    assert_eq!(run.log.tasks.len(), 4);
    assert_eq!(run.log.count(TaskStatus::Completed), 4);

    let insights = run.report.insights.as_ref().expect("insights present");
    assert_eq!(insights.primary_cause.as_deref(), Some("data_insufficient"));
    assert_eq!(insights.recommended_actions.len(), 3);

    assert_eq!(run.report.creatives.len(), 5);
    assert_eq!(run.report.creatives[0].angle, "Value Proposition");
    assert!(run.report.creatives[0].message.contains("Winter deals are here"));
    Ok(())
}

#[tokio::test]
async fn test_unparseable_creative_reply_uses_three_templates() -> anyhow::Result<()> {
    let dataset = dataset();
    let driver = ScriptedDriver {
        creative: Some("Sorry, no ideas today.".to_string()),
        ..ScriptedDriver::with_insights(vec![insight_reply("Budget Waste", 0.9)])
    };
    let orchestrator = orchestrator(driver);

    let report = orchestrator.analyze("Why did ROAS drop?", &dataset).await?;

    assert_eq!(report.creatives.len(), 3);
    assert!(report.creatives.iter().all(|c| c.target_ctr == "2.0-3.0%"));
    Ok(())
}

#[tokio::test]
async fn test_planned_unknown_agent_is_skipped_and_prerequisites_backfilled() -> anyhow::Result<()> {
    let dataset = dataset();
    let driver = ScriptedDriver {
        planner: Some(
            r#"{"tasks": [
                {"id": "forecast", "agent": "weather_agent", "description": "Check the weather"},
                {"id": "copy", "agent": "creative_agent", "dependencies": []}
            ]}"#
            .to_string(),
        ),
        creative: Some(r#"[{"angle": "Urgency", "headline": "Last chance"}]"#.to_string()),
        ..ScriptedDriver::with_insights(vec![insight_reply("Budget Waste", 0.9)])
    };
    let orchestrator = orchestrator(driver);

    let run = orchestrator.run("Refresh our ads", &dataset).await?;

    assert_eq!(run.log.tasks.len(), 2);
    assert_eq!(run.log.tasks[0].agent, AgentKind::Unknown);

    let skipped = run.log.outcome("forecast").expect("forecast outcome");
    assert_eq!(skipped.status, TaskStatus::Skipped);
    let copy = run.log.outcome("copy").expect("copy outcome");
    assert_eq!(copy.status, TaskStatus::Completed);

    assert!(run.report.insights.is_some());
    assert!(run.report.evaluation.is_some());
    assert_eq!(run.report.creatives.len(), 1);
    assert_eq!(run.report.creatives[0].headline, "Last chance");
    assert_eq!(run.report.summary.analysis_status, RunStatus::Completed);
    Ok(())
}

#[tokio::test]
async fn test_task_errors_are_recorded_and_fail_the_run() -> anyhow::Result<()> {
    let dataset = dataset();
    let driver = ScriptedDriver {
        planner: Some(
            r#"{"tasks": [
                {"id": "explain", "agent": "insight_agent"},
                {"id": "copy", "agent": "creative_agent"}
            ]}"#
            .to_string(),
        ),
        ..ScriptedDriver::with_insights(vec![insight_reply("Budget Waste", 0.9)])
    };
    let mut prompts = PromptLibrary::bundled();
    prompts.set(PromptKind::Insight, "");
    let orchestrator = Orchestrator::new(driver, AnalystConfig::default(), prompts);

    let run = orchestrator.run("Why did ROAS drop?", &dataset).await?;

    for task_id in ["explain", "copy"] {
        let outcome = run.log.outcome(task_id).expect("task outcome");
        assert_eq!(outcome.status, TaskStatus::Failed);
        let error = outcome.error.as_deref().unwrap_or_default();
        assert!(error.contains("Failed to build request for insight"), "{error}");
    }
    assert_eq!(run.log.count(TaskStatus::Completed), 0);
    assert_eq!(run.log.status, RunStatus::Failed);
    assert!(orchestrator.driver().user_prompts_for("insight").is_empty());

    assert_eq!(run.report.summary.analysis_status, RunStatus::Failed);
    assert!(run.report.insights.is_none());
    assert!(run.report.creatives.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_planner_context_mentions_dataset_shape() -> anyhow::Result<()> {
    let dataset = dataset();
    let orchestrator = orchestrator(ScriptedDriver::default());

    orchestrator.analyze("Why did ROAS drop?", &dataset).await?;

    let planner_prompts = orchestrator.driver().user_prompts_for("planner");
    assert_eq!(planner_prompts.len(), 1);
    assert!(planner_prompts[0].contains("Business Query: Why did ROAS drop?"));
    assert!(planner_prompts[0].contains("8 records across 2 campaigns"));
    Ok(())
}
