//! System prompts for the model-backed agents.

use adlens_error::{AdlensResult, AgentError, AgentErrorKind};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

const PLANNER_PROMPT: &str = include_str!("../prompts/planner.md");
const INSIGHT_PROMPT: &str = include_str!("../prompts/insight.md");
const CREATIVE_PROMPT: &str = include_str!("../prompts/creative.md");

/// Agents that are driven by a system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PromptKind {
    /// Task planning
    Planner,
    /// Hypothesis generation
    Insight,
    /// Ad copy generation
    Creative,
}

impl PromptKind {
    /// File name looked up in an override directory.
    pub fn file_name(&self) -> String {
        format!("{}.md", self)
    }

    fn bundled(&self) -> &'static str {
        match self {
            PromptKind::Planner => PLANNER_PROMPT,
            PromptKind::Insight => INSIGHT_PROMPT,
            PromptKind::Creative => CREATIVE_PROMPT,
        }
    }
}

/// The set of system prompts used by one pipeline run.
///
/// # Examples
///
/// ```
/// use adlens_agents::{PromptKind, PromptLibrary};
///
/// let prompts = PromptLibrary::bundled();
/// assert!(prompts.get(PromptKind::Planner).contains("Planner"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLibrary {
    planner: String,
    insight: String,
    creative: String,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::bundled()
    }
}

impl PromptLibrary {
    /// Prompts compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            planner: PLANNER_PROMPT.to_string(),
            insight: INSIGHT_PROMPT.to_string(),
            creative: CREATIVE_PROMPT.to_string(),
        }
    }

    /// Bundled prompts, replaced by `<dir>/<kind>.md` wherever that file exists.
    ///
    /// # Errors
    ///
    /// Returns `AgentErrorKind::PromptLoad` if an override exists but cannot be read.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>) -> AdlensResult<Self> {
        let dir = dir.as_ref();
        let mut library = Self::bundled();

        for kind in PromptKind::iter() {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                debug!(prompt = %kind, "Using bundled prompt");
                continue;
            }

            let text = std::fs::read_to_string(&path).map_err(|e| {
                AgentError::new(AgentErrorKind::PromptLoad {
                    name: kind.to_string(),
                    message: format!("{}: {}", path.display(), e),
                })
            })?;
            info!(prompt = %kind, path = %path.display(), "Loaded prompt override");
            library.set(kind, text);
        }

        Ok(library)
    }

    /// Prompt text for an agent.
    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Planner => &self.planner,
            PromptKind::Insight => &self.insight,
            PromptKind::Creative => &self.creative,
        }
    }

    /// Replace one prompt.
    pub fn set(&mut self, kind: PromptKind, text: impl Into<String>) {
        let slot = match kind {
            PromptKind::Planner => &mut self.planner,
            PromptKind::Insight => &mut self.insight,
            PromptKind::Creative => &mut self.creative,
        };
        *slot = text.into();
    }

    /// Whether a prompt still matches the compiled-in text.
    pub fn is_bundled(&self, kind: PromptKind) -> bool {
        self.get(kind) == kind.bundled()
    }
}
