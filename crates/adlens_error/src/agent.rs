//! Agent pipeline error types.

/// Specific error conditions raised by pipeline agents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AgentErrorKind {
    /// Failed to build a chat request
    #[display("Failed to build request for {}: {}", agent, message)]
    RequestBuild {
        /// Agent name
        agent: String,
        /// Error message
        message: String,
    },
    /// Model reply contained no JSON document
    #[display("No JSON found in response (length: {})", _0)]
    NoJson(usize),
    /// Prompt template could not be read
    #[display("Failed to load prompt '{}': {}", name, message)]
    PromptLoad {
        /// Prompt name
        name: String,
        /// Error message
        message: String,
    },
    /// A step ran before its prerequisites could be produced
    #[display("Missing prerequisite: {}", _0)]
    MissingPrerequisite(String),
}

/// Error type for agent operations.
///
/// # Examples
///
/// ```
/// use adlens_error::{AgentError, AgentErrorKind};
///
/// let err = AgentError::new(AgentErrorKind::NoJson(42));
/// assert!(format!("{}", err).contains("No JSON"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Agent Error: {} at line {} in {}", kind, line, file)]
pub struct AgentError {
    /// The specific error condition
    pub kind: AgentErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl AgentError {
    /// Create a new AgentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AgentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
