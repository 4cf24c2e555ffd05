//! Request construction shared by the model-backed agents.

use adlens_core::{GenerateRequest, Message};
use adlens_error::{AdlensResult, AgentError, AgentErrorKind};

/// Build a system + user chat request.
///
/// A blank system prompt is rejected: the agent would run without instructions.
pub(crate) fn chat_request(
    agent: &str,
    system_prompt: &str,
    user_prompt: String,
) -> AdlensResult<GenerateRequest> {
    let build_error = |message: String| {
        AgentError::new(AgentErrorKind::RequestBuild {
            agent: agent.to_string(),
            message,
        })
    };

    if system_prompt.trim().is_empty() {
        return Err(build_error("system prompt is empty".to_string()).into());
    }

    GenerateRequest::builder()
        .messages(vec![
            Message::system(system_prompt),
            Message::user(user_prompt),
        ])
        .build()
        .map_err(|e| build_error(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_system_and_user_messages() {
        let request = chat_request("insight", "You are an analyst", "Explain".to_string())
            .expect("request builds");
        assert_eq!(request.system_prompt(), Some("You are an analyst"));
        assert_eq!(request.user_prompt(), Some("Explain"));
    }

    #[test]
    fn blank_system_prompt_is_rejected() {
        let err = chat_request("creative", "  \n", "Write ads".to_string())
            .expect_err("blank prompt fails");
        let text = err.to_string();
        assert!(text.contains("Failed to build request for creative"), "{text}");
        assert!(text.contains("system prompt is empty"), "{text}");
    }
}
