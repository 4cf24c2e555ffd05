//! Conversions between adlens chat types and the wire format.

use super::dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use adlens_core::{GenerateRequest, GenerateResponse};
use adlens_error::{AdlensResult, BackendError};
use tracing::instrument;

/// Build the wire request, falling back to the driver defaults.
#[instrument(skip(req), fields(messages = req.messages.len()))]
pub(crate) fn to_wire_request(
    req: &GenerateRequest,
    model: &str,
    temperature: f32,
    max_tokens: u32,
) -> AdlensResult<ChatCompletionRequest> {
    let messages = req
        .messages
        .iter()
        .map(|m| ChatMessage {
            role: m.role.as_wire().to_string(),
            content: m.content.clone(),
        })
        .collect::<Vec<_>>();

    ChatCompletionRequest::builder()
        .model(req.model.clone().unwrap_or_else(|| model.to_string()))
        .messages(messages)
        .temperature(Some(req.temperature.unwrap_or(temperature)))
        .max_tokens(Some(req.max_tokens.unwrap_or(max_tokens)))
        .build()
        .map_err(|e| BackendError::new(format!("Failed to build request: {}", e)).into())
}

/// Take the first choice's content.
pub(crate) fn from_wire_response(
    response: &ChatCompletionResponse,
) -> AdlensResult<GenerateResponse> {
    let choice = response
        .choices()
        .first()
        .ok_or_else(|| BackendError::new("Response contained no choices"))?;
    Ok(GenerateResponse::from_text(choice.message().content()))
}
