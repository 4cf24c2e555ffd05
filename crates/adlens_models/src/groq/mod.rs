//! Groq (OpenAI-compatible) chat-completions driver.

mod conversion;
mod driver;
mod dto;

pub use driver::GroqDriver;
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage,
};
