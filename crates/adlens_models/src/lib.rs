//! Chat model drivers for adlens.
//!
//! - [`GroqDriver`] talks to an OpenAI-compatible chat-completions endpoint
//!   (Groq by default).
//! - [`MockDriver`] answers offline with canned JSON so the pipeline runs
//!   without credentials.
//! - [`AnalystClient`] picks one of the two from configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod groq;
mod mock;

pub use client::AnalystClient;
pub use groq::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, GroqDriver,
};
pub use mock::MockDriver;
