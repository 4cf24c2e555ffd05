//! Trait definitions for chat backends.

use adlens_core::{GenerateRequest, GenerateResponse};
use adlens_error::AdlensResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait that all chat backends must implement.
#[async_trait]
pub trait AnalystDriver: Send + Sync {
    /// Generate a completion for a chat request.
    async fn generate(&self, req: &GenerateRequest) -> AdlensResult<GenerateResponse>;

    /// Provider name (e.g., "groq", "mock").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "llama-3.1-8b-instant").
    fn model_name(&self) -> &str;

    /// Whether responses are canned rather than model-generated.
    ///
    /// Agents skip work that is meaningless without a real model, such as
    /// asking the planner for a custom plan.
    fn is_mock(&self) -> bool {
        false
    }
}

#[async_trait]
impl<D: AnalystDriver + ?Sized> AnalystDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> AdlensResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn is_mock(&self) -> bool {
        (**self).is_mock()
    }
}
