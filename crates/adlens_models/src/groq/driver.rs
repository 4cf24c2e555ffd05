//! Groq chat-completions driver.

use super::conversion;
use super::dto::ChatCompletionResponse;
use adlens_config::ApiConfig;
use adlens_core::{GenerateRequest, GenerateResponse};
use adlens_error::{AdlensResult, HttpError, JsonError};
use adlens_interface::AnalystDriver;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Driver for any OpenAI-compatible chat-completions endpoint, Groq by default.
#[derive(Debug, Clone)]
pub struct GroqDriver {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqDriver {
    /// Creates a driver from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip(api_key, config), fields(model = %config.model, endpoint = %config.endpoint))]
    pub fn new(api_key: impl Into<String>, config: &ApiConfig) -> AdlensResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalystDriver for GroqDriver {
    #[instrument(skip(self, req), fields(provider = "groq", model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> AdlensResult<GenerateResponse> {
        let wire = conversion::to_wire_request(req, &self.model, self.temperature, self.max_tokens)?;

        debug!(url = %self.endpoint, "Sending chat-completions request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&wire)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(HttpError::with_status(status.as_u16(), error_text).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read response body: {}", e)))?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| JsonError::new(format!("Failed to parse response: {}", e)))?;

        conversion::from_wire_response(&parsed)
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
