//! Driver selection from configuration.

use crate::{GroqDriver, MockDriver};
use adlens_config::ApiConfig;
use adlens_core::{GenerateRequest, GenerateResponse};
use adlens_error::AdlensResult;
use adlens_interface::AnalystDriver;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// The chat backend used by a pipeline run.
#[derive(Debug)]
pub enum AnalystClient {
    /// Real model behind an HTTP endpoint
    Live(GroqDriver),
    /// Canned offline responses
    Mock(MockDriver),
}

impl AnalystClient {
    /// Build a client, reading the API key from `config.api_key_env`.
    ///
    /// A missing or blank key selects the mock driver.
    #[instrument(skip(config), fields(api_key_env = %config.api_key_env))]
    pub fn from_config(config: &ApiConfig) -> AdlensResult<Self> {
        let key = std::env::var(&config.api_key_env).ok();
        Self::with_api_key(config, key)
    }

    /// Build a client from an explicit key.
    pub fn with_api_key(config: &ApiConfig, api_key: Option<String>) -> AdlensResult<Self> {
        match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => {
                info!(model = %config.model, "Using live chat model");
                Ok(Self::Live(GroqDriver::new(key, config)?))
            }
            None => {
                warn!(
                    api_key_env = %config.api_key_env,
                    "API key not set, falling back to mock responses"
                );
                Ok(Self::Mock(MockDriver::new()))
            }
        }
    }

    fn inner(&self) -> &dyn AnalystDriver {
        match self {
            Self::Live(driver) => driver,
            Self::Mock(driver) => driver,
        }
    }
}

#[async_trait]
impl AnalystDriver for AnalystClient {
    async fn generate(&self, req: &GenerateRequest) -> AdlensResult<GenerateResponse> {
        let driver = self.inner();
        let started = Instant::now();
        let result = driver.generate(req).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => info!(
                provider = driver.provider_name(),
                model = driver.model_name(),
                prompt_len = req.prompt_len(),
                response_len = response.text().len(),
                latency_ms,
                "Chat completion finished"
            ),
            Err(e) => warn!(
                provider = driver.provider_name(),
                model = driver.model_name(),
                prompt_len = req.prompt_len(),
                latency_ms,
                error = %e,
                "Chat completion failed"
            ),
        }

        result
    }

    fn provider_name(&self) -> &'static str {
        self.inner().provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner().model_name()
    }

    fn is_mock(&self) -> bool {
        self.inner().is_mock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_selects_mock() {
        let client =
            AnalystClient::with_api_key(&ApiConfig::default(), Some("   ".to_string())).unwrap();
        assert!(client.is_mock());
        assert_eq!(client.provider_name(), "mock");
    }

    #[test]
    fn present_key_selects_live() {
        let client =
            AnalystClient::with_api_key(&ApiConfig::default(), Some("gsk_test".to_string()))
                .unwrap();
        assert!(!client.is_mock());
        assert_eq!(client.provider_name(), "groq");
        assert_eq!(client.model_name(), "llama-3.1-8b-instant");
    }
}
