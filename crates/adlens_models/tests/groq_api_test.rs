//! Live Groq API tests. Run with `--features api` and `GROQ_API_KEY` set.

use adlens_config::ApiConfig;
use adlens_core::{GenerateRequest, Message};
use adlens_interface::AnalystDriver;
use adlens_models::AnalystClient;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_groq_basic_generation() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let client = AnalystClient::from_config(&ApiConfig::default())?;
    assert!(!client.is_mock(), "GROQ_API_KEY must be set for live tests");

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Reply with the single word: ok")])
        .max_tokens(Some(10))
        .build()?;

    let response = client.generate(&request).await?;
    assert!(!response.text().is_empty(), "Should receive non-empty response");
    Ok(())
}
