//! Groq driver tests against a local one-shot HTTP stub.

use adlens_config::ApiConfig;
use adlens_core::{GenerateRequest, Message};
use adlens_error::AdlensErrorKind;
use adlens_interface::AnalystDriver;
use adlens_models::GroqDriver;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned HTTP response and hand back the raw request text.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        // Read headers, then as many body bytes as Content-Length promises
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{}/openai/v1/chat/completions", addr), handle)
}

fn config_for(endpoint: String) -> ApiConfig {
    ApiConfig {
        endpoint,
        timeout_secs: 5,
        ..ApiConfig::default()
    }
}

fn request() -> GenerateRequest {
    GenerateRequest::builder()
        .messages(vec![
            Message::system("You are the Insight agent."),
            Message::user("Why did ROAS drop?"),
        ])
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_successful_completion() -> anyhow::Result<()> {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"model":"llama-3.1-8b-instant","choices":[{"index":0,"message":{"role":"assistant","content":"{\"hypotheses\":[]}"},"finish_reason":"stop"}]}"#,
    )
    .await;

    let driver = GroqDriver::new("gsk_test", &config_for(endpoint))?;
    let response = driver.generate(&request()).await?;
    assert_eq!(response.text(), r#"{"hypotheses":[]}"#);

    let raw_request = server.await?;
    assert!(raw_request.to_lowercase().contains("authorization: bearer gsk_test"));
    assert!(raw_request.contains(r#""model":"llama-3.1-8b-instant""#));
    assert!(raw_request.contains(r#""role":"system""#));
    assert!(raw_request.contains(r#""max_tokens":2000"#));
    Ok(())
}

#[tokio::test]
async fn test_error_status_becomes_http_error() -> anyhow::Result<()> {
    let (endpoint, _server) =
        serve_once("429 Too Many Requests", r#"{"error":"rate limited"}"#).await;

    let driver = GroqDriver::new("gsk_test", &config_for(endpoint))?;
    let err = driver.generate(&request()).await.unwrap_err();

    match err.kind() {
        AdlensErrorKind::Http(http) => {
            assert_eq!(http.status, Some(429));
            assert!(http.message.contains("rate limited"));
        }
        other => panic!("expected HTTP error, got {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_unparseable_body_becomes_json_error() -> anyhow::Result<()> {
    let (endpoint, _server) = serve_once("200 OK", "not json at all").await;

    let driver = GroqDriver::new("gsk_test", &config_for(endpoint))?;
    let err = driver.generate(&request()).await.unwrap_err();
    assert!(matches!(err.kind(), AdlensErrorKind::Json(_)));
    Ok(())
}

#[tokio::test]
async fn test_empty_choices_becomes_backend_error() -> anyhow::Result<()> {
    let (endpoint, _server) = serve_once("200 OK", r#"{"model":"m","choices":[]}"#).await;

    let driver = GroqDriver::new("gsk_test", &config_for(endpoint))?;
    let err = driver.generate(&request()).await.unwrap_err();
    assert!(matches!(err.kind(), AdlensErrorKind::Backend(_)));
    Ok(())
}
