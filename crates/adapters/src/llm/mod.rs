//! Completion service adapters

pub mod anthropic;
pub mod ollama;
pub mod openai;
pub mod stub;

pub use anthropic::AnthropicCompletion;
pub use ollama::OllamaCompletion;
pub use openai::OpenAiCompletion;
pub use stub::StubCompletion;

use farm_assistant_domain::CompletionError;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Common LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name/ID
    pub model: String,
    /// Maximum output tokens
    pub max_output_tokens: u32,
    /// Sampling temperature; provider default when unset
    pub temperature: Option<f64>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-haiku-20240307".to_string(),
            max_output_tokens: 250,
            temperature: None,
            timeout_secs: 45,
        }
    }
}

fn build_http_client(config: &LlmConfig) -> Result<Client, CompletionError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| CompletionError::Config(format!("Failed to build HTTP client: {}", e)))
}

fn map_send_error(error: reqwest::Error) -> CompletionError {
    if error.is_timeout() {
        CompletionError::Timeout
    } else if error.is_connect() {
        CompletionError::Network(error.to_string())
    } else {
        CompletionError::Api(error.to_string())
    }
}

/// Turn non-success HTTP statuses into completion errors
async fn check_status(response: Response) -> Result<Response, CompletionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(CompletionError::RateLimited),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CompletionError::Auth(format!(
            "API returned {}: {}",
            status, body
        ))),
        _ => Err(CompletionError::Api(format!(
            "API returned {}: {}",
            status, body
        ))),
    }
}

/// Fail on an empty body so the caller can show the apology
fn non_empty(text: String) -> Result<String, CompletionError> {
    if text.trim().is_empty() {
        return Err(CompletionError::InvalidResponse("Empty response".to_string()));
    }
    Ok(text)
}
