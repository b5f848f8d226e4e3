//! Ollama local LLM adapter

use async_trait::async_trait;
use farm_assistant_domain::{CompletionClient, CompletionError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{LlmConfig, build_http_client, check_status, map_send_error, non_empty};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Ollama completion client for local models
pub struct OllamaCompletion {
    client: Client,
    base_url: String,
    config: LlmConfig,
}

impl OllamaCompletion {
    pub fn new(config: LlmConfig) -> Result<Self, CompletionError> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), config)
    }

    pub fn with_base_url(base_url: String, config: LlmConfig) -> Result<Self, CompletionError> {
        Ok(Self {
            client: build_http_client(&config)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl CompletionClient for OllamaCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = OllamaRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;

        let api_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        non_empty(api_response.response)
    }

    fn provider(&self) -> &'static str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3",
                "stream": false,
                "options": {"num_predict": 250}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "육성돈 평균 체중은 45kg이에요."
            })))
            .mount(&mock_server)
            .await;

        let client = OllamaCompletion::with_base_url(
            mock_server.uri(),
            LlmConfig {
                model: "llama3".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let answer = client.complete("육성돈 체중").await.unwrap();
        assert_eq!(answer, "육성돈 평균 체중은 45kg이에요.");
    }

    #[tokio::test]
    async fn test_complete_missing_response_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "done": true
            })))
            .mount(&mock_server)
            .await;

        let client = OllamaCompletion::with_base_url(mock_server.uri(), LlmConfig::default())
            .unwrap();

        let result = client.complete("hi").await;
        assert!(matches!(result, Err(CompletionError::InvalidResponse(_))));
    }
}
