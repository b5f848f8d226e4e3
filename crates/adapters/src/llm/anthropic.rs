//! Anthropic Claude Messages API adapter

use async_trait::async_trait;
use farm_assistant_domain::{CompletionClient, CompletionError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{LlmConfig, build_http_client, check_status, map_send_error, non_empty};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic completion client
pub struct AnthropicCompletion {
    client: Client,
    api_key: SecretString,
    base_url: String,
    config: LlmConfig,
}

impl AnthropicCompletion {
    pub fn new(api_key: SecretString, config: LlmConfig) -> Result<Self, CompletionError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), config)
    }

    pub fn with_base_url(
        api_key: SecretString,
        base_url: String,
        config: LlmConfig,
    ) -> Result<Self, CompletionError> {
        Ok(Self {
            client: build_http_client(&config)?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    r#type: String,
    #[serde(default)]
    text: String,
}

#[async_trait]
impl CompletionClient for AnthropicCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = AnthropicRequest {
            model: &self.config.model,
            max_tokens: self.config.max_output_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let text = api_response
            .content
            .into_iter()
            .filter(|c| c.r#type == "text")
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        non_empty(text)
    }

    fn provider(&self) -> &'static str {
        "anthropic"
    }
}
