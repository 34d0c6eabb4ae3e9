//! Groq chat-completions client (OpenAI-compatible API).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CompletionClient, LlmError};
use crate::config::LlmConfig;

/// Groq API client
pub struct GroqClient {
    model: String,
    api_key: Option<String>,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqClient {
    /// Create a new client from configuration.
    ///
    /// A missing API key is not an error here; it surfaces as
    /// [`LlmError::NotConfigured`] on the first completion attempt so that
    /// the process can still start and report status.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        // Credential check first: a misconfigured deployment must fail fast
        // and never hit the network.
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        debug!(model = %self.model, prompt_len = prompt.len(), "complete: sending request");

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(LlmError::Network)?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("no completion choices".to_string()))?;

        debug!(content_len = content.len(), "complete: received response");

        Ok(content)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
