use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::{
    config::Config,
    constants::{ANTHROPIC_API_VERSION, WEB_SEARCH_TOOL_NAME, WEB_SEARCH_TOOL_TYPE},
    errors::{AppError, AppResult},
    models::domain::ModelMessage,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResearchPrompt {
    pub system: String,
    pub user: String,
}

/// A language model that answers a prompt with the web search tool available.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResearchModel: Send + Sync {
    async fn research(&self, prompt: &ResearchPrompt) -> AppResult<ModelMessage>;
}

/// Messages API client with the `web_search` server tool enabled.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, api_key: SecretString, config: &Config) -> Self {
        Self {
            http,
            api_key,
            base_url: config.anthropic_base_url.trim_end_matches('/').to_string(),
            model: config.anthropic_model.clone(),
            max_tokens: config.anthropic_max_tokens,
            timeout: config.upstream_timeout(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn request_body(&self, prompt: &ResearchPrompt) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": prompt.system,
            "tools": [{ "type": WEB_SEARCH_TOOL_TYPE, "name": WEB_SEARCH_TOOL_NAME }],
            "messages": [{ "role": "user", "content": prompt.user }],
        })
    }
}

#[async_trait]
impl ResearchModel for AnthropicClient {
    async fn research(&self, prompt: &ResearchPrompt) -> AppResult<ModelMessage> {
        let response = self
            .http
            .post(self.messages_url())
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&self.request_body(prompt))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to send request to model API: {}", e);
                AppError::UpstreamCall(format!("Failed to reach model API: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            log::error!("Model API returned {}: {}", status, body);
            return Err(AppError::UpstreamCall(format!(
                "Model API returned {}: {}",
                status, body
            )));
        }

        response.json::<ModelMessage>().await.map_err(|e| {
            log::error!("Failed to decode model API response: {}", e);
            AppError::UpstreamCall(format!("Failed to decode model API response: {}", e))
        })
    }
}
