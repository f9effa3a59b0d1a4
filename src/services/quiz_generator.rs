use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::{
    constants::SAMPLE_QUIZ_RESPONSE,
    errors::{AppError, AppResult},
    models::domain::QuizRequest,
};

/// Produces the raw text of a generated quiz; parsing happens in `QuizService`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(&self, request: &QuizRequest) -> AppResult<String>;
}

/// Runs the stored quiz prompt through the OpenAI Responses API.
pub struct OpenAiQuizGenerator {
    client: Client<OpenAIConfig>,
    prompt_id: String,
    prompt_version: String,
}

impl OpenAiQuizGenerator {
    pub fn new(api_key: &SecretString, prompt_id: String, prompt_version: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        Self {
            client: Client::with_config(config),
            prompt_id,
            prompt_version,
        }
    }

    fn request_body(&self, request: &QuizRequest) -> Value {
        json!({
            "prompt": {
                "id": self.prompt_id,
                "version": self.prompt_version,
                "variables": {
                    "category": request.category,
                    "subcategory": request.subcategory,
                    "difficulty": request.difficulty,
                    "numqs": request.num_questions.to_string(),
                }
            }
        })
    }
}

#[async_trait]
impl QuizGenerator for OpenAiQuizGenerator {
    async fn generate(&self, request: &QuizRequest) -> AppResult<String> {
        log::info!(
            "Generating {} {} questions on {} / {} with the live model",
            request.num_questions,
            request.difficulty,
            request.category,
            request.subcategory
        );

        let response: Value = self
            .client
            .responses()
            .create_byot(self.request_body(request))
            .await
            .map_err(|e| {
                log::error!("Quiz generation request failed: {}", e);
                AppError::from(e)
            })?;

        output_text(&response).ok_or_else(|| {
            log::error!("Quiz generation response had no output text: {}", response);
            AppError::ResponseParse("Failed to parse generated quiz".to_string())
        })
    }
}

/// Concatenates the `output_text` parts of a Responses API result.
fn output_text(response: &Value) -> Option<String> {
    if let Some(text) = response.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let text: String = response
        .get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    (!text.is_empty()).then_some(text)
}

/// Serves the bundled sample quiz, or one read from disk, after a simulated delay.
pub struct FixtureQuizGenerator {
    path: Option<String>,
    delay: Duration,
}

impl FixtureQuizGenerator {
    pub fn new(path: Option<String>, delay: Duration) -> Self {
        Self { path, delay }
    }
}

#[async_trait]
impl QuizGenerator for FixtureQuizGenerator {
    async fn generate(&self, request: &QuizRequest) -> AppResult<String> {
        log::info!(
            "No live quiz source configured, serving sample quiz for {} / {}",
            request.category,
            request.subcategory
        );

        let body = match &self.path {
            Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                log::error!("Failed to read quiz fixture {}: {}", path, e);
                AppError::Configuration(
                    "No API key configured and no mock data found. Provide a readable QUIZ_FIXTURE_PATH or set OPENAI_API_KEY."
                        .to_string(),
                )
            })?,
            None => SAMPLE_QUIZ_RESPONSE.to_string(),
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(body)
    }
}
