use std::{env, fmt, time::Duration};

use secrecy::SecretString;

use crate::{
    constants::{
        DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL, DEFAULT_FIXTURE_DELAY_MS,
        DEFAULT_LIVENESS_TIMEOUT_MS, MAX_LEARN_MORE_RESOURCES,
    },
    errors::{AppError, AppResult},
};

/// Where generated quizzes come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizSource {
    /// The hosted prompt-completion API.
    Live,
    /// The bundled sample quiz, for local development without credentials.
    Fixture,
}

impl QuizSource {
    /// An explicit `QUIZ_SOURCE` wins; otherwise the fixture is used exactly
    /// when no API key is configured.
    pub fn resolve(explicit: Option<&str>, has_api_key: bool) -> AppResult<Self> {
        match explicit.map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "live" => Ok(QuizSource::Live),
            Some(s) if s == "fixture" => Ok(QuizSource::Fixture),
            Some(s) if !s.is_empty() => Err(AppError::Configuration(format!(
                "QUIZ_SOURCE must be 'live' or 'fixture', got '{}'",
                s
            ))),
            _ if has_api_key => Ok(QuizSource::Live),
            _ => Ok(QuizSource::Fixture),
        }
    }
}

impl fmt::Display for QuizSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizSource::Live => write!(f, "live"),
            QuizSource::Fixture => write!(f, "fixture"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub allowed_origin: Option<String>,
    pub openai_api_key: Option<SecretString>,
    pub quiz_prompt_id: String,
    pub quiz_prompt_version: String,
    pub quiz_source: QuizSource,
    pub quiz_fixture_path: Option<String>,
    pub fixture_delay_ms: u64,
    pub anthropic_api_key: Option<SecretString>,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub anthropic_max_tokens: u32,
    pub upstream_timeout_secs: u64,
    pub liveness_timeout_ms: u64,
    pub max_learn_more_resources: usize,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let openai_api_key = secret_var("OPENAI_API_KEY");
        let quiz_source = QuizSource::resolve(
            env::var("QUIZ_SOURCE").ok().as_deref(),
            openai_api_key.is_some(),
        )?;

        Ok(Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: parsed_var("WEB_SERVER_PORT").unwrap_or(8080),
            allowed_origin: optional_var("ALLOWED_ORIGIN"),
            openai_api_key,
            quiz_prompt_id: env::var("QUIZ_PROMPT_ID").unwrap_or_default(),
            quiz_prompt_version: env::var("QUIZ_PROMPT_VERSION").unwrap_or_default(),
            quiz_source,
            quiz_fixture_path: optional_var("QUIZ_FIXTURE_PATH"),
            fixture_delay_ms: parsed_var("FIXTURE_DELAY_MS").unwrap_or(DEFAULT_FIXTURE_DELAY_MS),
            anthropic_api_key: secret_var("ANTHROPIC_API_KEY"),
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            anthropic_model: env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_MODEL.to_string()),
            anthropic_max_tokens: parsed_var("ANTHROPIC_MAX_TOKENS").unwrap_or(1024),
            upstream_timeout_secs: parsed_var("UPSTREAM_TIMEOUT_SECS").unwrap_or(60),
            liveness_timeout_ms: parsed_var("LIVENESS_TIMEOUT_MS")
                .unwrap_or(DEFAULT_LIVENESS_TIMEOUT_MS),
            max_learn_more_resources: parsed_var("MAX_LEARN_MORE_RESOURCES")
                .unwrap_or(MAX_LEARN_MORE_RESOURCES),
        })
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.quiz_source == QuizSource::Live && self.openai_api_key.is_none() {
            return Err(AppError::Configuration(
                "QUIZ_SOURCE is 'live' but OPENAI_API_KEY is not set".to_string(),
            ));
        }

        if self.quiz_source == QuizSource::Live && self.quiz_prompt_id.trim().is_empty() {
            log::warn!("QUIZ_PROMPT_ID is empty, live quiz generation will likely fail");
        }

        if self.liveness_timeout_ms == 0 {
            return Err(AppError::Configuration(
                "LIVENESS_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        if self.max_learn_more_resources == 0 {
            return Err(AppError::Configuration(
                "MAX_LEARN_MORE_RESOURCES must be greater than zero".to_string(),
            ));
        }

        if self.upstream_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "UPSTREAM_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn liveness_timeout(&self) -> Duration {
        Duration::from_millis(self.liveness_timeout_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn fixture_delay(&self) -> Duration {
        Duration::from_millis(self.fixture_delay_ms)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            fixture_delay_ms: 0,
            liveness_timeout_ms: 200,
            ..Self::default()
        }
    }
}

impl Default for Config {
    /// Development settings: no credentials, quizzes served from the fixture.
    fn default() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            allowed_origin: None,
            openai_api_key: None,
            quiz_prompt_id: String::new(),
            quiz_prompt_version: String::new(),
            quiz_source: QuizSource::Fixture,
            quiz_fixture_path: None,
            fixture_delay_ms: DEFAULT_FIXTURE_DELAY_MS,
            anthropic_api_key: None,
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            anthropic_max_tokens: 1024,
            upstream_timeout_secs: 60,
            liveness_timeout_ms: DEFAULT_LIVENESS_TIMEOUT_MS,
            max_learn_more_resources: MAX_LEARN_MORE_RESOURCES,
        }
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn secret_var(key: &str) -> Option<SecretString> {
    optional_var(key).map(SecretString::from)
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
