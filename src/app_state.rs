use std::sync::Arc;

use crate::{
    config::{Config, QuizSource},
    errors::{AppError, AppResult},
    services::{
        anthropic_client::{AnthropicClient, ResearchModel},
        learn_more_service::LearnMoreService,
        liveness::HttpLivenessProbe,
        quiz_generator::{FixtureQuizGenerator, OpenAiQuizGenerator, QuizGenerator},
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub learn_more_service: Arc<LearnMoreService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let generator: Arc<dyn QuizGenerator> = match (config.quiz_source, &config.openai_api_key) {
            (QuizSource::Live, Some(api_key)) => Arc::new(OpenAiQuizGenerator::new(
                api_key,
                config.quiz_prompt_id.clone(),
                config.quiz_prompt_version.clone(),
            )),
            (QuizSource::Live, None) => {
                return Err(AppError::Configuration(
                    "QUIZ_SOURCE is 'live' but OPENAI_API_KEY is not set".to_string(),
                ))
            }
            (QuizSource::Fixture, _) => Arc::new(FixtureQuizGenerator::new(
                config.quiz_fixture_path.clone(),
                config.fixture_delay(),
            )),
        };
        log::info!("Quiz source: {}", config.quiz_source);
        let quiz_service = Arc::new(QuizService::new(generator, config.quiz_source));

        let research_model = config.anthropic_api_key.as_ref().map(|api_key| {
            Arc::new(AnthropicClient::new(http.clone(), api_key.clone(), &config))
                as Arc<dyn ResearchModel>
        });
        if research_model.is_none() {
            log::warn!("ANTHROPIC_API_KEY is not set, learn-more requests will be rejected");
        }
        let probe = Arc::new(HttpLivenessProbe::new(http, config.liveness_timeout()));
        let learn_more_service = Arc::new(LearnMoreService::new(
            research_model,
            probe,
            config.max_learn_more_resources,
        ));

        Ok(Self::from_services(config, quiz_service, learn_more_service))
    }

    /// Assembles state from prebuilt services, e.g. with test doubles.
    pub fn from_services(
        config: Config,
        quiz_service: Arc<QuizService>,
        learn_more_service: Arc<LearnMoreService>,
    ) -> Self {
        Self {
            quiz_service,
            learn_more_service,
            config: Arc::new(config),
        }
    }
}
