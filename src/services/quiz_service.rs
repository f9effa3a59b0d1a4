use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::{
    config::QuizSource,
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuizRequest},
        dto::response::GenerateQuizResponse,
    },
    services::{model_output::parse_model_json, quiz_generator::QuizGenerator},
};

/// Generated quiz before any question is trusted.
#[derive(Debug, Deserialize)]
struct RawQuizPayload {
    #[serde(default)]
    questions: Vec<Value>,
}

pub struct QuizService {
    generator: Arc<dyn QuizGenerator>,
    source: QuizSource,
}

impl QuizService {
    pub fn new(generator: Arc<dyn QuizGenerator>, source: QuizSource) -> Self {
        Self { generator, source }
    }

    pub fn source(&self) -> QuizSource {
        self.source
    }

    pub async fn generate_quiz(&self, request: &QuizRequest) -> AppResult<GenerateQuizResponse> {
        let raw = self.generator.generate(request).await?;

        let payload: RawQuizPayload = parse_model_json(&raw).map_err(|e| {
            log::error!("Failed to parse generated quiz ({}). Raw text: {}", e, raw);
            AppError::ResponseParse("Failed to parse generated quiz".to_string())
        })?;

        let received = payload.questions.len();
        let mut questions = trusted_questions(payload.questions);
        if questions.len() < received {
            log::warn!(
                "Dropped {} of {} generated questions that failed validation",
                received - questions.len(),
                received
            );
        }

        if questions.is_empty() {
            log::error!("Generated quiz ({} source) contained no valid questions", self.source);
            return Err(AppError::ResponseParse(
                "Generated quiz contained no valid questions".to_string(),
            ));
        }

        questions.truncate(request.num_questions as usize);
        log::info!("Returning {} questions from {} source", questions.len(), self.source);

        Ok(GenerateQuizResponse::new(request, questions))
    }
}

fn trusted_questions(raw: Vec<Value>) -> Vec<Question> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Question>(value) {
            Ok(question) => match question.validate() {
                Ok(()) => Some(question),
                Err(e) => {
                    log::warn!("Discarding invalid question \"{}\": {}", question.question, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Discarding malformed question: {}", e);
                None
            }
        })
        .collect()
}
