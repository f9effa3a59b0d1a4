use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_QUESTIONS;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{LearnMoreRequest, QuizRequest};

// Every field is optional on the wire so that absent and blank values are
// reported with the endpoint's own message instead of a deserializer error.

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequestDto {
    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 100))]
    pub subcategory: Option<String>,

    #[validate(range(min = 1, max = MAX_QUESTIONS))]
    pub num_questions: Option<u32>,

    #[validate(length(max = 50))]
    pub difficulty: Option<String>,
}

impl TryFrom<GenerateQuizRequestDto> for QuizRequest {
    type Error = AppError;

    fn try_from(dto: GenerateQuizRequestDto) -> AppResult<Self> {
        let (Some(category), Some(subcategory), Some(num_questions), Some(difficulty)) = (
            present(dto.category.as_deref()),
            present(dto.subcategory.as_deref()),
            dto.num_questions.filter(|n| *n > 0),
            present(dto.difficulty.as_deref()),
        ) else {
            return Err(AppError::missing_fields());
        };

        dto.validate()?;

        Ok(QuizRequest {
            category,
            subcategory,
            num_questions,
            difficulty,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LearnMoreRequestDto {
    #[validate(length(max = 200))]
    pub topic: Option<String>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 100))]
    pub subcategory: Option<String>,

    #[validate(length(max = 50))]
    pub difficulty: Option<String>,
}

impl TryFrom<LearnMoreRequestDto> for LearnMoreRequest {
    type Error = AppError;

    fn try_from(dto: LearnMoreRequestDto) -> AppResult<Self> {
        let (Some(topic), Some(category), Some(subcategory), Some(difficulty)) = (
            present(dto.topic.as_deref()),
            present(dto.category.as_deref()),
            present(dto.subcategory.as_deref()),
            present(dto.difficulty.as_deref()),
        ) else {
            return Err(AppError::InvalidInput(
                "Missing topic, category, subcategory, or difficulty.".to_string(),
            ));
        };

        dto.validate()?;

        Ok(LearnMoreRequest {
            topic,
            category,
            subcategory,
            difficulty,
        })
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
