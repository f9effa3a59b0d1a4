use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_options"))]
pub struct Question {
    #[validate(length(min = 1, max = 2000))]
    pub question: String,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub possible_ans: BTreeMap<OptionKey, String>,
    pub answer: OptionKey,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Mcq, // Multiple choice, two to four options
    Tf,  // True/False, exactly two options
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Copy)]
pub enum OptionKey {
    #[serde(rename = "optionA")]
    A,
    #[serde(rename = "optionB")]
    B,
    #[serde(rename = "optionC")]
    C,
    #[serde(rename = "optionD")]
    D,
}

fn validate_options(question: &Question) -> Result<(), ValidationError> {
    let count = question.possible_ans.len();
    let allowed = match question.question_type {
        QuestionType::Mcq => 2..=4,
        QuestionType::Tf => 2..=2,
    };
    if !allowed.contains(&count) {
        return Err(ValidationError::new("option_count"));
    }

    if question.possible_ans.values().any(|text| text.trim().is_empty()) {
        return Err(ValidationError::new("empty_option"));
    }

    if !question.possible_ans.contains_key(&question.answer) {
        return Err(ValidationError::new("answer_not_in_options"));
    }

    Ok(())
}

/// A validated quiz generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRequest {
    pub category: String,
    pub subcategory: String,
    pub num_questions: u32,
    pub difficulty: String,
}
