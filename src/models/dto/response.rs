use serde::Serialize;

use crate::models::domain::{Question, QuizRequest, Resource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateQuizResponse {
    pub category: String,
    pub subcategory: String,
    /// Number of questions actually returned, which may be fewer than requested.
    pub numqs: u32,
    pub difficulty: String,
    pub questions: Vec<Question>,
}

impl GenerateQuizResponse {
    pub fn new(request: &QuizRequest, questions: Vec<Question>) -> Self {
        Self {
            category: request.category.clone(),
            subcategory: request.subcategory.clone(),
            numqs: questions.len() as u32,
            difficulty: request.difficulty.clone(),
            questions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnMoreResponse {
    pub success: bool,
    pub summary: String,
    pub resources: Vec<Resource>,
    pub search_performed: bool,
}

impl LearnMoreResponse {
    pub fn new(summary: String, resources: Vec<Resource>) -> Self {
        Self {
            success: true,
            summary,
            resources,
            search_performed: true,
        }
    }
}
