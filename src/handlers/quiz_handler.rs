use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{domain::QuizRequest, dto::request::GenerateQuizRequestDto},
};

pub async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<GenerateQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = QuizRequest::try_from(body.into_inner())?;

    log::info!(
        "[{}] Generating quiz: {} / {} / {} ({} questions)",
        get_request_id(&req).map(|id| id.to_string()).unwrap_or_default(),
        request.category,
        request.subcategory,
        request.difficulty,
        request.num_questions
    );

    let response = state.quiz_service.generate_quiz(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}
