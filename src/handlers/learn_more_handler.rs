use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::LearnMoreError,
    middleware::get_request_id,
    models::{domain::LearnMoreRequest, dto::request::LearnMoreRequestDto},
};

pub async fn learn_more(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LearnMoreRequestDto>,
) -> Result<HttpResponse, LearnMoreError> {
    // Credential check precedes input validation.
    state.learn_more_service.ensure_configured()?;

    let request = LearnMoreRequest::try_from(body.into_inner())?;
    log::info!(
        "[{}] Learn more: \"{}\"",
        get_request_id(&req).map(|id| id.to_string()).unwrap_or_default(),
        request.topic
    );

    let response = state.learn_more_service.learn_more(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}
