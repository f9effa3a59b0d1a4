pub mod health_handler;
pub mod learn_more_handler;
pub mod quiz_handler;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::{AppError, LearnMoreError};

const LEARN_MORE_PATH: &str = "/api/learn-more";

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use learn_more_handler::learn_more;
pub use quiz_handler::generate_quiz;

/// Registers every route; unsupported methods on the API paths get a 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(
            web::resource("/api/generate-quiz")
                .route(web::post().to(generate_quiz))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource(LEARN_MORE_PATH)
                .route(web::post().to(learn_more))
                .default_service(web::to(method_not_allowed)),
        );
}

/// Malformed JSON bodies become `InvalidInput` instead of actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("Rejecting request body: {}", err);
        let error = AppError::InvalidInput(format!("Invalid JSON body: {}", err));
        if req.path() == LEARN_MORE_PATH {
            LearnMoreError(error).into()
        } else {
            error.into()
        }
    })
}

async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, AppError> {
    log::warn!("{} not allowed on {}", req.method(), req.path());
    Err(AppError::MethodNotAllowed)
}
