use actix_web::{middleware::Logger, web, App, HttpServer};
use quiz_server::{
    app_state::AppState,
    config::Config,
    handlers,
    middleware::{cors, RequestIdMiddleware},
};

fn io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(io_error)?;
    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origin = config.allowed_origin.clone();

    let state = web::Data::new(AppState::new(config).map_err(io_error)?);

    log::info!("Starting HTTP server on {}:{}", host, port);
    if allowed_origin.is_none() {
        log::warn!("ALLOWED_ORIGIN is not set, accepting requests from any origin");
    }

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(allowed_origin.as_deref()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
