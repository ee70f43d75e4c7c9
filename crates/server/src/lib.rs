//! ReplyAI HTTP Server
//!
//! Actix-web 기반 REST API: 댓글 답변, 콘텐츠 답변, 헬스 체크

pub mod error;
pub mod routes;
pub mod service;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use replyai_common::{AppConfig, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use error::ApiError;
pub use service::ReplyService;
pub use state::AppState;

/// Register the `/api/ai` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/ai")
            .service(routes::ai::reply)
            .service(routes::ai::answer)
            .service(routes::ai::health),
    );
}

/// JSON extractor settings: body limit and error envelope
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(error::json_error_handler)
}

/// Allow any origin (`Access-Control-Allow-Origin: *`)
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Build state from `config` and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let state = web::Data::new(AppState::from_config(&config)?);
    let max_payload = config.max_payload_bytes;

    info!(
        "Serving on {} (model: {}, preprocessor: {:?})",
        config.server_bind_address(),
        config.openai_model,
        config.preprocessor_mode
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(json_config(max_payload))
            .configure(configure)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
