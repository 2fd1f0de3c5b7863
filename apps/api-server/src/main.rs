//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;

mod config;
mod handlers;
mod middleware;
mod observability;
mod openapi;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    telemetry::init_telemetry(&config.telemetry);

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(config.database.as_ref()).await;

    let api_doc = config.swagger_ui.then(|| {
        tracing::info!("Swagger UI enabled at /swagger-ui/");
        openapi::ApiDoc::openapi()
    });

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
            .configure(|cfg| {
                if let Some(doc) = &api_doc {
                    openapi::configure(cfg, doc.clone());
                }
            })
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
