//! HTTP handlers and route configuration.

pub(crate) mod health;
pub(crate) mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .service(
        web::resource("/posts")
            .route(web::get().to(posts::list_posts))
            .route(web::post().to(posts::create_post))
            .route(web::put().to(posts::update_post))
            .route(web::delete().to(posts::delete_post)),
    );
}
