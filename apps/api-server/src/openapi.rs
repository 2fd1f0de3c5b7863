//! OpenAPI document and Swagger UI.

use actix_web::web;
use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa_swagger_ui::SwaggerUi;

use quill_shared::dto::{PostRequest, PostResponse};
use quill_shared::ErrorResponse;

use crate::handlers::{health, posts};

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill API",
        description = "Create, list, update and delete posts"
    ),
    paths(
        posts::list_posts,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        health::health_check,
    ),
    components(schemas(PostRequest, PostResponse, ErrorResponse, health::HealthResponse)),
    tags(
        (name = "posts", description = "Post management"),
        (name = "health", description = "Liveness and store status")
    )
)]
pub struct ApiDoc;

/// Mount the Swagger UI and the document it renders.
pub fn configure(cfg: &mut web::ServiceConfig, doc: OpenApiDoc) {
    cfg.service(SwaggerUi::new("/swagger-ui/{_:.*}").url(OPENAPI_JSON, doc));
}
