//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::Post;
use quill_shared::dto::{IdQuery, PostRequest, PostResponse};
use quill_shared::{ApiResponse, ErrorResponse};

use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        author: post.author,
        created: post.created,
    }
}

/// GET /posts
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts in id order", body = ApiResponse<Vec<PostResponse>>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .list()
        .await?
        .into_iter()
        .map(to_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// POST /posts
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created"),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 422, description = "Title or author rejected", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    state.posts.create(req.title, req.text, req.author).await?;

    tracing::info!(request_id = request_id.as_str(), "Post created");
    Ok(HttpResponse::Created().json(ApiResponse::done("Post created")))
}

/// PUT /posts?id={id}
#[utoipa::path(
    put,
    path = "/posts",
    tag = "posts",
    params(IdQuery),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated"),
        (status = 400, description = "Missing, zero or non-numeric id", body = ErrorResponse),
        (status = 404, description = "No post with this id", body = ErrorResponse),
        (status = 422, description = "Invalid fields or nothing changed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    query: web::Query<IdQuery>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    // A missing id is treated like id=0 and rejected by the service
    let id = query.id.unwrap_or_default();
    let req = body.into_inner();

    state
        .posts
        .update(id, req.title, req.text, req.author)
        .await?;

    tracing::info!(request_id = request_id.as_str(), post_id = id, "Post updated");
    Ok(HttpResponse::Ok().json(ApiResponse::done("Post updated")))
}

/// DELETE /posts?id={id}
#[utoipa::path(
    delete,
    path = "/posts",
    tag = "posts",
    params(IdQuery),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 400, description = "Missing, zero or non-numeric id", body = ErrorResponse),
        (status = 404, description = "No post with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    query: web::Query<IdQuery>,
) -> AppResult<HttpResponse> {
    let id = query.id.unwrap_or_default();

    state.posts.delete(id).await?;

    tracing::info!(request_id = request_id.as_str(), post_id = id, "Post deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::done("Post deleted")))
}
