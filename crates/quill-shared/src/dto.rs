//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /posts` and `PUT /posts`.
///
/// Missing `title` or `author` deserialize as empty strings so that the
/// domain validation reports them instead of the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PostRequest {
    #[serde(default)]
    #[schema(example = "Hello World")]
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author: String,
}

/// Query string of `PUT /posts` and `DELETE /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Id of the post; absent or zero is rejected.
    pub id: Option<i32>,
}

/// A stored post as returned by `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub text: Option<String>,
    pub author: String,
    pub created: DateTime<Utc>,
}
