use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, ordered by id.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Store a new post; the id is assigned by the store.
    async fn insert(&self, post: NewPost) -> Result<(), RepoError>;

    /// Write the changed columns of an existing post.
    ///
    /// Returns [`RepoError::NotFound`] when no row has the given id.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<(), RepoError>;

    /// Delete a post by its id.
    ///
    /// Returns [`RepoError::NotFound`] when no row has the given id.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}
