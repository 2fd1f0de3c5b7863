//! PostgreSQL post repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DbConn, Value};

use quill_core::domain::{CREATED_FORMAT, NewPost, Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post;
use super::executor::SqlExecutor;

const SELECT_ALL: &str = "SELECT id, title, text, author, created FROM posts ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, title, text, author, created FROM posts WHERE id = $1";
const INSERT: &str = "INSERT INTO posts (title, text, author, created) VALUES ($1, $2, $3, $4)";
const DELETE_BY_ID: &str = "DELETE FROM posts WHERE id = $1";

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    executor: SqlExecutor,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            executor: SqlExecutor::new(db),
        }
    }
}

/// Build an `UPDATE` that sets exactly the changed columns.
///
/// Returns `None` when there is nothing to change.
pub fn update_statement(id: i32, changes: PostChanges) -> Option<(String, Vec<Value>)> {
    let mut assignments = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(title) = changes.title {
        values.push(title.into());
        assignments.push(format!("title = ${}", values.len()));
    }
    if let Some(text) = changes.text {
        values.push(text.into());
        assignments.push(format!("text = ${}", values.len()));
    }
    if assignments.is_empty() {
        return None;
    }

    values.push(id.into());
    let sql = format!(
        "UPDATE posts SET {} WHERE id = ${}",
        assignments.join(", "),
        values.len()
    );
    Some((sql, values))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        self.executor.select(SELECT_ALL, [], post::from_row).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let posts = self
            .executor
            .select(SELECT_BY_ID, [id.into()], post::from_row)
            .await?;

        Ok(posts.into_iter().next())
    }

    async fn insert(&self, post: NewPost) -> Result<(), RepoError> {
        tracing::debug!(
            author = %post.author,
            created = %post.created.format(CREATED_FORMAT),
            "Inserting post"
        );

        let values: [Value; 4] = [
            post.title.into(),
            post.text.into(),
            post.author.into(),
            post.created.into(),
        ];
        self.executor.insert(INSERT, values).await?;
        Ok(())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<(), RepoError> {
        let (sql, values) = update_statement(id, changes)
            .ok_or_else(|| RepoError::Statement("no columns to update".to_string()))?;

        self.executor.update(&sql, values).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.executor.delete(DELETE_BY_ID, [id.into()]).await?;
        Ok(())
    }
}
