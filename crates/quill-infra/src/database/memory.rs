//! In-memory post repository - used as fallback when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

struct Table {
    rows: BTreeMap<i32, Post>,
    last_id: i32,
}

/// In-memory post table using a BTreeMap with async RwLock.
///
/// Ids are assigned from a counter starting at 1 and never reused.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<(), RepoError> {
        let mut table = self.table.write().await;

        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("post id sequence exhausted".to_string()))?;
        table.last_id = id;
        table.rows.insert(
            id,
            Post {
                id,
                title: post.title,
                text: post.text,
                author: post.author,
                created: post.created,
            },
        );

        tracing::debug!(post_id = id, "Post stored in memory");
        Ok(())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        let post = table.rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        changes.apply_to(post);
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}
