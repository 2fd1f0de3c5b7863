use std::sync::Arc;

use crate::domain::{CREATED_FORMAT, Post, PostChanges, PostDraft, created_now};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

const ENTITY: &str = "Post";

/// Post use-cases: validation and change detection in front of a repository.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list().await?)
    }

    pub async fn create(
        &self,
        title: String,
        text: Option<String>,
        author: String,
    ) -> Result<(), DomainError> {
        let draft = PostDraft::parse(title, text, author)?;
        let post = draft.into_new_post(created_now());

        tracing::debug!(
            created = %post.created.format(CREATED_FORMAT),
            "Creating post"
        );
        self.repo.insert(post).await?;
        Ok(())
    }

    /// Update title and text of an existing post.
    ///
    /// Submitting values identical to the stored ones is rejected with
    /// [`DomainError::Unchanged`].
    pub async fn update(
        &self,
        id: i32,
        title: String,
        text: Option<String>,
        author: String,
    ) -> Result<(), DomainError> {
        if id == 0 {
            return Err(DomainError::MissingId);
        }
        let draft = PostDraft::parse(title, text, author)?;

        let stored = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            })?;

        let changes = PostChanges::between(&stored, &draft);
        if changes.is_empty() {
            return Err(DomainError::Unchanged {
                entity_type: ENTITY,
                id,
            });
        }

        self.repo
            .update(id, changes)
            .await
            .map_err(|e| not_found_or(e, id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if id == 0 {
            return Err(DomainError::MissingId);
        }
        self.repo.delete(id).await.map_err(|e| not_found_or(e, id))
    }
}

fn not_found_or(err: RepoError, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound {
            entity_type: ENTITY,
            id,
        },
        other => DomainError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::NewPost;

    /// Records every call so tests can assert what reached the store.
    #[derive(Default)]
    struct RecordingRepo {
        stored: Option<Post>,
        calls: Mutex<Vec<String>>,
        inserted: Mutex<Vec<NewPost>>,
        updates: Mutex<Vec<PostChanges>>,
    }

    impl RecordingRepo {
        fn with(post: Post) -> Self {
            Self {
                stored: Some(post),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }
    }

    #[async_trait]
    impl PostRepository for RecordingRepo {
        async fn list(&self) -> Result<Vec<Post>, RepoError> {
            self.record("list");
            Ok(self.stored.iter().cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
            self.record("find_by_id");
            Ok(self.stored.clone().filter(|p| p.id == id))
        }

        async fn insert(&self, post: NewPost) -> Result<(), RepoError> {
            self.record("insert");
            self.inserted.lock().unwrap().push(post);
            Ok(())
        }

        async fn update(&self, id: i32, changes: PostChanges) -> Result<(), RepoError> {
            self.record("update");
            if self.stored.as_ref().is_some_and(|p| p.id == id) {
                self.updates.lock().unwrap().push(changes);
                Ok(())
            } else {
                Err(RepoError::NotFound)
            }
        }

        async fn delete(&self, id: i32) -> Result<(), RepoError> {
            self.record("delete");
            if self.stored.as_ref().is_some_and(|p| p.id == id) {
                Ok(())
            } else {
                Err(RepoError::NotFound)
            }
        }
    }

    fn hello() -> Post {
        Post {
            id: 1,
            title: "Hello World".to_string(),
            text: Some("first".to_string()),
            author: "Alice".to_string(),
            created: created_now(),
        }
    }

    fn service(repo: &Arc<RecordingRepo>) -> PostService {
        PostService::new(repo.clone())
    }

    #[tokio::test]
    async fn test_create_stores_clamped_post() {
        let repo = Arc::new(RecordingRepo::default());
        let long = "t".repeat(350);

        service(&repo)
            .create(long.clone(), None, "Alice".to_string())
            .await
            .unwrap();

        let inserted = repo.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].title, long[..300]);
        assert_eq!(inserted[0].author, "Alice");
    }

    #[tokio::test]
    async fn test_create_rejects_short_title_without_store_call() {
        let repo = Arc::new(RecordingRepo::default());

        let result = service(&repo)
            .create("abc".to_string(), None, "Alice".to_string())
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_with_zero_id_is_rejected_without_store_call() {
        let repo = Arc::new(RecordingRepo::with(hello()));

        let result = service(&repo)
            .update(0, "Hello World".to_string(), None, "Alice".to_string())
            .await;

        assert!(matches!(result, Err(DomainError::MissingId)));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = Arc::new(RecordingRepo::with(hello()));

        let result = service(&repo)
            .update(42, "Hello World".to_string(), None, "Alice".to_string())
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { id: 42, .. })));
        assert_eq!(repo.calls(), vec!["find_by_id"]);
    }

    #[tokio::test]
    async fn test_update_without_differences_is_rejected() {
        let repo = Arc::new(RecordingRepo::with(hello()));

        let result = service(&repo)
            .update(
                1,
                "Hello World".to_string(),
                Some("first".to_string()),
                "Alice".to_string(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Unchanged { id: 1, .. })));
        assert_eq!(repo.calls(), vec!["find_by_id"]);
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_text() {
        let repo = Arc::new(RecordingRepo::with(hello()));

        service(&repo)
            .update(
                1,
                "Hello World".to_string(),
                Some("second".to_string()),
                "Alice".to_string(),
            )
            .await
            .unwrap();

        let updates = repo.updates.lock().unwrap();
        assert_eq!(
            updates.as_slice(),
            &[PostChanges {
                title: None,
                text: Some(Some("second".to_string())),
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_with_zero_id_is_rejected_without_store_call() {
        let repo = Arc::new(RecordingRepo::with(hello()));

        let result = service(&repo).delete(0).await;

        assert!(matches!(result, Err(DomainError::MissingId)));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let repo = Arc::new(RecordingRepo::with(hello()));

        let result = service(&repo).delete(9).await;

        assert!(matches!(result, Err(DomainError::NotFound { id: 9, .. })));
    }
}
