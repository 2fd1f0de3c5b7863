#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::database::entity::post;
    use crate::database::postgres_repo::{PostgresPostRepository, update_statement};
    use crate::database::transaction_log;
    use chrono::{TimeZone, Utc};
    use quill_core::domain::{NewPost, Post, PostChanges};
    use quill_core::error::RepoError;
    use quill_core::ports::PostRepository;
    use sea_orm::{DatabaseBackend, DbConn, MockDatabase, MockExecResult, Transaction, Value};

    fn model(id: i32, title: &str) -> post::Model {
        post::Model {
            id,
            title: title.to_owned(),
            text: Some("Content".to_owned()),
            author: "Alice".to_owned(),
            created: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap().into(),
        }
    }

    fn connect(mock: MockDatabase) -> Arc<DbConn> {
        Arc::new(mock.into_connection())
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = connect(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(3, "Test Post")]]),
        );

        let repo = PostgresPostRepository::new(db.clone());

        let result: Option<Post> = repo.find_by_id(3).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 3);
        assert_eq!(post.created, Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap());
        drop(repo);
        assert_eq!(
            transaction_log(db),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT id, title, text, author, created FROM posts WHERE id = $1",
                [3i32.into()],
            )]
        );
    }

    #[tokio::test]
    async fn test_find_missing_post() {
        let db = connect(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()]),
        );

        let repo = PostgresPostRepository::new(db);

        assert_eq!(repo.find_by_id(8).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_keeps_row_order() {
        let db = connect(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(1, "One"), model(2, "Two")]]),
        );

        let repo = PostgresPostRepository::new(db);

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["One", "Two"]);
    }

    #[tokio::test]
    async fn test_insert_binds_every_field() {
        let db = connect(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([exec(1)]));
        let repo = PostgresPostRepository::new(db.clone());
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        repo.insert(NewPost {
            title: "Hello'); DROP TABLE posts; --".to_owned(),
            text: None,
            author: "Alice".to_owned(),
            created,
        })
        .await
        .unwrap();

        drop(repo);
        assert_eq!(
            transaction_log(db),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "INSERT INTO posts (title, text, author, created) VALUES ($1, $2, $3, $4)",
                [
                    "Hello'); DROP TABLE posts; --".into(),
                    Value::String(None),
                    "Alice".into(),
                    created.into(),
                ],
            )]
        );
    }

    #[tokio::test]
    async fn test_update_sets_only_text() {
        let db = connect(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([exec(1)]));
        let repo = PostgresPostRepository::new(db.clone());

        repo.update(
            4,
            PostChanges {
                title: None,
                text: Some(Some("new body".to_owned())),
            },
        )
        .await
        .unwrap();

        drop(repo);
        assert_eq!(
            transaction_log(db),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE posts SET text = $1 WHERE id = $2",
                ["new body".into(), 4i32.into()],
            )]
        );
    }

    #[test]
    fn test_update_statement_joins_columns() {
        let (sql, values) = update_statement(
            9,
            PostChanges {
                title: Some("Renamed".to_owned()),
                text: Some(None),
            },
        )
        .unwrap();

        assert_eq!(sql, "UPDATE posts SET title = $1, text = $2 WHERE id = $3");
        assert_eq!(values.len(), 3);
        assert!(update_statement(9, PostChanges::default()).is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = connect(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([exec(0)]));

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(repo.delete(77).await, Err(RepoError::NotFound)));
    }
}
