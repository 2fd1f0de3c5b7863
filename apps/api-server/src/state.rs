//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::PostRepository;
use quill_core::service::PostService;
use quill_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConnections, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            let Some(config) = db_config else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                return Self::in_memory();
            };

            match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let repo: Arc<dyn PostRepository> =
                        Arc::new(PostgresPostRepository::new(connections.main.clone()));
                    tracing::info!("Application state initialized");
                    Self {
                        posts: PostService::new(repo),
                        db: Some(Arc::new(connections)),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Self::in_memory()
        }
    }

    /// State backed by the in-memory repository.
    pub fn in_memory() -> Self {
        let repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        Self {
            posts: PostService::new(repo),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Human-readable database status for the health endpoint.
    pub async fn database_status(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        if let Some(db) = &self.db {
            return if db.is_healthy().await { "up" } else { "down" };
        }
        "in-memory"
    }
}
