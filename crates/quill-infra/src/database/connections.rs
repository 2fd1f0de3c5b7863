use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

use super::DatabaseConfig;

/// Pooled connection to the posts database.
///
/// Every statement borrows a connection from the pool for its own duration
/// and hands it back on all exit paths; the pool never grows beyond
/// [`DatabaseConfig::max_connections`].
pub struct DatabaseConnections {
    pub main: Arc<DbConn>,
}

impl DatabaseConnections {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connections...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(
            "Posts database connected (pool: {}..{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self {
            main: Arc::new(main),
        })
    }

    /// Check that a connection can be acquired and used.
    pub async fn is_healthy(&self) -> bool {
        match self.main.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database ping failed");
                false
            }
        }
    }
}
