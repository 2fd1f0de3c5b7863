//! Database connection management and post repositories.

mod config;
mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
pub mod executor;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

pub use config::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
#[cfg(feature = "postgres")]
pub use executor::{SqlExecutor, Verb};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;

/// Drain the statements recorded by a mock connection.
///
/// Every executor and repository holding the connection must be dropped first.
#[cfg(feature = "postgres")]
#[cfg(test)]
pub(crate) fn transaction_log(db: std::sync::Arc<sea_orm::DbConn>) -> Vec<sea_orm::Transaction> {
    match std::sync::Arc::try_unwrap(db) {
        Ok(db) => db.into_transaction_log(),
        Err(_) => panic!("mock connection is still shared"),
    }
}
