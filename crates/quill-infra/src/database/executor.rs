//! Single-statement execution with uniform error classification.
//!
//! [`SqlExecutor`] runs exactly one statement per call. Values are always
//! bound as positional parameters, rows are turned into records by a
//! caller-supplied mapper, and every store failure is logged together with
//! the statement text before being reduced to a [`RepoError`].

use std::fmt;
use std::sync::Arc;

use sea_orm::sqlx::error::ErrorKind;
use sea_orm::{ConnectionTrait, DbConn, DbErr, QueryResult, RuntimeErr, Statement, Value};

use quill_core::error::RepoError;

/// The kind of statement an executor call expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Select,
    Insert,
    Update,
    Delete,
}

impl Verb {
    pub fn keyword(self) -> &'static str {
        match self {
            Verb::Select => "SELECT",
            Verb::Insert => "INSERT",
            Verb::Update => "UPDATE",
            Verb::Delete => "DELETE",
        }
    }

    /// Textual sanity check: the statement is non-blank and mentions the
    /// keyword. This is not a parser.
    pub fn accepts(self, sql: &str) -> bool {
        !sql.trim().is_empty() && sql.to_ascii_uppercase().contains(self.keyword())
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Executes statements against a pooled connection.
pub struct SqlExecutor {
    db: Arc<DbConn>,
}

impl SqlExecutor {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    /// Run a `SELECT` and map every row through `map`, preserving row order.
    pub async fn select<T, F, I>(&self, sql: &str, values: I, map: F) -> Result<Vec<T>, RepoError>
    where
        F: Fn(&QueryResult) -> Result<T, DbErr>,
        I: IntoIterator<Item = Value>,
    {
        check(Verb::Select, sql)?;

        let rows = self
            .db
            .query_all(self.statement(sql, values))
            .await
            .map_err(|e| classify(e, sql))?;

        let records = rows
            .iter()
            .map(map)
            .collect::<Result<Vec<T>, DbErr>>()
            .map_err(|e| classify(e, sql))?;

        tracing::debug!(statement = sql, rows = records.len(), "SELECT executed");
        Ok(records)
    }

    pub async fn insert<I>(&self, sql: &str, values: I) -> Result<u64, RepoError>
    where
        I: IntoIterator<Item = Value>,
    {
        self.write(Verb::Insert, sql, values).await
    }

    pub async fn update<I>(&self, sql: &str, values: I) -> Result<u64, RepoError>
    where
        I: IntoIterator<Item = Value>,
    {
        self.write(Verb::Update, sql, values).await
    }

    pub async fn delete<I>(&self, sql: &str, values: I) -> Result<u64, RepoError>
    where
        I: IntoIterator<Item = Value>,
    {
        self.write(Verb::Delete, sql, values).await
    }

    /// Execute a write statement; zero affected rows is [`RepoError::NotFound`].
    async fn write<I>(&self, verb: Verb, sql: &str, values: I) -> Result<u64, RepoError>
    where
        I: IntoIterator<Item = Value>,
    {
        check(verb, sql)?;

        let result = self
            .db
            .execute(self.statement(sql, values))
            .await
            .map_err(|e| classify(e, sql))?;

        let rows = result.rows_affected();
        if rows == 0 {
            tracing::info!(statement = sql, "{verb} affected no rows");
            return Err(RepoError::NotFound);
        }

        tracing::debug!(statement = sql, rows, "{verb} executed");
        Ok(rows)
    }

    fn statement<I>(&self, sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }
}

fn check(verb: Verb, sql: &str) -> Result<(), RepoError> {
    if verb.accepts(sql) {
        return Ok(());
    }
    tracing::warn!(statement = sql, "Rejected statement: expected {verb}");
    Err(RepoError::Statement(format!("expected a {verb} statement")))
}

/// Reduce a store error to a [`RepoError`], logging it with the statement.
///
/// Connectivity and execution failures are logged as errors; anything else
/// (decoding, row mapping) as a warning.
fn classify(err: DbErr, sql: &str) -> RepoError {
    let message = err.to_string();

    if is_constraint_violation(&err) {
        tracing::error!(statement = sql, error = %message, "Constraint violation");
        return RepoError::Constraint(message);
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            tracing::error!(statement = sql, error = %message, "Database connection failed");
            RepoError::Connection(message)
        }
        DbErr::Exec(_) | DbErr::Query(_) => {
            tracing::error!(statement = sql, error = %message, "Statement failed");
            RepoError::Query(message)
        }
        _ => {
            tracing::warn!(statement = sql, error = %message, "Unexpected database error");
            RepoError::Query(message)
        }
    }
}

/// Integrity violations reported by the database itself.
fn is_constraint_violation(err: &DbErr) -> bool {
    let (DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e))) = err
    else {
        return false;
    };

    e.as_database_error().is_some_and(|db_err| {
        matches!(
            db_err.kind(),
            ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
        )
    })
}
