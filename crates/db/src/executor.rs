//! Query executor: runs statements against the pool and normalizes results.
//!
//! Every row comes back as a [`Record`] (the statement is wrapped in
//! `WITH r AS (...) SELECT row_to_json(r) FROM r`), every write as a
//! [`WriteResult`], and every fault as a [`DbError`] that has already been
//! logged. Nothing is retried.

use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgExecutor};
use sqlx::{Either, Executor as _, Postgres, Row};

use folio_core::types::DbId;

use crate::error::DbError;
use crate::value::{Record, SqlValue};
use crate::DbPool;

/// What a statement produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Returns rows. Data-modifying statements need a `RETURNING` clause.
    Query,
    /// Inserts rows. With `RETURNING id` the first returned id is reported.
    Insert,
    /// Returns only an affected-row count.
    Command,
}

/// SQL text with `$n` placeholders and the values bound to them, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    kind: StatementKind,
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(kind: StatementKind, sql: impl Into<String>) -> Self {
        Self {
            kind,
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn query(sql: impl Into<String>) -> Self {
        Self::new(StatementKind::Query, sql)
    }

    pub fn insert(sql: impl Into<String>) -> Self {
        Self::new(StatementKind::Insert, sql)
    }

    pub fn command(sql: impl Into<String>) -> Self {
        Self::new(StatementKind::Command, sql)
    }

    /// Append the value for the next placeholder.
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn with_params(mut self, params: Vec<SqlValue>) -> Self {
        self.params = params;
        self
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    fn arguments(&self) -> Result<PgArguments, sqlx::Error> {
        let mut args = PgArguments::default();
        for value in &self.params {
            value.add_to(&mut args).map_err(sqlx::Error::Encode)?;
        }
        Ok(args)
    }
}

/// Metadata of a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WriteResult {
    pub insert_id: Option<DbId>,
    pub affected_rows: u64,
}

/// Result of [`Executor::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(Vec<Record>),
    Write(WriteResult),
}

impl QueryOutcome {
    pub fn into_rows(self) -> Vec<Record> {
        match self {
            QueryOutcome::Rows(rows) => rows,
            QueryOutcome::Write(_) => Vec::new(),
        }
    }

    pub fn write_result(&self) -> WriteResult {
        match self {
            QueryOutcome::Rows(rows) => WriteResult {
                insert_id: None,
                affected_rows: rows.len() as u64,
            },
            QueryOutcome::Write(result) => *result,
        }
    }
}

/// Runs statements on a shared connection pool.
///
/// Cheap to clone; all clones share the pool.
#[derive(Debug, Clone)]
pub struct Executor {
    pool: DbPool,
}

impl Executor {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Run a single statement.
    pub async fn execute(&self, statement: &Statement) -> Result<QueryOutcome, DbError> {
        run(&self.pool, statement)
            .await
            .map_err(|err| log_failure(statement, err))
    }

    /// Run a statement and return its rows.
    pub async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Record>, DbError> {
        Ok(self.execute(statement).await?.into_rows())
    }

    /// Run a statement and return its first row, if any.
    pub async fn fetch_optional(&self, statement: &Statement) -> Result<Option<Record>, DbError> {
        Ok(self.fetch_all(statement).await?.into_iter().next())
    }

    /// Run a statement and decode every row into `T`.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        statement: &Statement,
    ) -> Result<Vec<T>, DbError> {
        self.fetch_all(statement)
            .await?
            .into_iter()
            .map(|record| {
                serde_json::from_value(Value::Object(record)).map_err(|e| {
                    let err = DbError::new(format!("Failed to decode row: {e}"), Some("DECODE_ERROR"));
                    tracing::error!(error = %err, sql = statement.sql(), "Row decoding failed");
                    err
                })
            })
            .collect()
    }

    /// Run a statement whose single column is a `bigint` count.
    pub async fn fetch_count(&self, statement: &Statement) -> Result<i64, DbError> {
        let result = async {
            let args = statement.arguments()?;
            sqlx::query_scalar_with::<Postgres, i64, _>(statement.sql(), args)
                .fetch_one(&self.pool)
                .await
        }
        .await;
        result.map_err(|err| log_failure(statement, err))
    }

    /// Run a write and return its metadata.
    pub async fn write(&self, statement: &Statement) -> Result<WriteResult, DbError> {
        Ok(self.execute(statement).await?.write_result())
    }

    /// Run `statements` in order inside one transaction on one connection.
    ///
    /// Commits only if every statement succeeds. On the first failure the
    /// transaction is rolled back, the connection goes back to the pool and
    /// the remaining statements are never sent.
    pub async fn run_transaction(
        &self,
        statements: &[Statement],
    ) -> Result<Vec<QueryOutcome>, DbError> {
        let mut tx = self.pool.begin().await.map_err(|err| {
            let err = DbError::from(err);
            tracing::error!(error = %err, code = ?err.code, "Failed to begin transaction");
            err
        })?;

        let mut outcomes = Vec::with_capacity(statements.len());
        for (index, statement) in statements.iter().enumerate() {
            match run(&mut *tx, statement).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    let err = log_failure(statement, err);
                    if let Err(rollback_err) = tx.rollback().await {
                        tracing::error!(error = %rollback_err, "Transaction rollback failed");
                    }
                    tracing::error!(
                        failed_statement = index,
                        total = statements.len(),
                        "Transaction rolled back"
                    );
                    return Err(err);
                }
            }
        }

        tx.commit().await.map_err(|err| {
            let err = DbError::from(err);
            tracing::error!(error = %err, code = ?err.code, "Transaction commit failed");
            err
        })?;
        Ok(outcomes)
    }
}

async fn run<'e, X>(executor: X, statement: &Statement) -> Result<QueryOutcome, sqlx::Error>
where
    X: PgExecutor<'e>,
{
    let args = statement.arguments()?;
    match statement.kind() {
        StatementKind::Query => {
            let wrapped = format!(
                "WITH r AS ({}) SELECT row_to_json(r) FROM r",
                trimmed(statement.sql())
            );
            let rows = sqlx::query_scalar_with::<Postgres, Value, _>(&wrapped, args)
                .fetch_all(executor)
                .await?;
            Ok(QueryOutcome::Rows(
                rows.into_iter()
                    .filter_map(|row| match row {
                        Value::Object(record) => Some(record),
                        _ => None,
                    })
                    .collect(),
            ))
        }
        StatementKind::Insert => {
            // A plain INSERT or an `ON CONFLICT DO NOTHING` miss returns no row.
            let mut results = executor.fetch_many(sqlx::query_with(statement.sql(), args));
            let mut result = WriteResult::default();
            while let Some(item) = results.try_next().await? {
                match item {
                    Either::Left(done) => result.affected_rows += done.rows_affected(),
                    Either::Right(row) if result.insert_id.is_none() => {
                        result.insert_id = Some(row.try_get::<DbId, _>(0)?);
                    }
                    Either::Right(_) => {}
                }
            }
            Ok(QueryOutcome::Write(result))
        }
        StatementKind::Command => {
            let result = sqlx::query_with(statement.sql(), args)
                .execute(executor)
                .await?;
            Ok(QueryOutcome::Write(WriteResult {
                insert_id: None,
                affected_rows: result.rows_affected(),
            }))
        }
    }
}

/// Statement text without trailing semicolons, so it can be embedded.
fn trimmed(sql: &str) -> &str {
    sql.trim_end().trim_end_matches(';').trim_end()
}

fn log_failure(statement: &Statement, err: sqlx::Error) -> DbError {
    let err = DbError::from(err);
    tracing::error!(
        error = %err,
        code = ?err.code,
        sql = statement.sql(),
        "Database query error"
    );
    err
}
