//! Generic, table-agnostic record repository.
//!
//! [`Repository<E>`] implements find/create/update/delete/count for any
//! [`Entity`]. Entity-specific queries live in `impl Repository<Project>`
//! (etc.) blocks under [`crate::repositories`].

use std::marker::PhantomData;

use chrono::Utc;
use serde::Serialize;

use folio_core::types::DbId;

use crate::entity::{Column, Entity};
use crate::error::{DbError, ModelError};
use crate::executor::{Executor, QueryOutcome, Statement};
use crate::sql::{self, FindOptions};
use crate::value::{Record, SqlValue};

/// Result of [`Repository::create`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Created {
    pub insert_id: DbId,
    /// The row re-read after the insert (hidden fields stripped).
    pub data: Option<Record>,
}

/// Result of [`Repository::update`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Updated {
    pub data: Record,
    pub affected_rows: u64,
}

/// CRUD access to the table described by `E`.
pub struct Repository<E: Entity> {
    executor: Executor,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self::new(self.executor.clone())
    }
}

impl<E: Entity> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").field("table", &E::TABLE).finish()
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(executor: Executor) -> Self {
        Self {
            executor,
            _entity: PhantomData,
        }
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// List rows matching `options`, hidden fields stripped.
    pub async fn find_all(
        &self,
        options: &FindOptions<E::Column>,
    ) -> Result<Vec<Record>, ModelError> {
        let records = self.executor.fetch_all(&sql::select::<E>(options)).await?;
        Ok(Self::hide_fields(records))
    }

    /// Find a row by primary key. `Ok(None)` when it does not exist.
    pub async fn find_by_id(&self, id: DbId) -> Result<Option<Record>, ModelError> {
        self.find_by(E::PRIMARY_KEY, id).await
    }

    /// Find the first row whose `column` equals `value`.
    pub async fn find_by(
        &self,
        column: E::Column,
        value: impl Into<SqlValue>,
    ) -> Result<Option<Record>, ModelError> {
        let record = self
            .executor
            .fetch_optional(&sql::select_by::<E>(column, value.into()))
            .await?;
        Ok(record.map(Self::hide))
    }

    /// Insert a row from caller data.
    ///
    /// Fields outside the allow-list are dropped. Timestamps are stamped when
    /// the entity maintains them. The new row is re-read by its generated id.
    pub async fn create(&self, data: &Record) -> Result<Created, ModelError> {
        let mut fields = Self::filter_fillable(data);
        if let Some(ts) = E::TIMESTAMPS {
            let now = SqlValue::Timestamp(Utc::now());
            set_field(&mut fields, ts.created_at, now.clone());
            set_field(&mut fields, ts.updated_at, now);
        }

        let result = self.executor.write(&sql::insert::<E>(&fields)).await?;
        let insert_id = result.insert_id.ok_or_else(|| {
            DbError::new(
                format!("Insert into {} returned no id", E::TABLE),
                Some("NO_INSERT_ID"),
            )
        })?;
        tracing::debug!(table = E::TABLE, id = insert_id, "Record created");

        let data = self.find_by_id(insert_id).await?;
        Ok(Created { insert_id, data })
    }

    /// Update a row from caller data.
    ///
    /// Fails with [`ModelError::NotFound`] when no row has `id`, and with
    /// [`ModelError::NoChanges`] when nothing allow-listed was supplied or
    /// the row already holds every requested value.
    pub async fn update(&self, id: DbId, data: &Record) -> Result<Updated, ModelError> {
        let changes = Self::filter_fillable(data);
        self.apply_changes(id, changes).await
    }

    pub(crate) async fn apply_changes(
        &self,
        id: DbId,
        mut changes: Vec<(E::Column, SqlValue)>,
    ) -> Result<Updated, ModelError> {
        let stamp = E::TIMESTAMPS.map(|ts| {
            changes.retain(|(column, _)| *column != ts.updated_at);
            (ts.updated_at, SqlValue::Timestamp(Utc::now()))
        });

        if changes.is_empty() {
            return Err(self.miss(id).await?);
        }

        let result = self
            .executor
            .write(&sql::update::<E>(id, &changes, stamp))
            .await?;
        if result.affected_rows == 0 {
            return Err(self.miss(id).await?);
        }

        let data = self.find_by_id(id).await?.ok_or(ModelError::NotFound {
            entity: E::NAME,
            id,
        })?;
        Ok(Updated {
            data,
            affected_rows: result.affected_rows,
        })
    }

    /// Classify an update that touched nothing.
    async fn miss(&self, id: DbId) -> Result<ModelError, ModelError> {
        Ok(if self.exists(id).await? {
            ModelError::NoChanges {
                entity: E::NAME,
                id,
            }
        } else {
            ModelError::NotFound {
                entity: E::NAME,
                id,
            }
        })
    }

    /// Delete a row. Returns the affected-row count; `0` means no such row.
    pub async fn delete(&self, id: DbId) -> Result<u64, ModelError> {
        let result = self.executor.write(&sql::delete::<E>(id)).await?;
        Ok(result.affected_rows)
    }

    /// Count rows matching equality conditions.
    pub async fn count(&self, conditions: &[(E::Column, SqlValue)]) -> Result<i64, ModelError> {
        Ok(self
            .executor
            .fetch_count(&sql::count::<E>(conditions))
            .await?)
    }

    pub async fn exists(&self, id: DbId) -> Result<bool, ModelError> {
        Ok(self.count(&[(E::PRIMARY_KEY, SqlValue::Int(id))]).await? > 0)
    }

    /// Run a custom statement.
    pub async fn query(&self, statement: &Statement) -> Result<QueryOutcome, ModelError> {
        Ok(self.executor.execute(statement).await?)
    }

    /// Project caller data onto the allow-list, in allow-list order.
    ///
    /// Keys that are not allow-listed (or not columns at all) are dropped.
    pub fn filter_fillable(data: &Record) -> Vec<(E::Column, SqlValue)> {
        E::FILLABLE
            .columns()
            .iter()
            .filter_map(|column| {
                data.get(column.name())
                    .map(|value| (*column, SqlValue::from(value)))
            })
            .collect()
    }

    /// Remove hidden fields from every record.
    pub fn hide_fields(records: Vec<Record>) -> Vec<Record> {
        if E::HIDDEN.is_empty() {
            return records;
        }
        records.into_iter().map(Self::hide).collect()
    }

    fn hide(mut record: Record) -> Record {
        for column in E::HIDDEN {
            record.remove(column.name());
        }
        record
    }
}

fn set_field<C: Column>(fields: &mut Vec<(C, SqlValue)>, column: C, value: SqlValue) {
    match fields.iter_mut().find(|(c, _)| *c == column) {
        Some(entry) => entry.1 = value,
        None => fields.push((column, value)),
    }
}
