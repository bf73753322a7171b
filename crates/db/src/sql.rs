//! Statement builders for the generic repository.
//!
//! Identifiers come from [`Column`] values and the [`Entity`] table name;
//! every value is bound as a `$n` placeholder cast to its column's type.

use folio_core::types::DbId;

use crate::entity::{Column, Entity};
use crate::executor::Statement;
use crate::value::SqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy<C> {
    pub column: C,
    pub direction: Direction,
}

impl<C: Column> OrderBy<C> {
    pub fn asc(column: C) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: C) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }

    fn render(&self, alias: Option<&str>) -> String {
        match alias {
            Some(alias) => format!(
                "{alias}.{} {}",
                self.column.name(),
                self.direction.as_sql()
            ),
            None => format!("{} {}", self.column.name(), self.direction.as_sql()),
        }
    }
}

/// Render an order list, optionally qualifying columns with a table alias.
pub fn order_clause<C: Column>(order_by: &[OrderBy<C>], alias: Option<&str>) -> String {
    order_by
        .iter()
        .map(|o| o.render(alias))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Options for [`crate::repository::Repository::find_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct FindOptions<C> {
    /// Equality conditions, AND-combined in this order.
    pub conditions: Vec<(C, SqlValue)>,
    pub order_by: Vec<OrderBy<C>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Columns to select; `None` selects `*`.
    pub select: Option<Vec<C>>,
}

impl<C> Default for FindOptions<C> {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            select: None,
        }
    }
}

impl<C: Column> FindOptions<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: C, value: impl Into<SqlValue>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    pub fn order_by(mut self, order: OrderBy<C>) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn select(mut self, columns: Vec<C>) -> Self {
        self.select = Some(columns);
        self
    }
}

/// Push `value` for `column` and return its cast placeholder (`$3::boolean`).
fn placeholder<C: Column>(column: C, value: SqlValue, params: &mut Vec<SqlValue>) -> String {
    let sql_type = column.sql_type();
    params.push(value.coerce_to(sql_type));
    format!("${}::{sql_type}", params.len())
}

/// Build ` WHERE a = $1::t AND b IS NULL` (empty when there are no conditions).
pub fn where_clause<C: Column>(conditions: &[(C, SqlValue)], params: &mut Vec<SqlValue>) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let predicates: Vec<String> = conditions
        .iter()
        .map(|(column, value)| {
            if value.is_null() {
                format!("{} IS NULL", column.name())
            } else {
                format!(
                    "{} = {}",
                    column.name(),
                    placeholder(*column, value.clone(), params)
                )
            }
        })
        .collect();
    format!(" WHERE {}", predicates.join(" AND "))
}

/// `SELECT <select|*> FROM <table> [WHERE ...] [ORDER BY ...] [LIMIT $n] [OFFSET $m]`
pub fn select<E: Entity>(options: &FindOptions<E::Column>) -> Statement {
    let mut params = Vec::new();
    let columns = match &options.select {
        Some(columns) if !columns.is_empty() => columns
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", "),
        _ => "*".to_string(),
    };

    let mut sql = format!("SELECT {columns} FROM {}", E::TABLE);
    sql.push_str(&where_clause(&options.conditions, &mut params));

    if !options.order_by.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order_clause(&options.order_by, None));
    }
    if let Some(limit) = options.limit {
        params.push(SqlValue::Int(limit));
        sql.push_str(&format!(" LIMIT ${}", params.len()));
    }
    if let Some(offset) = options.offset {
        params.push(SqlValue::Int(offset));
        sql.push_str(&format!(" OFFSET ${}", params.len()));
    }

    Statement::query(sql).with_params(params)
}

/// `SELECT * FROM <table> WHERE <column> = $1`
pub fn select_by<E: Entity>(column: E::Column, value: SqlValue) -> Statement {
    select::<E>(&FindOptions::new().filter(column, value))
}

/// `INSERT INTO <table> (...) VALUES (...) RETURNING <pk>`
pub fn insert<E: Entity>(fields: &[(E::Column, SqlValue)]) -> Statement {
    let pk = E::PRIMARY_KEY.name();
    if fields.is_empty() {
        return Statement::insert(format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {pk}",
            E::TABLE
        ));
    }

    let mut params = Vec::with_capacity(fields.len());
    let names: Vec<&str> = fields.iter().map(|(c, _)| c.name()).collect();
    let placeholders: Vec<String> = fields
        .iter()
        .map(|(column, value)| placeholder(*column, value.clone(), &mut params))
        .collect();

    Statement::insert(format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {pk}",
        E::TABLE,
        names.join(", "),
        placeholders.join(", ")
    ))
    .with_params(params)
}

/// `UPDATE <table> SET ... WHERE <pk> = $k AND (<some change differs>)`
///
/// `changes` must be non-empty. The trailing predicate makes the update
/// affect zero rows when the row already holds every requested value;
/// `stamp` (the `updated_at` assignment) does not count as a change.
pub fn update<E: Entity>(
    id: DbId,
    changes: &[(E::Column, SqlValue)],
    stamp: Option<(E::Column, SqlValue)>,
) -> Statement {
    let mut params = Vec::with_capacity(changes.len() + 2);
    let mut assignments = Vec::with_capacity(changes.len() + 1);
    let mut differs = Vec::with_capacity(changes.len());

    for (column, value) in changes {
        let ph = placeholder(*column, value.clone(), &mut params);
        assignments.push(format!("{} = {ph}", column.name()));
        differs.push(format!("{} IS DISTINCT FROM {ph}", column.name()));
    }
    if let Some((column, value)) = stamp {
        let ph = placeholder(column, value, &mut params);
        assignments.push(format!("{} = {ph}", column.name()));
    }
    let id_ph = placeholder(E::PRIMARY_KEY, SqlValue::Int(id), &mut params);

    Statement::command(format!(
        "UPDATE {} SET {} WHERE {} = {id_ph} AND ({})",
        E::TABLE,
        assignments.join(", "),
        E::PRIMARY_KEY.name(),
        differs.join(" OR ")
    ))
    .with_params(params)
}

/// `DELETE FROM <table> WHERE <pk> = $1`
pub fn delete<E: Entity>(id: DbId) -> Statement {
    let mut params = Vec::with_capacity(1);
    let ph = placeholder(E::PRIMARY_KEY, SqlValue::Int(id), &mut params);
    Statement::command(format!(
        "DELETE FROM {} WHERE {} = {ph}",
        E::TABLE,
        E::PRIMARY_KEY.name()
    ))
    .with_params(params)
}

/// `SELECT COUNT(*) FROM <table> [WHERE ...]`
pub fn count<E: Entity>(conditions: &[(E::Column, SqlValue)]) -> Statement {
    let mut params = Vec::new();
    let sql = format!(
        "SELECT COUNT(*) FROM {}{}",
        E::TABLE,
        where_clause(conditions, &mut params)
    );
    Statement::query(sql).with_params(params)
}
