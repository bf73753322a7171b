//! Integration tests for the generic repository and the executor.
//!
//! Exercises CRUD against a real database to verify that:
//! - Writes only touch allow-listed columns
//! - Update misses are reported as `NotFound` or `NoChanges`
//! - Missing rows are `Ok(None)` / `Ok(0)`, not errors
//! - Transactions either commit everything or nothing

use assert_matches::assert_matches;
use serde_json::json;
use sqlx::PgPool;

use folio_db::models::category::CategoryColumn;
use folio_db::models::project::ProjectColumn;
use folio_db::repositories::Repositories;
use folio_db::sql::{FindOptions, OrderBy};
use folio_db::{Executor, ModelError, QueryOutcome, Record, SqlValue, Statement};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

fn repos(pool: PgPool) -> Repositories {
    Repositories::new(Executor::new(pool))
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_drops_fields_outside_allow_list(pool: PgPool) {
    let repos = repos(pool);
    let created = repos
        .projects
        .create(&record(json!({
            "title": "Folio",
            "slug": "folio",
            "sort_order": 4,
            "id": 999,
            "views": 12,
            "created_at": "1999-01-01T00:00:00Z",
        })))
        .await
        .unwrap();

    assert_ne!(created.insert_id, 999);
    let data = created.data.expect("created row should be re-read");
    assert_eq!(data["id"], json!(created.insert_id));
    assert_eq!(data["title"], "Folio");
    assert_eq!(data["slug"], "folio");
    assert_eq!(data["sort_order"], 4);
    assert!(!data.contains_key("views"));
    assert_ne!(data["created_at"], "1999-01-01T00:00:00Z");
    assert_eq!(data["created_at"], data["updated_at"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_id_missing_is_none(pool: PgPool) {
    let repos = repos(pool);
    assert!(repos.projects.find_by_id(424242).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_all_applies_every_option(pool: PgPool) {
    let repos = repos(pool);
    for (name, sort) in [("c", 3), ("a", 1), ("b", 2), ("d", 4)] {
        repos
            .categories
            .create(&record(json!({ "name": name, "slug": name, "sort_order": sort })))
            .await
            .unwrap();
    }

    let options = FindOptions::new()
        .order_by(OrderBy::asc(CategoryColumn::SortOrder))
        .limit(2)
        .offset(1)
        .select(vec![CategoryColumn::Name]);
    let rows = repos.categories.find_all(&options).await.unwrap();

    assert_eq!(rows, vec![record(json!({"name": "b"})), record(json!({"name": "c"}))]);

    let matching = repos
        .categories
        .count(&[(CategoryColumn::Slug, SqlValue::from("d"))])
        .await
        .unwrap();
    assert_eq!(matching, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_null_condition_matches_null_columns(pool: PgPool) {
    let repos = repos(pool);
    repos
        .categories
        .create(&record(json!({ "name": "With", "slug": "with", "color": "#fff" })))
        .await
        .unwrap();
    repos
        .categories
        .create(&record(json!({ "name": "Without", "slug": "without" })))
        .await
        .unwrap();

    let rows = repos
        .categories
        .find_all(&FindOptions::new().filter(CategoryColumn::Color, None::<String>))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["slug"], "without");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_violation_keeps_database_code(pool: PgPool) {
    let repos = repos(pool);
    let data = record(json!({ "title": "One", "slug": "same" }));
    repos.projects.create(&data).await.unwrap();

    let err = repos.projects.create(&data).await.unwrap_err();
    assert_matches!(&err, ModelError::Database(db) if db.is_unique_violation());
    assert_eq!(err.code(), Some("23505"));
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_returns_fresh_row(pool: PgPool) {
    let repos = repos(pool);
    let created = repos
        .projects
        .create(&record(json!({ "title": "Old", "slug": "old" })))
        .await
        .unwrap();

    let updated = repos
        .projects
        .update(
            created.insert_id,
            &record(json!({ "title": "New", "is_published": 1, "bogus": true })),
        )
        .await
        .unwrap();

    assert_eq!(updated.affected_rows, 1);
    assert_eq!(updated.data["title"], "New");
    assert_eq!(updated.data["is_published"], true);
    assert_eq!(updated.data["slug"], "old");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_misses_are_classified(pool: PgPool) {
    let repos = repos(pool);
    let id = repos
        .projects
        .create(&record(json!({ "title": "Same", "slug": "same" })))
        .await
        .unwrap()
        .insert_id;

    let err = repos.projects.update(id, &Record::new()).await.unwrap_err();
    assert_matches!(err, ModelError::NoChanges { entity: "Project", .. });

    let err = repos
        .projects
        .update(id, &record(json!({ "unknown": 1 })))
        .await
        .unwrap_err();
    assert_matches!(err, ModelError::NoChanges { .. });

    let err = repos
        .projects
        .update(id, &record(json!({ "title": "Same" })))
        .await
        .unwrap_err();
    assert_matches!(err, ModelError::NoChanges { id: miss, .. } if miss == id);

    let err = repos
        .projects
        .update(id + 1000, &record(json!({ "title": "Other" })))
        .await
        .unwrap_err();
    assert_matches!(err, ModelError::NotFound { entity: "Project", .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_reports_affected_rows(pool: PgPool) {
    let repos = repos(pool);
    let id = repos
        .categories
        .create(&record(json!({ "name": "Gone", "slug": "gone" })))
        .await
        .unwrap()
        .insert_id;

    assert_eq!(repos.categories.delete(id).await.unwrap(), 1);
    assert_eq!(repos.categories.delete(id).await.unwrap(), 0);
    assert!(!repos.categories.exists(id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_query_passes_custom_statements_through(pool: PgPool) {
    let repos = repos(pool);
    repos
        .projects
        .create(&record(json!({ "title": "A", "slug": "a", "sort_order": 7 })))
        .await
        .unwrap();

    let outcome = repos
        .projects
        .query(
            &Statement::query("SELECT slug, sort_order * 2 AS doubled FROM projects WHERE slug = $1")
                .bind("a"),
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        QueryOutcome::Rows(vec![record(json!({ "slug": "a", "doubled": 14 }))])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transaction_commits_all_statements(pool: PgPool) {
    let executor = Executor::new(pool.clone());
    let outcomes = executor
        .run_transaction(&[
            Statement::insert("INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id")
                .bind("A")
                .bind("a"),
            Statement::command("UPDATE categories SET sort_order = 5 WHERE slug = $1").bind("a"),
        ])
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].write_result().insert_id.is_some());
    assert_eq!(outcomes[1].write_result().affected_rows, 1);

    let sort: (i32,) = sqlx::query_as("SELECT sort_order FROM categories WHERE slug = 'a'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sort.0, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transaction_rolls_back_on_failure(pool: PgPool) {
    let executor = Executor::new(pool.clone());
    let err = executor
        .run_transaction(&[
            Statement::command("INSERT INTO categories (name, slug) VALUES ('A', 'a')"),
            Statement::command("INSERT INTO categories (name, slug) VALUES ('B', 'a')"),
            Statement::command("INSERT INTO categories (name, slug) VALUES ('C', 'c')"),
        ])
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "no statement of a failed transaction may persist");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_syntax_errors_surface_as_database_errors(pool: PgPool) {
    let executor = Executor::new(pool);
    let err = executor
        .execute(&Statement::query("SELEC 1"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("42601"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_without_returning_reports_no_id(pool: PgPool) {
    let executor = Executor::new(pool.clone());
    let result = executor
        .write(&Statement::insert(
            "INSERT INTO categories (name, slug) VALUES ('A', 'a')",
        ))
        .await
        .unwrap();
    assert_eq!(result.insert_id, None);
    assert_eq!(result.affected_rows, 1);

    let outcomes = executor
        .run_transaction(&[Statement::insert(
            "INSERT INTO categories (name, slug) VALUES ('B', 'b')",
        )])
        .await
        .unwrap();
    assert_eq!(outcomes[0].write_result().affected_rows, 1);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 2, "both inserts must be committed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_conflict_do_nothing_is_not_an_error(pool: PgPool) {
    let executor = Executor::new(pool);
    let insert = Statement::insert(
        "INSERT INTO categories (name, slug) VALUES ($1, $2) \
         ON CONFLICT (slug) DO NOTHING RETURNING id",
    )
    .bind("A")
    .bind("a");

    let first = executor.write(&insert).await.unwrap();
    assert!(first.insert_id.is_some());
    assert_eq!(first.affected_rows, 1);

    let second = executor.write(&insert).await.unwrap();
    assert_eq!(second.insert_id, None);
    assert_eq!(second.affected_rows, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_query_accepts_returning_writes_and_trailing_semicolons(pool: PgPool) {
    let executor = Executor::new(pool);

    let rows = executor
        .fetch_all(
            &Statement::query("INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING slug")
                .bind("A")
                .bind("a"),
        )
        .await
        .unwrap();
    assert_eq!(rows, vec![record(json!({ "slug": "a" }))]);

    let rows = executor
        .fetch_all(&Statement::query("SELECT 1 AS x;"))
        .await
        .unwrap();
    assert_eq!(rows, vec![record(json!({ "x": 1 }))]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_order_columns_are_typed(pool: PgPool) {
    let repos = repos(pool);
    for (slug, sort) in [("b", 2), ("a", 1)] {
        repos
            .projects
            .create(&record(json!({ "title": slug, "slug": slug, "sort_order": sort })))
            .await
            .unwrap();
    }
    let rows = repos
        .projects
        .find_all(&FindOptions::new().order_by(OrderBy::desc(ProjectColumn::SortOrder)))
        .await
        .unwrap();
    let slugs: Vec<_> = rows.iter().map(|r| r["slug"].clone()).collect();
    assert_eq!(slugs, vec![json!("b"), json!("a")]);
}
