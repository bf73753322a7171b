//! Handlers for the public `/projects` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use folio_db::models::project::{ProjectColumn, ProjectWithTechnologies};
use folio_db::sql::FindOptions;
use folio_db::Record;

use crate::error::AppResult;
use crate::response::Envelope;
use crate::state::AppState;

/// Largest page a client may request.
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for `GET /api/projects`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /api/projects/featured`.
#[derive(Debug, Default, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<i64>,
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ProjectListParams>, QueryRejection>,
) -> AppResult<Json<Envelope<Vec<Record>>>> {
    let Query(params) = params?;
    let mut options = FindOptions::new();
    if let Some(status) = params.status {
        options = options.filter(ProjectColumn::Status, status);
    }
    if let Some(limit) = params.limit {
        options = options.limit(limit.clamp(1, MAX_PAGE_SIZE));
    }
    if let Some(offset) = params.offset {
        options = options.offset(offset.max(0));
    }

    let projects = state.repos.projects.find_published(options).await?;
    Ok(Json(Envelope::list(projects)))
}

/// GET /api/projects/featured
pub async fn featured(
    State(state): State<AppState>,
    params: Result<Query<FeaturedParams>, QueryRejection>,
) -> AppResult<Json<Envelope<Vec<Record>>>> {
    let Query(params) = params?;
    let limit = params.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE));
    let projects = state.repos.projects.find_featured(limit).await?;
    Ok(Json(Envelope::list(projects)))
}

/// GET /api/projects/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Envelope<ProjectWithTechnologies>>> {
    let project = state
        .repos
        .projects
        .find_by_slug_with_technologies(&slug)
        .await?;
    Ok(Json(Envelope::ok(project)))
}
