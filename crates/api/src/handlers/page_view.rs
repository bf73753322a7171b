//! Handlers for page view tracking.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use folio_core::types::Timestamp;
use folio_db::models::page_view::{DateRange, NewPageView, TopProject};

use super::{client_ip, user_agent};
use crate::error::AppResult;
use crate::response::Envelope;
use crate::state::AppState;

/// Request body for `POST /api/page-views`.
#[derive(Debug, Deserialize, Validate)]
pub struct PageViewForm {
    #[validate(length(min = 1, max = 50))]
    pub page_type: String,
    #[validate(length(max = 255))]
    pub page_identifier: Option<String>,
    #[validate(length(max = 2048))]
    pub referer: Option<String>,
}

/// Query parameters for `GET /api/page-views/top-projects`.
#[derive(Debug, Default, Deserialize)]
pub struct TopProjectsParams {
    pub limit: Option<i64>,
    pub date_from: Option<Timestamp>,
    pub date_to: Option<Timestamp>,
}

/// POST /api/page-views
pub async fn track(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<PageViewForm>,
) -> AppResult<(StatusCode, Json<Envelope<()>>)> {
    input.validate()?;

    let view = NewPageView {
        page_type: input.page_type,
        page_identifier: input.page_identifier,
        ip_address: client_ip(&headers),
        user_agent: user_agent(&headers),
        referer: input.referer,
    };
    let id = state.repos.page_views.track(&view).await?;

    Ok((StatusCode::CREATED, Json(Envelope::created(id, None))))
}

/// GET /api/page-views/top-projects
pub async fn top_projects(
    State(state): State<AppState>,
    params: Result<Query<TopProjectsParams>, QueryRejection>,
) -> AppResult<Json<Envelope<Vec<TopProject>>>> {
    let Query(params) = params?;
    let range = DateRange {
        date_from: params.date_from,
        date_to: params.date_to,
    };
    let limit = params.limit.map(|l| l.clamp(1, 100));
    let projects = state
        .repos
        .page_views
        .get_top_projects(limit, &range)
        .await?;
    Ok(Json(Envelope::list(projects)))
}
