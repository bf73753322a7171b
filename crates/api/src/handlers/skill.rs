//! Handlers for the public `/skills` resource.

use axum::extract::State;
use axum::Json;

use folio_db::models::skill::SkillGroup;
use folio_db::Record;

use crate::error::AppResult;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /api/skills
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Envelope<Vec<Record>>>> {
    let skills = state.repos.skills.find_with_category(&[]).await?;
    Ok(Json(Envelope::list(skills)))
}

/// GET /api/skills/featured
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<Envelope<Vec<SkillGroup>>>> {
    let groups = state.repos.skills.find_featured_grouped().await?;
    Ok(Json(Envelope::list(groups)))
}
