//! Handlers for the public `/technologies` resource.

use axum::extract::State;
use axum::Json;

use folio_db::models::technology::TechnologyGroup;

use crate::error::AppResult;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /api/technologies
///
/// Active technologies grouped by category.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<TechnologyGroup>>>> {
    let groups = state.repos.technologies.find_active_grouped().await?;
    Ok(Json(Envelope::list(groups)))
}
